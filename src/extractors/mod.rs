pub mod classify;
pub mod fields;
pub mod listing;
pub mod sample_extractor;
pub mod slug;

pub use classify::{determine_category, extract_varietal};
pub use fields::{
    clean_text, extract_alcohol_content, extract_number, extract_volume_ml, extract_year,
    parse_price,
};
pub use listing::{RawListing, normalize_listing};
pub use sample_extractor::{Extraction, ExtractionStats, Extractor, SampleExtractor};
pub use slug::{generate_slug, slug_base};

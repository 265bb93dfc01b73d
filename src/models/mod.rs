mod outcome;
mod price;
mod product;
mod seller;

pub use outcome::IngestionOutcome;
pub use price::PriceSnapshot;
pub use product::{
    CriticScores, ProductRecord, ProductRow, ProductSummary, ProductType, SAMPLE_SOURCE,
    STANDARD_VOLUMES_ML, SYNTHETIC_SOURCE,
};
pub use seller::{Seller, VerificationStatus};

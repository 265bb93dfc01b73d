use tracing::debug;

use crate::extractors::classify::{determine_category, extract_varietal};
use crate::extractors::fields::{
    clean_text, extract_alcohol_content, extract_number, extract_volume_ml, extract_year,
    parse_price,
};
use crate::models::{CriticScores, ProductRecord};

/// A product listing as text, before any field is typed.
#[derive(Debug, Clone, Default)]
pub struct RawListing {
    pub title: String,
    pub producer: String,
    pub price_text: String,
    pub description: String,
    pub region: String,
    pub appellation: Option<String>,
    /// Explicit varietal when the listing names one; otherwise inferred.
    pub varietal: Option<String>,
    pub volume_text: String,
    pub abv_text: String,
    pub rating_text: Option<String>,
    pub reviews_text: Option<String>,
    pub critic_scores: CriticScores,
    pub image_url: Option<String>,
    pub tasting_notes: Option<String>,
    pub food_pairings: Vec<String>,
    pub serving_temperature: Option<String>,
    pub aging_potential: Option<String>,
    pub source_url: String,
}

/// Types a raw listing through the field extractors.
///
/// Returns `None` when the listing has no title, no producer or no readable
/// price; every other field degrades to empty.
pub fn normalize_listing(raw: RawListing) -> Option<ProductRecord> {
    let title = clean_text(&raw.title);
    let producer = clean_text(&raw.producer);
    let description = clean_text(&raw.description);

    let Some(price) = parse_price(&raw.price_text) else {
        debug!(title = %title, price_text = %raw.price_text, "Unreadable price, skipping listing");
        return None;
    };
    if title.is_empty() || producer.is_empty() {
        return None;
    }

    let product_type = determine_category(&title, &description);
    let varietal = raw
        .varietal
        .map(|v| clean_text(&v))
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| extract_varietal(&title, &description));

    let mut record = ProductRecord::new(title, producer, product_type, price, raw.source_url);
    record.vintage = extract_year(&record.name);
    record.varietal = varietal;
    record.region = clean_text(&raw.region);
    record.appellation = raw.appellation;
    record.volume_ml = extract_volume_ml(&raw.volume_text);
    record.alcohol_content = extract_alcohol_content(&raw.abv_text);
    record.average_rating = raw
        .rating_text
        .as_deref()
        .and_then(extract_number)
        .filter(|r| (0.0..=5.0).contains(r));
    record.total_reviews = raw
        .reviews_text
        .as_deref()
        .and_then(extract_number)
        .map(|n| n as u32)
        .unwrap_or(0);
    record.critic_scores = raw.critic_scores;
    record.description = (!description.is_empty()).then_some(description);
    record.tasting_notes = raw.tasting_notes.map(|t| clean_text(&t));
    record.food_pairings = raw.food_pairings;
    record.serving_temperature = raw.serving_temperature;
    record.aging_potential = raw.aging_potential;
    record.primary_image_url = raw.image_url;

    Some(record)
}

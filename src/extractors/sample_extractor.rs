use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::Result;
use crate::extractors::listing::{RawListing, normalize_listing};
use crate::models::{CriticScores, ProductRecord, SAMPLE_SOURCE};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExtractionStats {
    pub attempted: usize,
    pub successful: usize,
    pub failed: usize,
}

impl ExtractionStats {
    pub fn merge(self, other: ExtractionStats) -> Self {
        Self {
            attempted: self.attempted + other.attempted,
            successful: self.successful + other.successful,
            failed: self.failed + other.failed,
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct Extraction {
    pub records: Vec<ProductRecord>,
    pub stats: ExtractionStats,
}

/// A source of catalog records for a search query.
#[async_trait]
pub trait Extractor: Send + Sync {
    fn name(&self) -> &str;

    async fn extract(&self, query: &str) -> Result<Extraction>;
}

/// Offline source backed by a fixed set of curated listings. Every query
/// yields the whole set.
#[derive(Debug, Default, Clone)]
pub struct SampleExtractor;

impl SampleExtractor {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Extractor for SampleExtractor {
    fn name(&self) -> &str {
        "samples"
    }

    async fn extract(&self, query: &str) -> Result<Extraction> {
        let listings = curated_listings();
        let attempted = listings.len();

        let records: Vec<ProductRecord> = listings
            .into_iter()
            .filter_map(|listing| {
                let title = listing.title.clone();
                let record = normalize_listing(listing);
                if record.is_none() {
                    debug!(query = query, title = %title, "Listing failed normalization");
                }
                record
            })
            .collect();

        let stats = ExtractionStats {
            attempted,
            successful: records.len(),
            failed: attempted - records.len(),
        };

        info!(
            query = query,
            extracted = stats.successful,
            failed = stats.failed,
            "Extracted sample listings"
        );

        Ok(Extraction { records, stats })
    }
}

fn curated_listings() -> Vec<RawListing> {
    let strings = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();

    vec![
        RawListing {
            title: "Château Margaux 2015".into(),
            producer: "Château Margaux".into(),
            price_text: "$850.00".into(),
            description: "Premier Grand Cru Classé from Bordeaux, Margaux appellation".into(),
            region: "Bordeaux, France".into(),
            appellation: Some("Margaux".into()),
            varietal: Some("Cabernet Sauvignon Blend".into()),
            volume_text: "750ml".into(),
            abv_text: "13.5%".into(),
            rating_text: Some("4.8".into()),
            reviews_text: Some("245 reviews".into()),
            critic_scores: CriticScores {
                wine_spectator: Some(98),
                robert_parker: Some(96),
                james_suckling: None,
            },
            image_url: Some("https://example.com/margaux-2015.jpg".into()),
            tasting_notes: Some(
                "Complex nose of dark fruits, violets, and cedar. \
                 Full-bodied with silky tannins and a long, elegant finish."
                    .into(),
            ),
            food_pairings: strings(&["Beef", "Lamb", "Aged Cheese"]),
            serving_temperature: Some("16-18°C".into()),
            aging_potential: Some("30+ years".into()),
            source_url: SAMPLE_SOURCE.into(),
        },
        RawListing {
            title: "Dom Pérignon 2013".into(),
            producer: "Dom Pérignon".into(),
            price_text: "$250.00".into(),
            description: "Prestigious Champagne from Épernay".into(),
            region: "Champagne, France".into(),
            volume_text: "750ml".into(),
            abv_text: "12.5%".into(),
            rating_text: Some("4.6".into()),
            reviews_text: Some("189 reviews".into()),
            critic_scores: CriticScores {
                wine_spectator: Some(95),
                ..CriticScores::default()
            },
            image_url: Some("https://example.com/dom-perignon-2013.jpg".into()),
            tasting_notes: Some(
                "Fresh and vibrant with notes of citrus, brioche, and mineral complexity.".into(),
            ),
            food_pairings: strings(&["Seafood", "Caviar", "Light Appetizers"]),
            serving_temperature: Some("6-8°C".into()),
            source_url: SAMPLE_SOURCE.into(),
            ..RawListing::default()
        },
        RawListing {
            title: "Caymus Cabernet Sauvignon 2020".into(),
            producer: "Caymus Vineyards".into(),
            price_text: "$85.00".into(),
            description: "Napa Valley Cabernet Sauvignon".into(),
            region: "Napa Valley, California".into(),
            volume_text: "750ml".into(),
            abv_text: "14.5%".into(),
            rating_text: Some("4.3".into()),
            reviews_text: Some("324 reviews".into()),
            critic_scores: CriticScores {
                wine_spectator: Some(90),
                ..CriticScores::default()
            },
            image_url: Some("https://example.com/caymus-2020.jpg".into()),
            tasting_notes: Some(
                "Rich and concentrated with dark berry flavors, vanilla, and soft tannins.".into(),
            ),
            food_pairings: strings(&["Grilled Beef", "BBQ", "Dark Chocolate"]),
            serving_temperature: Some("16-18°C".into()),
            aging_potential: Some("10-15 years".into()),
            source_url: SAMPLE_SOURCE.into(),
            ..RawListing::default()
        },
        RawListing {
            title: "Macallan 18 Year Single Malt".into(),
            producer: "The Macallan".into(),
            price_text: "$450.00".into(),
            description: "Premium Speyside Single Malt Scotch Whisky".into(),
            region: "Speyside, Scotland".into(),
            varietal: Some("Single Malt Scotch".into()),
            volume_text: "700ml".into(),
            abv_text: "43.0%".into(),
            rating_text: Some("4.7".into()),
            reviews_text: Some("156 reviews".into()),
            image_url: Some("https://example.com/macallan-18.jpg".into()),
            tasting_notes: Some(
                "Rich sherry influence with notes of dried fruits, chocolate, and spice.".into(),
            ),
            serving_temperature: Some("Room temperature".into()),
            aging_potential: Some("Ready to drink".into()),
            source_url: SAMPLE_SOURCE.into(),
            ..RawListing::default()
        },
        RawListing {
            title: "Opus One 2018".into(),
            producer: "Opus One".into(),
            price_text: "$400.00".into(),
            description: "Napa Valley Bordeaux-style blend".into(),
            region: "Napa Valley, California".into(),
            varietal: Some("Cabernet Sauvignon Blend".into()),
            volume_text: "750ml".into(),
            abv_text: "14.5%".into(),
            rating_text: Some("4.5".into()),
            reviews_text: Some("98 reviews".into()),
            critic_scores: CriticScores {
                wine_spectator: Some(94),
                robert_parker: Some(96),
                james_suckling: None,
            },
            image_url: Some("https://example.com/opus-one-2018.jpg".into()),
            tasting_notes: Some(
                "Elegant and powerful with layers of dark fruit, cedar, and graphite.".into(),
            ),
            food_pairings: strings(&["Prime Rib", "Lamb", "Strong Cheese"]),
            serving_temperature: Some("16-18°C".into()),
            aging_potential: Some("20+ years".into()),
            source_url: SAMPLE_SOURCE.into(),
            ..RawListing::default()
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProductType;

    #[tokio::test]
    async fn every_curated_listing_normalizes() {
        let extraction = SampleExtractor::new().extract("bordeaux wine").await.unwrap();

        assert_eq!(extraction.stats.attempted, 5);
        assert_eq!(extraction.stats.successful, 5);
        assert_eq!(extraction.stats.failed, 0);
        assert!(extraction.records.iter().all(|r| r.validate().is_ok()));
        assert!(extraction.records.iter().all(|r| r.source_url == SAMPLE_SOURCE));
    }

    #[tokio::test]
    async fn curated_fields_are_typed() {
        let extraction = SampleExtractor::new().extract("any").await.unwrap();
        let by_name = |name: &str| {
            extraction
                .records
                .iter()
                .find(|r| r.name == name)
                .unwrap()
                .clone()
        };

        let margaux = by_name("Château Margaux 2015");
        assert_eq!(margaux.vintage, Some(2015));
        assert_eq!(margaux.base_price, 850.0);
        assert_eq!(margaux.alcohol_content, Some(13.5));
        assert_eq!(margaux.critic_scores.robert_parker, Some(96));

        let macallan = by_name("Macallan 18 Year Single Malt");
        assert_eq!(macallan.product_type, ProductType::Spirits);
        assert_eq!(macallan.vintage, None);
        assert_eq!(macallan.volume_ml, 700);
        assert_eq!(macallan.total_reviews, 156);
    }
}

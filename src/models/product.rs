use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::extractors::slug::generate_slug;

/// Provenance marker carried by generator-produced records.
pub const SYNTHETIC_SOURCE: &str = "ai-generated";

/// Provenance marker carried by the curated sample listings.
pub const SAMPLE_SOURCE: &str = "sample-data";

/// Bottle sizes the catalog accepts from the generator.
pub const STANDARD_VOLUMES_ML: [u32; 5] = [375, 700, 750, 1000, 1500];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductType {
    Wine,
    Spirits,
    Beer,
    Sake,
}

impl ProductType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductType::Wine => "wine",
            ProductType::Spirits => "spirits",
            ProductType::Beer => "beer",
            ProductType::Sake => "sake",
        }
    }
}

impl std::fmt::Display for ProductType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Independent critic scores on a 0-100 scale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriticScores {
    #[serde(rename = "wine_spectator_score")]
    pub wine_spectator: Option<u8>,
    #[serde(rename = "robert_parker_score")]
    pub robert_parker: Option<u8>,
    #[serde(rename = "james_suckling_score")]
    pub james_suckling: Option<u8>,
}

impl CriticScores {
    fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        [self.wine_spectator, self.robert_parker, self.james_suckling]
            .into_iter()
            .flatten()
    }
}

/// Canonical in-memory representation of one catalog item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub name: String,
    pub producer: String,
    pub vintage: Option<i32>,

    #[serde(rename = "type")]
    pub product_type: ProductType,
    pub varietal: String,
    pub region: String,
    pub appellation: Option<String>,

    pub base_price: f64,
    pub current_price: f64,
    pub volume_ml: u32,
    pub alcohol_content: Option<f64>,

    pub average_rating: Option<f64>,
    #[serde(default)]
    pub total_reviews: u32,
    #[serde(flatten)]
    pub critic_scores: CriticScores,

    pub description: Option<String>,
    pub tasting_notes: Option<String>,
    #[serde(default)]
    pub food_pairings: Vec<String>,
    pub serving_temperature: Option<String>,
    pub aging_potential: Option<String>,

    pub primary_image_url: Option<String>,
    #[serde(default)]
    pub image_urls: Vec<String>,

    pub source_url: String,
    pub scraped_at: DateTime<Utc>,
}

impl ProductRecord {
    /// Creates a record with `current_price` pinned to `base_price` and every
    /// optional field empty. `scraped_at` is stamped here and never changes.
    pub fn new(
        name: impl Into<String>,
        producer: impl Into<String>,
        product_type: ProductType,
        base_price: f64,
        source_url: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            producer: producer.into(),
            vintage: None,
            product_type,
            varietal: String::new(),
            region: String::new(),
            appellation: None,
            base_price,
            current_price: base_price,
            volume_ml: 750,
            alcohol_content: None,
            average_rating: None,
            total_reviews: 0,
            critic_scores: CriticScores::default(),
            description: None,
            tasting_notes: None,
            food_pairings: Vec::new(),
            serving_temperature: None,
            aging_potential: None,
            primary_image_url: None,
            image_urls: Vec::new(),
            source_url: source_url.into(),
            scraped_at: Utc::now(),
        }
    }

    pub fn is_synthetic(&self) -> bool {
        self.source_url == SYNTHETIC_SOURCE
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::InvalidRecord("name is empty".into()));
        }
        if self.producer.trim().is_empty() {
            return Err(Error::InvalidRecord(format!("`{}` has no producer", self.name)));
        }
        let prices = [
            ("base_price", self.base_price),
            ("current_price", self.current_price),
        ];
        for (label, price) in prices {
            if !price.is_finite() || price < 0.0 {
                return Err(Error::InvalidRecord(format!(
                    "`{}` has invalid {label} {price}",
                    self.name
                )));
            }
        }
        if self.volume_ml == 0 {
            return Err(Error::InvalidRecord(format!("`{}` has zero volume", self.name)));
        }
        if let Some(rating) = self.average_rating {
            if !(0.0..=5.0).contains(&rating) {
                return Err(Error::InvalidRecord(format!(
                    "`{}` has rating {rating} outside 0-5",
                    self.name
                )));
            }
        }
        if let Some(score) = self.critic_scores.iter().find(|s| *s > 100) {
            return Err(Error::InvalidRecord(format!(
                "`{}` has critic score {score} above 100",
                self.name
            )));
        }
        Ok(())
    }
}

/// A record as persisted in the `products` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRow {
    pub id: Uuid,
    pub seller_id: Uuid,
    pub slug: String,
    pub available_quantity: u32,
    #[serde(flatten)]
    pub record: ProductRecord,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProductRow {
    pub fn new(record: ProductRecord, seller_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            seller_id,
            slug: generate_slug(&record.name, &record.producer, record.vintage),
            available_quantity: 1,
            record,
            created_at: now,
            updated_at: now,
        }
    }
}

/// The subset of product columns shown by operator listings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProductSummary {
    pub name: String,
    #[serde(rename = "type")]
    pub product_type: ProductType,
    pub current_price: f64,
    pub region: Option<String>,
    pub producer: String,
    pub vintage: Option<i32>,
}

impl std::fmt::Display for ProductSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let vintage = self
            .vintage
            .map(|v| v.to_string())
            .unwrap_or_else(|| "NV".to_string());
        write!(
            f,
            "{} - {} ({}) [{}] - ${:.2}",
            self.name, self.producer, vintage, self.product_type, self.current_price
        )
    }
}

//! Synthetic catalog generation from the curated reference tables.
//!
//! All randomness flows through the `Rng` the generator owns, so a seeded
//! generator reproduces the same catalog values.

pub mod descriptions;
pub mod pricing;
pub mod tables;

use chrono::{Datelike, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::models::{CriticScores, ProductRecord, ProductType, SYNTHETIC_SOURCE};
use descriptions::{
    image_url, spirit_description, spirit_tasting_notes, wine_aging_potential, wine_description,
    wine_food_pairings, wine_serving_temperature, wine_tasting_notes,
};
use pricing::{JITTER_MAX, JITTER_MIN, spirit_price, wine_price};
use tables::{SPIRIT_CATEGORIES, SPIRIT_VOLUMES_ML, SpiritStyle, WINE_REGIONS, WINE_VOLUME_ML};

const SPIRIT_FALLBACK_REGION: &str = "Various";

/// Uniform pick from a non-empty slice.
pub(crate) fn pick<'a, T, R: Rng + ?Sized>(rng: &mut R, items: &'a [T]) -> &'a T {
    &items[rng.random_range(0..items.len())]
}

/// Uniform draw in `[min, max]` rounded to one decimal place.
fn one_decimal<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64) -> f64 {
    (rng.random_range(min..=max) * 10.0).round() / 10.0
}

pub struct CatalogGenerator<R: Rng = StdRng> {
    rng: R,
    current_year: i32,
}

impl CatalogGenerator<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed), Utc::now().year())
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_os_rng(), Utc::now().year())
    }

    /// Seeded when `seed` is given, OS entropy otherwise.
    pub fn with_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }
}

impl<R: Rng> CatalogGenerator<R> {
    pub fn new(rng: R, current_year: i32) -> Self {
        Self { rng, current_year }
    }

    pub fn generate_wines(&mut self, count: usize) -> Vec<ProductRecord> {
        let wines: Vec<_> = (0..count).map(|_| self.wine()).collect();
        debug!(count = wines.len(), "Generated wines");
        wines
    }

    pub fn generate_spirits(&mut self, count: usize) -> Vec<ProductRecord> {
        let spirits: Vec<_> = (0..count).map(|_| self.spirit()).collect();
        debug!(count = spirits.len(), "Generated spirits");
        spirits
    }

    /// Wines first, then spirits.
    pub fn generate_catalog(&mut self, wines: usize, spirits: usize) -> Vec<ProductRecord> {
        let mut catalog = self.generate_wines(wines);
        catalog.extend(self.generate_spirits(spirits));
        catalog
    }

    fn wine(&mut self) -> ProductRecord {
        let rng = &mut self.rng;
        let region = pick(rng, WINE_REGIONS);
        let varietal = *pick(rng, region.varietals);
        let producer = *pick(rng, region.producer_pool());
        let age: u32 = rng.random_range(1..=25);
        let vintage = self.current_year - age as i32;
        let price = wine_price(region, producer, age, rng.random_range(JITTER_MIN..JITTER_MAX));

        let mut record = ProductRecord::new(
            format!("{producer} {varietal} {vintage}"),
            producer,
            ProductType::Wine,
            price,
            SYNTHETIC_SOURCE,
        );
        record.vintage = Some(vintage);
        record.varietal = varietal.to_string();
        record.region = region.name.to_string();
        record.volume_ml = WINE_VOLUME_ML;
        record.alcohol_content = Some(one_decimal(rng, 11.5, 15.5));
        record.average_rating = Some(one_decimal(rng, 3.5, 5.0));
        record.total_reviews = rng.random_range(10..=500);
        record.critic_scores = CriticScores {
            wine_spectator: Some(rng.random_range(85..=100)),
            robert_parker: Some(rng.random_range(85..=100)),
            james_suckling: None,
        };
        record.description = Some(wine_description(rng, varietal, region.name, vintage));
        record.tasting_notes = Some(wine_tasting_notes(varietal).to_string());
        record.food_pairings = wine_food_pairings(varietal);
        record.serving_temperature = Some(wine_serving_temperature(varietal).to_string());
        record.aging_potential = Some(wine_aging_potential(varietal, age).to_string());
        record.primary_image_url = Some(image_url(ProductType::Wine, producer, varietal));
        record
    }

    fn spirit(&mut self) -> ProductRecord {
        let rng = &mut self.rng;
        let category = pick(rng, SPIRIT_CATEGORIES);
        let producer = *pick(rng, category.producer_pool());
        let region = *pick(rng, category.regions);

        let mut age = None;
        let (name, varietal) = match category.style {
            SpiritStyle::Aged(ages) => {
                let years = *pick(rng, ages);
                age = Some(years);
                (
                    format!("{producer} {years} Year"),
                    format!("{} {years} Year", category.name),
                )
            }
            SpiritStyle::Typed(types) => {
                let kind = *pick(rng, types);
                (format!("{producer} {kind}"), kind.to_string())
            }
            SpiritStyle::Graded(grades) => {
                let grade = *pick(rng, grades);
                (format!("{producer} {grade}"), format!("{} {grade}", category.name))
            }
        };
        let price = spirit_price(category, &name, age, rng.random_range(JITTER_MIN..JITTER_MAX));

        let mut record =
            ProductRecord::new(name, producer, ProductType::Spirits, price, SYNTHETIC_SOURCE);
        record.varietal = varietal;
        record.region = if region.is_empty() {
            SPIRIT_FALLBACK_REGION.to_string()
        } else {
            region.to_string()
        };
        record.volume_ml = *pick(rng, SPIRIT_VOLUMES_ML);
        record.alcohol_content = Some(one_decimal(rng, 35.0, 50.0));
        record.average_rating = Some(one_decimal(rng, 3.8, 5.0));
        record.total_reviews = rng.random_range(20..=300);
        record.description = Some(spirit_description(rng, category.name, Some(region)));
        record.tasting_notes = Some(spirit_tasting_notes(category.name).to_string());
        record.serving_temperature = Some("Room temperature".to_string());
        record.aging_potential = Some("Ready to drink".to_string());
        record.primary_image_url = Some(image_url(ProductType::Spirits, producer, category.name));
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::STANDARD_VOLUMES_ML;

    #[test]
    fn generated_records_hold_invariants() {
        let mut generator = CatalogGenerator::seeded(42);
        let catalog = generator.generate_catalog(200, 200);
        assert_eq!(catalog.len(), 400);

        for record in &catalog {
            assert_eq!(record.current_price, record.base_price, "{}", record.name);
            assert!(record.base_price >= 0.0, "{}", record.name);
            assert!(STANDARD_VOLUMES_ML.contains(&record.volume_ml), "{}", record.name);
            assert!(record.is_synthetic());
            record.validate().unwrap();
        }
    }

    #[test]
    fn wines_then_spirits() {
        let catalog = CatalogGenerator::seeded(1).generate_catalog(3, 2);
        let kinds: Vec<_> = catalog.iter().map(|r| r.product_type).collect();
        assert_eq!(
            kinds,
            [
                ProductType::Wine,
                ProductType::Wine,
                ProductType::Wine,
                ProductType::Spirits,
                ProductType::Spirits
            ]
        );
    }

    #[test]
    fn same_seed_same_catalog() {
        let strip = |records: Vec<ProductRecord>| {
            records
                .into_iter()
                .map(|r| (r.name, r.base_price, r.volume_ml, r.alcohol_content))
                .collect::<Vec<_>>()
        };
        let a = strip(CatalogGenerator::seeded(7).generate_catalog(20, 20));
        let b = strip(CatalogGenerator::seeded(7).generate_catalog(20, 20));
        assert_eq!(a, b);
    }

    #[test]
    fn wine_fields_stay_in_range() {
        let mut generator = CatalogGenerator::new(StdRng::seed_from_u64(3), 2024);
        for wine in generator.generate_wines(100) {
            let vintage = wine.vintage.unwrap();
            assert!((1999..=2023).contains(&vintage));
            assert!(wine.name.ends_with(&vintage.to_string()));
            assert_eq!(wine.volume_ml, 750);
            assert!((11.5..=15.5).contains(&wine.alcohol_content.unwrap()));
            assert!((3.5..=5.0).contains(&wine.average_rating.unwrap()));
            assert!((10..=500).contains(&wine.total_reviews));
            assert!((85..=100).contains(&wine.critic_scores.wine_spectator.unwrap()));
            assert!(wine.critic_scores.james_suckling.is_none());
            assert!(wine.primary_image_url.unwrap().starts_with("/images/wines/"));
        }
    }

    #[test]
    fn spirit_names_follow_category_style() {
        let mut generator = CatalogGenerator::seeded(11);
        for spirit in generator.generate_spirits(100) {
            assert_eq!(spirit.vintage, None);
            assert!(SPIRIT_VOLUMES_ML.contains(&spirit.volume_ml));
            assert!((35.0..=50.0).contains(&spirit.alcohol_content.unwrap()));
            assert!((3.8..=5.0).contains(&spirit.average_rating.unwrap()));
            assert!((20..=300).contains(&spirit.total_reviews));
            assert!(spirit.name.starts_with(&spirit.producer));
            if spirit.varietal.ends_with(" Year") {
                let suffix = spirit.name.trim_start_matches(&spirit.producer).trim();
                assert!(spirit.varietal.ends_with(suffix), "{}", spirit.name);
            }
        }
    }
}

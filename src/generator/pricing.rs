//! Rule-based list prices. `jitter` is the multiplicative noise factor drawn
//! by the caller from [0.8, 1.2); pass 1.0 for the noiseless price.

use super::tables::{SPIRIT_BRAND_PREMIUMS, SpiritCategory, WINE_PRODUCER_PREMIUMS, WineRegion};

const WINE_AGE_PREMIUM: f64 = 5.0;
const SPIRIT_AGE_PREMIUM: f64 = 15.0;

pub const JITTER_MIN: f64 = 0.8;
pub const JITTER_MAX: f64 = 1.2;

fn premium(subject: &str, rules: &[(&str, f64)]) -> f64 {
    rules
        .iter()
        .find(|(needle, _)| subject.contains(needle))
        .map(|(_, factor)| *factor)
        .unwrap_or(1.0)
}

pub fn wine_price(region: &WineRegion, producer: &str, age: u32, jitter: f64) -> f64 {
    let mut price = region.price_floor * premium(producer, WINE_PRODUCER_PREMIUMS);
    price += f64::from(age) * WINE_AGE_PREMIUM;
    (price * jitter).round().max(0.0)
}

/// `name` is the full product name, so brand premiums see the producer.
pub fn spirit_price(category: &SpiritCategory, name: &str, age: Option<u32>, jitter: f64) -> f64 {
    let mut price = category.price_floor;
    if let Some(age) = age {
        price += f64::from(age) * SPIRIT_AGE_PREMIUM;
    }
    price *= premium(name, SPIRIT_BRAND_PREMIUMS);
    (price * jitter).round().max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::tables::{SPIRIT_CATEGORIES, WINE_REGIONS};

    fn region(prefix: &str) -> &'static WineRegion {
        WINE_REGIONS.iter().find(|r| r.name.starts_with(prefix)).unwrap()
    }

    fn category(name: &str) -> &'static SpiritCategory {
        SPIRIT_CATEGORIES.iter().find(|c| c.name == name).unwrap()
    }

    #[test]
    fn wine_tiers_and_age() {
        assert_eq!(wine_price(region("Rioja"), "Estate Winery", 10, 1.0), 100.0);
        assert_eq!(wine_price(region("Bordeaux"), "Château Latour", 4, 1.0), 220.0);
        assert_eq!(wine_price(region("Napa"), "Caymus", 0, 1.0), 150.0);
    }

    #[test]
    fn wine_producer_prestige() {
        assert_eq!(wine_price(region("Bordeaux"), "Château Margaux", 0, 1.0), 1000.0);
        assert_eq!(
            wine_price(region("Burgundy"), "Domaine de la Romanée-Conti", 2, 1.0),
            1010.0
        );
        assert_eq!(wine_price(region("Napa"), "Harlan Estate", 0, 1.0), 450.0);
    }

    #[test]
    fn jitter_scales_and_rounds() {
        assert_eq!(wine_price(region("Rioja"), "Estate Winery", 1, 0.8), 44.0);
        assert_eq!(wine_price(region("Rioja"), "Estate Winery", 1, 1.2), 66.0);
    }

    #[test]
    fn spirit_floors_age_and_brand() {
        assert_eq!(spirit_price(category("Rum"), "Zacapa 8 Year", Some(8), 1.0), 180.0);
        assert_eq!(spirit_price(category("Cognac"), "Hennessy XO", None, 1.0), 150.0);
        assert_eq!(
            spirit_price(category("Scotch Whisky"), "Macallan 18 Year", Some(18), 1.0),
            740.0
        );
        assert_eq!(
            spirit_price(category("American Whiskey"), "Pappy Van Winkle Bourbon", None, 1.0),
            200.0
        );
    }
}

//! Total, panic-free parsers for the loose text found in product listings.
//!
//! None of these return errors: unparsable input yields `None` (or a
//! documented default) and the caller decides what missing data means.

use regex::Regex;
use std::sync::LazyLock;

static NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+(?:\.\d+)?").unwrap());
static YEAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b(?:19|20)\d{2}\b").unwrap());
static ABV: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+(?:\.\d+)?)\s*%").unwrap());
static MILLILITRES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+(?:\.\d+)?)\s*(?:ml|mL|ML)\b").unwrap());
static LITRES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+(?:\.\d+)?)\s*(?:l|L|liter|Liter|litre|Litre)s?\b").unwrap()
});

const DEFAULT_VOLUME_ML: u32 = 750;

/// Strips everything except digits and `.` and parses the remainder.
/// Digit runs too long to be a finite `f64` yield `None`.
pub fn parse_price(text: &str) -> Option<f64> {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    cleaned.parse::<f64>().ok().filter(|price| price.is_finite())
}

/// First decimal-number-shaped substring.
pub fn extract_number(text: &str) -> Option<f64> {
    NUMBER.find(text).and_then(|m| m.as_str().parse().ok())
}

/// First standalone four-digit year in 1900-2099.
pub fn extract_year(text: &str) -> Option<i32> {
    YEAR.find(text).and_then(|m| m.as_str().parse().ok())
}

pub fn extract_alcohol_content(text: &str) -> Option<f64> {
    ABV.captures(text)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Bottle volume in millilitres. Falls back to keyword sizes, then 750.
pub fn extract_volume_ml(text: &str) -> u32 {
    if let Some(ml) = capture_f64(&MILLILITRES, text) {
        return ml.round() as u32;
    }
    if let Some(litres) = capture_f64(&LITRES, text) {
        return (litres * 1000.0).round() as u32;
    }

    let lower = text.to_lowercase();
    if lower.contains("magnum") {
        1500
    } else if lower.contains("half") {
        375
    } else {
        DEFAULT_VOLUME_ML
    }
}

/// Collapses runs of whitespace (including newlines) to one space and trims.
pub fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn capture_f64(re: &Regex, text: &str) -> Option<f64> {
    re.captures(text)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

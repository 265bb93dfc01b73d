use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One append-only row of `price_history`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSnapshot {
    pub id: Uuid,
    pub product_id: Uuid,
    pub price: f64,
    pub volume: u32,
    pub high: f64,
    pub low: f64,
    pub open: f64,
    pub close: f64,
    pub timestamp: DateTime<Utc>,
    pub source: String,
}

impl PriceSnapshot {
    /// A flat candle: every OHLC field equals `price`.
    pub fn point(product_id: Uuid, price: f64, volume: u32, source: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            product_id,
            price,
            volume,
            high: price,
            low: price,
            open: price,
            close: price,
            timestamp: Utc::now(),
            source: source.to_string(),
        }
    }
}

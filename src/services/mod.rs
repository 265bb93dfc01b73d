pub mod catalog;
pub mod collector;

pub use catalog::{CatalogService, MARKETPLACE_LICENSE, MARKETPLACE_SELLER_NAME, synthetic_filter};
pub use collector::{CollectionReport, Collector};

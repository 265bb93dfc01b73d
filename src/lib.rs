//! Catalog ingestion for a wine and spirits marketplace: synthetic catalog
//! generation, listing normalization and best-effort persistence into a
//! Supabase-backed store.

pub mod clients;
pub mod config;
pub mod error;
pub mod extractors;
pub mod generator;
pub mod models;
pub mod services;
pub mod storage;
pub mod utils;

pub use config::Settings;
pub use error::{Error, Result};
pub use generator::CatalogGenerator;
pub use models::{IngestionOutcome, ProductRecord, ProductType};
pub use services::{CatalogService, Collector};
pub use storage::{CatalogStore, MemoryStore, SupabaseStore};

use serde::Deserialize;
use config::{Config, ConfigError, Environment, File};
use tracing::debug;

use crate::error::{Error, Result};

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Settings {
    pub store: StoreConfig,
    pub ingest: IngestConfig,
    pub generator: GeneratorConfig,
    pub collect: CollectConfig,
    pub export: ExportConfig,
}

/// Connection settings for the catalog store (a Supabase/PostgREST endpoint).
///
/// Credentials are optional at parse time so that commands which never touch
/// the store (dry runs) still load; [`StoreConfig::credentials`] is the gate.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StoreConfig {
    pub url: Option<String>,
    pub service_key: Option<String>,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreCredentials {
    pub url: String,
    pub service_key: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct IngestConfig {
    pub seller_name: String,
    pub license_number: String,
    pub record_price_history: bool,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct GeneratorConfig {
    pub wines: usize,
    pub spirits: usize,
    pub seed: Option<u64>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CollectConfig {
    pub queries: Vec<String>,
    pub max_results: usize,
    pub delay_ms: u64,
    pub jitter_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ExportConfig {
    pub output_dir: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: None,
            service_key: None,
            timeout_secs: 15,
        }
    }
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            seller_name: "Wine Scraper Bot".to_string(),
            license_number: "SCRAPER-001".to_string(),
            record_price_history: false,
        }
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            wines: 500,
            spirits: 300,
            seed: None,
        }
    }
}

impl Default for CollectConfig {
    fn default() -> Self {
        let queries = [
            "bordeaux wine",
            "burgundy wine",
            "napa valley cabernet",
            "champagne",
            "barolo wine",
            "rioja wine",
            "single malt whisky",
            "bourbon whiskey",
        ];
        Self {
            queries: queries.iter().map(|q| q.to_string()).collect(),
            max_results: 50,
            delay_ms: 1000,
            jitter_ms: 500,
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: "data".to_string(),
        }
    }
}

impl Settings {
    pub fn new() -> std::result::Result<Self, ConfigError> {
        let builder = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            // Supabase-style variable names take precedence when present.
            .set_override_option("store.url", std::env::var("SUPABASE_URL").ok())?
            .set_override_option(
                "store.service_key",
                std::env::var("SUPABASE_SERVICE_ROLE_KEY").ok(),
            )?;

        let config = builder.build()?;
        let settings: Settings = config.try_deserialize()?;

        debug!(
            store_url = ?settings.store.url,
            has_service_key = settings.store.service_key.is_some(),
            queries = settings.collect.queries.len(),
            "Loaded settings"
        );

        Ok(settings)
    }
}

impl StoreConfig {
    /// Returns the store credentials, failing fast when either is absent or blank.
    pub fn credentials(&self) -> Result<StoreCredentials> {
        let url = non_blank(self.url.as_deref()).ok_or(Error::MissingConfig("store.url"))?;
        let service_key = non_blank(self.service_key.as_deref())
            .ok_or(Error::MissingConfig("store.service_key"))?;

        Ok(StoreCredentials {
            url: url.trim_end_matches('/').to_string(),
            service_key: service_key.to_string(),
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

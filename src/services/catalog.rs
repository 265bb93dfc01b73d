use std::sync::Arc;

use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::config::IngestConfig;
use crate::error::{Error, Result};
use crate::models::{
    IngestionOutcome, PriceSnapshot, ProductRecord, ProductRow, ProductSummary, SYNTHETIC_SOURCE,
    Seller,
};
use crate::storage::{CatalogStore, Condition, Filter, Table};

pub const MARKETPLACE_SELLER_NAME: &str = "AI Generated Marketplace";
pub const MARKETPLACE_LICENSE: &str = "AI-GEN-001";
const SNAPSHOT_SOURCE: &str = "scraper";

/// Rows tagged as synthetic, either by provenance or by description text.
pub fn synthetic_filter() -> Filter {
    Filter::AnyOf(vec![
        Condition::eq("source_url", SYNTHETIC_SOURCE),
        Condition::contains("description", SYNTHETIC_SOURCE),
    ])
}

/// Seller resolution, batch ingestion and catalog maintenance over a
/// [`CatalogStore`].
pub struct CatalogService {
    store: Arc<dyn CatalogStore>,
    config: IngestConfig,
    // Serializes find-or-create so one service never races itself into
    // duplicate sellers.
    seller_lock: Mutex<()>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn CatalogStore>, config: IngestConfig) -> Self {
        Self {
            store,
            config,
            seller_lock: Mutex::new(()),
        }
    }

    /// Returns the id of the seller holding `license_number`, registering an
    /// unverified seller first if there is none. Lookup and insert errors
    /// propagate.
    pub async fn find_or_create_seller(
        &self,
        business_name: &str,
        license_number: &str,
    ) -> Result<Uuid> {
        self.resolve_seller(Seller::unverified(business_name, license_number))
            .await
    }

    /// The verified seller that owns generated catalog batches.
    pub async fn ensure_marketplace_seller(&self) -> Result<Uuid> {
        self.resolve_seller(Seller::verified(MARKETPLACE_SELLER_NAME, MARKETPLACE_LICENSE))
            .await
    }

    /// The seller configured under `ingest` for collected listings.
    pub async fn ensure_ingest_seller(&self) -> Result<Uuid> {
        self.find_or_create_seller(&self.config.seller_name, &self.config.license_number)
            .await
    }

    async fn resolve_seller(&self, candidate: Seller) -> Result<Uuid> {
        let _guard = self.seller_lock.lock().await;

        let filter = Filter::Where(Condition::eq(
            "license_number",
            candidate.license_number.as_str(),
        ));
        let existing = self.store.query(Table::Sellers, &filter, Some(1)).await?;

        if let Some(row) = existing.first() {
            let id = row_id(row)?;
            info!(
                seller_id = %id,
                license_number = %candidate.license_number,
                "Using existing seller"
            );
            return Ok(id);
        }

        let id = candidate.id;
        self.store
            .insert(Table::Sellers, serde_json::to_value(&candidate)?)
            .await?;

        info!(
            seller_id = %id,
            business_name = %candidate.business_name,
            license_number = %candidate.license_number,
            verification_status = ?candidate.verification_status,
            "Created seller"
        );
        Ok(id)
    }

    /// Validates and persists one record, returning the new product id.
    pub async fn insert_product(&self, record: ProductRecord, seller_id: Uuid) -> Result<Uuid> {
        record.validate()?;

        let row = ProductRow::new(record, seller_id);
        let (id, price) = (row.id, row.record.current_price);
        self.store
            .insert(Table::Products, serde_json::to_value(&row)?)
            .await?;

        info!(
            product_id = %id,
            name = %row.record.name,
            slug = %row.slug,
            "Inserted product"
        );

        if self.config.record_price_history {
            self.record_price_snapshot(id, price, row.available_quantity)
                .await;
        }
        Ok(id)
    }

    /// Persists `records` one at a time, in order. A failed record is logged
    /// and counted; it never stops the records after it.
    pub async fn ingest(&self, records: Vec<ProductRecord>, seller_id: Uuid) -> IngestionOutcome {
        let total = records.len();
        let mut outcome = IngestionOutcome::default();

        for (index, record) in records.into_iter().enumerate() {
            let name = record.name.clone();
            let result = self.insert_product(record, seller_id).await;
            if let Err(e) = &result {
                error!(
                    error = %e,
                    name = %name,
                    index = index + 1,
                    total = total,
                    "Failed to insert product"
                );
            }
            outcome = outcome.tally(&result);
        }

        info!(
            success = outcome.success,
            failed = outcome.failed,
            seller_id = %seller_id,
            "Ingestion finished"
        );
        outcome
    }

    /// Appends a flat price snapshot. Failures are logged, never returned.
    pub async fn record_price_snapshot(&self, product_id: Uuid, price: f64, volume: u32) {
        let snapshot = PriceSnapshot::point(product_id, price, volume, SNAPSHOT_SOURCE);
        let result = match serde_json::to_value(&snapshot) {
            Ok(row) => self.store.insert(Table::PriceHistory, row).await,
            Err(e) => Err(e.into()),
        };

        if let Err(e) = result {
            warn!(error = %e, product_id = %product_id, "Failed to record price snapshot");
        }
    }

    pub async fn count_products(&self) -> Result<usize> {
        self.store.count(Table::Products, &Filter::All).await
    }

    pub async fn count_generated_products(&self) -> Result<usize> {
        self.store.count(Table::Products, &synthetic_filter()).await
    }

    /// Up to `limit` product rows. Rows that do not read as a summary are
    /// logged and skipped.
    pub async fn sample_products(&self, limit: usize) -> Result<Vec<ProductSummary>> {
        let rows = self
            .store
            .query(Table::Products, &Filter::All, Some(limit))
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|row| match serde_json::from_value::<ProductSummary>(row) {
                Ok(summary) => Some(summary),
                Err(e) => {
                    warn!(error = %e, "Skipping unreadable product row");
                    None
                }
            })
            .collect())
    }

    pub async fn clear_all_products(&self) -> Result<usize> {
        let removed = self.store.delete(Table::Products, &Filter::All).await?;
        info!(removed = removed, "Cleared all products");
        Ok(removed)
    }

    /// Removes synthetic rows only; externally sourced rows are untouched.
    pub async fn clear_generated_products(&self) -> Result<usize> {
        let removed = self
            .store
            .delete(Table::Products, &synthetic_filter())
            .await?;
        info!(removed = removed, "Cleared generated products");
        Ok(removed)
    }

    /// Reads a single product row to confirm the store answers.
    pub async fn test_connection(&self) -> Result<()> {
        match self.store.query(Table::Products, &Filter::All, Some(1)).await {
            Ok(_) => {
                info!("Store connection OK");
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "Store connection failed");
                Err(e)
            }
        }
    }
}

fn row_id(row: &Value) -> Result<Uuid> {
    row.get("id")
        .and_then(Value::as_str)
        .and_then(|id| Uuid::parse_str(id).ok())
        .ok_or_else(|| Error::Storage(format!("seller row without a valid id: {row}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ProductType, SAMPLE_SOURCE};
    use crate::storage::MemoryStore;
    use serde_json::json;

    fn service(store: Arc<MemoryStore>) -> CatalogService {
        CatalogService::new(store, IngestConfig::default())
    }

    fn record(name: &str) -> ProductRecord {
        ProductRecord::new(name, "Krug", ProductType::Wine, 300.0, SAMPLE_SOURCE)
    }

    #[tokio::test]
    async fn marketplace_seller_is_verified_and_reused() {
        let store = Arc::new(MemoryStore::new());
        let service = service(store.clone());

        let first = service.ensure_marketplace_seller().await.unwrap();
        let second = service.ensure_marketplace_seller().await.unwrap();
        assert_eq!(first, second);

        let sellers = store.rows(Table::Sellers).await;
        assert_eq!(sellers.len(), 1);
        assert_eq!(sellers[0]["verification_status"], "verified");
        assert_eq!(sellers[0]["license_number"], MARKETPLACE_LICENSE);
    }

    #[tokio::test]
    async fn invalid_record_counts_as_failed() {
        let store = Arc::new(MemoryStore::new());
        let service = service(store.clone());
        let seller = service.find_or_create_seller("Acme", "LIC-1").await.unwrap();

        let mut bad = record("Negative");
        bad.base_price = -5.0;
        let outcome = service.ingest(vec![record("Krug 2008"), bad], seller).await;

        assert_eq!(outcome, IngestionOutcome { success: 1, failed: 1 });
        assert_eq!(service.count_products().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn rows_carry_seller_slug_and_quantity() {
        let store = Arc::new(MemoryStore::new());
        let service = service(store.clone());
        let seller = service.find_or_create_seller("Acme", "LIC-1").await.unwrap();

        let id = service
            .insert_product(record("Krug Grande Cuvée"), seller)
            .await
            .unwrap();

        let rows = store.rows(Table::Products).await;
        assert_eq!(rows[0]["id"], id.to_string());
        assert_eq!(rows[0]["seller_id"], seller.to_string());
        assert_eq!(rows[0]["available_quantity"], 1);
        let slug = rows[0]["slug"].as_str().unwrap();
        assert!(slug.starts_with("krug-krug-grande-cuvee-"));
    }

    #[tokio::test]
    async fn price_history_follows_config() {
        let store = Arc::new(MemoryStore::new());
        let config = IngestConfig {
            record_price_history: true,
            ..IngestConfig::default()
        };
        let service = CatalogService::new(store.clone(), config);
        let seller = service.ensure_ingest_seller().await.unwrap();

        let id = service.insert_product(record("Krug 2008"), seller).await.unwrap();

        let history = store.rows(Table::PriceHistory).await;
        assert_eq!(history.len(), 1);
        let snapshot: PriceSnapshot = serde_json::from_value(history[0].clone()).unwrap();
        assert_eq!(snapshot.product_id, id);
        assert_eq!(snapshot.source, "scraper");
        assert_eq!(
            (snapshot.high, snapshot.low, snapshot.open, snapshot.close),
            (300.0, 300.0, 300.0, 300.0)
        );
    }

    #[tokio::test]
    async fn failed_snapshot_does_not_fail_the_insert() {
        // Insert #1 is the seller, #2 the product, #3 its snapshot.
        let store = Arc::new(MemoryStore::with_failing_inserts([3]));
        let config = IngestConfig {
            record_price_history: true,
            ..IngestConfig::default()
        };
        let service = CatalogService::new(store.clone(), config);
        let seller = service.ensure_ingest_seller().await.unwrap();

        assert!(service.insert_product(record("Krug 2008"), seller).await.is_ok());
        assert!(store.rows(Table::PriceHistory).await.is_empty());
    }

    #[tokio::test]
    async fn seller_insert_error_propagates() {
        let store = Arc::new(MemoryStore::with_failing_inserts([1]));
        let service = service(store);
        assert!(matches!(
            service.find_or_create_seller("Acme", "LIC-1").await,
            Err(Error::Store { .. })
        ));
    }

    #[tokio::test]
    async fn seller_lookup_error_propagates() {
        let store = Arc::new(MemoryStore::with_failing_queries());
        let service = service(store.clone());
        assert!(matches!(
            service.find_or_create_seller("Acme", "LIC-1").await,
            Err(Error::Store { status: 503, .. })
        ));
        assert!(store.rows(Table::Sellers).await.is_empty());
    }

    #[tokio::test]
    async fn sample_skips_unreadable_rows() {
        let store = Arc::new(MemoryStore::new());
        let service = service(store.clone());
        let seller = service.ensure_marketplace_seller().await.unwrap();
        service.insert_product(record("Krug 2008"), seller).await.unwrap();
        store
            .insert(Table::Products, json!({"name": "Broken", "producer": null}))
            .await
            .unwrap();
        service.insert_product(record("Krug 2002"), seller).await.unwrap();

        let names: Vec<_> = service
            .sample_products(10)
            .await
            .unwrap()
            .into_iter()
            .map(|summary| summary.name)
            .collect();
        assert_eq!(names, ["Krug 2008", "Krug 2002"]);
    }

    #[tokio::test]
    async fn sample_reads_summaries() {
        let store = Arc::new(MemoryStore::new());
        let service = service(store);
        let seller = service.ensure_marketplace_seller().await.unwrap();
        let batch = vec![record("Krug 2008"), record("Krug 2002"), record("Krug 1996")];
        service.ingest(batch, seller).await;

        let sample = service.sample_products(2).await.unwrap();
        assert_eq!(sample.len(), 2);
        assert_eq!(sample[0].to_string(), "Krug 2008 - Krug (NV) [wine] - $300.00");
        assert!(service.test_connection().await.is_ok());
    }
}

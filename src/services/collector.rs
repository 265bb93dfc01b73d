use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::config::CollectConfig;
use crate::error::Result;
use crate::extractors::{ExtractionStats, Extractor};
use crate::models::IngestionOutcome;
use crate::services::catalog::CatalogService;
use crate::utils::time::sleep_with_jitter;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CollectionReport {
    pub queries_run: usize,
    pub collected: usize,
    pub extraction: ExtractionStats,
    pub ingestion: IngestionOutcome,
}

/// Runs an [`Extractor`] over the configured search queries.
pub struct Collector {
    extractor: Arc<dyn Extractor>,
    config: CollectConfig,
}

impl Collector {
    pub fn new(extractor: Arc<dyn Extractor>, config: CollectConfig) -> Self {
        Self { extractor, config }
    }

    /// Collects up to `max_results` records. With a catalog, each query's
    /// batch is ingested under the configured ingest seller; without one
    /// nothing is persisted.
    pub async fn run(&self, catalog: Option<&CatalogService>) -> Result<CollectionReport> {
        let seller_id = match catalog {
            Some(catalog) => Some(catalog.ensure_ingest_seller().await?),
            None => None,
        };

        let mut report = CollectionReport::default();

        for (index, query) in self.config.queries.iter().enumerate() {
            if report.collected >= self.config.max_results {
                info!(max_results = self.config.max_results, "Result limit reached");
                break;
            }
            if index > 0 {
                sleep_with_jitter(self.config.delay_ms, self.config.jitter_ms).await;
            }

            info!(
                extractor = self.extractor.name(),
                query = %query,
                query_index = index + 1,
                queries = self.config.queries.len(),
                "Running query"
            );

            let extraction = match self.extractor.extract(query).await {
                Ok(extraction) => extraction,
                Err(e) => {
                    warn!(error = %e, query = %query, "Extraction failed, skipping query");
                    continue;
                }
            };
            report.queries_run += 1;
            report.extraction = report.extraction.merge(extraction.stats);

            let mut records = extraction.records;
            records.truncate(self.config.max_results - report.collected);
            report.collected += records.len();

            if let (Some(catalog), Some(seller_id)) = (catalog, seller_id) {
                let outcome = catalog.ingest(records, seller_id).await;
                report.ingestion = report.ingestion.merge(outcome);
            }
        }

        info!(
            queries_run = report.queries_run,
            collected = report.collected,
            extracted = report.extraction.successful,
            extraction_failed = report.extraction.failed,
            inserted = report.ingestion.success,
            insert_failed = report.ingestion.failed,
            "Collection finished"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IngestConfig;
    use crate::extractors::SampleExtractor;
    use crate::storage::{MemoryStore, Table};

    fn config(queries: &[&str], max_results: usize) -> CollectConfig {
        CollectConfig {
            queries: queries.iter().map(|q| q.to_string()).collect(),
            max_results,
            delay_ms: 0,
            jitter_ms: 0,
        }
    }

    #[tokio::test]
    async fn dry_run_collects_without_persisting() {
        let collector =
            Collector::new(Arc::new(SampleExtractor::new()), config(&["a", "b"], 50));
        let report = collector.run(None).await.unwrap();

        assert_eq!(report.queries_run, 2);
        assert_eq!(report.collected, 10);
        assert_eq!(report.extraction.attempted, 10);
        assert_eq!(report.ingestion, IngestionOutcome::default());
    }

    #[tokio::test]
    async fn stops_at_max_results() {
        let store = Arc::new(MemoryStore::new());
        let catalog = CatalogService::new(store.clone(), IngestConfig::default());
        let collector =
            Collector::new(Arc::new(SampleExtractor::new()), config(&["a", "b", "c"], 7));

        let report = collector.run(Some(&catalog)).await.unwrap();

        assert_eq!(report.queries_run, 2);
        assert_eq!(report.collected, 7);
        assert_eq!(report.ingestion, IngestionOutcome { success: 7, failed: 0 });
        assert_eq!(store.rows(Table::Products).await.len(), 7);

        let sellers = store.rows(Table::Sellers).await;
        assert_eq!(sellers.len(), 1);
        assert_eq!(sellers[0]["license_number"], "SCRAPER-001");
        assert_eq!(sellers[0]["verification_status"], "unverified");
    }

    #[tokio::test]
    async fn aborts_when_seller_lookup_fails() {
        let store = Arc::new(MemoryStore::with_failing_queries());
        let catalog = CatalogService::new(store.clone(), IngestConfig::default());
        let collector = Collector::new(Arc::new(SampleExtractor::new()), config(&["a"], 50));

        assert!(collector.run(Some(&catalog)).await.is_err());
        assert!(store.rows(Table::Products).await.is_empty());
        assert!(store.rows(Table::Sellers).await.is_empty());
    }
}

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::{Error, Result};
use crate::storage::store::{CatalogStore, Filter, Table};

#[derive(Default)]
struct Tables {
    rows: HashMap<Table, Vec<Value>>,
    inserts: usize,
}

/// In-process store used by dry runs and tests.
///
/// Inserts can be made to fail by their 1-based sequence number across all
/// tables, which is how partial-failure batches are exercised. Queries can be
/// made to fail as a whole.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    failing_inserts: HashSet<usize>,
    failing_queries: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_failing_inserts(sequence: impl IntoIterator<Item = usize>) -> Self {
        Self {
            tables: Mutex::default(),
            failing_inserts: sequence.into_iter().collect(),
            failing_queries: false,
        }
    }

    pub fn with_failing_queries() -> Self {
        Self {
            failing_queries: true,
            ..Self::default()
        }
    }

    pub async fn rows(&self, table: Table) -> Vec<Value> {
        self.tables
            .lock()
            .await
            .rows
            .get(&table)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn insert(&self, table: Table, row: Value) -> Result<()> {
        let mut tables = self.tables.lock().await;
        tables.inserts += 1;

        if self.failing_inserts.contains(&tables.inserts) {
            debug!(table = %table, sequence = tables.inserts, "Rejecting insert");
            return Err(Error::Store {
                status: 409,
                message: format!("insert #{} rejected", tables.inserts),
            });
        }

        tables.rows.entry(table).or_default().push(row);
        Ok(())
    }

    async fn query(
        &self,
        table: Table,
        filter: &Filter,
        limit: Option<usize>,
    ) -> Result<Vec<Value>> {
        if self.failing_queries {
            debug!(table = %table, "Rejecting query");
            return Err(Error::Store {
                status: 503,
                message: format!("query on {table} rejected"),
            });
        }

        let tables = self.tables.lock().await;
        let rows = tables.rows.get(&table).map(Vec::as_slice).unwrap_or_default();

        Ok(rows
            .iter()
            .filter(|row| filter.matches(row))
            .take(limit.unwrap_or(usize::MAX))
            .cloned()
            .collect())
    }

    async fn count(&self, table: Table, filter: &Filter) -> Result<usize> {
        let tables = self.tables.lock().await;
        Ok(tables
            .rows
            .get(&table)
            .map(|rows| rows.iter().filter(|row| filter.matches(row)).count())
            .unwrap_or(0))
    }

    async fn delete(&self, table: Table, filter: &Filter) -> Result<usize> {
        let mut tables = self.tables.lock().await;
        let Some(rows) = tables.rows.get_mut(&table) else {
            return Ok(0);
        };

        let before = rows.len();
        rows.retain(|row| !filter.matches(row));
        Ok(before - rows.len())
    }
}

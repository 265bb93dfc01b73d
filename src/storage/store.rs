use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Products,
    Sellers,
    PriceHistory,
}

impl Table {
    pub fn as_str(&self) -> &'static str {
        match self {
            Table::Products => "products",
            Table::Sellers => "sellers",
            Table::PriceHistory => "price_history",
        }
    }
}

impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Column equals the value exactly.
    Eq(String, Value),
    /// Column is a string containing the needle, ignoring case.
    Contains(String, String),
}

impl Condition {
    pub fn eq(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Condition::Eq(column.into(), value.into())
    }

    pub fn contains(column: impl Into<String>, needle: impl Into<String>) -> Self {
        Condition::Contains(column.into(), needle.into())
    }

    pub fn column(&self) -> &str {
        match self {
            Condition::Eq(column, _) | Condition::Contains(column, _) => column,
        }
    }

    pub fn matches(&self, row: &Value) -> bool {
        match self {
            Condition::Eq(column, value) => row.get(column) == Some(value),
            Condition::Contains(column, needle) => row
                .get(column)
                .and_then(Value::as_str)
                .is_some_and(|text| text.to_lowercase().contains(&needle.to_lowercase())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Filter {
    #[default]
    All,
    Where(Condition),
    AnyOf(Vec<Condition>),
}

impl Filter {
    pub fn matches(&self, row: &Value) -> bool {
        match self {
            Filter::All => true,
            Filter::Where(condition) => condition.matches(row),
            Filter::AnyOf(conditions) => conditions.iter().any(|c| c.matches(row)),
        }
    }
}

impl From<Condition> for Filter {
    fn from(condition: Condition) -> Self {
        Filter::Where(condition)
    }
}

/// Persistence boundary for catalog rows. No multi-row atomicity is assumed.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn insert(&self, table: Table, row: Value) -> Result<()>;

    async fn query(
        &self,
        table: Table,
        filter: &Filter,
        limit: Option<usize>,
    ) -> Result<Vec<Value>>;

    async fn count(&self, table: Table, filter: &Filter) -> Result<usize>;

    /// Returns the number of rows removed.
    async fn delete(&self, table: Table, filter: &Filter) -> Result<usize>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn conditions_match_rows() {
        let row = json!({"source_url": "ai-generated", "description": "An AI-Generated Merlot"});

        assert!(Condition::eq("source_url", "ai-generated").matches(&row));
        assert!(!Condition::eq("source_url", "sample-data").matches(&row));
        assert!(Condition::contains("description", "ai-generated").matches(&row));
        assert!(!Condition::contains("missing", "x").matches(&row));
    }

    #[test]
    fn any_of_is_disjunction() {
        let filter = Filter::AnyOf(vec![
            Condition::eq("source_url", "ai-generated"),
            Condition::contains("description", "ai-generated"),
        ]);
        assert!(filter.matches(&json!({"source_url": "x", "description": "ai-generated batch"})));
        assert!(!filter.matches(&json!({"source_url": "x", "description": null})));
        assert!(Filter::All.matches(&json!({})));
    }
}

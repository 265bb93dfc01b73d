use std::time::Duration;

use async_trait::async_trait;
use http::Method;
use http::header::{CONTENT_RANGE, HeaderMap};
use serde_json::Value;
use tracing::debug;

use crate::clients::RestClient;
use crate::config::StoreConfig;
use crate::error::{Error, Result};
use crate::storage::store::{CatalogStore, Condition, Filter, Table};

/// Catalog store backed by a Supabase (PostgREST) project.
pub struct SupabaseStore {
    client: RestClient,
}

impl SupabaseStore {
    /// Fails with `MissingConfig` when the url or service key is absent.
    pub fn new(config: &StoreConfig) -> Result<Self> {
        let credentials = config.credentials()?;
        let client = RestClient::new(&credentials, Duration::from_secs(config.timeout_secs))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl CatalogStore for SupabaseStore {
    async fn insert(&self, table: Table, row: Value) -> Result<()> {
        let request = self
            .client
            .request(Method::POST, table.as_str())
            .header("Prefer", "return=minimal")
            .body(serde_json::to_vec(&row)?);

        self.client.send(request).await?;
        debug!(table = %table, "Inserted row");
        Ok(())
    }

    async fn query(
        &self,
        table: Table,
        filter: &Filter,
        limit: Option<usize>,
    ) -> Result<Vec<Value>> {
        let mut params = filter_params(filter);
        params.push(("select".to_string(), "*".to_string()));
        if let Some(limit) = limit {
            params.push(("limit".to_string(), limit.to_string()));
        }

        let request = self.client.request(Method::GET, table.as_str()).query(&params);
        let response = self.client.send(request).await?;
        let body = response.bytes().await?;
        let rows: Vec<Value> = serde_json::from_slice(&body)?;

        debug!(table = %table, rows = rows.len(), "Queried rows");
        Ok(rows)
    }

    async fn count(&self, table: Table, filter: &Filter) -> Result<usize> {
        let mut params = filter_params(filter);
        params.push(("select".to_string(), "id".to_string()));

        let request = self
            .client
            .request(Method::HEAD, table.as_str())
            .header("Prefer", "count=exact")
            .query(&params);
        let response = self.client.send(request).await?;
        range_total(response.headers())
    }

    async fn delete(&self, table: Table, filter: &Filter) -> Result<usize> {
        let mut params = filter_params(filter);
        // PostgREST refuses a DELETE without any filter.
        if params.is_empty() {
            params.push(("id".to_string(), "not.is.null".to_string()));
        }

        let request = self
            .client
            .request(Method::DELETE, table.as_str())
            .header("Prefer", "return=minimal,count=exact")
            .query(&params);
        let response = self.client.send(request).await?;
        let removed = range_total(response.headers())?;

        debug!(table = %table, removed = removed, "Deleted rows");
        Ok(removed)
    }
}

/// Maps a filter onto PostgREST query parameters.
pub fn filter_params(filter: &Filter) -> Vec<(String, String)> {
    match filter {
        Filter::All => Vec::new(),
        Filter::Where(condition) => {
            vec![(condition.column().to_string(), operator(condition, false))]
        }
        Filter::AnyOf(conditions) => {
            let terms: Vec<String> = conditions
                .iter()
                .map(|c| format!("{}.{}", c.column(), operator(c, true)))
                .collect();
            vec![("or".to_string(), format!("({})", terms.join(",")))]
        }
    }
}

/// Operands inside an `or=(...)` group are quoted when they contain
/// PostgREST delimiters.
fn operator(condition: &Condition, grouped: bool) -> String {
    let operand = |raw: String| if grouped { quote_reserved(&raw) } else { raw };
    match condition {
        Condition::Eq(_, Value::String(s)) => format!("eq.{}", operand(s.clone())),
        Condition::Eq(_, other) => format!("eq.{other}"),
        Condition::Contains(_, needle) => {
            format!("ilike.{}", operand(format!("*{needle}*")))
        }
    }
}

fn quote_reserved(value: &str) -> String {
    if value.contains([',', '.', ':', '(', ')', '"']) {
        format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
    } else {
        value.to_string()
    }
}

/// Row total reported by a `count=exact` response, for reads and deletes.
fn range_total(headers: &HeaderMap) -> Result<usize> {
    let range = headers
        .get(CONTENT_RANGE)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| Error::Storage("response has no Content-Range".into()))?;
    parse_content_range_total(range)
}

/// `Content-Range` is `first-last/total` or `*/total`.
fn parse_content_range_total(range: &str) -> Result<usize> {
    range
        .rsplit_once('/')
        .and_then(|(_, total)| total.parse().ok())
        .ok_or_else(|| Error::Storage(format!("unreadable Content-Range `{range}`")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(k: &str, v: &str) -> (String, String) {
        (k.to_string(), v.to_string())
    }

    #[test]
    fn single_condition_params() {
        let filter = Filter::Where(Condition::eq("license_number", "LIC-1"));
        assert_eq!(filter_params(&filter), vec![pair("license_number", "eq.LIC-1")]);

        let filter = Filter::Where(Condition::eq("total_reviews", 12));
        assert_eq!(filter_params(&filter), vec![pair("total_reviews", "eq.12")]);

        assert!(filter_params(&Filter::All).is_empty());
    }

    #[test]
    fn any_of_becomes_or_group() {
        let filter = Filter::AnyOf(vec![
            Condition::eq("source_url", "ai-generated"),
            Condition::contains("description", "ai-generated"),
        ]);
        assert_eq!(
            filter_params(&filter),
            vec![pair("or", "(source_url.eq.ai-generated,description.ilike.*ai-generated*)")]
        );
    }

    #[test]
    fn reserved_characters_are_quoted_inside_groups() {
        let filter = Filter::Where(Condition::eq("region", "Napa Valley, California"));
        assert_eq!(
            filter_params(&filter),
            vec![pair("region", "eq.Napa Valley, California")]
        );

        let filter = Filter::AnyOf(vec![
            Condition::eq("region", "Napa Valley, California"),
            Condition::contains("name", "St. Julien"),
        ]);
        assert_eq!(
            filter_params(&filter),
            vec![pair(
                "or",
                "(region.eq.\"Napa Valley, California\",name.ilike.\"*St. Julien*\")"
            )]
        );
    }

    #[test]
    fn content_range_total() {
        assert_eq!(parse_content_range_total("0-24/3573").unwrap(), 3573);
        assert_eq!(parse_content_range_total("*/0").unwrap(), 0);
        assert!(parse_content_range_total("*/*").is_err());
    }

    #[test]
    fn delete_count_comes_from_headers() {
        let mut headers = HeaderMap::new();
        assert!(matches!(range_total(&headers), Err(Error::Storage(_))));

        headers.insert(CONTENT_RANGE, "*/6".parse().unwrap());
        assert_eq!(range_total(&headers).unwrap(), 6);
    }

    #[test]
    fn requires_credentials() {
        let config = StoreConfig::default();
        assert!(matches!(
            SupabaseStore::new(&config),
            Err(Error::MissingConfig("store.url"))
        ));
    }
}

use std::time::Duration;

use http::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use http::{Method, StatusCode};
use reqwest::{Client, RequestBuilder, Response};
use tracing::{debug, error};

use crate::config::StoreCredentials;
use crate::error::{Error, Result};

/// HTTP client for a PostgREST endpoint. Auth headers are stored once and
/// applied to every request.
pub struct RestClient {
    client: Client,
    base_url: String,
    headers: HeaderMap,
}

impl RestClient {
    pub fn new(credentials: &StoreCredentials, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static("apikey"),
            header_value(&credentials.service_key)?,
        );
        headers.insert(
            AUTHORIZATION,
            header_value(&format!("Bearer {}", credentials.service_key))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder().timeout(timeout).build()?;

        debug!(
            base_url = %credentials.url,
            timeout_secs = timeout.as_secs(),
            "Creating REST client"
        );

        Ok(Self {
            client,
            base_url: format!("{}/rest/v1", credentials.url),
            headers,
        })
    }

    pub fn request(&self, method: Method, table: &str) -> RequestBuilder {
        let url = format!("{}/{}", self.base_url, table);
        let mut request = self.client.request(method.clone(), &url);

        for (key, value) in self.headers.iter() {
            request = request.header(key, value);
        }

        debug!(method = %method, url = %url, "Creating request");
        request
    }

    pub async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request.send().await?;
        let status = response.status();

        debug!(
            status = status.as_u16(),
            url = %response.url(),
            "Response received"
        );

        match status {
            StatusCode::TOO_MANY_REQUESTS => {
                debug!("Rate limit exceeded");
                Err(Error::RateLimit)
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                error!(status = status.as_u16(), "Store refused credentials");
                Err(Error::Unauthorized)
            }
            s if !s.is_success() => {
                let body = response.bytes().await?;
                let message = store_message(&body);
                debug!(status = s.as_u16(), message = %message, "Store rejected request");
                Err(Error::Store {
                    status: s.as_u16(),
                    message,
                })
            }
            _ => Ok(response),
        }
    }
}

fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| Error::Storage(format!("invalid header value: {e}")))
}

/// PostgREST error bodies carry a `message` field; anything else is passed
/// through as text.
fn store_message(body: &[u8]) -> String {
    serde_json::from_slice::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or_else(|| String::from_utf8_lossy(body).trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_message_prefers_json_message() {
        let body = br#"{"code":"23505","message":"duplicate key value"}"#;
        assert_eq!(store_message(body), "duplicate key value");
        assert_eq!(store_message(b" upstream timeout \n"), "upstream timeout");
    }

    #[test]
    fn builds_rest_base_url() {
        let credentials = StoreCredentials {
            url: "https://abc.supabase.co".into(),
            service_key: "secret".into(),
        };
        let client = RestClient::new(&credentials, Duration::from_secs(5)).unwrap();
        assert_eq!(client.base_url, "https://abc.supabase.co/rest/v1");
        assert_eq!(client.headers.get("apikey").unwrap(), "secret");
        assert_eq!(client.headers.get(AUTHORIZATION).unwrap(), "Bearer secret");
    }
}

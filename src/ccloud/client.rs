//! Confluent Cloud Client
//!
//! Main client for interacting with the Confluent Cloud management API,
//! combining the credential pair and HTTP functionality.

use super::auth::Credentials;
use super::http::{ApiResponse, CcloudHttpClient};
use crate::error::{ProviderError, Result};
use reqwest::Method;
use serde_json::Value;
use url::Url;

/// Production management API endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.confluent.cloud";

/// Main Confluent Cloud client
///
/// Cheap to clone; all clones share the same connection pool and credentials.
#[derive(Clone)]
pub struct CcloudClient {
    credentials: Credentials,
    http: CcloudHttpClient,
    base_url: String,
}

impl CcloudClient {
    /// Create a client against the production endpoint
    pub fn new(credentials: Credentials) -> Result<Self> {
        Self::with_base_url(credentials, DEFAULT_BASE_URL)
    }

    /// Create a client against an alternative endpoint (stub servers, proxies)
    pub fn with_base_url(credentials: Credentials, base_url: &str) -> Result<Self> {
        let parsed = Url::parse(base_url).map_err(|source| ProviderError::InvalidUrl {
            url: base_url.to_string(),
            source,
        })?;

        Ok(Self {
            credentials,
            http: CcloudHttpClient::new()?,
            base_url: parsed.as_str().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Build an absolute API URL from a path such as `/api_keys`
    pub fn api_url(&self, path: &str) -> Result<Url> {
        let raw = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        Url::parse(&raw).map_err(|source| ProviderError::InvalidUrl { url: raw, source })
    }

    /// Issue a request and return the raw status and body
    pub async fn execute(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&Value>,
    ) -> Result<ApiResponse> {
        let url = self.api_url(path)?;
        self.http
            .execute(method, url, query, &self.credentials, body)
            .await
    }

    /// Make a GET request to the management API
    pub async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<ApiResponse> {
        self.execute(Method::GET, path, query, None).await
    }

    /// Make a POST request with a JSON body to the management API
    pub async fn post(
        &self,
        path: &str,
        query: &[(&str, &str)],
        body: &Value,
    ) -> Result<ApiResponse> {
        self.execute(Method::POST, path, query, Some(body)).await
    }
}

/// Build `/<collection>/<id>` with the identity percent-encoded
pub fn item_path(collection: &str, id: &str) -> String {
    format!("/{}/{}", collection.trim_matches('/'), urlencoding::encode(id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> CcloudClient {
        CcloudClient::with_base_url(Credentials::new("k", "s"), base).unwrap()
    }

    #[test]
    fn test_default_base_url() {
        let client = CcloudClient::new(Credentials::new("k", "s")).unwrap();
        assert_eq!(client.base_url(), "https://api.confluent.cloud");
    }

    #[test]
    fn test_api_url_joins_path() {
        let client = client("http://127.0.0.1:8080/");
        let url = client.api_url("/schema_registries").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8080/schema_registries");
    }

    #[test]
    fn test_api_url_keeps_base_prefix() {
        let client = client("http://localhost:9000/proxy");
        let url = client.api_url("/ksqls").unwrap();
        assert_eq!(url.as_str(), "http://localhost:9000/proxy/ksqls");
    }

    #[test]
    fn test_invalid_base_url_is_transport_error() {
        let result = CcloudClient::with_base_url(Credentials::new("k", "s"), "not a url");
        let err = result.err().expect("base URL should be rejected");
        assert_eq!(err.category(), crate::error::ErrorCategory::Transport);
    }

    #[test]
    fn test_item_path_encodes_identity() {
        assert_eq!(item_path("schema_registries", "lsrc-o338zj"), "/schema_registries/lsrc-o338zj");
        assert_eq!(item_path("schema_registries", "a/b"), "/schema_registries/a%2Fb");
    }
}

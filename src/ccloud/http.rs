//! HTTP utilities for Confluent Cloud REST API calls

use super::auth::Credentials;
use crate::error::{ErrorCategory, ProviderError, Result};
use reqwest::{Client, Method, StatusCode};
use serde_json::Value;
use std::time::Duration;
use url::Url;

/// Fixed timeout applied to every request
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Maximum length of response body to log (to avoid logging sensitive data)
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Sanitize response body for logging
/// Truncates long responses and strips control characters
pub(crate) fn sanitize_for_log(body: &str) -> String {
    let total = body.chars().count();
    let truncated = if total > MAX_LOG_BODY_LENGTH {
        let head: String = body.chars().take(MAX_LOG_BODY_LENGTH).collect();
        format!("{}... [truncated, {} bytes total]", head, body.len())
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| !c.is_ascii_graphic() && c != ' ', "")
}

/// Status and raw body of a completed HTTP exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    /// The management API answers every successful call with exactly 200;
    /// 201, 204 and the rest of the 2xx range are not accepted.
    pub fn is_success(&self) -> bool {
        self.status == StatusCode::OK.as_u16()
    }
}

/// HTTP client wrapper for Confluent Cloud API calls
#[derive(Clone)]
pub struct CcloudHttpClient {
    client: Client,
}

impl CcloudHttpClient {
    /// Create a new HTTP client with the fixed request timeout
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("ccloud-provider/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(ProviderError::Client)?;

        Ok(Self { client })
    }

    /// Send a single request and return the raw status and body.
    ///
    /// Only network-level failures are errors here; interpreting the status
    /// code is left to the caller. There is exactly one attempt per call.
    pub async fn execute(
        &self,
        method: Method,
        url: Url,
        query: &[(&str, &str)],
        credentials: &Credentials,
        body: Option<&Value>,
    ) -> Result<ApiResponse> {
        tracing::debug!("{} {} query={:?}", method, url, query);

        let mut request = self
            .client
            .request(method.clone(), url.clone())
            .basic_auth(credentials.key(), Some(credentials.secret()))
            .query(query);

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|source| ProviderError::Request {
            url: url.to_string(),
            source,
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|source| ProviderError::Request {
            url: url.to_string(),
            source,
        })?;

        if status != StatusCode::OK {
            // Bodies may echo secrets; log only the sanitized head
            tracing::error!("API error: {} {} -> {} - {}", method, url, status, sanitize_for_log(&body));
        }

        Ok(ApiResponse {
            status: status.as_u16(),
            body,
        })
    }
}

/// Format a provider error for display to an operator
pub fn format_api_error(error: &ProviderError) -> String {
    match error {
        ProviderError::Status { status: 401, .. } => {
            "Authentication failed. Check CONFLUENT_CLOUD_API_KEY and CONFLUENT_CLOUD_API_SECRET.".to_string()
        }
        ProviderError::Status { status: 403, .. } => {
            "Permission denied. The API key lacks access to this environment.".to_string()
        }
        ProviderError::Status { status: 404, .. } => "Resource not found.".to_string(),
        ProviderError::Status { status: 429, .. } => {
            "Rate limit exceeded. Please try again later.".to_string()
        }
        ProviderError::Status { status, .. } if *status >= 500 => {
            "Confluent Cloud service temporarily unavailable. Please try again.".to_string()
        }
        err if err.is_timeout() => format!(
            "Request timed out after {}s.",
            REQUEST_TIMEOUT.as_secs()
        ),
        ProviderError::Api {
            message,
            validation_errors,
            ..
        } if !validation_errors.is_empty() => {
            format!("{}: {} ({})", ErrorCategory::Api.description(), message, validation_errors)
        }
        err => format!("{}: {}", err.category().description(), err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_truncates_long_bodies() {
        let body = "x".repeat(500);
        let sanitized = sanitize_for_log(&body);
        assert!(sanitized.contains("truncated, 500 bytes total"));
        assert!(sanitized.len() < body.len());
    }

    #[test]
    fn test_sanitize_keeps_multibyte_boundaries() {
        let body = "é".repeat(300);
        // Must not panic on a char boundary
        let sanitized = sanitize_for_log(&body);
        assert!(sanitized.contains("truncated"));
    }

    #[test]
    fn test_sanitize_strips_control_chars() {
        assert_eq!(sanitize_for_log("a\nb\tc"), "abc");
    }

    #[test]
    fn test_api_response_only_200_is_success() {
        let ok = ApiResponse { status: 200, body: String::new() };
        let created = ApiResponse { status: 201, body: String::new() };
        let no_content = ApiResponse { status: 204, body: String::new() };
        let bad = ApiResponse { status: 400, body: String::new() };
        assert!(ok.is_success());
        assert!(!created.is_success());
        assert!(!no_content.is_success());
        assert!(!bad.is_success());
    }

    #[test]
    fn test_format_status_errors() {
        let unauthorized = ProviderError::Status { status: 401, body: String::new() };
        assert!(format_api_error(&unauthorized).contains("Authentication failed"));

        let unavailable = ProviderError::Status { status: 503, body: String::new() };
        assert!(format_api_error(&unavailable).contains("temporarily unavailable"));

        let teapot = ProviderError::Status { status: 418, body: String::new() };
        assert_eq!(
            format_api_error(&teapot),
            "Transport error: HTTP request error. Response code: 418"
        );
    }

    #[test]
    fn test_format_api_error_includes_validation_errors() {
        let err = ProviderError::Api {
            message: "invalid config".into(),
            validation_errors: "location is required".into(),
            body: "{}".into(),
        };
        assert_eq!(
            format_api_error(&err),
            "API error: invalid config (location is required)"
        );
    }
}

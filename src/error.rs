//! Provider errors
//!
//! Every lifecycle operation returns [`ProviderError`]. Errors are never retried
//! or recovered internally; they go straight back to the caller as diagnostics.

use thiserror::Error;

/// Result type alias for provider operations
pub type Result<T> = std::result::Result<T, ProviderError>;

/// Broad classes of failure, used for reporting and tests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Request construction, network failure, timeout or any status other than 200
    Transport,
    /// 200 response whose envelope carries a non-empty `error`
    Api,
    /// Response body is not the JSON we expect
    Decode,
    /// Caller supplied input that cannot be used
    Validation,
    /// A lookup matched nothing
    NotFound,
    /// The operation does not exist for this resource kind
    Unsupported,
}

impl ErrorCategory {
    pub fn description(&self) -> &'static str {
        match self {
            Self::Transport => "Transport error",
            Self::Api => "API error",
            Self::Decode => "Decode error",
            Self::Validation => "Validation error",
            Self::NotFound => "Not found",
            Self::Unsupported => "Unsupported operation",
        }
    }
}

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("invalid request URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP request error. Response code: {status}")]
    Status { status: u16, body: String },

    #[error("unexpected API response: {message}")]
    Api {
        message: String,
        validation_errors: String,
        body: String,
    },

    #[error("failed to decode API response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("{0}")]
    Validation(String),

    #[error("no {kind} found for {query}")]
    NotFound { kind: &'static str, query: String },

    #[error("{operation} is not supported for {kind}")]
    Unsupported {
        operation: &'static str,
        kind: &'static str,
    },
}

impl ProviderError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidUrl { .. } | Self::Client(_) | Self::Request { .. } | Self::Status { .. } => {
                ErrorCategory::Transport
            }
            Self::Api { .. } => ErrorCategory::Api,
            Self::Decode(_) => ErrorCategory::Decode,
            Self::Validation(_) => ErrorCategory::Validation,
            Self::NotFound { .. } => ErrorCategory::NotFound,
            Self::Unsupported { .. } => ErrorCategory::Unsupported,
        }
    }

    /// Whether the request timed out before a response arrived
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Request { source, .. } if source.is_timeout())
    }

    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

//! Confluent Cloud Authentication
//!
//! Every request is authenticated with HTTP Basic Auth using a Cloud API key
//! and secret. The pair is resolved once when the client is built and is
//! read-only afterwards.

use std::fmt;

/// Environment variable holding the Cloud API key
pub const API_KEY_ENV: &str = "CONFLUENT_CLOUD_API_KEY";
/// Environment variable holding the Cloud API secret
pub const API_SECRET_ENV: &str = "CONFLUENT_CLOUD_API_SECRET";

/// Cloud API key pair used for Basic Auth
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    key: String,
    secret: String,
}

impl Credentials {
    pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            secret: secret.into(),
        }
    }

    /// Read the key pair from the environment
    pub fn from_env() -> Option<Self> {
        let key = non_empty_var(API_KEY_ENV)?;
        let secret = non_empty_var(API_SECRET_ENV)?;
        Some(Self::new(key, secret))
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub(crate) fn secret(&self) -> &str {
        &self.secret
    }
}

// Never print the secret, even in debug logs
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("key", &self.key)
            .field("secret", &"<redacted>")
            .finish()
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_secret() {
        let creds = Credentials::new("ABCDEFG", "super-secret-value");
        let printed = format!("{:?}", creds);
        assert!(printed.contains("ABCDEFG"));
        assert!(!printed.contains("super-secret-value"));
    }

    #[test]
    fn test_accessors() {
        let creds = Credentials::new("key", "secret");
        assert_eq!(creds.key(), "key");
        assert_eq!(creds.secret(), "secret");
    }
}

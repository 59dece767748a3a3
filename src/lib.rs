//! Declarative provider for Confluent Cloud
//!
//! Lifecycle handlers (create, read, update, delete, import) for API keys,
//! ksqlDB clusters and schema registries, plus a read-only schema registry
//! lookup. The host orchestration runtime decides when to call them; this
//! crate decides how each call maps onto the management API.

pub mod ccloud;
pub mod config;
pub mod error;
pub mod resource;

pub use error::{ErrorCategory, ProviderError, Result};

//! Resource lifecycle layer
//!
//! This module turns declared attributes into management API calls and API
//! responses back into resource state, one codec and handler set per kind.
//!
//! # Architecture
//!
//! - [`registry`] - Loads attribute schemas from embedded JSON and validates input
//! - [`codec`] - Shared codec trait and the create flow every kind uses
//! - [`envelope`] - Decodes the `{payload, error, validationErrors}` response wrapper
//! - [`dispatch`] - [`Provider`], routing lifecycle operations to per-kind handlers
//! - [`api_key`], [`ksqldb_cluster`], [`schema_registry`] - Per-kind codecs and handlers
//!
//! # Lifecycle completeness
//!
//! All kinds are create-only ([`Completeness::CreateOnly`]): Update and Delete
//! never reach the API, and only the schema registry refreshes on Read. The
//! tag is part of every kind's description so operators can see the gap.
//!
//! # Example
//!
//! ```ignore
//! use ccloud_provider::resource::{Provider, ResourceData, ResourceKind};
//!
//! async fn adopt(provider: &Provider) -> ccloud_provider::error::Result<ResourceData> {
//!     let imported = provider.import(ResourceKind::SchemaRegistry, "env-abc/lsrc-123").await?;
//!     provider.read(ResourceKind::SchemaRegistry, &imported).await
//! }
//! ```

pub mod api_key;
pub mod codec;
mod data;
pub mod dispatch;
pub mod envelope;
mod kind;
pub mod ksqldb_cluster;
pub mod registry;
pub mod schema_registry;

pub use data::ResourceData;
pub use dispatch::Provider;
pub use kind::{Completeness, ResourceKind};
pub use registry::{get_all_resource_keys, AttributeDef, AttributeMode, SchemaDef};

//! Resource kinds and their lifecycle completeness

use super::registry::{self, SchemaDef};
use crate::error::ProviderError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// How much of the lifecycle actually reaches the remote system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Completeness {
    /// Create, Read, Update and Delete all call the API
    FullyReconciling,
    /// Only Create calls the API (plus Read when `refreshes`); Update and
    /// Delete succeed without touching the remote object
    CreateOnly { refreshes: bool },
}

impl Completeness {
    pub fn refreshes(&self) -> bool {
        match self {
            Self::FullyReconciling => true,
            Self::CreateOnly { refreshes } => *refreshes,
        }
    }

    pub fn deletes(&self) -> bool {
        matches!(self, Self::FullyReconciling)
    }
}

/// Managed resource kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    ApiKey,
    KsqlDbCluster,
    SchemaRegistry,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 3] = [Self::ApiKey, Self::KsqlDbCluster, Self::SchemaRegistry];

    /// Type name used by the host runtime and the schema files
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::ApiKey => "confluentcloud_api_key",
            Self::KsqlDbCluster => "confluentcloud_ksqldb_cluster",
            Self::SchemaRegistry => "confluentcloud_schema_registry",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::ApiKey => "API key",
            Self::KsqlDbCluster => "ksqlDB cluster",
            Self::SchemaRegistry => "schema registry",
        }
    }

    pub fn completeness(&self) -> Completeness {
        match self {
            Self::ApiKey | Self::KsqlDbCluster => Completeness::CreateOnly { refreshes: false },
            Self::SchemaRegistry => Completeness::CreateOnly { refreshes: true },
        }
    }

    pub fn importable(&self) -> bool {
        matches!(self, Self::SchemaRegistry)
    }

    /// Attribute schema of the managed resource
    pub fn schema(&self) -> &'static SchemaDef {
        registry::get_resource_schema(self.type_name())
            .unwrap_or_else(|| panic!("no embedded schema for {}", self.type_name()))
    }

    /// Attribute schema of the read-only data source, if the kind has one
    pub fn data_source_schema(&self) -> Option<&'static SchemaDef> {
        registry::get_data_source_schema(self.type_name())
    }

    /// Schema plus lifecycle metadata, as printed by `ccloud-provider schema`
    pub fn describe(&self) -> serde_json::Value {
        serde_json::json!({
            "type_name": self.type_name(),
            "completeness": self.completeness(),
            "importable": self.importable(),
            "schema": self.schema(),
            "data_source": self.data_source_schema(),
        })
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

impl FromStr for ResourceKind {
    type Err = ProviderError;

    /// Accepts the full type name or its short form (`schema_registry`, `schema-registry`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        let short = normalized
            .strip_prefix("confluentcloud_")
            .unwrap_or(&normalized);

        match short {
            "api_key" => Ok(Self::ApiKey),
            "ksqldb_cluster" | "ksql" => Ok(Self::KsqlDbCluster),
            "schema_registry" => Ok(Self::SchemaRegistry),
            _ => Err(ProviderError::validation(format!(
                "unknown resource kind '{}' (expected one of: {})",
                s,
                registry::get_all_resource_keys().join(", ")
            ))),
        }
    }
}

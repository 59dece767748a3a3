//! Schema Registry - Load attribute declarations from JSON
//!
//! This module loads the attribute schema of every resource kind and data
//! source from embedded JSON files and validates declared input against it.

use super::data::ResourceData;
use crate::error::{ProviderError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Embedded schema JSON files (compiled into the binary)
const SCHEMA_FILES: &[&str] = &[
    include_str!("../resources/api_key.json"),
    include_str!("../resources/ksqldb_cluster.json"),
    include_str!("../resources/schema_registry.json"),
];

/// How an attribute gets its value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeMode {
    /// Must be supplied by the user
    Required,
    /// May be supplied by the user
    Optional,
    /// Only ever populated from API responses
    Computed,
}

/// Attribute definition from JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributeDef {
    pub name: String,
    pub mode: AttributeMode,
    /// Changing the value requires destroying and recreating the object
    #[serde(default)]
    pub force_new: bool,
    #[serde(default)]
    pub sensitive: bool,
}

impl AttributeDef {
    pub fn is_declared(&self) -> bool {
        self.mode != AttributeMode::Computed
    }
}

/// Resource or data source schema from JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaDef {
    pub display_name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Expected shape of the external id accepted by import
    #[serde(default)]
    pub import_id_format: Option<String>,
    pub attributes: Vec<AttributeDef>,
}

impl SchemaDef {
    pub fn attribute(&self, name: &str) -> Option<&AttributeDef> {
        self.attributes.iter().find(|a| a.name == name)
    }

    pub fn required_attributes(&self) -> impl Iterator<Item = &AttributeDef> {
        self.attributes
            .iter()
            .filter(|a| a.mode == AttributeMode::Required)
    }

    /// Check user-declared input before any request is built.
    ///
    /// Reports every problem at once: missing required attributes, computed
    /// attributes supplied by the user, and attributes the schema does not know.
    pub fn validate_declared(&self, data: &ResourceData) -> Result<()> {
        let mut problems = Vec::new();

        for attr in self.required_attributes() {
            if !has_value(data.get(&attr.name)) {
                problems.push(format!("missing required attribute '{}'", attr.name));
            }
        }

        for name in data.attributes.keys() {
            match self.attribute(name) {
                Some(attr) if !attr.is_declared() => {
                    problems.push(format!("attribute '{}' is computed and cannot be set", name));
                }
                Some(_) => {}
                None => problems.push(format!("unknown attribute '{}'", name)),
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(ProviderError::validation(format!(
                "invalid {} configuration: {}",
                self.display_name,
                problems.join("; ")
            )))
        }
    }
}

fn has_value(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    }
}

/// Root structure of resources/*.json
#[derive(Debug, Clone, Deserialize)]
pub struct SchemaConfig {
    #[serde(default)]
    pub resources: HashMap<String, SchemaDef>,
    #[serde(default)]
    pub data_sources: HashMap<String, SchemaDef>,
}

/// Global registry loaded from JSON
static REGISTRY: OnceLock<SchemaConfig> = OnceLock::new();

/// Get the schema registry (loads from embedded JSON on first access)
pub fn get_registry() -> &'static SchemaConfig {
    REGISTRY.get_or_init(|| {
        let mut final_config = SchemaConfig {
            resources: HashMap::new(),
            data_sources: HashMap::new(),
        };

        for content in SCHEMA_FILES {
            let partial: SchemaConfig = serde_json::from_str(content)
                .unwrap_or_else(|e| panic!("Failed to parse embedded schema JSON: {}", e));
            final_config.resources.extend(partial.resources);
            final_config.data_sources.extend(partial.data_sources);
        }

        final_config
    })
}

/// Get a resource schema by type name
pub fn get_resource_schema(type_name: &str) -> Option<&'static SchemaDef> {
    get_registry().resources.get(type_name)
}

/// Get a data source schema by type name
pub fn get_data_source_schema(type_name: &str) -> Option<&'static SchemaDef> {
    get_registry().data_sources.get(type_name)
}

/// Get all resource type names, sorted
pub fn get_all_resource_keys() -> Vec<&'static str> {
    let mut keys: Vec<&'static str> = get_registry()
        .resources
        .keys()
        .map(|s| s.as_str())
        .collect();
    keys.sort_unstable();
    keys
}

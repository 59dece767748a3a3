//! Resource state records
//!
//! A [`ResourceData`] is what the host runtime hands to a lifecycle handler and
//! what the handler hands back: the opaque identity plus a flat attribute map
//! holding both declared and computed fields.

use crate::error::{ProviderError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceData {
    /// Identity assigned by the remote system; `None` until created
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub attributes: Map<String, Value>,
}

impl ResourceData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_attributes(attributes: Map<String, Value>) -> Self {
        Self {
            id: None,
            attributes,
        }
    }

    /// Builder-style attribute setter
    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Identity, or a validation error naming the operation that needed it
    pub fn require_id(&self, operation: &str) -> Result<&str> {
        self.id()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| ProviderError::validation(format!("{} requires a resource id", operation)))
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).and_then(|v| v.as_str())
    }

    /// String attribute, or empty when unset (optional inputs)
    pub fn str_or_empty(&self, name: &str) -> &str {
        self.get_str(name).unwrap_or("")
    }

    /// Non-empty string attribute, or a validation error
    pub fn require_str(&self, name: &str) -> Result<&str> {
        self.get_str(name)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ProviderError::validation(format!("missing required attribute '{}'", name)))
    }

    pub fn set(&mut self, name: &str, value: impl Into<Value>) {
        self.attributes.insert(name.to_string(), value.into());
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.attributes.remove(name)
    }
}

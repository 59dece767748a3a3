//! Schema Registry resource and data source
//!
//! The only kind whose Read refreshes from the API, and the only one that
//! supports import and a read-only lookup by environment.

use super::codec::{self, Codec, ACCOUNT_ID_PARAM};
use super::data::ResourceData;
use super::envelope::{self, nullable};
use super::kind::ResourceKind;
use crate::ccloud::client::{item_path, CcloudClient};
use crate::error::{ProviderError, Result};
use serde::{Deserialize, Serialize};

/// Name given to every schema registry created by the provider
pub const DEFAULT_NAME: &str = "account schema-registry";

const COLLECTION: &str = "/schema_registries";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaRegistryConfig {
    pub account_id: String,
    pub location: String,
    pub name: String,
    pub service_provider: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateSchemaRegistryRequest {
    pub config: SchemaRegistryConfig,
}

/// Schema registry cluster as returned by the API
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SchemaRegistryCluster {
    #[serde(deserialize_with = "nullable")]
    pub id: String,
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    pub kafka_cluster_id: Option<String>,
    pub endpoint: Option<String>,
    pub status: Option<String>,
    pub physical_cluster_id: Option<String>,
    pub account_id: Option<String>,
    pub organization_id: Option<i64>,
    pub max_schemas: Option<i64>,
    pub org_resource_id: Option<String>,
    pub created: Option<String>,
    pub modified: Option<String>,
}

/// Single-cluster payload (create and read)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SchemaRegistryResponse {
    #[serde(deserialize_with = "nullable")]
    pub cluster: SchemaRegistryCluster,
    pub credentials: Option<serde_json::Value>,
}

/// List payload (lookup)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SchemaRegistryList {
    #[serde(deserialize_with = "nullable")]
    pub clusters: Vec<SchemaRegistryCluster>,
}

pub struct SchemaRegistryCodec;

impl Codec for SchemaRegistryCodec {
    const KIND: ResourceKind = ResourceKind::SchemaRegistry;
    const COLLECTION: &'static str = COLLECTION;

    type Request = CreateSchemaRegistryRequest;
    type Response = SchemaRegistryResponse;

    fn encode(data: &ResourceData) -> Result<CreateSchemaRegistryRequest> {
        Ok(CreateSchemaRegistryRequest {
            config: SchemaRegistryConfig {
                account_id: data.require_str("environment_id")?.to_string(),
                location: data.require_str("location")?.to_string(),
                name: DEFAULT_NAME.to_string(),
                service_provider: data.require_str("service_provider")?.to_string(),
            },
        })
    }

    // endpoint is not copied from the response; it stays unset
    fn apply(response: SchemaRegistryResponse, mut data: ResourceData) -> Result<ResourceData> {
        let cluster = response.cluster;
        data.set("name", cluster.name);
        data.id = Some(cluster.id);
        Ok(data)
    }
}

/// Create a schema registry; identity is the cluster id
pub async fn create(client: &CcloudClient, data: &ResourceData) -> Result<ResourceData> {
    codec::create::<SchemaRegistryCodec>(client, data).await
}

/// Refresh `name` from the API by identity.
///
/// A 404 means the cluster is gone and is reported as NotFound so the host
/// can drop it from state.
pub async fn read(client: &CcloudClient, data: &ResourceData) -> Result<ResourceData> {
    let id = data.require_id("schema registry read")?;
    let environment_id = data.require_str("environment_id")?;

    let response = client
        .get(&item_path(COLLECTION, id), &[(ACCOUNT_ID_PARAM, environment_id)])
        .await?;

    if response.status == 404 {
        return Err(ProviderError::NotFound {
            kind: ResourceKind::SchemaRegistry.display_name(),
            query: format!("id {} in environment {}", id, environment_id),
        });
    }

    let payload: SchemaRegistryResponse = envelope::decode(&response)?;

    let mut refreshed = data.clone();
    refreshed.set("name", payload.cluster.name);
    Ok(refreshed)
}

/// Split an import id of the form `<environment-id>/<cluster-id>`
pub fn parse_import_id(external_id: &str) -> Result<(&str, &str)> {
    let parts: Vec<&str> = external_id.split('/').collect();

    match parts.as_slice() {
        [environment_id, cluster_id] if !environment_id.is_empty() && !cluster_id.is_empty() => {
            Ok((*environment_id, *cluster_id))
        }
        _ => Err(ProviderError::validation(format!(
            "invalid format for schema registry import: expected '<environment-id>/<cluster-id>', got '{}'",
            external_id
        ))),
    }
}

/// Adopt an existing schema registry without calling the API
pub fn import(external_id: &str) -> Result<ResourceData> {
    let (environment_id, cluster_id) = parse_import_id(external_id)?;
    tracing::info!("Schema Registry import for {}", cluster_id);

    Ok(ResourceData::new()
        .with_id(cluster_id)
        .with("environment_id", environment_id))
}

/// Data source: find the schema registry of an environment.
///
/// An empty list is NotFound. When several clusters come back the first one
/// wins; the API is expected to return at most one per environment.
pub async fn lookup(client: &CcloudClient, data: &ResourceData) -> Result<ResourceData> {
    if let Some(schema) = ResourceKind::SchemaRegistry.data_source_schema() {
        schema.validate_declared(data)?;
    }
    let environment_id = data.require_str("environment_id")?;

    let response = client
        .get(COLLECTION, &[(ACCOUNT_ID_PARAM, environment_id)])
        .await?;
    let payload: SchemaRegistryList = envelope::decode(&response)?;

    let count = payload.clusters.len();
    let Some(cluster) = payload.clusters.into_iter().next() else {
        return Err(ProviderError::NotFound {
            kind: ResourceKind::SchemaRegistry.display_name(),
            query: format!("environment {}", environment_id),
        });
    };

    if count > 1 {
        tracing::warn!(
            "{} schema registries found in {}, using the first ({})",
            count,
            environment_id,
            cluster.id
        );
    }

    let mut found = data.clone().with_id(cluster.id);
    found.set("name", cluster.name);
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCategory;
    use serde_json::json;

    #[test]
    fn test_encode_uses_fixed_name() {
        let data = ResourceData::new()
            .with("environment_id", "env-18vqv")
            .with("kafka_cluster_id", "lkc-415jz")
            .with("service_provider", "aws")
            .with("location", "us-east-2");

        let request = SchemaRegistryCodec::encode(&data).unwrap();
        assert_eq!(
            serde_json::to_value(request).unwrap(),
            json!({
                "config": {
                    "accountId": "env-18vqv",
                    "location": "us-east-2",
                    "name": "account schema-registry",
                    "serviceProvider": "aws"
                }
            })
        );
    }

    #[test]
    fn test_parse_import_id() {
        assert_eq!(parse_import_id("env-abc/lkc-123").unwrap(), ("env-abc", "lkc-123"));
    }

    #[test]
    fn test_parse_import_id_rejects_bad_formats() {
        for bad in ["env-abc", "a/b/c", "", "/lsrc-1", "env-abc/"] {
            let err = parse_import_id(bad).unwrap_err();
            assert_eq!(err.category(), ErrorCategory::Validation, "input {:?}", bad);
            assert!(err.to_string().contains("<environment-id>/<cluster-id>"));
        }
    }

    #[test]
    fn test_import_sets_identity_and_environment() {
        let data = import("env-abc/lkc-123").unwrap();
        assert_eq!(data.id(), Some("lkc-123"));
        assert_eq!(data.get_str("environment_id"), Some("env-abc"));
        assert_eq!(data.attributes.len(), 1);
    }

    #[test]
    fn test_list_payload_null_clusters() {
        let list: SchemaRegistryList = serde_json::from_value(json!({"clusters": null})).unwrap();
        assert!(list.clusters.is_empty());
    }
}

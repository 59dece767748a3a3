//! API key resource
//!
//! Create-only: the key and secret are returned once by the create call and
//! are never refreshed afterwards.

use super::codec::{self, Codec};
use super::data::ResourceData;
use super::envelope::nullable;
use super::kind::ResourceKind;
use crate::ccloud::client::CcloudClient;
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Logical cluster an API key is scoped to
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogicalCluster {
    #[serde(deserialize_with = "nullable")]
    pub id: String,
    #[serde(rename = "type", deserialize_with = "nullable")]
    pub kind: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiKeySpec {
    pub account_id: String,
    pub description: String,
    pub logical_clusters: Vec<LogicalCluster>,
    pub user_id: i64,
    pub user_resource_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateApiKeyRequest {
    #[serde(rename = "apiKey")]
    pub api_key: ApiKeySpec,
}

/// API key as returned by the API
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApiKey {
    #[serde(deserialize_with = "nullable")]
    pub key: String,
    #[serde(deserialize_with = "nullable")]
    pub secret: String,
    pub id: Option<i64>,
    pub account_id: Option<String>,
    pub description: Option<String>,
    pub logical_clusters: Option<Vec<LogicalCluster>>,
    pub user_resource_id: Option<String>,
    pub service_account: Option<bool>,
    pub created: Option<String>,
    pub modified: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApiKeyResponse {
    #[serde(alias = "apiKey", deserialize_with = "nullable")]
    pub api_key: ApiKey,
}

pub struct ApiKeyCodec;

impl Codec for ApiKeyCodec {
    const KIND: ResourceKind = ResourceKind::ApiKey;
    const COLLECTION: &'static str = "/api_keys";

    type Request = CreateApiKeyRequest;
    type Response = ApiKeyResponse;

    fn encode(data: &ResourceData) -> Result<CreateApiKeyRequest> {
        Ok(CreateApiKeyRequest {
            api_key: ApiKeySpec {
                account_id: data.require_str("environment_id")?.to_string(),
                description: data.str_or_empty("description").to_string(),
                logical_clusters: vec![LogicalCluster {
                    id: data.require_str("resource_id")?.to_string(),
                    kind: data.str_or_empty("resource_type").to_string(),
                }],
                user_id: 0,
                user_resource_id: data.require_str("owner_id")?.to_string(),
            },
        })
    }

    fn apply(response: ApiKeyResponse, mut data: ResourceData) -> Result<ResourceData> {
        let api_key = response.api_key;
        data.set("key", api_key.key.clone());
        data.set("secret", api_key.secret);
        data.id = Some(api_key.key);
        Ok(data)
    }
}

/// Create an API key; identity is the generated key
pub async fn create(client: &CcloudClient, data: &ResourceData) -> Result<ResourceData> {
    codec::create::<ApiKeyCodec>(client, data).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn declared() -> ResourceData {
        ResourceData::new()
            .with("environment_id", "env-abc")
            .with("description", "ci key")
            .with("owner_id", "sa-gq8no3")
            .with("owner_email", "ci@example.com")
            .with("resource_type", "kafka")
            .with("resource_id", "lkc-123")
    }

    #[test]
    fn test_encode_wire_shape() {
        let request = ApiKeyCodec::encode(&declared()).unwrap();
        assert_eq!(
            serde_json::to_value(request).unwrap(),
            json!({
                "apiKey": {
                    "accountId": "env-abc",
                    "description": "ci key",
                    "logicalClusters": [{"id": "lkc-123", "type": "kafka"}],
                    "userId": 0,
                    "userResourceId": "sa-gq8no3"
                }
            })
        );
    }

    #[test]
    fn test_encode_optional_fields_default_empty() {
        let data = ResourceData::new()
            .with("environment_id", "env-abc")
            .with("owner_id", "u-1")
            .with("resource_id", "lkc-1");
        let request = ApiKeyCodec::encode(&data).unwrap();
        assert_eq!(request.api_key.description, "");
        assert_eq!(request.api_key.logical_clusters[0].kind, "");
    }

    #[test]
    fn test_apply_sets_key_secret_and_identity() {
        let response: ApiKeyResponse = serde_json::from_value(json!({
            "api_key": {"key": "ABCDEF", "secret": "s3cr3t", "id": 42, "logical_clusters": [{"id": "lkc-123", "type": "kafka"}]}
        }))
        .unwrap();

        let data = ApiKeyCodec::apply(response, declared()).unwrap();
        assert_eq!(data.id(), Some("ABCDEF"));
        assert_eq!(data.get_str("key"), Some("ABCDEF"));
        assert_eq!(data.get_str("secret"), Some("s3cr3t"));
        assert_eq!(data.get_str("owner_id"), Some("sa-gq8no3"));
    }

    #[test]
    fn test_response_accepts_camel_case_key() {
        let response: ApiKeyResponse =
            serde_json::from_value(json!({"apiKey": {"key": "K", "secret": "S"}})).unwrap();
        assert_eq!(response.api_key.key, "K");
    }
}

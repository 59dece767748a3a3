//! ksqlDB cluster resource

use super::codec::{self, Codec};
use super::data::ResourceData;
use super::envelope::nullable;
use super::kind::ResourceKind;
use crate::ccloud::client::CcloudClient;
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Confluent streaming units provisioned for every new cluster
pub const DEFAULT_CSU_COUNT: u32 = 4;

#[derive(Debug, Clone, Serialize)]
pub struct KafkaApiKey {
    pub key: String,
    pub secret: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KsqlDbClusterConfig {
    pub account_id: String,
    pub kafka_api_key: KafkaApiKey,
    pub kafka_cluster_id: String,
    pub name: String,
    pub total_num_csu: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateKsqlDbClusterRequest {
    pub config: KsqlDbClusterConfig,
}

/// ksqlDB cluster as returned by the API
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct KsqlDbCluster {
    #[serde(deserialize_with = "nullable")]
    pub id: String,
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    pub account_id: Option<String>,
    pub kafka_cluster_id: Option<String>,
    pub endpoint: Option<String>,
    pub output_topic_prefix: Option<String>,
    pub status: Option<String>,
    pub is_paused: Option<bool>,
    pub total_num_csu: Option<u32>,
    pub created: Option<String>,
    pub modified: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct KsqlDbClusterResponse {
    #[serde(deserialize_with = "nullable")]
    pub cluster: KsqlDbCluster,
    pub credentials: Option<serde_json::Value>,
}

pub struct KsqlDbClusterCodec;

impl Codec for KsqlDbClusterCodec {
    const KIND: ResourceKind = ResourceKind::KsqlDbCluster;
    const COLLECTION: &'static str = "/ksqls";

    type Request = CreateKsqlDbClusterRequest;
    type Response = KsqlDbClusterResponse;

    fn encode(data: &ResourceData) -> Result<CreateKsqlDbClusterRequest> {
        Ok(CreateKsqlDbClusterRequest {
            config: KsqlDbClusterConfig {
                account_id: data.require_str("environment_id")?.to_string(),
                kafka_api_key: KafkaApiKey {
                    key: data.require_str("kafka_api_key")?.to_string(),
                    secret: data.require_str("kafka_api_secret")?.to_string(),
                },
                kafka_cluster_id: data.require_str("kafka_id")?.to_string(),
                name: data.require_str("name")?.to_string(),
                total_num_csu: DEFAULT_CSU_COUNT,
            },
        })
    }

    // topic_prefix and endpoint are declared but not populated from the
    // create response; they stay unset until a refreshing Read exists.
    fn apply(response: KsqlDbClusterResponse, mut data: ResourceData) -> Result<ResourceData> {
        let cluster = response.cluster;
        data.set("name", cluster.name);
        data.id = Some(cluster.id);
        Ok(data)
    }
}

/// Create a ksqlDB cluster; identity is the cluster id
pub async fn create(client: &CcloudClient, data: &ResourceData) -> Result<ResourceData> {
    codec::create::<KsqlDbClusterCodec>(client, data).await
}

//! Lifecycle Dispatch
//!
//! Maps (kind, operation) pairs onto the per-kind handlers. The host runtime
//! talks to a [`Provider`]; the provider owns the client every handler uses.

use super::data::ResourceData;
use super::kind::ResourceKind;
use super::{api_key, ksqldb_cluster, schema_registry};
use crate::ccloud::client::CcloudClient;
use crate::error::{ProviderError, Result};

/// Entry point for lifecycle operations
#[derive(Clone)]
pub struct Provider {
    client: CcloudClient,
}

impl Provider {
    pub fn new(client: CcloudClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &CcloudClient {
        &self.client
    }

    /// Create the remote object and return its identity and computed fields
    pub async fn create(&self, kind: ResourceKind, declared: &ResourceData) -> Result<ResourceData> {
        tracing::info!("create: kind={}", kind);

        match kind {
            ResourceKind::ApiKey => api_key::create(&self.client, declared).await,
            ResourceKind::KsqlDbCluster => ksqldb_cluster::create(&self.client, declared).await,
            ResourceKind::SchemaRegistry => schema_registry::create(&self.client, declared).await,
        }
    }

    /// Refresh computed fields from the API for kinds that support it
    pub async fn read(&self, kind: ResourceKind, current: &ResourceData) -> Result<ResourceData> {
        tracing::debug!("read: kind={}, id={:?}", kind, current.id());

        match kind {
            ResourceKind::SchemaRegistry => schema_registry::read(&self.client, current).await,
            ResourceKind::ApiKey | ResourceKind::KsqlDbCluster => {
                tracing::debug!(
                    "read: {} is {:?}, state returned unchanged",
                    kind,
                    kind.completeness()
                );
                Ok(current.clone())
            }
        }
    }

    /// Never calls the API and returns the prior record unchanged.
    ///
    /// Every declared attribute forces replacement, so the host destroys and
    /// recreates instead of updating in place. Planned values never reach
    /// state, so the stored environment keeps matching the remote object.
    pub async fn update(
        &self,
        kind: ResourceKind,
        prior: &ResourceData,
        planned: &ResourceData,
    ) -> Result<ResourceData> {
        let changed: Vec<&str> = kind
            .schema()
            .attributes
            .iter()
            .filter(|attr| attr.is_declared() && prior.get(&attr.name) != planned.get(&attr.name))
            .map(|attr| attr.name.as_str())
            .collect();

        if !changed.is_empty() {
            tracing::warn!(
                "update: {} {:?} changed {:?}, which require replacement; state left unchanged and no API call made",
                kind,
                prior.id(),
                changed
            );
        }

        Ok(prior.clone())
    }

    /// Delete is a no-op for create-only kinds; the remote object stays
    pub async fn delete(&self, kind: ResourceKind, current: &ResourceData) -> Result<()> {
        if !kind.completeness().deletes() {
            tracing::warn!(
                "delete: {} {} removed from state only; the remote object is left in place",
                kind,
                current.id().unwrap_or("<no id>")
            );
        }
        Ok(())
    }

    /// Adopt an existing remote object from an external id
    pub async fn import(&self, kind: ResourceKind, external_id: &str) -> Result<ResourceData> {
        match kind {
            ResourceKind::SchemaRegistry => schema_registry::import(external_id),
            ResourceKind::ApiKey | ResourceKind::KsqlDbCluster => Err(ProviderError::Unsupported {
                operation: "import",
                kind: kind.type_name(),
            }),
        }
    }

    /// Read-only lookup used to reference objects the provider does not manage
    pub async fn read_data_source(&self, kind: ResourceKind, query: &ResourceData) -> Result<ResourceData> {
        tracing::info!("read_data_source: kind={}", kind);

        match kind {
            ResourceKind::SchemaRegistry => schema_registry::lookup(&self.client, query).await,
            ResourceKind::ApiKey | ResourceKind::KsqlDbCluster => Err(ProviderError::Unsupported {
                operation: "data source lookup",
                kind: kind.type_name(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ccloud::auth::Credentials;
    use crate::error::ErrorCategory;

    // Points at a closed port: any accidental request fails loudly
    fn provider() -> Provider {
        let client = CcloudClient::with_base_url(Credentials::new("k", "s"), "http://127.0.0.1:9").unwrap();
        Provider::new(client)
    }

    #[tokio::test]
    async fn test_update_returns_prior_unchanged() {
        let prior = ResourceData::new()
            .with_id("ABCDEF")
            .with("environment_id", "env-abc")
            .with("description", "old")
            .with("key", "ABCDEF")
            .with("secret", "s3cr3t");
        let planned = ResourceData::new()
            .with("environment_id", "env-other")
            .with("description", "new");

        let next = provider()
            .update(ResourceKind::ApiKey, &prior, &planned)
            .await
            .unwrap();

        assert_eq!(next, prior);
        assert_eq!(next.get_str("environment_id"), Some("env-abc"));
        assert_eq!(next.get_str("description"), Some("old"));
    }

    #[tokio::test]
    async fn test_delete_is_noop_for_create_only_kinds() {
        let current = ResourceData::new().with_id("lsrc-1");
        for kind in ResourceKind::ALL {
            assert!(provider().delete(kind, &current).await.is_ok());
        }
    }

    #[tokio::test]
    async fn test_import_unsupported_kinds() {
        let err = provider()
            .import(ResourceKind::ApiKey, "env-abc/ABCDEF")
            .await
            .unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Unsupported);
        assert_eq!(err.to_string(), "import is not supported for confluentcloud_api_key");
    }

    #[tokio::test]
    async fn test_data_source_unsupported_kinds() {
        let err = provider()
            .read_data_source(ResourceKind::KsqlDbCluster, &ResourceData::new())
            .await
            .unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Unsupported);
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_input_before_request() {
        let declared = ResourceData::new().with("environment_id", "env-abc");
        let err = provider()
            .create(ResourceKind::KsqlDbCluster, &declared)
            .await
            .unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Validation);
    }
}

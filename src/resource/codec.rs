//! Resource codecs
//!
//! One codec per kind maps declared attributes to the wire request and the
//! decoded response payload back onto a resource record. Every lifecycle
//! operation on a kind goes through the same codec.

use super::data::ResourceData;
use super::envelope;
use super::kind::ResourceKind;
use crate::ccloud::client::CcloudClient;
use crate::error::{ProviderError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Query parameter carrying the environment on every call
pub const ACCOUNT_ID_PARAM: &str = "account_id";

pub trait Codec {
    const KIND: ResourceKind;
    /// Collection path, e.g. `/api_keys`
    const COLLECTION: &'static str;

    type Request: Serialize;
    type Response: DeserializeOwned;

    /// Declared attributes -> wire request
    fn encode(data: &ResourceData) -> Result<Self::Request>;

    /// Decoded payload -> identity and computed attributes on top of `data`
    fn apply(response: Self::Response, data: ResourceData) -> Result<ResourceData>;
}

/// Create flow shared by every kind: validate, encode, POST, decode, apply.
///
/// Returns a new record; the caller's record is never touched, so a failure
/// at any step leaves its identity unset.
pub(crate) async fn create<C: Codec>(client: &CcloudClient, data: &ResourceData) -> Result<ResourceData> {
    C::KIND.schema().validate_declared(data)?;

    let environment_id = data.require_str("environment_id")?;
    let body = serde_json::to_value(C::encode(data)?)?;

    let response = client
        .post(C::COLLECTION, &[(ACCOUNT_ID_PARAM, environment_id)], &body)
        .await?;
    let payload: C::Response = envelope::decode(&response)?;

    let created = C::apply(payload, data.clone())?;
    if created.id().map_or(true, str::is_empty) {
        return Err(ProviderError::Api {
            message: format!("{} response did not include an id", C::KIND.display_name()),
            validation_errors: String::new(),
            body: response.body,
        });
    }

    tracing::info!(
        "Created {} {}",
        C::KIND.display_name(),
        created.id().unwrap_or("<no id>")
    );
    Ok(created)
}

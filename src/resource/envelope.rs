//! Wire envelope decoding
//!
//! Every management API response wraps its payload next to an optional
//! `error` and `validationErrors`. Any status other than 200 is rejected
//! before the body is looked at; a 200 with a non-empty `error` is a logical
//! failure.

use crate::ccloud::http::ApiResponse;
use crate::error::{ProviderError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// Outer response shape, payload kept raw until the error fields are checked
#[derive(Debug, Deserialize)]
pub struct Envelope {
    #[serde(default, alias = "Error")]
    pub error: Option<Value>,
    #[serde(default, rename = "validationErrors", alias = "validation_errors")]
    pub validation_errors: Option<Value>,
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl Envelope {
    /// Logical error message, if the API reported one.
    ///
    /// `error` is a string (or an object carrying `message`); a boolean or
    /// number there is a malformed body, not a reported failure.
    pub fn error_message(&self) -> Result<Option<String>> {
        match &self.error {
            Some(value @ (Value::Bool(_) | Value::Number(_))) => {
                Err(ProviderError::Decode(<serde_json::Error as serde::de::Error>::custom(
                    format!("expected a string or object in `error`, found {}", value),
                )))
            }
            Some(value) => Ok(render_error(value)),
            None => Ok(None),
        }
    }

    pub fn validation_message(&self) -> String {
        self.validation_errors
            .as_ref()
            .and_then(render_error)
            .unwrap_or_default()
    }
}

/// Render an error field; empty strings, nulls and empty objects mean "no error"
fn render_error(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Object(map) if map.is_empty() => None,
        Value::Object(map) => map
            .get("message")
            .and_then(|m| m.as_str())
            .map(str::to_string)
            .or_else(|| Some(value.to_string())),
        Value::Array(items) if items.is_empty() => None,
        other => Some(other.to_string()),
    }
}

/// Decode a response into the payload type `T`
pub fn decode<T: DeserializeOwned>(response: &ApiResponse) -> Result<T> {
    if !response.is_success() {
        return Err(ProviderError::Status {
            status: response.status,
            body: response.body.clone(),
        });
    }

    let envelope: Envelope = serde_json::from_str(&response.body)?;

    if let Some(message) = envelope.error_message()? {
        return Err(ProviderError::Api {
            message,
            validation_errors: envelope.validation_message(),
            body: response.body.clone(),
        });
    }

    Ok(serde_json::from_value(Value::Object(envelope.payload))?)
}

/// Treat an explicit JSON `null` like an absent field
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCategory;
    use serde_json::json;

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    struct Payload {
        #[serde(deserialize_with = "nullable")]
        cluster: Cluster,
    }

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    struct Cluster {
        #[serde(deserialize_with = "nullable")]
        id: String,
    }

    fn ok(body: Value) -> ApiResponse {
        ApiResponse {
            status: 200,
            body: body.to_string(),
        }
    }

    #[test]
    fn test_decode_success() {
        let payload: Payload = decode(&ok(json!({"cluster": {"id": "lsrc-1"}, "error": ""}))).unwrap();
        assert_eq!(payload.cluster.id, "lsrc-1");
    }

    #[test]
    fn test_decode_missing_error_field_is_success() {
        let payload: Payload = decode(&ok(json!({"cluster": {"id": "lsrc-1"}}))).unwrap();
        assert_eq!(payload.cluster.id, "lsrc-1");
    }

    #[test]
    fn test_decode_null_payload_defaults() {
        let payload: Payload = decode(&ok(json!({"cluster": null, "error": null}))).unwrap();
        assert_eq!(payload.cluster.id, "");
    }

    #[test]
    fn test_error_string_is_api_error() {
        let err = decode::<Payload>(&ok(json!({
            "cluster": null,
            "error": "quota exceeded",
            "validationErrors": "name: too long"
        })))
        .unwrap_err();

        assert_eq!(err.category(), ErrorCategory::Api);
        match err {
            ProviderError::Api {
                message,
                validation_errors,
                body,
            } => {
                assert_eq!(message, "quota exceeded");
                assert_eq!(validation_errors, "name: too long");
                assert!(body.contains("quota exceeded"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_error_object_uses_message() {
        let err = decode::<Payload>(&ok(json!({
            "error": {"code": 400, "message": "bad location"}
        })))
        .unwrap_err();
        assert_eq!(err.to_string(), "unexpected API response: bad location");
    }

    #[test]
    fn test_scalar_error_is_decode_error() {
        for marker in [json!(false), json!(true), json!(0), json!(500)] {
            let err = decode::<Payload>(&ok(json!({
                "cluster": {"id": "lsrc-1"},
                "error": marker
            })))
            .unwrap_err();
            assert_eq!(err.category(), ErrorCategory::Decode, "error = {}", marker);
        }
    }

    #[test]
    fn test_created_status_is_transport_error() {
        for status in [201, 204] {
            let response = ApiResponse {
                status,
                body: json!({"cluster": {"id": "lsrc-1"}, "error": ""}).to_string(),
            };
            let err = decode::<Payload>(&response).unwrap_err();
            assert_eq!(err.category(), ErrorCategory::Transport);
        }
    }

    #[test]
    fn test_non_success_status_checked_before_body() {
        let response = ApiResponse {
            status: 500,
            body: "<html>not json</html>".to_string(),
        };
        let err = decode::<Payload>(&response).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Transport);
    }

    #[test]
    fn test_malformed_json_is_decode_error() {
        let response = ApiResponse {
            status: 200,
            body: "{\"cluster\": ".to_string(),
        };
        let err = decode::<Payload>(&response).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Decode);
    }
}

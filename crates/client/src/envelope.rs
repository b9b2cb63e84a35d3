//! The uniform response envelope.
//!
//! Every endpoint answers `{success: true, message, data}` or
//! `{success: false, message, errors?}` where `errors` maps a field name to
//! a list of localized messages. Only the first message per field is shown.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;

/// Raw wire envelope, before the payload is typed.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub errors: Option<BTreeMap<String, Vec<String>>>,
}

impl Envelope {
    /// Convert the envelope into a typed result.
    ///
    /// A missing `data` field decodes as JSON `null`, which allows `T = ()`
    /// for endpoints that return nothing beyond the success flag.
    pub fn into_result<T: DeserializeOwned>(self) -> Result<T, ApiError> {
        if !self.success {
            return Err(self.into_rejection());
        }

        let data = self.data.unwrap_or(Value::Null);
        serde_json::from_value(data).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Build the rejection error for a `success: false` envelope.
    pub fn into_rejection(self) -> ApiError {
        let fields = self
            .errors
            .unwrap_or_default()
            .into_iter()
            .filter_map(|(field, messages)| {
                messages.into_iter().next().map(|first| (field, first))
            })
            .collect();

        ApiError::Rejected {
            message: self
                .message
                .unwrap_or_else(|| "request rejected".to_string()),
            fields,
        }
    }
}

/// Paginated list payload used by the list endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct Paged<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub current_page: Option<u32>,
    #[serde(default)]
    pub per_page: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_envelope_decodes_data() {
        let envelope: Envelope = serde_json::from_value(json!({
            "success": true,
            "message": "ok",
            "data": {"id": 3}
        }))
        .unwrap();

        #[derive(Debug, Deserialize, PartialEq)]
        struct Payload {
            id: i64,
        }

        let payload: Payload = envelope.into_result().unwrap();
        assert_eq!(payload, Payload { id: 3 });
    }

    #[test]
    fn success_envelope_without_data_decodes_unit() {
        let envelope: Envelope = serde_json::from_value(json!({
            "success": true,
            "message": "deleted"
        }))
        .unwrap();

        envelope.into_result::<()>().unwrap();
    }

    #[test]
    fn failure_envelope_surfaces_first_message_per_field() {
        let envelope: Envelope = serde_json::from_value(json!({
            "success": false,
            "message": "The given data was invalid.",
            "errors": {
                "slug": ["The slug has already been taken.", "Second message"],
                "name_ar": ["The Arabic name is required."]
            }
        }))
        .unwrap();

        let err = envelope.into_result::<()>().unwrap_err();
        match &err {
            ApiError::Rejected { message, fields } => {
                assert_eq!(message, "The given data was invalid.");
                assert_eq!(
                    fields.get("slug").map(String::as_str),
                    Some("The slug has already been taken.")
                );
                assert_eq!(
                    fields.get("name_ar").map(String::as_str),
                    Some("The Arabic name is required.")
                );
            }
            other => panic!("expected Rejected, got {other:?}"),
        }
        assert!(!err.is_retryable());
    }

    #[test]
    fn paged_payload_decodes_with_optional_meta() {
        let paged: Paged<i64> = serde_json::from_value(json!({
            "data": [1, 2, 3],
            "total": 3
        }))
        .unwrap();

        assert_eq!(paged.data, vec![1, 2, 3]);
        assert_eq!(paged.total, Some(3));
        assert_eq!(paged.per_page, None);
    }
}

//! HTTP Request body types

use serde::{Deserialize, Serialize};

/// Request body sent with a test case.
///
/// The objects API only speaks JSON, so bodies are kept as parsed values.
/// String leaves may carry `{{variable}}` references that are resolved
/// against the run state before sending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "type", content = "content", rename_all = "snake_case")]
pub enum RequestBody {
    /// No body
    #[default]
    None,
    /// JSON body
    Json(serde_json::Value),
}

impl RequestBody {
    /// Creates an empty body.
    #[must_use]
    pub const fn none() -> Self {
        Self::None
    }

    /// Creates a JSON body.
    #[must_use]
    pub const fn json(value: serde_json::Value) -> Self {
        Self::Json(value)
    }

    /// Returns the content type if applicable.
    #[must_use]
    pub const fn content_type(&self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Json(_) => Some("application/json"),
        }
    }

    /// Serializes the body to the bytes sent on the wire.
    #[must_use]
    pub fn to_bytes(&self) -> Option<Vec<u8>> {
        match self {
            Self::None => None,
            Self::Json(value) => Some(value.to_string().into_bytes()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_json_body() {
        let body = RequestBody::json(json!({"name": "MacBook Pro M3"}));
        assert_eq!(body.content_type(), Some("application/json"));
        assert_eq!(
            body.to_bytes(),
            Some(br#"{"name":"MacBook Pro M3"}"#.to_vec())
        );
    }

    #[test]
    fn test_empty_object_is_still_sent() {
        let body = RequestBody::json(json!({}));
        assert_eq!(body.content_type(), Some("application/json"));
        assert_eq!(body.to_bytes(), Some(b"{}".to_vec()));
    }

    #[test]
    fn test_none_body() {
        let body = RequestBody::none();
        assert_eq!(body.content_type(), None);
        assert_eq!(body.to_bytes(), None);
    }
}

//! Payloads of the remote `/objects` resource.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Body of a create, full-update or partial-update request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewObject {
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Arbitrary attributes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Map<String, Value>>,
}

impl NewObject {
    /// Creates a payload with a name and no data.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            data: None,
        }
    }

    /// Adds one attribute to `data` (builder pattern).
    #[must_use]
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }

    /// Converts the payload to a JSON value.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let mut map = Map::new();
        if let Some(name) = &self.name {
            map.insert("name".to_string(), Value::String(name.clone()));
        }
        if let Some(data) = &self.data {
            map.insert("data".to_string(), Value::Object(data.clone()));
        }
        Value::Object(map)
    }
}

/// Body returned by a successful DELETE.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletionNotice {
    /// Confirmation text.
    pub message: String,
}

impl DeletionNotice {
    /// The exact notice the API sends after deleting `id`.
    #[must_use]
    pub fn expected_for(id: &str) -> Self {
        Self {
            message: format!("Object with id = {id} has been deleted."),
        }
    }
}

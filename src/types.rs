//! Common types used throughout paged-source
//!
//! Shared type aliases plus the [`Record`] wrapper handed to the host.

use serde::{Deserialize, Serialize};

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

// ============================================================================
// Record
// ============================================================================

/// Field hosts use to track record identity
pub const ID_FIELD: &str = "id";

/// One upstream entity, exactly as it appeared in a page's `objects` array.
///
/// No shape is enforced. Hosts expect an [`ID_FIELD`] string but nothing here
/// validates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(JsonValue);

impl Record {
    /// Wrap a JSON value
    pub fn new(value: JsonValue) -> Self {
        Self(value)
    }

    /// Borrow the underlying JSON value
    pub fn as_value(&self) -> &JsonValue {
        &self.0
    }

    /// Unwrap into the underlying JSON value
    pub fn into_value(self) -> JsonValue {
        self.0
    }

    /// Look up a top-level field
    pub fn get(&self, field: &str) -> Option<&JsonValue> {
        self.0.get(field)
    }

    /// The record's identity, if it carries a string `id`
    pub fn id(&self) -> Option<&str> {
        self.get(ID_FIELD).and_then(JsonValue::as_str)
    }
}

impl From<JsonValue> for Record {
    fn from(value: JsonValue) -> Self {
        Self(value)
    }
}

impl From<Record> for JsonValue {
    fn from(record: Record) -> Self {
        record.0
    }
}

//! Catalog snapshot embedded into every system turn.
//!
//! The widget never looks inside the catalog: it is an opaque JSON value that
//! gets pretty-printed into the instruction template.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Static listing data loaded once at startup.
///
/// An unavailable catalog is represented by the empty array, which is what
/// gets embedded when loading fails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CatalogSnapshot(Value);

impl CatalogSnapshot {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// The empty catalog (`[]`).
    pub fn empty() -> Self {
        Self(Value::Array(Vec::new()))
    }

    pub fn value(&self) -> &Value {
        &self.0
    }

    /// Number of top-level listing records. A scalar counts as one, `null` as none.
    pub fn listing_count(&self) -> usize {
        match &self.0 {
            Value::Array(items) => items.len(),
            Value::Object(map) => map.len(),
            Value::Null => 0,
            _ => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.listing_count() == 0
    }

    /// Pretty-printed JSON, two-space indented.
    pub fn to_pretty_json(&self) -> String {
        // Serializing a `Value` cannot fail: all keys are strings.
        serde_json::to_string_pretty(&self.0).unwrap_or_else(|_| "[]".to_string())
    }
}

impl Default for CatalogSnapshot {
    fn default() -> Self {
        Self::empty()
    }
}

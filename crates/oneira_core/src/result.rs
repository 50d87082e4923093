//! The stable output contract returned to callers.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A normalized generation result: a mapping from field name to value.
///
/// After normalization every field declared required by the task's schema
/// is present with the correct element type; the map always contains a
/// `language` field. Serializes transparently as the underlying object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct NormalizedResult {
    fields: Map<String, Value>,
}

impl NormalizedResult {
    /// Creates an empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a result from a parsed JSON object.
    pub fn from_object(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Returns the raw value of a field, if present.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Returns a field as text, if present and a string.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(Value::as_str)
    }

    /// Returns a field as an array, if present and an array.
    pub fn items(&self, name: &str) -> Option<&Vec<Value>> {
        self.fields.get(name).and_then(Value::as_array)
    }

    /// Sets a field, replacing any existing value.
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.fields.insert(name.into(), value);
    }

    /// True when the field is absent, null, or an empty/blank string.
    pub fn is_blank(&self, name: &str) -> bool {
        match self.fields.get(name) {
            None | Some(Value::Null) => true,
            Some(Value::String(s)) => s.trim().is_empty(),
            Some(_) => false,
        }
    }

    /// Read access to the underlying map.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Consumes the result, yielding the underlying map.
    pub fn into_fields(self) -> Map<String, Value> {
        self.fields
    }
}

impl From<Map<String, Value>> for NormalizedResult {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

//! Template data payloads.
//!
//! A [`Payload`] only ever contains keys whose source value was present;
//! renderers tell "key missing" apart from "key empty", so no placeholder is
//! ever inserted.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Whether a JSON value carries anything.
///
/// `null`, `false`, numeric zero and empty strings/arrays/objects count as
/// absent, matching how producers of these events mark optional fields.
pub fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Text form of a JSON value for subjects, links and recipient lists.
///
/// Strings are used as-is (no quotes), anything else is JSON-encoded.
pub fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Frozen data map handed to the template renderer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Payload(Map<String, Value>);

impl Payload {
    pub fn builder() -> PayloadBuilder {
        PayloadBuilder::default()
    }

    /// Start a new builder seeded with this payload's entries.
    pub fn to_builder(&self) -> PayloadBuilder {
        PayloadBuilder {
            data: self.0.clone(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

/// Accumulates payload entries before freezing them into a [`Payload`].
#[derive(Debug, Clone, Default)]
pub struct PayloadBuilder {
    data: Map<String, Value>,
}

impl PayloadBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` unconditionally.
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.data.insert(key.to_string(), value.into());
        self
    }

    /// Set `key` only when `value` is present (see [`is_present`]).
    pub fn with_present(mut self, key: &str, value: Option<&Value>) -> Self {
        if let Some(value) = value.filter(|v| is_present(v)) {
            self.data.insert(key.to_string(), value.clone());
        }
        self
    }

    pub fn build(self) -> Payload {
        Payload(self.data)
    }
}

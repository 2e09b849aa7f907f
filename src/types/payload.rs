//! Untyped JSON payloads.
//!
//! [`Payload`] covers the JSON value shapes a loosely-typed request body can
//! take. Unlike an arbitrary `Serialize` value, every `Payload` serializes
//! successfully; non-finite floats are written as `null`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A loosely-typed JSON value used as a request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Payload {
    /// JSON `null`.
    Null,
    /// JSON boolean.
    Bool(bool),
    /// Integral JSON number.
    Integer(i64),
    /// Floating point JSON number.
    Float(f64),
    /// JSON string.
    String(String),
    /// JSON array.
    Array(Vec<Payload>),
    /// JSON object.
    Object(BTreeMap<String, Payload>),
}

impl Payload {
    /// Creates an empty object.
    pub fn object() -> Self {
        Payload::Object(BTreeMap::new())
    }

    /// Inserts `key` into an object payload and returns it.
    ///
    /// Non-object payloads are first replaced by an empty object.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Payload>) -> Self {
        self.insert(key, value);
        self
    }

    /// Inserts `key` into an object payload.
    ///
    /// Non-object payloads are first replaced by an empty object.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Payload>) {
        if !matches!(self, Payload::Object(_)) {
            *self = Payload::object();
        }
        if let Payload::Object(map) = self {
            map.insert(key.into(), value.into());
        }
    }

    /// Returns the value stored under `key` for object payloads.
    pub fn get(&self, key: &str) -> Option<&Payload> {
        match self {
            Payload::Object(map) => map.get(key),
            _ => None,
        }
    }

    /// Returns true for `Payload::Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Payload::Null)
    }
}

impl Default for Payload {
    fn default() -> Self {
        Payload::Null
    }
}

impl From<bool> for Payload {
    fn from(value: bool) -> Self {
        Payload::Bool(value)
    }
}

impl From<i32> for Payload {
    fn from(value: i32) -> Self {
        Payload::Integer(i64::from(value))
    }
}

impl From<i64> for Payload {
    fn from(value: i64) -> Self {
        Payload::Integer(value)
    }
}

impl From<u32> for Payload {
    fn from(value: u32) -> Self {
        Payload::Integer(i64::from(value))
    }
}

impl From<f64> for Payload {
    fn from(value: f64) -> Self {
        Payload::Float(value)
    }
}

impl From<&str> for Payload {
    fn from(value: &str) -> Self {
        Payload::String(value.to_string())
    }
}

impl From<String> for Payload {
    fn from(value: String) -> Self {
        Payload::String(value)
    }
}

impl<T: Into<Payload>> From<Vec<T>> for Payload {
    fn from(values: Vec<T>) -> Self {
        Payload::Array(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Payload>> From<Option<T>> for Payload {
    fn from(value: Option<T>) -> Self {
        value.map_or(Payload::Null, Into::into)
    }
}

impl<K: Into<String>, V: Into<Payload>> FromIterator<(K, V)> for Payload {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Payload::Object(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl From<serde_json::Value> for Payload {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Payload::Null,
            serde_json::Value::Bool(b) => Payload::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Payload::Integer(i),
                None => Payload::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Payload::String(s),
            serde_json::Value::Array(items) => {
                Payload::Array(items.into_iter().map(Payload::from).collect())
            }
            serde_json::Value::Object(map) => {
                Payload::Object(map.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}

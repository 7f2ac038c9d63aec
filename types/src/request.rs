//! Request descriptors and query parameters.

use serde_json::{Number, Value};

/// One read request against the tenant API.
///
/// The effective address is `base_url` followed by `identifier`, joined
/// verbatim. Callers own the separator: `"/items/"` + `"42"` yields
/// `"/items/42"` while `"/items"` + `"42"` yields `"/items42"`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RequestDescriptor {
    pub base_url: String,
    pub identifier: String,
    pub query: QueryParams,
}

impl RequestDescriptor {
    #[must_use]
    pub fn new(base_url: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            identifier: identifier.into(),
            query: QueryParams::new(),
        }
    }

    #[must_use]
    pub fn with_query(mut self, query: QueryParams) -> Self {
        self.query = query;
        self
    }

    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.query.insert(key, value);
        self
    }

    /// Resource address handed to the transport.
    #[must_use]
    pub fn address(&self) -> String {
        let mut address = String::with_capacity(self.base_url.len() + self.identifier.len());
        address.push_str(&self.base_url);
        address.push_str(&self.identifier);
        address
    }
}

/// A single query parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryValue {
    /// Dropped when encoding.
    Null,
    Bool(bool),
    Number(Number),
    Text(String),
    /// Encoded as one pair per element under the same key.
    List(Vec<QueryValue>),
}

impl QueryValue {
    /// Convert an arbitrary JSON value. Objects are sent as their compact
    /// JSON text.
    #[must_use]
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => Self::Number(n),
            Value::String(s) => Self::Text(s),
            Value::Array(items) => Self::List(items.into_iter().map(Self::from_json).collect()),
            object @ Value::Object(_) => Self::Text(object.to_string()),
        }
    }

    fn encode_into(&self, key: &str, out: &mut Vec<(String, String)>) {
        match self {
            Self::Null => {}
            Self::Bool(b) => out.push((key.to_string(), b.to_string())),
            Self::Number(n) => out.push((key.to_string(), n.to_string())),
            Self::Text(s) => out.push((key.to_string(), s.clone())),
            Self::List(items) => {
                for item in items {
                    // Nested lists flatten under the same key.
                    item.encode_into(key, out);
                }
            }
        }
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for QueryValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for QueryValue {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl From<u64> for QueryValue {
    fn from(value: u64) -> Self {
        Self::Number(value.into())
    }
}

impl From<i32> for QueryValue {
    fn from(value: i32) -> Self {
        Self::Number(value.into())
    }
}

impl From<u32> for QueryValue {
    fn from(value: u32) -> Self {
        Self::Number(value.into())
    }
}

impl From<f64> for QueryValue {
    /// Non-finite floats have no JSON number form and become `Null`.
    fn from(value: f64) -> Self {
        Number::from_f64(value).map_or(Self::Null, Self::Number)
    }
}

impl From<Value> for QueryValue {
    fn from(value: Value) -> Self {
        Self::from_json(value)
    }
}

impl<T: Into<QueryValue>> From<Option<T>> for QueryValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl<T: Into<QueryValue>> From<Vec<T>> for QueryValue {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

/// Insertion-ordered query parameters.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QueryParams {
    entries: Vec<(String, QueryValue)>,
}

impl QueryParams {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Insert or replace a parameter. A replaced key keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<QueryValue>) {
        let key = key.into();
        let value = value.into();
        if let Some(slot) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.insert(key, value);
        self
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&QueryValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &QueryValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Flatten into wire pairs in insertion order.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut out = Vec::with_capacity(self.entries.len());
        for (key, value) in &self.entries {
            value.encode_into(key, &mut out);
        }
        out
    }
}

impl<K, V> FromIterator<(K, V)> for QueryParams
where
    K: Into<String>,
    V: Into<QueryValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}

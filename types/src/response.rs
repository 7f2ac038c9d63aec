//! Transport responses and payload extraction.

use std::any::type_name;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

/// Field of the response body that carries the payload.
pub const ITEM_FIELD: &str = "item";

/// A completed read as seen by the runner.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    pub status: u16,
    /// Parsed response body. `Null` for an empty body.
    pub data: Value,
}

impl TransportResponse {
    #[must_use]
    pub const fn new(status: u16, data: Value) -> Self {
        Self { status, data }
    }

    /// The body's `item` field.
    ///
    /// Lenient: a body that is not an object, lacks `item`, or carries
    /// `item: null` yields `None` rather than an error.
    #[must_use]
    pub fn item(&self) -> Option<Value> {
        match self.data.get(ITEM_FIELD) {
            None | Some(Value::Null) => None,
            Some(item) => Some(item.clone()),
        }
    }
}

/// The `item` payload did not match the caller's type.
#[derive(Debug, Clone, Error)]
#[error("failed to decode payload as {type_name}: {source}")]
pub struct PayloadDecodeError {
    pub type_name: &'static str,
    #[source]
    pub source: Arc<serde_json::Error>,
}

/// Decode an extracted payload into `T`.
pub fn decode_payload<T: DeserializeOwned>(item: Value) -> Result<T, PayloadDecodeError> {
    serde_json::from_value(item).map_err(|e| PayloadDecodeError {
        type_name: type_name::<T>(),
        source: Arc::new(e),
    })
}

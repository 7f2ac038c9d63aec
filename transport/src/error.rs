use std::sync::Arc;

use tenant_fetch_types::PayloadDecodeError;
use thiserror::Error;

/// Failures of [`HttpTransport`](crate::HttpTransport).
///
/// `Clone` so the same value can sit in a caller's error slot and travel up
/// the call stack; non-`Clone` sources are shared through `Arc`.
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    #[error("invalid API root URL {url:?}: {reason}")]
    InvalidRootUrl { url: String, reason: String },

    #[error("invalid default header {name:?}")]
    InvalidHeader { name: String },

    #[error("failed to build HTTP client: {0}")]
    Build(#[source] Arc<reqwest::Error>),

    #[error("request to {address} failed: {source}")]
    Request {
        address: String,
        #[source]
        source: Arc<reqwest::Error>,
    },

    #[error("request to {address} failed ({status}): {body}")]
    Status {
        address: String,
        status: u16,
        body: String,
    },

    #[error("failed to parse response from {address}: {source}")]
    Decode {
        address: String,
        #[source]
        source: Arc<serde_json::Error>,
    },

    #[error(transparent)]
    Payload(#[from] PayloadDecodeError),
}

impl TransportError {
    /// HTTP status for errors that carry one.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Address of the failed request, when the failure happened on the wire.
    #[must_use]
    pub fn address(&self) -> Option<&str> {
        match self {
            Self::Request { address, .. }
            | Self::Status { address, .. }
            | Self::Decode { address, .. } => Some(address),
            _ => None,
        }
    }

    pub(crate) fn request(address: &str, source: reqwest::Error) -> Self {
        Self::Request {
            address: address.to_string(),
            source: Arc::new(source),
        }
    }
}

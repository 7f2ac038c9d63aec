//! Transport seam for tenant-fetch.
//!
//! The runner only needs one capability from the outside world: issue a read
//! against an address with query parameters and hand back the parsed body.
//! [`Transport`] is that seam. [`HttpTransport`] implements it over `reqwest`
//! for a configured API root; tests and embedders can supply their own.

mod error;
mod http;

use std::future::Future;

use tenant_fetch_types::{QueryParams, TransportResponse};

pub use error::TransportError;
pub use http::{HttpTransport, HttpTransportBuilder, MAX_ERROR_BODY_BYTES};

/// A read-only transport to the tenant API.
pub trait Transport {
    /// Whatever the transport rejects with. Opaque to the runner.
    type Error;

    fn get(
        &self,
        address: &str,
        params: &QueryParams,
    ) -> impl Future<Output = Result<TransportResponse, Self::Error>>;
}

impl<T: Transport + ?Sized> Transport for &T {
    type Error = T::Error;

    fn get(
        &self,
        address: &str,
        params: &QueryParams,
    ) -> impl Future<Output = Result<TransportResponse, Self::Error>> {
        (**self).get(address, params)
    }
}

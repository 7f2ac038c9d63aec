use std::fmt::Debug;

use serde::de::DeserializeOwned;
use tenant_fetch_transport::Transport;
use tenant_fetch_types::{
    PayloadDecodeError, RequestDescriptor, TransportResponse, Value, decode_payload,
};

use crate::OutcomeSink;

/// Runs single reads against a [`Transport`] and reports through an
/// [`OutcomeSink`].
///
/// Failures are reported twice: recorded in the sink for passive observers
/// and returned as `Err` for the caller. Both carry the same value.
#[derive(Debug, Clone)]
pub struct RequestRunner<T> {
    transport: T,
}

impl<T> RequestRunner<T>
where
    T: Transport,
    T::Error: Clone + Debug,
{
    #[must_use]
    pub const fn new(transport: T) -> Self {
        Self { transport }
    }

    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Read `descriptor` and return the body's `item` field.
    ///
    /// Clears the sink's error, issues one request, records any failure, then
    /// clears the loading flag whether or not the request succeeded. A body
    /// without `item` is `Ok(None)`.
    pub async fn run<S>(
        &self,
        descriptor: &RequestDescriptor,
        outcome: &mut S,
    ) -> Result<Option<Value>, T::Error>
    where
        S: OutcomeSink<T::Error> + ?Sized,
    {
        self.execute(descriptor, outcome, |response| Ok(response.item()))
            .await
    }

    /// Like [`run`](Self::run), decoding the payload into `P`.
    ///
    /// A payload that does not decode is reported exactly like a transport
    /// failure.
    pub async fn run_as<P, S>(
        &self,
        descriptor: &RequestDescriptor,
        outcome: &mut S,
    ) -> Result<Option<P>, T::Error>
    where
        P: DeserializeOwned,
        S: OutcomeSink<T::Error> + ?Sized,
        T::Error: From<PayloadDecodeError>,
    {
        self.execute(descriptor, outcome, |response| {
            response
                .item()
                .map(decode_payload::<P>)
                .transpose()
                .map_err(Into::into)
        })
        .await
    }

    async fn execute<R, S, F>(
        &self,
        descriptor: &RequestDescriptor,
        outcome: &mut S,
        extract: F,
    ) -> Result<R, T::Error>
    where
        S: OutcomeSink<T::Error> + ?Sized,
        F: FnOnce(&TransportResponse) -> Result<R, T::Error>,
    {
        outcome.clear_error();

        let address = descriptor.address();
        tracing::debug!(%address, params = descriptor.query.len(), "Issuing read");

        let result = match self.transport.get(&address, &descriptor.query).await {
            Ok(response) => {
                tracing::debug!(%address, status = response.status, "Read completed");
                extract(&response)
            }
            Err(err) => Err(err),
        };

        if let Err(err) = &result {
            tracing::warn!(%address, error = ?err, "Read failed");
            outcome.record_error(err.clone());
        }

        outcome.finish_loading();
        result
    }
}

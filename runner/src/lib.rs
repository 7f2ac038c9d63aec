//! Fetch-and-report runner for tenant-scoped reads.
//!
//! A [`RequestRunner`] performs one read through a [`Transport`] and reports
//! the outcome on two channels at once:
//!
//! - the caller-owned [`OutcomeSink`] (error slot and loading flag), for
//!   observers that watch state
//! - the returned `Result`, for callers that handle errors directly
//!
//! | Step | Sink | Return |
//! |------|------|--------|
//! | start | error cleared | |
//! | success | | `Ok(item)`; `Ok(None)` when the body has no `item` |
//! | failure | error recorded | `Err(error)` |
//! | always, last | loading cleared | |
//!
//! There is no retry, timeout, or cancellation here: one attempt, one round
//! trip. Timeouts belong to the transport.
//!
//! # Usage
//!
//! ```ignore
//! use tenant_fetch_runner::RequestRunner;
//! use tenant_fetch_transport::HttpTransport;
//! use tenant_fetch_types::{OutcomeState, RequestDescriptor};
//!
//! let runner = RequestRunner::new(HttpTransport::new("https://tenant.example/api")?);
//! let mut outcome = OutcomeState::new();
//! let user = runner
//!     .run(&RequestDescriptor::new("/users/", "7"), &mut outcome)
//!     .await?;
//! assert!(!outcome.is_loading());
//! ```

mod runner;
mod sink;

pub use runner::RequestRunner;
pub use sink::OutcomeSink;

pub use tenant_fetch_transport::{self, Transport};
pub use tenant_fetch_types::{self, OutcomeState, RequestDescriptor};

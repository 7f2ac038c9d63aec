//! Core domain types for tenant-fetch.
//!
//! This crate contains pure domain types with no IO, no async, and minimal dependencies.
//! Everything here can be used from any layer of the application.
//!
//! - [`RequestDescriptor`] / [`QueryParams`] - what to read
//! - [`TransportResponse`] - what came back, and the `item` payload extraction
//! - [`OutcomeState`] - caller-owned error and loading slots
//! - [`SandboxRoutes`] - descriptors for the sandbox showcase read endpoints

mod outcome;
mod request;
mod response;
mod routes;

pub use outcome::OutcomeState;
pub use request::{QueryParams, QueryValue, RequestDescriptor};
pub use response::{ITEM_FIELD, PayloadDecodeError, TransportResponse, decode_payload};
pub use routes::SandboxRoutes;

pub use serde_json::Value;
pub use uuid::Uuid;

//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the application core and external systems.
//! Each port is a trait implemented by adapters in the infrastructure layer.

mod http_client;
mod response_verifier;

pub use http_client::{HttpClient, HttpClientError, HttpFuture};
pub use response_verifier::ResponseVerifier;

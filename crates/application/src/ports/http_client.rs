//! HTTP Client port

use std::future::Future;
use std::pin::Pin;

use restcheck_domain::{request::RequestSpec, response::ResponseSpec};
use thiserror::Error;

/// Boxed future returned by [`HttpClient::execute`].
pub type HttpFuture<'a> =
    Pin<Box<dyn Future<Output = Result<ResponseSpec, HttpClientError>> + Send + 'a>>;

/// Port for executing HTTP requests.
///
/// This trait abstracts the HTTP client implementation, allowing
/// the application layer to be independent of specific HTTP libraries.
pub trait HttpClient: Send + Sync {
    /// Executes an HTTP request and returns the response.
    ///
    /// Any status code, including 4xx and 5xx, is a successful execution;
    /// only transport problems are errors.
    fn execute(&self, request: &RequestSpec) -> HttpFuture<'_>;
}

/// Transport-level failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HttpClientError {
    /// The URL could not be parsed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The request did not complete in time.
    #[error("request timed out after {timeout_ms}ms")]
    Timeout {
        /// Timeout that elapsed.
        timeout_ms: u64,
    },

    /// The host name could not be resolved.
    #[error("DNS lookup failed for {host}: {message}")]
    DnsError {
        /// Host that failed to resolve.
        host: String,
        /// Resolver message.
        message: String,
    },

    /// The remote end refused the connection.
    #[error("connection refused by {host}:{port}")]
    ConnectionRefused {
        /// Target host.
        host: String,
        /// Target port.
        port: u16,
    },

    /// The connection could not be established.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// The redirect limit was hit.
    #[error("too many redirects (max {max})")]
    TooManyRedirects {
        /// Redirect limit.
        max: usize,
    },

    /// Anything else.
    #[error("{0}")]
    Other(String),
}

//! Request specification type

use serde::{Deserialize, Serialize};
use url::Url;

use super::{Header, Headers, HttpMethod, RequestBody};
use crate::error::{DomainError, DomainResult};

/// Complete specification for an HTTP request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestSpec {
    /// HTTP method
    pub method: HttpMethod,
    /// Target URL (may contain variable placeholders)
    pub url: String,
    /// HTTP headers
    #[serde(default)]
    pub headers: Headers,
    /// Request body
    #[serde(default)]
    pub body: RequestBody,
    /// Per-request timeout; the client default applies when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
}

impl RequestSpec {
    /// Creates a request with the given method and URL.
    #[must_use]
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Headers::new(),
            body: RequestBody::none(),
            timeout_ms: None,
        }
    }

    /// Creates a GET request.
    #[must_use]
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, url)
    }

    /// Creates a POST request.
    #[must_use]
    pub fn post(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, url)
    }

    /// Creates a PUT request.
    #[must_use]
    pub fn put(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Put, url)
    }

    /// Creates a PATCH request.
    #[must_use]
    pub fn patch(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Patch, url)
    }

    /// Creates a DELETE request.
    #[must_use]
    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, url)
    }

    /// Sets a JSON body (builder pattern).
    #[must_use]
    pub fn with_json(mut self, value: serde_json::Value) -> Self {
        self.body = RequestBody::json(value);
        self
    }

    /// Adds a header (builder pattern).
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.add(Header::new(name, value));
        self
    }

    /// Sets the request timeout (builder pattern).
    #[must_use]
    pub const fn with_timeout_ms(mut self, timeout_ms: Option<u64>) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Validates the URL and returns the parsed version.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is malformed.
    pub fn parse_url(&self) -> DomainResult<Url> {
        Url::parse(&self.url).map_err(|e| DomainError::InvalidUrl(format!("{e}: {}", self.url)))
    }
}

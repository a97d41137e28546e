//! HTTP Client implementation using reqwest.
//!
//! This adapter implements the `HttpClient` port using the reqwest library.
//! It handles all HTTP communication with the API under test.

use std::collections::HashMap;
use std::error::Error as _;
use std::time::{Duration, Instant};

use reqwest::{Client, Method, Url};
use restcheck_application::ports::{HttpClient, HttpClientError, HttpFuture};
use restcheck_domain::{
    request::{HttpMethod, RequestSpec},
    response::ResponseSpec,
};
use tracing::debug;

const MAX_REDIRECTS: usize = 10;

/// HTTP client implementation using reqwest.
///
/// Wraps `reqwest::Client` and implements the `HttpClient` port from the
/// application layer. Non-2xx statuses are returned as responses, never as
/// errors; the assertions decide what is expected.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: Client,
    default_timeout_ms: Option<u64>,
}

impl ReqwestHttpClient {
    /// Creates a new HTTP client.
    ///
    /// Redirects are followed up to 10 hops and TLS verification is on.
    /// Without a `timeout_ms`, reqwest's own default (no timeout) applies.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn new(user_agent: &str, timeout_ms: Option<u64>) -> Result<Self, HttpClientError> {
        let mut builder = Client::builder()
            .user_agent(user_agent)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS));
        if let Some(ms) = timeout_ms {
            builder = builder.timeout(Duration::from_millis(ms));
        }
        let client = builder
            .build()
            .map_err(|e| HttpClientError::Other(e.to_string()))?;

        Ok(Self {
            client,
            default_timeout_ms: timeout_ms,
        })
    }

    /// Converts domain `HttpMethod` to reqwest `Method`.
    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Patch => Method::PATCH,
            HttpMethod::Delete => Method::DELETE,
        }
    }

    /// Maps reqwest errors to the port's `HttpClientError`.
    fn map_error(error: &reqwest::Error, timeout_ms: u64) -> HttpClientError {
        if error.is_timeout() {
            return HttpClientError::Timeout { timeout_ms };
        }

        let host = || {
            error
                .url()
                .and_then(|u| u.host_str().map(str::to_string))
                .unwrap_or_else(|| "unknown".to_string())
        };

        if error.is_connect() {
            let message = error_chain(error);
            let lower = message.to_lowercase();
            if lower.contains("dns") || lower.contains("resolve") {
                return HttpClientError::DnsError {
                    host: host(),
                    message,
                };
            }
            if lower.contains("refused") {
                return HttpClientError::ConnectionRefused {
                    host: host(),
                    port: error
                        .url()
                        .and_then(Url::port_or_known_default)
                        .unwrap_or(80),
                };
            }
            return HttpClientError::ConnectionFailed(message);
        }

        if error.is_redirect() {
            return HttpClientError::TooManyRedirects { max: MAX_REDIRECTS };
        }

        HttpClientError::Other(error_chain(error))
    }
}

/// Joins an error and its sources; reqwest keeps the useful part in the chain.
fn error_chain(error: &reqwest::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

impl HttpClient for ReqwestHttpClient {
    fn execute(&self, request: &RequestSpec) -> HttpFuture<'_> {
        // Clone what we need to move into the async block
        let method = request.method;
        let url = request.url.clone();
        let headers: Vec<_> = request.headers.iter().cloned().collect();
        // An explicit Content-Type header wins over the body's default
        let content_type = request
            .body
            .content_type()
            .filter(|_| !request.headers.contains("content-type"));
        let body = request.body.to_bytes();
        let timeout_ms = request.timeout_ms;

        Box::pin(async move {
            let parsed_url =
                Url::parse(&url).map_err(|e| HttpClientError::InvalidUrl(format!("{e}: {url}")))?;

            let start = Instant::now();

            let mut builder = self
                .client
                .request(Self::to_reqwest_method(method), parsed_url);
            if let Some(ms) = timeout_ms {
                builder = builder.timeout(Duration::from_millis(ms));
            }

            for header in &headers {
                builder = builder.header(&header.name, &header.value);
            }

            if let Some(content_type) = content_type {
                builder = builder.header("Content-Type", content_type);
            }

            if let Some(bytes) = body {
                builder = builder.body(bytes);
            }

            let response = builder.send().await.map_err(|e| {
                debug!(error = %error_chain(&e), "request failed");
                Self::map_error(&e, timeout_ms.or(self.default_timeout_ms).unwrap_or(0))
            })?;

            let duration = start.elapsed();
            let status = response.status().as_u16();

            let response_headers: HashMap<String, String> = response
                .headers()
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("<binary>").to_string()))
                .collect();

            let body_bytes = response
                .bytes()
                .await
                .map_err(|e| HttpClientError::Other(format!("Failed to read body: {e}")))?
                .to_vec();

            Ok(ResponseSpec::new(
                status,
                response_headers,
                body_bytes,
                duration,
            ))
        })
    }
}

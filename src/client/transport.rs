//! HTTP transport seam
//!
//! The client prepares a complete [`HttpRequest`] and hands it to a
//! [`Transport`]. [`HttpTransport`] sends it with a blocking `reqwest` client;
//! tests substitute a recording implementation.

use std::time::Duration;

use thiserror::Error;

/// Fixed timeout for every request
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP methods used by the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// GET
    Get,
    /// POST
    Post,
    /// PUT
    Put,
}

impl Method {
    /// Method name as sent on the wire
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully prepared request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// Method
    pub method: Method,
    /// Absolute URL including the query string
    pub url: String,
    /// `Content-Type` header, absent for bodiless requests
    pub content_type: Option<String>,
    /// Body bytes, empty for GET
    pub body: Vec<u8>,
}

/// A response as seen by the client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// Status code
    pub status: u16,
    /// Reason phrase
    pub reason: String,
    /// Body bytes
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Whether the status is 2xx
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// The request never produced a response
#[derive(Debug, Error)]
#[error("{reason}")]
pub struct TransportError {
    /// What went wrong
    pub reason: String,
}

impl TransportError {
    /// Create a transport error
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Executes prepared requests
///
/// Non-success statuses are responses, not errors; only failures to obtain a
/// response at all are [`TransportError`]s.
pub trait Transport {
    /// Send one request and wait for the response
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Blocking `reqwest` transport with the fixed timeout
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    /// Build the transport
    pub fn new() -> Result<Self, TransportError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("trello-cards/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TransportError::new(e.to_string()))?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
        };

        let mut builder = self.client.request(method, &request.url);
        if let Some(content_type) = &request.content_type {
            builder = builder
                .header(reqwest::header::CONTENT_TYPE, content_type)
                .body(request.body.clone());
        }

        let response = builder.send().map_err(|e| TransportError::new(describe(&e)))?;
        let status = response.status();
        let body = response
            .bytes()
            .map_err(|e| TransportError::new(describe(&e)))?;

        Ok(HttpResponse {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Unknown Status").to_string(),
            body: body.to_vec(),
        })
    }
}

// reqwest's top-level message hides the interesting part in the source chain.
fn describe(err: &reqwest::Error) -> String {
    let mut reason = if err.is_timeout() {
        "request timed out".to_string()
    } else if err.is_connect() {
        "connection failed".to_string()
    } else {
        err.to_string()
    };
    let mut source = std::error::Error::source(err);
    while let Some(inner) = source {
        reason.push_str(": ");
        reason.push_str(&inner.to_string());
        source = inner.source();
    }
    reason
}

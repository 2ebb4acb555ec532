//! Trello REST client
//!
//! A thin, synchronous client: one call is one request. It injects the
//! key/token pair, encodes parameters, executes the request through a
//! [`Transport`], and hands back the decoded JSON untouched.
//!
//! ## Encoding
//!
//! - **GET**: parameters and credentials go into the query string; no body.
//! - **POST/PUT**: credentials go into the query string and the parameters
//!   form the body, url-encoded or multipart depending on whether any
//!   [`FilePart`] is supplied.
//!
//! No retries, no pagination. Errors surface immediately as [`ApiError`].

pub mod auth;
mod encoder;
mod error;
mod transport;

use serde_json::Value;

pub use auth::{Credentials, authorization_url};
pub use encoder::{
    EncodedBody, FORM_URLENCODED, FilePart, FormEncoder, Multipart, OCTET_STREAM, Params,
    UrlEncoded, encoder_for, guess_content_type,
};
pub use error::ApiError;
pub use transport::{
    HttpRequest, HttpResponse, HttpTransport, Method, REQUEST_TIMEOUT, Transport, TransportError,
};

use crate::config::Config;

/// Client for the Trello REST API
#[derive(Debug)]
pub struct TrelloClient<T = HttpTransport> {
    config: Config,
    transport: T,
}

impl TrelloClient<HttpTransport> {
    /// Create a client backed by the blocking HTTP transport
    pub fn new(config: Config) -> Result<Self, ApiError> {
        let transport = HttpTransport::new().map_err(|e| ApiError::Unreachable { reason: e.reason })?;
        Ok(Self::with_transport(config, transport))
    }
}

impl<T: Transport> TrelloClient<T> {
    /// Create a client over any transport
    pub const fn with_transport(config: Config, transport: T) -> Self {
        Self { config, transport }
    }

    /// Configuration the client was built with
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Underlying transport
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Build the request for a call without sending it
    ///
    /// Fails only when credentials are missing.
    pub fn prepare(
        &self,
        method: Method,
        path: &str,
        params: &Params,
        files: &[FilePart],
    ) -> Result<HttpRequest, ApiError> {
        let credentials = Credentials::resolve(&self.config)?;
        let auth = Params::new()
            .with("key", &credentials.key)
            .with("token", &credentials.token);
        let url = format!("{}{}", self.config.base_url, path);

        let request = match method {
            Method::Get => {
                let mut query = params.clone();
                for (name, value) in auth.iter() {
                    query.insert(name, value);
                }
                HttpRequest {
                    method,
                    url: format!("{url}?{}", query.to_urlencoded()),
                    content_type: None,
                    body: Vec::new(),
                }
            },
            Method::Post | Method::Put => {
                let body = encoder_for(files).encode(params, files);
                HttpRequest {
                    method,
                    url: format!("{url}?{}", auth.to_urlencoded()),
                    content_type: Some(body.content_type),
                    body: body.bytes,
                }
            },
        };
        Ok(request)
    }

    /// Perform one authenticated call and return the decoded JSON body
    pub fn call(
        &self,
        method: Method,
        path: &str,
        params: &Params,
        files: &[FilePart],
    ) -> Result<Value, ApiError> {
        let request = self.prepare(method, path, params, files)?;
        log::debug!("{method} {path} ({} bytes)", request.body.len());

        let response = self
            .transport
            .execute(&request)
            .map_err(|e| ApiError::Unreachable { reason: e.reason })?;
        log::debug!("{method} {path} -> {} {}", response.status, response.reason);

        if !response.is_success() {
            let key = self.config.api_key.as_deref().unwrap_or_default();
            return Err(ApiError::http(
                response.status,
                request.url,
                response.reason,
                key,
                &self.config.auth_scope,
            ));
        }

        serde_json::from_slice(&response.body).map_err(|source| ApiError::InvalidResponse {
            url: request.url,
            source,
        })
    }

    /// GET with query parameters
    pub fn get(&self, path: &str, params: &Params) -> Result<Value, ApiError> {
        self.call(Method::Get, path, params, &[])
    }

    /// POST a url-encoded form
    pub fn post(&self, path: &str, params: &Params) -> Result<Value, ApiError> {
        self.call(Method::Post, path, params, &[])
    }

    /// POST a multipart form with file fields
    pub fn post_files(&self, path: &str, params: &Params, files: &[FilePart]) -> Result<Value, ApiError> {
        self.call(Method::Post, path, params, files)
    }

    /// PUT a url-encoded form
    pub fn put(&self, path: &str, params: &Params) -> Result<Value, ApiError> {
        self.call(Method::Put, path, params, &[])
    }
}

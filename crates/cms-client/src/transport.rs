//! Transport seam
//!
//! The client never performs I/O itself. Requests that pass the gate are
//! handed to a [`Transport`], which owns timeouts and retries.

use crate::descriptor::{EndpointDescriptor, Method};
use crate::error::TransportError;
use async_trait::async_trait;
use std::time::Duration;

/// Outgoing request
#[derive(Debug, Clone)]
pub struct ApiRequest {
    /// HTTP method
    pub method: Method,
    /// Fully resolved URL
    pub url: String,
    /// Descriptor the request was built from
    pub descriptor: Option<&'static EndpointDescriptor>,
    /// JSON body
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    /// Create request for `descriptor`
    pub fn new(descriptor: &'static EndpointDescriptor, url: impl Into<String>) -> Self {
        Self {
            method: descriptor.method,
            url: url.into(),
            descriptor: Some(descriptor),
            body: None,
        }
    }

    /// Create request with no descriptor attached
    ///
    /// Such a request is always rejected by the gate.
    pub fn untyped(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            descriptor: None,
            body: None,
        }
    }

    /// With JSON body
    #[must_use]
    pub fn with_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Endpoint name, or `<undeclared>` without a descriptor
    #[must_use]
    pub fn endpoint_name(&self) -> &'static str {
        self.descriptor.map_or("<undeclared>", |d| d.name)
    }
}

/// Response returned by a transport
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    /// HTTP status code
    pub status: u16,
    /// Decoded JSON body; `Null` when empty
    pub body: serde_json::Value,
}

impl ApiResponse {
    /// Create response
    #[must_use]
    pub fn new(status: u16, body: serde_json::Value) -> Self {
        Self { status, body }
    }

    /// Check for a 2xx status
    #[inline]
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends requests over the wire
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send request and return the server's response
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError>;
}

/// `reqwest`-backed transport
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    bearer_token: Option<String>,
}

impl HttpTransport {
    /// Create transport with a per-request timeout
    ///
    /// # Errors
    /// Returns error if the underlying client cannot be built
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            bearer_token: None,
        })
    }

    /// With access token sent as `Authorization: Bearer`
    #[must_use]
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }
}

fn reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Patch => reqwest::Method::PATCH,
        Method::Delete => reqwest::Method::DELETE,
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let mut builder = self
            .client
            .request(reqwest_method(request.method), &request.url);
        if let Some(token) = &self.bearer_token {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await?;
        let body = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).map_err(|e| TransportError::Decode(e.to_string()))?
        };

        tracing::debug!(endpoint = request.endpoint_name(), status, "response received");
        Ok(ApiResponse { status, body })
    }
}

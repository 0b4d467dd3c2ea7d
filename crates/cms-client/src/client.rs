//! Permission-aware API client
//!
//! Resolves a descriptor's route, runs the [`AuthorizationGate`], and only
//! then hands the request to the transport.

use crate::descriptor::{EndpointDescriptor, RouteArgs};
use crate::error::{ClientError, ClientResult};
use crate::gate::AuthorizationGate;
use crate::transport::{ApiRequest, ApiResponse, Transport};
use serde::de::DeserializeOwned;

/// API client bound to one base URL and one session's gate
#[derive(Debug)]
pub struct ApiClient<T> {
    base_url: String,
    gate: AuthorizationGate,
    transport: T,
}

impl<T: Transport> ApiClient<T> {
    /// Create client
    pub fn new(base_url: impl Into<String>, gate: AuthorizationGate, transport: T) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            gate,
            transport,
        }
    }

    /// Base URL without trailing slash
    #[inline]
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Gate guarding this client
    #[inline]
    #[must_use]
    pub fn gate(&self) -> &AuthorizationGate {
        &self.gate
    }

    /// Underlying transport
    #[inline]
    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Build request for `descriptor` without sending it
    ///
    /// # Errors
    /// Returns [`ClientError::Route`] if a route argument is missing
    pub fn prepare(
        &self,
        descriptor: &'static EndpointDescriptor,
        args: &RouteArgs,
        body: Option<serde_json::Value>,
    ) -> ClientResult<ApiRequest> {
        let path = descriptor.path(args)?;
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        let mut request = ApiRequest::new(descriptor, url);
        request.body = body;
        Ok(request)
    }

    /// Gate and send a prepared request
    ///
    /// # Errors
    /// - [`ClientError::Gate`] if the gate rejects the request; the transport is not called
    /// - [`ClientError::Transport`] if sending fails
    /// - [`ClientError::Status`] for non-2xx responses
    pub async fn dispatch(&self, request: ApiRequest) -> ClientResult<ApiResponse> {
        self.gate.check(&request)?;
        let endpoint = request.endpoint_name();
        let response = self.transport.send(request).await?;
        if !response.is_success() {
            tracing::debug!(endpoint, status = response.status, "request failed");
            return Err(ClientError::Status {
                endpoint,
                status: response.status,
            });
        }
        Ok(response)
    }

    /// Call endpoint
    ///
    /// # Errors
    /// See [`ApiClient::prepare`] and [`ApiClient::dispatch`]
    pub async fn call(
        &self,
        descriptor: &'static EndpointDescriptor,
        args: &RouteArgs,
        body: Option<serde_json::Value>,
    ) -> ClientResult<ApiResponse> {
        let request = self.prepare(descriptor, args, body)?;
        self.dispatch(request).await
    }

    /// Call endpoint and decode its JSON body
    ///
    /// # Errors
    /// See [`ApiClient::call`]; additionally [`ClientError::Decode`]
    pub async fn call_json<R: DeserializeOwned>(
        &self,
        descriptor: &'static EndpointDescriptor,
        args: &RouteArgs,
        body: Option<serde_json::Value>,
    ) -> ClientResult<R> {
        let response = self.call(descriptor, args, body).await?;
        Ok(serde_json::from_value(response.body)?)
    }
}

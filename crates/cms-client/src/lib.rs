//! CMS API Client
//!
//! Permission-gated request dispatch for the admin panel.
//!
//! # Core Concepts
//!
//! - [`EndpointDescriptor`]: static route + required permissions of one API operation
//! - [`endpoints`]: the admin API catalogue
//! - [`AuthorizationGate`]: pre-flight permission check on every request
//! - [`Transport`]: seam to the network; [`HttpTransport`] is the `reqwest` implementation
//! - [`ApiClient`]: ties the three together
//!
//! # Example
//!
//! ```rust,ignore
//! use cms_access::PermissionStore;
//! use cms_client::{endpoints, ApiClient, AuthorizationGate, HttpTransport, RouteArgs};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! let store = Arc::new(PermissionStore::new());
//! let transport = HttpTransport::new(Duration::from_secs(30))?;
//! let client = ApiClient::new("https://cms.example.com/api", AuthorizationGate::new(store), transport);
//!
//! let users = client.call(&endpoints::USERS_LIST, &RouteArgs::new(), None).await?;
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod client;
pub mod descriptor;
pub mod endpoints;
pub mod error;
pub mod gate;
pub mod transport;

// Re-exports
pub use client::ApiClient;
pub use descriptor::{require_arg, EndpointDescriptor, Method, Route, RouteArgs, RouteFn};
pub use error::{ClientError, ClientResult, GateError, PermissionDenied, RouteError, TransportError};
pub use gate::AuthorizationGate;
pub use transport::{ApiRequest, ApiResponse, HttpTransport, Transport};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

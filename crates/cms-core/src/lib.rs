//! CMS Admin Core
//!
//! Session, configuration, and command surface tying the workspace crates
//! together.
//!
//! # Core Concepts
//!
//! - [`AdminSession`]: owns the permission store; login and logout replace it
//! - [`AdminConfig`]: TOML configuration with environment overrides
//! - [`logging::init`]: `tracing` subscriber setup
//! - [`commands`]: render, check, and catalogue operations used by `cms-admin`
//!
//! # Example
//!
//! ```rust
//! use cms_access::UninitializedPolicy;
//! use cms_core::{AdminSession, UserProfile};
//!
//! let session = AdminSession::new();
//! session.login(UserProfile {
//!     id: 1,
//!     email: "editor@example.com".into(),
//!     name: "Editor".into(),
//!     permissions: vec!["admin.page.read".into()],
//! });
//!
//! let gate = session.gate(UninitializedPolicy::FailOpen);
//! assert!(gate.store().has_all(&["admin.page.read"]));
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod session;

// Re-exports
pub use commands::{check_endpoint, endpoint_table, render_document, RenderFormat};
pub use config::AdminConfig;
pub use error::{AdminError, AdminResult, ConfigError};
pub use session::{AdminSession, UserProfile};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

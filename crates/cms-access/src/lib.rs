//! CMS Access Control
//!
//! Client-side permission state for the admin panel.
//!
//! # Core Concepts
//!
//! - [`PermissionSet`]: unordered set of opaque permission identifiers
//! - [`PermissionStore`]: the session's current set, replaced whole on profile load
//! - [`AuthorizationDecision`]: derived allow/deny outcome for a requirement
//! - [`visible_items`]: permission-aware menu filtering
//!
//! # Example
//!
//! ```rust
//! use cms_access::{PermissionStore, UninitializedPolicy};
//!
//! let store = PermissionStore::new();
//! assert!(store.authorize(&["admin.user.read"], UninitializedPolicy::FailOpen).is_allowed());
//!
//! store.set_permissions(["a.read"]);
//! assert!(store.has_all(&["a.read"]));
//! assert!(!store.has_all(&["a.read", "a.write"]));
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod decision;
pub mod nav;
pub mod permission;
pub mod store;

// Re-exports
pub use decision::{decide, AllowReason, AuthorizationDecision, DenyReason, UninitializedPolicy};
pub use nav::{visible_items, NavItem, Requirement};
pub use permission::PermissionSet;
pub use store::PermissionStore;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

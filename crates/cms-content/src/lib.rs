//! CMS Content Rendering
//!
//! Turns the style trees served by the CMS into display trees.
//!
//! # Architecture
//!
//! ```text
//! JSON → StyleNode tree → Renderer (StyleKind dispatch, recursive) → Rendered tree → HTML
//! ```
//!
//! # Example
//!
//! ```rust
//! use cms_content::{Element, Renderer, StyleNode};
//!
//! let tree = StyleNode::new("container")
//!     .with_id(1)
//!     .with_child(StyleNode::new("heading").with_id(2).with_field("title", "Welcome"))
//!     .with_hole()
//!     .with_child(StyleNode::new("unknown_tag_xyz").with_id(3));
//!
//! let out = Renderer::new().render(Some(&tree)).unwrap();
//! assert_eq!(out.element.children().len(), 2);
//! assert!(out.to_html().contains("unknown_tag_xyz"));
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod element;
pub mod error;
pub mod node;
pub mod registry;
pub mod render;

// Re-exports
pub use element::{is_safe_url, to_html, Element, Rendered};
pub use error::{ContentError, RenderError};
pub use node::{NodeKey, StyleNode};
pub use registry::StyleKind;
pub use render::{RenderOptions, Renderer, DEFAULT_MAX_DEPTH};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

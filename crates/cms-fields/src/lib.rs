//! CMS Field Editing
//!
//! Server-defined field metadata and the pure value resolution used by the
//! multi-language editors.
//!
//! # Example
//!
//! ```rust
//! use cms_fields::{get_content_value, FieldDescriptor, FieldKind};
//!
//! let field = FieldDescriptor::new(1, "greeting", FieldKind::Text)
//!     .translatable(true)
//!     .with_default("Hi")
//!     .with_translation(2, "Hola");
//!
//! assert_eq!(get_content_value(&field, 2), "Hola");
//! assert_eq!(get_content_value(&field, 3), "Hi");
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod edit;
pub mod error;
pub mod field;
pub mod resolve;

// Re-exports
pub use edit::{EditState, FieldChange, FieldValue};
pub use error::FieldError;
pub use field::{FieldDescriptor, FieldKind, Language, Translation};
pub use resolve::{
    get_content_value, get_property_value, get_property_value_as_boolean, is_truthy,
    PROPERTY_LANGUAGE_ID,
};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! Error types for content rendering
//!
//! [`RenderError`] never escapes the walker: a failing node is rendered as
//! [`crate::Element::Failed`] and its siblings are unaffected.

/// Failure while rendering a single node
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    /// Required field absent or empty
    #[error("missing required field '{0}'")]
    MissingField(&'static str),

    /// Field present but not a `{ content }` wrapper or scalar
    #[error("malformed field '{field}': {reason}")]
    MalformedField {
        /// Field name
        field: String,
        /// What was wrong
        reason: String,
    },

    /// Field value outside its allowed range
    #[error("invalid value for '{field}': {value}")]
    InvalidValue {
        /// Field name
        field: &'static str,
        /// Offending value
        value: String,
    },

    /// Tree nested deeper than the configured limit
    #[error("tree deeper than {0} levels")]
    DepthExceeded(usize),
}

impl RenderError {
    /// Create malformed field error
    pub fn malformed(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedField {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Failure decoding content from the wire
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    /// Payload is not a valid style tree
    #[error("invalid style tree: {0}")]
    Parse(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_error_display() {
        assert_eq!(
            RenderError::MissingField("img_src").to_string(),
            "missing required field 'img_src'"
        );
        assert_eq!(
            RenderError::malformed("title", "expected string").to_string(),
            "malformed field 'title': expected string"
        );
        assert_eq!(RenderError::DepthExceeded(4).to_string(), "tree deeper than 4 levels");
    }
}

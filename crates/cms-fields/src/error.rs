//! Error types for field editing

/// Edit-state update failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    /// Field not part of the edit session (absent or hidden)
    #[error("unknown field: {0}")]
    UnknownField(String),

    /// Field is read-only
    #[error("field is disabled: {0}")]
    Disabled(String),

    /// Language not being edited
    #[error("field '{field}' has no value for language {language_id}")]
    UnknownLanguage {
        /// Field name
        field: String,
        /// Requested language
        language_id: u64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_error_display() {
        let err = FieldError::UnknownLanguage {
            field: "title".into(),
            language_id: 7,
        };
        assert_eq!(err.to_string(), "field 'title' has no value for language 7");
    }
}

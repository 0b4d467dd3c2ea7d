//! Error types for the admin core
//!
//! Wraps the per-crate errors of the workspace plus configuration failures.

use cms_client::ClientError;
use cms_content::ContentError;
use std::path::PathBuf;

/// Top-level admin error
#[derive(Debug, thiserror::Error)]
pub enum AdminError {
    /// Configuration could not be loaded or is invalid
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// API call failed
    #[error("client error: {0}")]
    Client(#[from] ClientError),

    /// Style tree could not be parsed
    #[error("content error: {0}")]
    Content(#[from] ContentError),

    /// Endpoint name not in the catalogue
    #[error("unknown endpoint: {0}")]
    UnknownEndpoint(String),
}

impl AdminError {
    /// Check if error is worth retrying
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Client(err) if err.is_retryable())
    }
}

/// Configuration failures
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File could not be read
    #[error("cannot read {path}: {source}")]
    Io {
        /// Path that was read
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// TOML is malformed or has wrong types
    #[error("invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// Values parsed but are unusable
    #[error("invalid value for '{field}': {reason}")]
    Invalid {
        /// Offending key
        field: &'static str,
        /// What is wrong with it
        reason: String,
    },
}

impl ConfigError {
    /// Create invalid-value error
    #[must_use]
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// Result type for admin operations
pub type AdminResult<T> = Result<T, AdminError>;

//! Admin configuration
//!
//! Loaded from TOML, then overridden by `CMS_ADMIN_API_URL` and
//! `CMS_ADMIN_LOG` when set.

use crate::error::ConfigError;
use cms_access::UninitializedPolicy;
use cms_content::DEFAULT_MAX_DEPTH;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Environment variable overriding [`AdminConfig::api_base_url`]
pub const ENV_API_URL: &str = "CMS_ADMIN_API_URL";

/// Environment variable overriding [`AdminConfig::log_filter`]
pub const ENV_LOG: &str = "CMS_ADMIN_LOG";

/// Admin core configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    /// Base URL every endpoint path is appended to
    pub api_base_url: String,
    /// Gate behaviour before the profile has loaded
    pub uninitialized_policy: UninitializedPolicy,
    /// Deepest style tree the renderer will walk
    pub max_render_depth: usize,
    /// `tracing` filter directive
    pub log_filter: String,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
}

impl AdminConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With API base URL
    #[inline]
    #[must_use]
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// With uninitialized-store policy
    #[inline]
    #[must_use]
    pub fn with_uninitialized_policy(mut self, policy: UninitializedPolicy) -> Self {
        self.uninitialized_policy = policy;
        self
    }

    /// With render depth limit
    #[inline]
    #[must_use]
    pub fn with_max_render_depth(mut self, depth: usize) -> Self {
        self.max_render_depth = depth;
        self
    }

    /// With log filter
    #[inline]
    #[must_use]
    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    /// With request timeout
    #[inline]
    #[must_use]
    pub fn with_request_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = secs;
        self
    }

    /// Request timeout as a [`Duration`]
    #[inline]
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Parse from TOML text; missing keys keep their defaults
    ///
    /// # Errors
    /// - [`ConfigError::Parse`] if the text is not valid TOML for this shape
    /// - [`ConfigError::Invalid`] if a value fails [`AdminConfig::validate`]
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file and apply environment overrides
    ///
    /// # Errors
    /// - [`ConfigError::Io`] if the file cannot be read
    /// - [`ConfigError::Parse`] and [`ConfigError::Invalid`] as for
    ///   [`AdminConfig::from_toml_str`], checked again after the overrides
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?.apply_env();
        config.validate()?;
        tracing::debug!(path = %path.display(), "loaded admin configuration");
        Ok(config)
    }

    /// Apply `CMS_ADMIN_*` overrides from the process environment
    #[must_use]
    pub fn apply_env(self) -> Self {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key lookup
    #[must_use]
    pub fn apply_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.trim().is_empty()) {
            self.api_base_url = url;
        }
        if let Some(filter) = lookup(ENV_LOG).filter(|v| !v.trim().is_empty()) {
            self.log_filter = filter;
        }
        self
    }

    /// Reject values the client cannot run with
    ///
    /// # Errors
    /// Returns [`ConfigError::Invalid`] naming the first offending key: an
    /// empty `api_base_url`, or a zero `max_render_depth` or
    /// `request_timeout_secs`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_base_url.trim().is_empty() {
            return Err(ConfigError::invalid("api_base_url", "must not be empty"));
        }
        if self.max_render_depth == 0 {
            return Err(ConfigError::invalid("max_render_depth", "must be positive"));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::invalid("request_timeout_secs", "must be positive"));
        }
        Ok(())
    }
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8080/api".to_string(),
            uninitialized_policy: UninitializedPolicy::FailOpen,
            max_render_depth: DEFAULT_MAX_DEPTH,
            log_filter: "info".to_string(),
            request_timeout_secs: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_is_valid() {
        assert!(AdminConfig::default().validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = AdminConfig::from_toml_str(
            r#"
            api_base_url = "https://cms.example.com/api"
            uninitialized_policy = "deny"
            "#,
        )
        .unwrap();

        assert_eq!(
            config,
            AdminConfig::new()
                .with_api_base_url("https://cms.example.com/api")
                .with_uninitialized_policy(UninitializedPolicy::Deny)
        );
    }

    #[test]
    fn zero_values_rejected() {
        let err = AdminConfig::from_toml_str("max_render_depth = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "max_render_depth", .. }));

        let err = AdminConfig::new().with_request_timeout_secs(0).validate().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "request_timeout_secs", .. }));

        let err = AdminConfig::new().with_api_base_url("  ").validate().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "api_base_url", .. }));
    }

    #[test]
    fn wrong_types_are_parse_errors() {
        let err = AdminConfig::from_toml_str("request_timeout_secs = \"soon\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn overrides_replace_non_empty_values() {
        let config = AdminConfig::new().apply_overrides(|key| match key {
            ENV_API_URL => Some("https://staging/api".to_string()),
            ENV_LOG => Some(String::new()),
            _ => None,
        });

        assert_eq!(config.api_base_url, "https://staging/api");
        assert_eq!(config.log_filter, "info");
    }
}

//! Subscriber setup
//!
//! `RUST_LOG` takes precedence over the configured filter. Installing twice
//! is a no-op, so tests and the binary can both call [`init`].

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Output format for the console layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

/// Build the effective filter: `RUST_LOG` if set and valid, else `filter`
#[must_use]
pub fn env_filter(filter: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(filter))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global text subscriber writing to stderr
///
/// Returns `false` when a subscriber was already installed.
pub fn init(filter: &str) -> bool {
    init_with_format(filter, LogFormat::Text)
}

/// Install the global subscriber in the given format
pub fn init_with_format(filter: &str, format: LogFormat) -> bool {
    let registry = tracing_subscriber::registry().with(env_filter(filter));
    let result = match format {
        LogFormat::Text => registry
            .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
            .try_init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
    };
    result.is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_init_is_harmless() {
        let _ = init("debug");
        assert!(!init("warn"));
    }

    #[test]
    fn invalid_filter_falls_back() {
        // must not panic
        let _ = env_filter("cms_client=[");
    }
}

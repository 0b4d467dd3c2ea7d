//! Error types for the API client
//!
//! Two gate failures are kept apart on purpose:
//! - a missing descriptor is an integration error in the calling code
//! - a permission denial is an expected, user-facing condition
//!
//! Neither is retryable.

/// Request was rejected because the user lacks required permissions
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("permission denied for {endpoint}: requires {required_permissions:?}")]
pub struct PermissionDenied {
    /// Permissions the endpoint declares
    pub required_permissions: Vec<String>,
    /// Permissions the user held when the request was checked
    pub user_permissions: Vec<String>,
    /// Resolved URL of the rejected request
    pub endpoint: String,
}

impl PermissionDenied {
    /// Required permissions the user does not hold
    #[must_use]
    pub fn missing(&self) -> Vec<&str> {
        self.required_permissions
            .iter()
            .filter(|p| !self.user_permissions.contains(p))
            .map(String::as_str)
            .collect()
    }
}

/// Authorization gate failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GateError {
    /// Request issued without an endpoint descriptor
    #[error("integration error: request to {url} has no endpoint descriptor attached")]
    MissingDescriptor {
        /// Resolved URL of the offending request
        url: String,
    },

    /// User lacks required permissions
    #[error(transparent)]
    PermissionDenied(#[from] PermissionDenied),

    /// Permissions not loaded yet and the strict policy is active
    #[error("permissions not loaded; request to {endpoint} blocked")]
    NotInitialized {
        /// Resolved URL of the blocked request
        endpoint: String,
    },
}

impl GateError {
    /// Check if error signals a wiring mistake rather than a runtime condition
    #[inline]
    #[must_use]
    pub fn is_integration_error(&self) -> bool {
        matches!(self, Self::MissingDescriptor { .. })
    }

    /// Gate failures never succeed on retry without a permission change
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        false
    }
}

/// Route resolution failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    /// Dynamic route needs an argument that was not supplied
    #[error("route for {endpoint} requires argument '{argument}'")]
    MissingArgument {
        /// Endpoint name
        endpoint: &'static str,
        /// Argument name
        argument: &'static str,
    },

    /// Argument would not stay a single path segment
    #[error("route for {endpoint} rejects value of '{argument}'")]
    InvalidArgument {
        /// Endpoint name
        endpoint: &'static str,
        /// Argument name
        argument: &'static str,
    },
}

/// Transport failures
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Connection or protocol failure
    #[error("network error: {0}")]
    Network(String),

    /// Request exceeded the transport timeout
    #[error("request timed out")]
    Timeout,

    /// Response body was not valid JSON
    #[error("invalid response body: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

/// Combined client error
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Authorization gate rejected the request
    #[error("gate error: {0}")]
    Gate(#[from] GateError),

    /// Route could not be resolved
    #[error("route error: {0}")]
    Route(#[from] RouteError),

    /// Transport failed
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Server answered with a non-success status
    #[error("{endpoint} returned HTTP {status}")]
    Status {
        /// Endpoint name
        endpoint: &'static str,
        /// HTTP status code
        status: u16,
    },

    /// Response body did not match the expected shape
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ClientError {
    /// Permission denial carried by this error, if any
    #[must_use]
    pub fn permission_denied(&self) -> Option<&PermissionDenied> {
        match self {
            Self::Gate(GateError::PermissionDenied(denied)) => Some(denied),
            _ => None,
        }
    }

    /// Check if error is retryable
    ///
    /// Only transport failures and server errors qualify; the retry itself
    /// belongs to the transport layer.
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(TransportError::Network(_) | TransportError::Timeout) => true,
            Self::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

/// Result type alias for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn denied() -> PermissionDenied {
        PermissionDenied {
            required_permissions: vec!["a.read".into(), "a.write".into()],
            user_permissions: vec!["a.read".into()],
            endpoint: "https://cms.test/admin/a".into(),
        }
    }

    #[test]
    fn permission_denied_display() {
        let err = denied();
        assert_eq!(
            err.to_string(),
            "permission denied for https://cms.test/admin/a: requires [\"a.read\", \"a.write\"]"
        );
    }

    #[test]
    fn permission_denied_missing() {
        assert_eq!(denied().missing(), vec!["a.write"]);
    }

    #[test]
    fn gate_errors_are_not_retryable() {
        let missing = GateError::MissingDescriptor { url: "/x".into() };
        assert!(missing.is_integration_error());
        assert!(!missing.is_retryable());

        let denied = GateError::from(denied());
        assert!(!denied.is_integration_error());
        assert!(!denied.is_retryable());
    }

    #[test]
    fn client_error_exposes_denial() {
        let err = ClientError::from(GateError::from(denied()));
        assert_eq!(err.permission_denied(), Some(&denied()));
        assert!(!err.is_retryable());
    }

    #[test]
    fn server_errors_are_retryable() {
        let err = ClientError::Status { endpoint: "users.list", status: 503 };
        assert!(err.is_retryable());
        let err = ClientError::Status { endpoint: "users.list", status: 404 };
        assert!(!err.is_retryable());
    }
}

//! Authorization decisions
//!
//! A decision is derived on demand from the store state and an endpoint's
//! required permissions. It is never stored.

use crate::permission::PermissionSet;
use serde::{Deserialize, Serialize};

/// What to do when permissions are checked before the profile has loaded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UninitializedPolicy {
    /// Allow the request; the server remains the enforcing authority
    #[default]
    FailOpen,

    /// Reject the request until the store is initialized
    Deny,
}

/// Why a request was allowed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllowReason {
    /// Endpoint requires no permissions
    Public,

    /// Store not yet initialized and policy is fail-open
    Uninitialized,

    /// Every required permission is held
    Granted,
}

/// Why a request was denied
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DenyReason {
    /// Required permissions the user does not hold
    MissingPermissions(Vec<String>),

    /// Store not yet initialized and policy is deny
    NotInitialized,
}

/// Outcome of an authorization check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthorizationDecision {
    /// Request may proceed
    Allow(AllowReason),

    /// Request must not reach the network
    Deny(DenyReason),
}

impl AuthorizationDecision {
    /// Check if decision allows the request
    #[inline]
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow(_))
    }
}

/// Pure decision table
///
/// Order matters: public endpoints are allowed even under
/// [`UninitializedPolicy::Deny`].
#[must_use]
pub fn decide<S: AsRef<str>>(
    initialized: bool,
    permissions: &PermissionSet,
    required: &[S],
    policy: UninitializedPolicy,
) -> AuthorizationDecision {
    if required.is_empty() {
        return AuthorizationDecision::Allow(AllowReason::Public);
    }

    if !initialized {
        return match policy {
            UninitializedPolicy::FailOpen => AuthorizationDecision::Allow(AllowReason::Uninitialized),
            UninitializedPolicy::Deny => AuthorizationDecision::Deny(DenyReason::NotInitialized),
        };
    }

    let missing = permissions.missing(required);
    if missing.is_empty() {
        AuthorizationDecision::Allow(AllowReason::Granted)
    } else {
        AuthorizationDecision::Deny(DenyReason::MissingPermissions(missing))
    }
}

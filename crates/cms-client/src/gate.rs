//! Authorization gate
//!
//! Pre-flight check run on every outgoing request. A request that fails
//! here never reaches the transport.
//!
//! # Decision order
//! 1. no descriptor attached → integration error
//! 2. descriptor declares no permissions → allow
//! 3. store not initialized → allow with a warning (or block under
//!    [`UninitializedPolicy::Deny`])
//! 4. allow iff every declared permission is held

use crate::error::{GateError, PermissionDenied};
use crate::transport::ApiRequest;
use cms_access::{AllowReason, AuthorizationDecision, DenyReason, PermissionStore, UninitializedPolicy};
use std::sync::Arc;

/// Request interceptor consulting the session's permission store
#[derive(Debug, Clone)]
pub struct AuthorizationGate {
    store: Arc<PermissionStore>,
    policy: UninitializedPolicy,
}

impl AuthorizationGate {
    /// Create fail-open gate over `store`
    #[inline]
    #[must_use]
    pub fn new(store: Arc<PermissionStore>) -> Self {
        Self {
            store,
            policy: UninitializedPolicy::FailOpen,
        }
    }

    /// With policy for the uninitialized phase
    #[inline]
    #[must_use]
    pub fn with_policy(mut self, policy: UninitializedPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Active uninitialized policy
    #[inline]
    #[must_use]
    pub fn policy(&self) -> UninitializedPolicy {
        self.policy
    }

    /// Store this gate consults
    #[inline]
    #[must_use]
    pub fn store(&self) -> &Arc<PermissionStore> {
        &self.store
    }

    /// Check request
    ///
    /// # Errors
    /// - [`GateError::MissingDescriptor`] if no descriptor is attached
    /// - [`GateError::PermissionDenied`] if a declared permission is not held
    /// - [`GateError::NotInitialized`] under the strict policy before login
    pub fn check(&self, request: &ApiRequest) -> Result<AllowReason, GateError> {
        let Some(descriptor) = request.descriptor else {
            tracing::error!(
                url = %request.url,
                method = %request.method,
                "request issued without an endpoint descriptor"
            );
            return Err(GateError::MissingDescriptor {
                url: request.url.clone(),
            });
        };

        let (decision, held) = self.store.authorize_with_snapshot(descriptor.permissions, self.policy);
        match decision {
            AuthorizationDecision::Allow(AllowReason::Uninitialized) => {
                tracing::warn!(
                    endpoint = descriptor.name,
                    url = %request.url,
                    required = ?descriptor.permissions,
                    "permissions not loaded yet, allowing request; server enforces access"
                );
                Ok(AllowReason::Uninitialized)
            }
            AuthorizationDecision::Allow(reason) => Ok(reason),
            AuthorizationDecision::Deny(DenyReason::NotInitialized) => {
                tracing::warn!(
                    endpoint = descriptor.name,
                    url = %request.url,
                    "permissions not loaded yet, blocking request"
                );
                Err(GateError::NotInitialized {
                    endpoint: request.url.clone(),
                })
            }
            AuthorizationDecision::Deny(DenyReason::MissingPermissions(missing)) => {
                let denied = PermissionDenied {
                    required_permissions: descriptor.permissions.iter().map(|p| (*p).to_string()).collect(),
                    user_permissions: held.to_sorted_vec(),
                    endpoint: request.url.clone(),
                };
                tracing::warn!(
                    endpoint = descriptor.name,
                    url = %denied.endpoint,
                    required = ?denied.required_permissions,
                    actual = ?denied.user_permissions,
                    missing = ?missing,
                    "permission denied"
                );
                Err(GateError::PermissionDenied(denied))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{EndpointDescriptor, Method, Route};
    use crate::endpoints;

    static READ_WRITE: EndpointDescriptor = EndpointDescriptor::new(
        "a.update",
        Method::Put,
        Route::Static("/a"),
        &["a.read", "a.write"],
    );
    static READ: EndpointDescriptor =
        EndpointDescriptor::new("a.get", Method::Get, Route::Static("/a"), &["a.read"]);

    fn gate(ids: Option<&[&str]>) -> AuthorizationGate {
        let store = match ids {
            Some(ids) => PermissionStore::with_permissions(ids.iter().copied()),
            None => PermissionStore::new(),
        };
        AuthorizationGate::new(Arc::new(store))
    }

    #[test]
    fn missing_descriptor_is_integration_error() {
        let err = gate(Some(&[])).check(&ApiRequest::untyped(Method::Get, "/a")).unwrap_err();
        assert_eq!(err, GateError::MissingDescriptor { url: "/a".into() });
    }

    #[test]
    fn missing_descriptor_rejected_even_before_login() {
        let err = gate(None).check(&ApiRequest::untyped(Method::Get, "/a")).unwrap_err();
        assert!(err.is_integration_error());
    }

    #[test]
    fn public_endpoint_allowed() {
        let reason = gate(Some(&[])).check(&ApiRequest::new(&endpoints::LOGIN, "/auth/login")).unwrap();
        assert_eq!(reason, AllowReason::Public);
    }

    #[test]
    fn uninitialized_store_fails_open() {
        let reason = gate(None).check(&ApiRequest::new(&READ_WRITE, "/a")).unwrap();
        assert_eq!(reason, AllowReason::Uninitialized);
    }

    #[test]
    fn strict_policy_blocks_before_login() {
        let gate = gate(None).with_policy(UninitializedPolicy::Deny);
        let err = gate.check(&ApiRequest::new(&READ, "/a")).unwrap_err();
        assert_eq!(err, GateError::NotInitialized { endpoint: "/a".into() });
    }

    #[test]
    fn denial_carries_diagnostics() {
        let err = gate(Some(&["a.read"])).check(&ApiRequest::new(&READ_WRITE, "https://cms.test/a")).unwrap_err();
        let GateError::PermissionDenied(denied) = err else {
            panic!("expected denial, got {err:?}");
        };
        assert_eq!(denied.required_permissions, vec!["a.read", "a.write"]);
        assert_eq!(denied.user_permissions, vec!["a.read"]);
        assert_eq!(denied.endpoint, "https://cms.test/a");
    }

    #[test]
    fn granted_when_all_held() {
        let reason = gate(Some(&["a.read"])).check(&ApiRequest::new(&READ, "/a")).unwrap();
        assert_eq!(reason, AllowReason::Granted);
    }
}

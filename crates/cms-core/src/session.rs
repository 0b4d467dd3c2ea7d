//! Admin session
//!
//! Single writer of the permission store. Gates and clients built from a
//! session share its store, so a login or logout is visible to them on the
//! next check.

use cms_access::{PermissionStore, UninitializedPolicy};
use cms_client::{endpoints, ApiClient, AuthorizationGate, ClientResult, RouteArgs, Transport};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Authenticated user as returned by the profile endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Server-side user id
    pub id: u64,
    /// Login email
    pub email: String,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Permission identifiers granted through the user's roles
    #[serde(default)]
    pub permissions: Vec<String>,
}

/// Current user plus the permission store derived from it
#[derive(Debug, Default)]
pub struct AdminSession {
    store: Arc<PermissionStore>,
    profile: RwLock<Option<UserProfile>>,
}

impl AdminSession {
    /// Create logged-out session with an uninitialized store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the profile and replace the permission set with its grants
    pub fn login(&self, profile: UserProfile) {
        tracing::info!(
            user_id = profile.id,
            permissions = profile.permissions.len(),
            "session started"
        );
        self.store.set_permissions(profile.permissions.iter().map(String::as_str));
        *self.profile.write() = Some(profile);
    }

    /// Forget the profile and return the store to uninitialized
    pub fn logout(&self) {
        if let Some(profile) = self.profile.write().take() {
            tracing::info!(user_id = profile.id, "session ended");
        }
        self.store.clear_permissions();
    }

    /// Fetch the profile through `client` and log in with it
    ///
    /// # Errors
    /// Any [`cms_client::ClientError`] from the profile call; the session is
    /// left unchanged.
    pub async fn load_profile<T: Transport>(&self, client: &ApiClient<T>) -> ClientResult<UserProfile> {
        let profile: UserProfile = client
            .call_json(&endpoints::PROFILE, &RouteArgs::new(), None)
            .await?;
        self.login(profile.clone());
        Ok(profile)
    }

    /// Current profile, if logged in
    #[must_use]
    pub fn profile(&self) -> Option<UserProfile> {
        self.profile.read().clone()
    }

    /// Check if a profile is loaded
    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.profile.read().is_some()
    }

    /// Shared permission store
    #[inline]
    #[must_use]
    pub fn store(&self) -> &Arc<PermissionStore> {
        &self.store
    }

    /// Gate over this session's store
    #[must_use]
    pub fn gate(&self, policy: UninitializedPolicy) -> AuthorizationGate {
        AuthorizationGate::new(Arc::clone(&self.store)).with_policy(policy)
    }

    /// Client whose gate reads this session's store
    #[must_use]
    pub fn client<T: Transport>(
        &self,
        base_url: impl Into<String>,
        policy: UninitializedPolicy,
        transport: T,
    ) -> ApiClient<T> {
        ApiClient::new(base_url, self.gate(policy), transport)
    }
}

//! Permission store
//!
//! Holds the current snapshot of the authenticated user's permissions.
//!
//! The store has two phases:
//! - **uninitialized**: before the profile is loaded, or after logout
//! - **initialized**: after [`PermissionStore::set_permissions`]
//!
//! The snapshot is only ever replaced whole. Readers see either the old or
//! the new set, never a partially updated one.

use crate::decision::{decide, AuthorizationDecision, UninitializedPolicy};
use crate::permission::PermissionSet;
use parking_lot::RwLock;
use std::sync::Arc;

#[derive(Debug, Default)]
struct Snapshot {
    permissions: Arc<PermissionSet>,
    initialized: bool,
}

/// Current user's permission set
///
/// Construct one per session and share it as `Arc<PermissionStore>` with
/// everything that needs to consult it.
#[derive(Debug, Default)]
pub struct PermissionStore {
    state: RwLock<Snapshot>,
}

impl PermissionStore {
    /// Create uninitialized store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create store already holding `ids`
    #[must_use]
    pub fn with_permissions<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let store = Self::new();
        store.set_permissions(ids);
        store
    }

    /// Replace the whole set and mark the store initialized
    pub fn set_permissions<I, S>(&self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let permissions: PermissionSet = ids.into_iter().collect();
        let count = permissions.len();
        *self.state.write() = Snapshot {
            permissions: Arc::new(permissions),
            initialized: true,
        };
        tracing::debug!(count, "permission set replaced");
    }

    /// Empty the set and mark the store uninitialized
    pub fn clear_permissions(&self) {
        *self.state.write() = Snapshot::default();
        tracing::debug!("permission set cleared");
    }

    /// True iff `required` is empty or every entry is held
    #[must_use]
    pub fn has_all<S: AsRef<str>>(&self, required: &[S]) -> bool {
        self.state.read().permissions.contains_all(required)
    }

    /// True iff `required` is empty or at least one entry is held
    #[must_use]
    pub fn has_any<S: AsRef<str>>(&self, required: &[S]) -> bool {
        self.state.read().permissions.contains_any(required)
    }

    /// Whether a profile has populated the store
    #[inline]
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.state.read().initialized
    }

    /// Current permission set
    #[must_use]
    pub fn snapshot(&self) -> Arc<PermissionSet> {
        Arc::clone(&self.state.read().permissions)
    }

    /// Decide whether `required` is satisfied under `policy`
    ///
    /// The initialized flag and the set are read under one lock, so the
    /// decision never mixes two snapshots.
    #[must_use]
    pub fn authorize<S: AsRef<str>>(
        &self,
        required: &[S],
        policy: UninitializedPolicy,
    ) -> AuthorizationDecision {
        let state = self.state.read();
        decide(state.initialized, &state.permissions, required, policy)
    }

    /// Like [`PermissionStore::authorize`], also returning the set the decision was made on
    ///
    /// Use this when the caller reports the held permissions alongside the
    /// outcome, so both come from the same snapshot.
    #[must_use]
    pub fn authorize_with_snapshot<S: AsRef<str>>(
        &self,
        required: &[S],
        policy: UninitializedPolicy,
    ) -> (AuthorizationDecision, Arc<PermissionSet>) {
        let state = self.state.read();
        let decision = decide(state.initialized, &state.permissions, required, policy);
        (decision, Arc::clone(&state.permissions))
    }
}

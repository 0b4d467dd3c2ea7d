//! Permission-aware navigation
//!
//! Filters the admin menu down to the entries the current user may open.
//! Unlike the request gate this is fail-closed: while the store is
//! uninitialized only entries without requirements are shown.

use crate::store::PermissionStore;
use serde::{Deserialize, Serialize};

/// How an entry's permission list is matched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Requirement {
    /// Every listed permission is needed
    #[default]
    All,

    /// Any one listed permission is enough
    Any,
}

/// Menu entry, optionally grouping child entries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavItem {
    /// Display label
    pub label: String,

    /// Target path; `None` for pure groups
    #[serde(default)]
    pub href: Option<String>,

    /// Permissions gating this entry
    #[serde(default)]
    pub permissions: Vec<String>,

    /// Match mode for `permissions`
    #[serde(default)]
    pub requirement: Requirement,

    /// Nested entries
    #[serde(default)]
    pub children: Vec<NavItem>,
}

impl NavItem {
    /// Create leaf entry
    pub fn link(label: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            href: Some(href.into()),
            permissions: Vec::new(),
            requirement: Requirement::All,
            children: Vec::new(),
        }
    }

    /// Create group entry
    pub fn group(label: impl Into<String>, children: Vec<NavItem>) -> Self {
        Self {
            label: label.into(),
            href: None,
            permissions: Vec::new(),
            requirement: Requirement::All,
            children,
        }
    }

    /// With required permissions
    #[must_use]
    pub fn requires(mut self, permissions: &[&str], requirement: Requirement) -> Self {
        self.permissions = permissions.iter().map(|p| (*p).to_string()).collect();
        self.requirement = requirement;
        self
    }

    fn permitted(&self, store: &PermissionStore) -> bool {
        if self.permissions.is_empty() {
            return true;
        }
        if !store.is_initialized() {
            return false;
        }
        match self.requirement {
            Requirement::All => store.has_all(&self.permissions),
            Requirement::Any => store.has_any(&self.permissions),
        }
    }
}

/// Entries visible to the current user, preserving order
///
/// A group whose children are all hidden is dropped unless it links
/// somewhere itself.
#[must_use]
pub fn visible_items(items: &[NavItem], store: &PermissionStore) -> Vec<NavItem> {
    items
        .iter()
        .filter(|item| item.permitted(store))
        .filter_map(|item| {
            let children = visible_items(&item.children, store);
            if !item.children.is_empty() && children.is_empty() && item.href.is_none() {
                return None;
            }
            Some(NavItem {
                children,
                ..item.clone()
            })
        })
        .collect()
}

//! Permission identifiers and sets
//!
//! Permissions are opaque dot-namespaced tokens such as `admin.user.read`.
//! They are compared by equality only: no hierarchy, no wildcards.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Unordered set of permission identifiers granted to the current user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionSet {
    inner: HashSet<String>,
}

impl PermissionSet {
    /// Create empty set
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check membership of a single identifier
    #[inline]
    #[must_use]
    pub fn contains(&self, permission: &str) -> bool {
        self.inner.contains(permission)
    }

    /// True iff `required` is empty or every entry is in the set
    #[must_use]
    pub fn contains_all<S: AsRef<str>>(&self, required: &[S]) -> bool {
        required.iter().all(|p| self.inner.contains(p.as_ref()))
    }

    /// True iff `required` is empty or at least one entry is in the set
    #[must_use]
    pub fn contains_any<S: AsRef<str>>(&self, required: &[S]) -> bool {
        required.is_empty() || required.iter().any(|p| self.inner.contains(p.as_ref()))
    }

    /// Entries of `required` that are not in the set, in the order given
    #[must_use]
    pub fn missing<S: AsRef<str>>(&self, required: &[S]) -> Vec<String> {
        required
            .iter()
            .map(|p| p.as_ref())
            .filter(|p: &&str| !self.inner.contains(*p))
            .map(str::to_string)
            .collect()
    }

    /// Number of identifiers
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Check if set is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Iterate over identifiers in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.inner.iter().map(String::as_str)
    }

    /// Identifiers in lexical order, for stable diagnostics
    #[must_use]
    pub fn to_sorted_vec(&self) -> Vec<String> {
        let mut out: Vec<String> = self.inner.iter().cloned().collect();
        out.sort();
        out
    }
}

impl<S: Into<String>> FromIterator<S> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            inner: iter.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_requirement_is_satisfied() {
        let set = PermissionSet::new();
        let none: [&str; 0] = [];
        assert!(set.contains_all(&none));
        assert!(set.contains_any(&none));
    }

    #[test]
    fn contains_all_and_any() {
        let set: PermissionSet = ["a.read", "b.read"].into_iter().collect();
        assert!(set.contains_all(&["a.read"]));
        assert!(!set.contains_all(&["a.read", "a.write"]));
        assert!(set.contains_any(&["a.write", "b.read"]));
        assert!(!set.contains_any(&["c.read"]));
    }

    #[test]
    fn missing_preserves_requirement_order() {
        let set: PermissionSet = ["a.read"].into_iter().collect();
        assert_eq!(
            set.missing(&["z.write", "a.read", "b.write"]),
            vec!["z.write".to_string(), "b.write".to_string()]
        );
    }

    #[test]
    fn no_wildcard_or_prefix_matching() {
        let set: PermissionSet = ["admin"].into_iter().collect();
        assert!(!set.contains("admin.user.read"));
        assert!(!set.contains_all(&["admin.*"]));
    }

    #[test]
    fn deserializes_from_plain_list() {
        let set: PermissionSet = serde_json::from_str(r#"["a.read","a.read","b.write"]"#).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.to_sorted_vec(), vec!["a.read", "b.write"]);
    }
}

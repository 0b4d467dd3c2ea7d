//! Operations behind the `cms-admin` subcommands
//!
//! Each returns its output as a value; printing is left to the binary.

use crate::error::{AdminError, AdminResult};
use cms_access::{AuthorizationDecision, PermissionStore, UninitializedPolicy};
use cms_client::{endpoints, Route};
use cms_content::{to_html, Renderer, StyleNode};
use std::fmt::Write as _;

/// Output of `render`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderFormat {
    /// HTML markup
    #[default]
    Html,
    /// Rendered element tree as pretty JSON
    Json,
}

/// Render a style tree document
///
/// Accepts either a JSON array of nodes (with `null` holes) or a single node.
///
/// # Errors
/// Returns [`AdminError::Content`] if the document is not a style tree.
pub fn render_document(json: &str, max_depth: usize, format: RenderFormat) -> AdminResult<String> {
    let nodes = if json.trim_start().starts_with('{') {
        vec![Some(StyleNode::from_json(json)?)]
    } else {
        StyleNode::list_from_json(json)?
    };

    let rendered = Renderer::new().with_max_depth(max_depth).render_all(&nodes);
    tracing::debug!(
        roots = rendered.len(),
        nodes = rendered.iter().map(cms_content::Rendered::count).sum::<usize>(),
        "document rendered"
    );

    match format {
        RenderFormat::Html => Ok(to_html(&rendered)),
        RenderFormat::Json => serde_json::to_string_pretty(&rendered)
            .map_err(|err| AdminError::Content(err.into())),
    }
}

/// Decide whether a user holding `permissions` may call catalogue endpoint `name`
///
/// With `initialized == false` the permissions are ignored and the store is
/// evaluated as before profile load.
///
/// # Errors
/// Returns [`AdminError::UnknownEndpoint`] if `name` is not in the catalogue.
pub fn check_endpoint(
    name: &str,
    permissions: &[String],
    initialized: bool,
    policy: UninitializedPolicy,
) -> AdminResult<AuthorizationDecision> {
    let descriptor = endpoints::find(name).ok_or_else(|| AdminError::UnknownEndpoint(name.to_string()))?;

    let store = PermissionStore::new();
    if initialized {
        store.set_permissions(permissions.iter().map(String::as_str));
    }
    Ok(store.authorize(descriptor.permissions, policy))
}

/// One line per catalogue endpoint: name, method, path, permissions
#[must_use]
pub fn endpoint_table() -> String {
    let mut out = String::new();
    for descriptor in endpoints::ALL {
        let path = match descriptor.route {
            Route::Static(path) => path,
            Route::Dynamic(_) => "(dynamic)",
        };
        let permissions = if descriptor.is_public() {
            "public".to_string()
        } else {
            descriptor.permissions.join(",")
        };
        let _ = writeln!(
            out,
            "{:<24} {:<6} {:<28} {}",
            descriptor.name,
            descriptor.method.as_str(),
            path,
            permissions
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use cms_access::{AllowReason, DenyReason};

    #[test]
    fn single_node_document_renders() {
        let html = render_document(
            r#"{ "id": 1, "style_name": "heading", "title": { "content": "Hi" } }"#,
            8,
            RenderFormat::Html,
        )
        .unwrap();
        assert_eq!(html, "<h1 class=\"cms-heading\" data-key=\"id-1\">Hi</h1>");
    }

    #[test]
    fn json_format_is_element_tree() {
        let json = render_document(r#"[{ "style_name": "divider" }]"#, 8, RenderFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["element"]["type"], "divider");
    }

    #[test]
    fn garbage_document_is_content_error() {
        let err = render_document("not json", 8, RenderFormat::Html).unwrap_err();
        assert!(matches!(err, AdminError::Content(_)));
    }

    #[test]
    fn malformed_array_reports_list_error() {
        let err = render_document(r#"[{ "style_name": "text", "id": "seven" }]"#, 8, RenderFormat::Html)
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("invalid type"), "{message}");
        assert!(!message.contains("expected struct"), "{message}");
    }

    #[test]
    fn malformed_object_reports_node_error() {
        let err = render_document(r#"{ "style_name": 3 }"#, 8, RenderFormat::Html).unwrap_err();
        assert!(err.to_string().contains("expected a string"), "{err}");
    }

    #[test]
    fn check_reports_missing_permissions() {
        let decision =
            check_endpoint("users.delete", &["admin.user.read".into()], true, UninitializedPolicy::FailOpen)
                .unwrap();
        assert_eq!(
            decision,
            AuthorizationDecision::Deny(DenyReason::MissingPermissions(vec!["admin.user.delete".into()]))
        );
    }

    #[test]
    fn check_uninitialized_follows_policy() {
        let open = check_endpoint("users.list", &[], false, UninitializedPolicy::FailOpen).unwrap();
        assert_eq!(open, AuthorizationDecision::Allow(AllowReason::Uninitialized));

        let strict = check_endpoint("users.list", &[], false, UninitializedPolicy::Deny).unwrap();
        assert_eq!(strict, AuthorizationDecision::Deny(DenyReason::NotInitialized));
    }

    #[test]
    fn check_unknown_endpoint() {
        let err = check_endpoint("nope", &[], true, UninitializedPolicy::FailOpen).unwrap_err();
        assert!(matches!(err, AdminError::UnknownEndpoint(name) if name == "nope"));
    }

    #[test]
    fn table_lists_every_endpoint() {
        let table = endpoint_table();
        assert_eq!(table.lines().count(), endpoints::ALL.len());
        assert!(table.contains("auth.login"));
        assert!(table.lines().any(|l| l.starts_with("users.delete") && l.ends_with("admin.user.delete")));
    }
}

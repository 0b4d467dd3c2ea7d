//! Endpoint catalogue of the admin API
//!
//! One static descriptor per operation the admin panel issues.

use crate::descriptor::{require_arg, EndpointDescriptor, Method, Route, RouteArgs};
use crate::error::RouteError;

/// Permission identifiers used by the catalogue
pub mod perms {
    #![allow(missing_docs)]

    pub const USER_READ: &str = "admin.user.read";
    pub const USER_CREATE: &str = "admin.user.create";
    pub const USER_UPDATE: &str = "admin.user.update";
    pub const USER_DELETE: &str = "admin.user.delete";
    pub const ROLE_READ: &str = "admin.role.read";
    pub const ROLE_UPDATE: &str = "admin.role.update";
    pub const PERMISSION_READ: &str = "admin.permission.read";
    pub const PAGE_READ: &str = "admin.page.read";
    pub const PAGE_CREATE: &str = "admin.page.create";
    pub const PAGE_UPDATE: &str = "admin.page.update";
    pub const PAGE_DELETE: &str = "admin.page.delete";
    pub const SECTION_READ: &str = "admin.section.read";
    pub const SECTION_UPDATE: &str = "admin.section.update";
    pub const SECTION_DELETE: &str = "admin.section.delete";
    pub const LANGUAGE_READ: &str = "admin.language.read";
    pub const ASSET_READ: &str = "admin.asset.read";
    pub const ASSET_DELETE: &str = "admin.asset.delete";
    pub const AUDIT_VIEW: &str = "admin.audit.view";
}

fn user_path(endpoint: &'static str, args: &RouteArgs) -> Result<String, RouteError> {
    Ok(format!("/admin/users/{}", require_arg(args, endpoint, "user_id")?))
}

fn role_permissions_path(endpoint: &'static str, args: &RouteArgs) -> Result<String, RouteError> {
    Ok(format!(
        "/admin/roles/{}/permissions",
        require_arg(args, endpoint, "role_id")?
    ))
}

fn admin_page_path(endpoint: &'static str, args: &RouteArgs) -> Result<String, RouteError> {
    Ok(format!("/admin/pages/{}", require_arg(args, endpoint, "page_keyword")?))
}

fn page_sections_path(endpoint: &'static str, args: &RouteArgs) -> Result<String, RouteError> {
    Ok(format!(
        "/admin/pages/{}/sections",
        require_arg(args, endpoint, "page_keyword")?
    ))
}

fn section_path(endpoint: &'static str, args: &RouteArgs) -> Result<String, RouteError> {
    Ok(format!("/admin/sections/{}", require_arg(args, endpoint, "section_id")?))
}

fn asset_path(endpoint: &'static str, args: &RouteArgs) -> Result<String, RouteError> {
    Ok(format!("/admin/assets/{}", require_arg(args, endpoint, "asset_id")?))
}

fn audit_log_path(endpoint: &'static str, args: &RouteArgs) -> Result<String, RouteError> {
    Ok(format!(
        "/admin/audit/data-access/{}",
        require_arg(args, endpoint, "log_id")?
    ))
}

fn page_content_path(endpoint: &'static str, args: &RouteArgs) -> Result<String, RouteError> {
    let keyword = require_arg(args, endpoint, "page_keyword")?;
    match args.get("language_id") {
        Some(language) => Ok(format!(
            "/pages/{keyword}?language_id={}",
            urlencoding::encode(language)
        )),
        None => Ok(format!("/pages/{keyword}")),
    }
}

// Authentication (public or self-service)

/// Exchange credentials for tokens
pub static LOGIN: EndpointDescriptor =
    EndpointDescriptor::new("auth.login", Method::Post, Route::Static("/auth/login"), &[]);
/// Invalidate the refresh token
pub static LOGOUT: EndpointDescriptor =
    EndpointDescriptor::new("auth.logout", Method::Post, Route::Static("/auth/logout"), &[]);
/// Rotate the access token
pub static REFRESH_TOKEN: EndpointDescriptor = EndpointDescriptor::new(
    "auth.refresh",
    Method::Post,
    Route::Static("/auth/refresh-token"),
    &[],
);
/// Current user's profile, including permissions
pub static PROFILE: EndpointDescriptor =
    EndpointDescriptor::new("auth.profile", Method::Get, Route::Static("/auth/user-data"), &[]);

// Users and roles

/// List users
pub static USERS_LIST: EndpointDescriptor =
    EndpointDescriptor::new("users.list", Method::Get, Route::Static("/admin/users"), &[perms::USER_READ]);
/// Read one user
pub static USER_GET: EndpointDescriptor =
    EndpointDescriptor::new("users.get", Method::Get, Route::Dynamic(user_path), &[perms::USER_READ]);
/// Create user
pub static USER_CREATE: EndpointDescriptor = EndpointDescriptor::new(
    "users.create",
    Method::Post,
    Route::Static("/admin/users"),
    &[perms::USER_CREATE],
);
/// Update user
pub static USER_UPDATE: EndpointDescriptor =
    EndpointDescriptor::new("users.update", Method::Put, Route::Dynamic(user_path), &[perms::USER_UPDATE]);
/// Delete user
pub static USER_DELETE: EndpointDescriptor = EndpointDescriptor::new(
    "users.delete",
    Method::Delete,
    Route::Dynamic(user_path),
    &[perms::USER_DELETE],
);
/// List roles
pub static ROLES_LIST: EndpointDescriptor =
    EndpointDescriptor::new("roles.list", Method::Get, Route::Static("/admin/roles"), &[perms::ROLE_READ]);
/// Replace a role's permissions
pub static ROLE_PERMISSIONS_UPDATE: EndpointDescriptor = EndpointDescriptor::new(
    "roles.permissions.update",
    Method::Put,
    Route::Dynamic(role_permissions_path),
    &[perms::ROLE_UPDATE, perms::PERMISSION_READ],
);

// Pages and sections

/// List pages
pub static PAGES_LIST: EndpointDescriptor =
    EndpointDescriptor::new("pages.list", Method::Get, Route::Static("/admin/pages"), &[perms::PAGE_READ]);
/// Read page metadata and fields
pub static PAGE_GET: EndpointDescriptor =
    EndpointDescriptor::new("pages.get", Method::Get, Route::Dynamic(admin_page_path), &[perms::PAGE_READ]);
/// Create page
pub static PAGE_CREATE: EndpointDescriptor = EndpointDescriptor::new(
    "pages.create",
    Method::Post,
    Route::Static("/admin/pages"),
    &[perms::PAGE_CREATE],
);
/// Update page fields
pub static PAGE_UPDATE: EndpointDescriptor = EndpointDescriptor::new(
    "pages.update",
    Method::Put,
    Route::Dynamic(admin_page_path),
    &[perms::PAGE_UPDATE],
);
/// Delete page
pub static PAGE_DELETE: EndpointDescriptor = EndpointDescriptor::new(
    "pages.delete",
    Method::Delete,
    Route::Dynamic(admin_page_path),
    &[perms::PAGE_DELETE],
);
/// Section tree of a page, for editing
pub static PAGE_SECTIONS: EndpointDescriptor = EndpointDescriptor::new(
    "pages.sections",
    Method::Get,
    Route::Dynamic(page_sections_path),
    &[perms::PAGE_READ, perms::SECTION_READ],
);
/// Read one section with its field translations
pub static SECTION_GET: EndpointDescriptor = EndpointDescriptor::new(
    "sections.get",
    Method::Get,
    Route::Dynamic(section_path),
    &[perms::SECTION_READ],
);
/// Save section fields
pub static SECTION_UPDATE: EndpointDescriptor = EndpointDescriptor::new(
    "sections.update",
    Method::Put,
    Route::Dynamic(section_path),
    &[perms::SECTION_UPDATE],
);
/// Delete section
pub static SECTION_DELETE: EndpointDescriptor = EndpointDescriptor::new(
    "sections.delete",
    Method::Delete,
    Route::Dynamic(section_path),
    &[perms::SECTION_DELETE],
);

// Languages, assets, audit

/// Languages available to visitors
pub static LANGUAGES_PUBLIC: EndpointDescriptor =
    EndpointDescriptor::new("languages.public", Method::Get, Route::Static("/languages"), &[]);
/// Languages with admin metadata
pub static LANGUAGES_LIST: EndpointDescriptor = EndpointDescriptor::new(
    "languages.list",
    Method::Get,
    Route::Static("/admin/languages"),
    &[perms::LANGUAGE_READ],
);
/// List uploaded assets
pub static ASSETS_LIST: EndpointDescriptor = EndpointDescriptor::new(
    "assets.list",
    Method::Get,
    Route::Static("/admin/assets"),
    &[perms::ASSET_READ],
);
/// Delete asset
pub static ASSET_DELETE: EndpointDescriptor = EndpointDescriptor::new(
    "assets.delete",
    Method::Delete,
    Route::Dynamic(asset_path),
    &[perms::ASSET_DELETE],
);
/// Browse audit log entries
pub static AUDIT_LOGS_LIST: EndpointDescriptor = EndpointDescriptor::new(
    "audit.list",
    Method::Get,
    Route::Static("/admin/audit/data-access"),
    &[perms::AUDIT_VIEW],
);
/// Read one audit log entry
pub static AUDIT_LOG_GET: EndpointDescriptor = EndpointDescriptor::new(
    "audit.get",
    Method::Get,
    Route::Dynamic(audit_log_path),
    &[perms::AUDIT_VIEW],
);

// Frontend content

/// Rendered style tree of a page
pub static PAGE_CONTENT: EndpointDescriptor = EndpointDescriptor::new(
    "pages.content",
    Method::Get,
    Route::Dynamic(page_content_path),
    &[],
);

/// Every declared endpoint
pub static ALL: &[&EndpointDescriptor] = &[
    &LOGIN,
    &LOGOUT,
    &REFRESH_TOKEN,
    &PROFILE,
    &USERS_LIST,
    &USER_GET,
    &USER_CREATE,
    &USER_UPDATE,
    &USER_DELETE,
    &ROLES_LIST,
    &ROLE_PERMISSIONS_UPDATE,
    &PAGES_LIST,
    &PAGE_GET,
    &PAGE_CREATE,
    &PAGE_UPDATE,
    &PAGE_DELETE,
    &PAGE_SECTIONS,
    &SECTION_GET,
    &SECTION_UPDATE,
    &SECTION_DELETE,
    &LANGUAGES_PUBLIC,
    &LANGUAGES_LIST,
    &ASSETS_LIST,
    &ASSET_DELETE,
    &AUDIT_LOGS_LIST,
    &AUDIT_LOG_GET,
    &PAGE_CONTENT,
];

/// Look up endpoint by name
#[must_use]
pub fn find(name: &str) -> Option<&'static EndpointDescriptor> {
    ALL.iter().copied().find(|d| d.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn names_are_unique() {
        let names: HashSet<&str> = ALL.iter().map(|d| d.name).collect();
        assert_eq!(names.len(), ALL.len());
    }

    #[test]
    fn find_by_name() {
        let d = find("users.list").unwrap();
        assert_eq!(d.permissions, &[perms::USER_READ]);
        assert!(find("users.nope").is_none());
    }

    #[test]
    fn auth_endpoints_are_public() {
        for d in [&LOGIN, &LOGOUT, &REFRESH_TOKEN, &PROFILE] {
            assert!(d.is_public(), "{} should be public", d.name);
        }
    }

    #[test]
    fn admin_endpoints_require_permissions() {
        for d in ALL.iter().filter(|d| d.name.starts_with("users.") || d.name.starts_with("audit.")) {
            assert!(!d.is_public(), "{} should be gated", d.name);
        }
    }

    #[test]
    fn page_content_path_with_language() {
        let args = RouteArgs::new().with("page_keyword", "home").with("language_id", 2);
        assert_eq!(PAGE_CONTENT.path(&args).unwrap(), "/pages/home?language_id=2");
        let args = RouteArgs::new().with("page_keyword", "home");
        assert_eq!(PAGE_CONTENT.path(&args).unwrap(), "/pages/home");
    }

    #[test]
    fn page_keyword_cannot_leave_pages() {
        let args = RouteArgs::new()
            .with("page_keyword", "../admin/users/7?x=1")
            .with("language_id", "2&role=admin");
        assert_eq!(
            PAGE_CONTENT.path(&args).unwrap(),
            "/pages/..%2Fadmin%2Fusers%2F7%3Fx%3D1?language_id=2%26role%3Dadmin"
        );
    }
}

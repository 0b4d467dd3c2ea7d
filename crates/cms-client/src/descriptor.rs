//! Endpoint descriptors
//!
//! Every API operation is declared once as a static [`EndpointDescriptor`]
//! naming its route and the permissions it requires.

use crate::error::RouteError;
use std::borrow::Cow;
use std::fmt;

/// HTTP method of an endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// GET
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// PATCH
    Patch,
    /// DELETE
    Delete,
}

impl Method {
    /// Upper-case method name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named arguments for dynamic routes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteArgs {
    values: Vec<(&'static str, String)>,
}

impl RouteArgs {
    /// Create empty argument list
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With argument, replacing any earlier value for `name`
    #[must_use]
    pub fn with(mut self, name: &'static str, value: impl ToString) -> Self {
        self.values.retain(|(n, _)| *n != name);
        self.values.push((name, value.to_string()));
        self
    }

    /// Look up argument
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Builds a path from route arguments
pub type RouteFn = fn(&'static str, &RouteArgs) -> Result<String, RouteError>;

/// Route of an endpoint
#[derive(Clone, Copy)]
pub enum Route {
    /// Fixed path
    Static(&'static str),

    /// Path computed from arguments
    Dynamic(RouteFn),
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(path) => f.debug_tuple("Static").field(path).finish(),
            Self::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}

/// Static declaration of one API operation
#[derive(Debug, Clone, Copy)]
pub struct EndpointDescriptor {
    /// Stable operation name, e.g. `users.list`
    pub name: &'static str,
    /// HTTP method
    pub method: Method,
    /// Path relative to the API base URL
    pub route: Route,
    /// Permissions the caller must hold; empty for public endpoints
    pub permissions: &'static [&'static str],
}

impl EndpointDescriptor {
    /// Declare endpoint
    #[must_use]
    pub const fn new(
        name: &'static str,
        method: Method,
        route: Route,
        permissions: &'static [&'static str],
    ) -> Self {
        Self {
            name,
            method,
            route,
            permissions,
        }
    }

    /// Check if endpoint requires no permissions
    #[inline]
    #[must_use]
    pub fn is_public(&self) -> bool {
        self.permissions.is_empty()
    }

    /// Resolve path from arguments
    ///
    /// # Errors
    /// Returns [`RouteError::MissingArgument`] when a dynamic route lacks an argument
    pub fn path(&self, args: &RouteArgs) -> Result<String, RouteError> {
        match self.route {
            Route::Static(path) => Ok(path.to_string()),
            Route::Dynamic(build) => build(self.name, args),
        }
    }
}

/// Fetch a required route argument, percent-encoded as one path segment
///
/// # Errors
/// - [`RouteError::MissingArgument`] when `argument` is absent
/// - [`RouteError::InvalidArgument`] when the value is empty, `.` or `..`
pub fn require_arg<'a>(
    args: &'a RouteArgs,
    endpoint: &'static str,
    argument: &'static str,
) -> Result<Cow<'a, str>, RouteError> {
    let value = args
        .get(argument)
        .ok_or(RouteError::MissingArgument { endpoint, argument })?;
    if matches!(value, "" | "." | "..") {
        return Err(RouteError::InvalidArgument { endpoint, argument });
    }
    Ok(urlencoding::encode(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_route(endpoint: &'static str, args: &RouteArgs) -> Result<String, RouteError> {
        Ok(format!("/admin/users/{}", require_arg(args, endpoint, "user_id")?))
    }

    static USER: EndpointDescriptor = EndpointDescriptor::new(
        "users.get",
        Method::Get,
        Route::Dynamic(user_route),
        &["admin.user.read"],
    );

    #[test]
    fn static_route_ignores_args() {
        let d = EndpointDescriptor::new("auth.login", Method::Post, Route::Static("/auth/login"), &[]);
        assert!(d.is_public());
        assert_eq!(d.path(&RouteArgs::new().with("x", 1)).unwrap(), "/auth/login");
    }

    #[test]
    fn dynamic_route_uses_args() {
        let args = RouteArgs::new().with("user_id", 42);
        assert_eq!(USER.path(&args).unwrap(), "/admin/users/42");
    }

    #[test]
    fn dynamic_route_reports_missing_arg() {
        let err = USER.path(&RouteArgs::new()).unwrap_err();
        assert_eq!(
            err,
            RouteError::MissingArgument {
                endpoint: "users.get",
                argument: "user_id"
            }
        );
    }

    #[test]
    fn argument_is_one_encoded_segment() {
        let args = RouteArgs::new().with("user_id", "7/roles?x=1");
        assert_eq!(USER.path(&args).unwrap(), "/admin/users/7%2Froles%3Fx%3D1");
    }

    #[test]
    fn dot_segments_rejected() {
        for value in ["", ".", ".."] {
            let err = USER.path(&RouteArgs::new().with("user_id", value)).unwrap_err();
            assert_eq!(
                err,
                RouteError::InvalidArgument {
                    endpoint: "users.get",
                    argument: "user_id"
                }
            );
        }
    }

    #[test]
    fn later_argument_wins() {
        let args = RouteArgs::new().with("user_id", 1).with("user_id", 2);
        assert_eq!(args.get("user_id"), Some("2"));
    }

    #[test]
    fn route_debug_hides_fn_pointer() {
        assert_eq!(format!("{:?}", USER.route), "Dynamic(..)");
    }
}

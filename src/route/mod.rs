//! # Route Module
//!
//! The [`Route`] value object and the rules every route obeys regardless of which
//! matcher eventually serves it.
//!
//! ## Overview
//!
//! A route binds a path template and a callback to a set of HTTP methods, under a
//! name that is unique within one collector. Optional host, port and scheme
//! constraints refine matching beyond the path; [`Route::matches_conditions`]
//! evaluates them against any [`RouteRequest`].
//!
//! ## Method Validation
//!
//! Method lists are checked once at construction:
//!
//! - `None` accepts every method ([`AllowedMethods::Any`])
//! - an empty list is rejected
//! - every entry must be an HTTP token (`[!#$%&'*+.^_`|~0-9A-Za-z-]+`)
//! - valid entries are uppercased, duplicates are preserved
//!
//! ## Naming
//!
//! Unless named explicitly, a route is named after its path (`/users`) or its path
//! and methods (`/users:GET:HEAD`).

mod core;
mod methods;
mod request;

pub use self::core::{GroupRef, Route, RouteCallback};
pub use methods::{AllowedMethods, MethodVec, HTTP_METHOD_SEPARATOR, MAX_INLINE_METHODS};
pub use request::RouteRequest;

/// Prefix `path` with `prefix`, keeping exactly one separator between them.
///
/// A root path (`/`) yields the prefix itself, so `/admin` + `/` is `/admin`, not
/// `/admin/`.
///
/// ```rust
/// use brrtroutes::route::join_path;
///
/// assert_eq!(join_path("/admin", "/users"), "/admin/users");
/// assert_eq!(join_path("/admin", "users"), "/admin/users");
/// assert_eq!(join_path("/admin", "/"), "/admin");
/// assert_eq!(join_path("", "/users"), "/users");
/// ```
#[must_use]
pub fn join_path(prefix: &str, path: &str) -> String {
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        return path.to_string();
    }
    if path == "/" {
        return prefix.to_string();
    }
    format!("{}/{}", prefix, path.trim_start_matches('/'))
}

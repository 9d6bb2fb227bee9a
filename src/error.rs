//! Error types for route registration and request-time middleware resolution.
//!
//! Build-time failures ([`RouteError`]) are fatal to the single declaration that
//! caused them and propagate synchronously to the caller of the registration
//! method. Nothing is retried or swallowed: a rejected route is never added to the
//! registry, so the registry stays consistent after any error.
//!
//! Request-time failures ([`DispatchError`]) only arise when a middleware
//! identifier cannot be resolved or a handler reports an error. A path that does
//! not match a conditional prefix is not an error.

use thiserror::Error;

/// Why an HTTP method list was rejected at [`Route`](crate::route::Route) construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidMethods {
    /// The list was present but contained no methods
    #[error("HTTP methods argument was empty; must contain at least one method")]
    Empty,
    /// One entry does not match the HTTP token grammar
    #[error("HTTP method '{0}' is not a valid token")]
    InvalidToken(String),
}

/// Build-time registration error
#[derive(Debug, Error)]
pub enum RouteError {
    /// Malformed or empty HTTP method list
    #[error("invalid route declaration: {0}")]
    InvalidArgument(#[from] InvalidMethods),

    /// The path and methods collide with a route registered earlier
    #[error("duplicate route detected: path '{path}' with overlapping methods is already registered as '{existing}'")]
    DuplicateRoute {
        /// Path shared by both routes
        path: String,
        /// Name of the route that was registered first
        existing: String,
    },

    /// Another route already owns this name in the registry
    #[error("duplicate route name '{name}'")]
    DuplicateName {
        /// The contested name
        name: String,
    },

    /// The external matcher refused the route
    #[error("matcher rejected route '{path}': {source}")]
    Matcher {
        /// Path of the rejected route
        path: String,
        /// Error raised by the matcher
        #[source]
        source: anyhow::Error,
    },
}

/// Request-time pipeline error
#[derive(Debug, Error)]
pub enum DispatchError {
    /// A string middleware identifier has no registered unit
    #[error("middleware '{id}' could not be resolved")]
    UnresolvedMiddleware {
        /// Identifier that was looked up
        id: String,
    },

    /// A handler or middleware unit failed
    #[error(transparent)]
    Handler(#[from] anyhow::Error),
}

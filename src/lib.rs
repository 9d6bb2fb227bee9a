//! # brrtroutes
//!
//! **brrtroutes** is the route-registration and middleware-composition layer of an HTTP
//! routing framework. It lets an application declare routes with HTTP verb helpers,
//! organize them into prefixed groups, attach middleware to routes and groups, and
//! register everything with an external path matcher.
//!
//! ## Overview
//!
//! The crate sits between application code declaring routes and the matcher that
//! turns path templates into something matchable. It does not match paths itself.
//! What it guarantees is that everything reaching the matcher is consistent:
//!
//! - method lists are validated and normalized to uppercase,
//! - group prefixes are joined without doubled or trailing slashes,
//! - no two routes share a path with overlapping methods (when detection is on),
//! - every route has a unique name, explicit or derived from path and methods.
//!
//! At request time, the middleware stacks attached to routes and groups are drained
//! by a [`Pipeline`](middleware::Pipeline), resolving string identifiers lazily
//! through a [`MiddlewareResolver`](middleware::MiddlewareResolver).
//!
//! ## Architecture
//!
//! - **[`route`]** - The route record: path, callback, methods, name, conditions
//! - **[`collector`]** - The registry and the declaration helpers shared with groups
//! - **[`group`]** - Prefix scopes that rewrite routes before registering them
//! - **[`duplicate`]** - Path/method conflict detection
//! - **[`middleware`]** - Middleware stacks, resolvers, conditional prefix middleware
//!   and the request-time pipeline
//! - **[`runtime_config`]** - Collector configuration from environment or YAML
//! - **[`logging`]** - `tracing` subscriber setup for embedding binaries
//!
//! ### Registration Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant App
//!     participant Group as RouteGroup
//!     participant Collector as RouteCollector
//!     participant Detector as DuplicateRouteDetector
//!     participant Matcher as RouteMatcher
//!
//!     App->>Collector: group("/admin", builder)
//!     Collector->>Group: builder(&mut group)
//!     App->>Group: get("/users", "UserController::index")
//!     Group->>Group: join_path("/admin", "/users"), attach group
//!     Group->>Collector: add_route(route)
//!     Collector->>Detector: detect_duplicate(&route)
//!     Detector-->>Collector: Ok
//!     Collector->>Matcher: add_route(route)
//!     Matcher-->>Collector: route
//!     Collector->>Collector: index under "/admin/users:GET"
//!     Collector-->>Group: &mut Route
//!     Collector-->>App: &mut GroupEntry
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use brrtroutes::collector::{RouteCollection, RouteCollector, RouteMatcher};
//! use brrtroutes::middleware::MiddlewareAware;
//! use brrtroutes::route::Route;
//!
//! struct Accept;
//! impl RouteMatcher for Accept {
//!     fn add_route(&mut self, route: Route) -> anyhow::Result<Route> {
//!         Ok(route)
//!     }
//! }
//!
//! # fn main() -> Result<(), brrtroutes::RouteError> {
//! let mut routes = RouteCollector::new(Accept);
//! routes.get("/", "HomeController::index", Some("home"))?;
//! routes
//!     .group("/admin", |admin| {
//!         admin.get("/users", "UserController::index", Some("admin.users"))?;
//!         Ok(())
//!     })?
//!     .middleware("auth");
//! routes.crud("/admin/posts", "PostController", "admin.posts")?;
//!
//! assert_eq!(routes.get_route_name("admin.users").unwrap().path(), "/admin/users");
//! assert_eq!(
//!     routes.get_route_name("admin.posts.edit").unwrap().path(),
//!     r"/admin/posts/{id:\d+}"
//! );
//! assert_eq!(routes.middleware_stack_for("admin.users").unwrap().len(), 1);
//! # Ok(())
//! # }
//! ```
//!
//! ## Configuration
//!
//! ```bash
//! # Disable duplicate detection
//! export BRRTR_DETECT_DUPLICATES=false
//!
//! # Logging (RUST_LOG overrides the level)
//! export BRRTR_LOG_LEVEL=debug
//! export BRRTR_LOG_FORMAT=pretty
//! ```

pub mod collector;
pub mod duplicate;
pub mod error;
pub mod group;
pub mod ids;
pub mod logging;
pub mod middleware;
pub mod route;
pub mod runtime_config;

pub use collector::{RouteCollection, RouteCollector, RouteMatcher, RouteRegistrar};
pub use error::{DispatchError, InvalidMethods, RouteError};
pub use group::{GroupEntry, RouteGroup};
pub use route::{Route, RouteCallback};

//! # Collector Module
//!
//! The route registry. [`RouteCollector`] is the single place routes end up:
//! declaration helpers on [`RouteCollection`] build a [`Route`](crate::route::Route),
//! groups rewrite it, and the collector validates it, hands it to the external
//! [`RouteMatcher`], and indexes the result by name.
//!
//! ## Registration Flow
//!
//! ```text
//! get/post/.../route(path, callback, name, methods)
//!     → Route::new (methods validated, uppercased)
//!     → RouteGroup::add_route (prefix joined, when declared in a group)
//!     → RouteCollector::add_route
//!         → DuplicateRouteDetector::detect_duplicate (when enabled)
//!         → name uniqueness check
//!         → RouteMatcher::add_route
//!         → stored under its name (default name frozen here)
//! ```
//!
//! The collector is built up-front and is not meant to be mutated while
//! requests are being served.

mod collection;
mod core;
mod matcher;

pub use self::collection::{RouteCollection, RouteRegistrar};
pub use self::core::RouteCollector;
pub use self::matcher::RouteMatcher;

//! # Group Module
//!
//! Route groups: a shared path prefix and middleware stack over a batch of
//! routes declared together.
//!
//! ## Lifecycle
//!
//! ```text
//! collection.group("/admin", builder)
//!     → RouteGroup opened under the collection (prefix composed with any
//!       enclosing group)
//!     → builder(&mut group) runs once, synchronously
//!         → group.get("/users", ..) → path "/admin/users", parent group
//!           recorded → parent.add_route
//!     → group stored as a GroupEntry with the collector
//!     → &mut GroupEntry returned for middleware configuration
//! ```
//!
//! A root route (`/`) inside a group resolves to the prefix itself, never to
//! `prefix/`.

mod core;
#[cfg(test)]
mod tests;

pub use self::core::{GroupEntry, RouteGroup, CRUD_ID_SEGMENT};

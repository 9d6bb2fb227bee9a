//! # Middleware Module
//!
//! Ordered middleware stacks, prefix-gated units, identifier resolution and the
//! request-time pipeline that drains a stack.
//!
//! ## Overview
//!
//! - [`MiddlewareStack`] - ordered entries with append/prepend/shift, owned by
//!   every route and group
//! - [`MiddlewareAware`] - the stack operations exposed on routes and groups
//! - [`ConditionalPrefixMiddleware`] - runs a resolved unit only under a path prefix
//! - [`MiddlewareResolver`] - identifier lookup ([`MiddlewareRegistry`],
//!   [`CachingResolver`])
//! - [`Pipeline`] - per-request driver that copies a stack and runs it to the
//!   final handler
//!
//! ## Request Flow
//!
//! ```text
//! Pipeline::handle(request)
//!     → copy template stack
//!     → shift entry → resolve identifier → unit.process(request, next)
//!         → next.handle(request) → shift entry → ...
//!     → stack exhausted → final handler
//! ```

mod handler;
mod pipeline;
mod prefix;
mod resolver;
mod stack;

pub use handler::{
    handler_fn, middleware_fn, HandlerFn, HttpRequest, HttpResponse, Middleware, MiddlewareFn,
    RequestHandler,
};
pub use pipeline::Pipeline;
pub use prefix::ConditionalPrefixMiddleware;
pub use resolver::{CachingResolver, MiddlewareRegistry, MiddlewareResolver};
pub use stack::{MiddlewareAware, MiddlewareEntry, MiddlewareStack};

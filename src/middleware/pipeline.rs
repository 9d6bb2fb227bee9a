use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use super::{HttpRequest, HttpResponse, MiddlewareResolver, MiddlewareStack, RequestHandler};
use crate::error::DispatchError;

/// Request-time driver for a middleware stack.
///
/// The declared stack is a template. Each call to [`handle`](RequestHandler::handle)
/// copies it into a private cursor and drains that copy one unit at a time with
/// [`MiddlewareStack::shift`], so concurrent requests never share a cursor. When
/// the copy is exhausted the final handler runs.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use brrtroutes::middleware::{
///     handler_fn, middleware_fn, MiddlewareRegistry, MiddlewareStack, Pipeline, RequestHandler,
/// };
/// use bytes::Bytes;
///
/// let mut registry = MiddlewareRegistry::new();
/// registry.register("tag", middleware_fn(|req, next| {
///     let mut res = next.handle(req)?;
///     res.headers_mut().insert("x-tag", http::HeaderValue::from_static("1"));
///     Ok(res)
/// }));
///
/// let mut stack = MiddlewareStack::new();
/// stack.push("tag");
///
/// let pipeline = Pipeline::new(
///     stack,
///     Arc::new(registry),
///     Arc::new(handler_fn(|_req| Ok(http::Response::new(Bytes::new())))),
/// );
/// let res = pipeline.handle(http::Request::new(Bytes::new())).unwrap();
/// assert_eq!(res.headers()["x-tag"], "1");
/// ```
pub struct Pipeline {
    template: MiddlewareStack,
    resolver: Arc<dyn MiddlewareResolver>,
    handler: Arc<dyn RequestHandler>,
}

impl Pipeline {
    #[must_use]
    pub fn new(
        template: MiddlewareStack,
        resolver: Arc<dyn MiddlewareResolver>,
        handler: Arc<dyn RequestHandler>,
    ) -> Self {
        Self {
            template,
            resolver,
            handler,
        }
    }

    /// The stack every request starts from
    #[must_use]
    pub fn template(&self) -> &MiddlewareStack {
        &self.template
    }
}

impl RequestHandler for Pipeline {
    fn handle(&self, request: HttpRequest) -> Result<HttpResponse, DispatchError> {
        let cursor = Cursor {
            remaining: Mutex::new(self.template.clone()),
            resolver: self.resolver.as_ref(),
            handler: self.handler.as_ref(),
        };
        cursor.handle(request)
    }
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("template", &self.template)
            .finish_non_exhaustive()
    }
}

/// Per-request view over the remaining entries
struct Cursor<'p> {
    remaining: Mutex<MiddlewareStack>,
    resolver: &'p dyn MiddlewareResolver,
    handler: &'p dyn RequestHandler,
}

impl RequestHandler for Cursor<'_> {
    fn handle(&self, request: HttpRequest) -> Result<HttpResponse, DispatchError> {
        // the lock is released before the unit runs; units re-enter through `self`
        let next = self.remaining.lock().shift(self.resolver)?;
        match next {
            Some(unit) => {
                debug!(path = %request.uri().path(), "Running middleware unit");
                unit.process(request, self)
            }
            None => self.handler.handle(request),
        }
    }
}

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use super::{HttpRequest, HttpResponse, Middleware, MiddlewareResolver, RequestHandler};
use crate::error::DispatchError;

/// Activates a resolved middleware only for requests under a path prefix.
///
/// When the request path starts with `prefix` (ASCII case-insensitive), the
/// identifier is resolved and the request is delegated to that unit. Any other
/// path goes straight to `next`, so the unit is transparent outside its prefix.
///
/// Nothing is retained between calls: every matching request resolves the
/// identifier again. Wrap the resolver in a
/// [`CachingResolver`](super::CachingResolver) when that lookup is expensive.
pub struct ConditionalPrefixMiddleware {
    resolver: Arc<dyn MiddlewareResolver>,
    prefix: String,
    middleware: String,
}

impl ConditionalPrefixMiddleware {
    #[must_use]
    pub fn new(
        resolver: Arc<dyn MiddlewareResolver>,
        prefix: impl Into<String>,
        middleware: impl Into<String>,
    ) -> Self {
        Self {
            resolver,
            prefix: prefix.into(),
            middleware: middleware.into(),
        }
    }

    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Identifier of the wrapped unit
    #[must_use]
    pub fn middleware_id(&self) -> &str {
        &self.middleware
    }

    /// Whether `path` falls under this unit's prefix
    #[must_use]
    pub fn applies_to(&self, path: &str) -> bool {
        starts_with_ignore_ascii_case(path, &self.prefix)
    }
}

impl Middleware for ConditionalPrefixMiddleware {
    fn process(
        &self,
        request: HttpRequest,
        next: &dyn RequestHandler,
    ) -> Result<HttpResponse, DispatchError> {
        if self.applies_to(request.uri().path()) {
            debug!(
                prefix = %self.prefix,
                middleware = %self.middleware,
                path = %request.uri().path(),
                "Prefix matched, delegating"
            );
            return self.resolver.get(&self.middleware)?.process(request, next);
        }
        next.handle(request)
    }
}

impl fmt::Debug for ConditionalPrefixMiddleware {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConditionalPrefixMiddleware")
            .field("prefix", &self.prefix)
            .field("middleware", &self.middleware)
            .finish_non_exhaustive()
    }
}

/// Byte-wise prefix test after ASCII case folding
fn starts_with_ignore_ascii_case(haystack: &str, prefix: &str) -> bool {
    let (haystack, prefix) = (haystack.as_bytes(), prefix.as_bytes());
    haystack.len() >= prefix.len() && haystack[..prefix.len()].eq_ignore_ascii_case(prefix)
}

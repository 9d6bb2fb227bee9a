use std::sync::Arc;

use bytes::Bytes;

use crate::error::DispatchError;

/// Request representation the pipeline operates on
pub type HttpRequest = http::Request<Bytes>;

/// Response representation the pipeline produces
pub type HttpResponse = http::Response<Bytes>;

/// A unit that turns a request into a response.
///
/// This is the "next" side of a middleware call: the remainder of the pipeline
/// after the current unit, or the route's final handler.
pub trait RequestHandler: Send + Sync {
    fn handle(&self, request: HttpRequest) -> Result<HttpResponse, DispatchError>;
}

/// A request-processing unit in a middleware stack.
///
/// A middleware either produces a response itself or delegates to `next`,
/// optionally inspecting or replacing the request first.
pub trait Middleware: Send + Sync {
    fn process(
        &self,
        request: HttpRequest,
        next: &dyn RequestHandler,
    ) -> Result<HttpResponse, DispatchError>;
}

impl<T: RequestHandler + ?Sized> RequestHandler for Arc<T> {
    fn handle(&self, request: HttpRequest) -> Result<HttpResponse, DispatchError> {
        (**self).handle(request)
    }
}

impl<T: Middleware + ?Sized> Middleware for Arc<T> {
    fn process(
        &self,
        request: HttpRequest,
        next: &dyn RequestHandler,
    ) -> Result<HttpResponse, DispatchError> {
        (**self).process(request, next)
    }
}

/// Closure adapter returned by [`handler_fn`]
pub struct HandlerFn<F> {
    f: F,
}

impl<F> RequestHandler for HandlerFn<F>
where
    F: Fn(HttpRequest) -> Result<HttpResponse, DispatchError> + Send + Sync,
{
    fn handle(&self, request: HttpRequest) -> Result<HttpResponse, DispatchError> {
        (self.f)(request)
    }
}

/// Wrap a closure as a [`RequestHandler`]
///
/// # Example
///
/// ```rust
/// use brrtroutes::middleware::{handler_fn, RequestHandler};
/// use bytes::Bytes;
///
/// let ok = handler_fn(|_req| Ok(http::Response::new(Bytes::from_static(b"ok"))));
/// let res = ok.handle(http::Request::new(Bytes::new())).unwrap();
/// assert_eq!(res.body().as_ref(), b"ok");
/// ```
#[must_use]
pub fn handler_fn<F>(f: F) -> HandlerFn<F>
where
    F: Fn(HttpRequest) -> Result<HttpResponse, DispatchError> + Send + Sync,
{
    HandlerFn { f }
}

/// Closure adapter returned by [`middleware_fn`]
pub struct MiddlewareFn<F> {
    f: F,
}

impl<F> Middleware for MiddlewareFn<F>
where
    F: Fn(HttpRequest, &dyn RequestHandler) -> Result<HttpResponse, DispatchError> + Send + Sync,
{
    fn process(
        &self,
        request: HttpRequest,
        next: &dyn RequestHandler,
    ) -> Result<HttpResponse, DispatchError> {
        (self.f)(request, next)
    }
}

/// Wrap a closure as a [`Middleware`]
#[must_use]
pub fn middleware_fn<F>(f: F) -> MiddlewareFn<F>
where
    F: Fn(HttpRequest, &dyn RequestHandler) -> Result<HttpResponse, DispatchError> + Send + Sync,
{
    MiddlewareFn { f }
}

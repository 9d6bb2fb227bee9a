use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

use super::{ConditionalPrefixMiddleware, Middleware, MiddlewareResolver};
use crate::error::DispatchError;

/// One entry of a middleware stack
///
/// Entries are either an identifier resolved lazily through a
/// [`MiddlewareResolver`] or a unit that is ready to run.
#[derive(Clone)]
pub enum MiddlewareEntry {
    /// Name looked up when the entry is shifted
    Identifier(Arc<str>),
    /// Already constructed unit
    Unit(Arc<dyn Middleware>),
}

impl MiddlewareEntry {
    /// Wrap a concrete unit
    #[must_use]
    pub fn unit<M: Middleware + 'static>(unit: M) -> Self {
        MiddlewareEntry::Unit(Arc::new(unit))
    }

    /// Identifier of the entry, if it has not been resolved yet
    #[must_use]
    pub fn identifier(&self) -> Option<&str> {
        match self {
            MiddlewareEntry::Identifier(id) => Some(id.as_ref()),
            MiddlewareEntry::Unit(_) => None,
        }
    }

    /// Turn the entry into a runnable unit
    pub fn resolve(self, resolver: &dyn MiddlewareResolver) -> Result<Arc<dyn Middleware>, DispatchError> {
        match self {
            MiddlewareEntry::Identifier(id) => resolver.get(&id),
            MiddlewareEntry::Unit(unit) => Ok(unit),
        }
    }
}

impl fmt::Debug for MiddlewareEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MiddlewareEntry::Identifier(id) => f.debug_tuple("Identifier").field(id).finish(),
            MiddlewareEntry::Unit(_) => f.write_str("Unit(..)"),
        }
    }
}

impl From<&str> for MiddlewareEntry {
    fn from(id: &str) -> Self {
        MiddlewareEntry::Identifier(Arc::from(id))
    }
}

impl From<String> for MiddlewareEntry {
    fn from(id: String) -> Self {
        MiddlewareEntry::Identifier(Arc::from(id))
    }
}

impl From<Arc<dyn Middleware>> for MiddlewareEntry {
    fn from(unit: Arc<dyn Middleware>) -> Self {
        MiddlewareEntry::Unit(unit)
    }
}

/// Ordered sequence of middleware entries with a consuming front cursor.
///
/// Routes and groups each own one of these. Iteration through
/// [`entries`](Self::entries) never consumes; only [`shift`](Self::shift) does.
///
/// A stack that is drained per request must not be shared between in-flight
/// requests. Treat a declared stack as a template and clone it per request (this
/// is what [`Pipeline`](super::Pipeline) does); entries are reference counted, so
/// the copy is shallow.
#[derive(Clone, Default, Debug)]
pub struct MiddlewareStack {
    entries: VecDeque<MiddlewareEntry>,
}

impl MiddlewareStack {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one entry at the end
    pub fn push(&mut self, entry: impl Into<MiddlewareEntry>) -> &mut Self {
        self.entries.push_back(entry.into());
        self
    }

    /// Append each entry in order
    pub fn extend<I>(&mut self, entries: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<MiddlewareEntry>,
    {
        self.entries.extend(entries.into_iter().map(Into::into));
        self
    }

    /// Insert one entry at the front
    pub fn prepend(&mut self, entry: impl Into<MiddlewareEntry>) -> &mut Self {
        self.entries.push_front(entry.into());
        self
    }

    /// Append a prefix-gated entry.
    ///
    /// With `middleware` set, appends a [`ConditionalPrefixMiddleware`] that runs
    /// the unit resolved for `middleware` only under `prefix`. Without it, `prefix`
    /// itself is appended as a plain identifier.
    pub fn lazy_pipe(
        &mut self,
        prefix: &str,
        resolver: Arc<dyn MiddlewareResolver>,
        middleware: Option<&str>,
    ) -> &mut Self {
        let entry = match middleware {
            Some(id) => MiddlewareEntry::unit(ConditionalPrefixMiddleware::new(resolver, prefix, id)),
            None => MiddlewareEntry::from(prefix),
        };
        self.entries.push_back(entry);
        self
    }

    /// Pop the front entry and resolve it.
    ///
    /// Returns `Ok(None)` once the stack is exhausted; later calls keep returning
    /// `Ok(None)`. An identifier that cannot be resolved is still removed.
    pub fn shift(
        &mut self,
        resolver: &dyn MiddlewareResolver,
    ) -> Result<Option<Arc<dyn Middleware>>, DispatchError> {
        match self.entries.pop_front() {
            Some(entry) => entry.resolve(resolver).map(Some),
            None => Ok(None),
        }
    }

    /// Remaining entries in insertion order, without consuming them
    pub fn entries(&self) -> impl Iterator<Item = &MiddlewareEntry> + '_ {
        self.entries.iter()
    }

    /// Front entry without removing it
    #[must_use]
    pub fn peek(&self) -> Option<&MiddlewareEntry> {
        self.entries.front()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append a copy of every entry of `other`
    pub fn append_stack(&mut self, other: &MiddlewareStack) -> &mut Self {
        self.entries.extend(other.entries.iter().cloned());
        self
    }
}

/// Middleware stack capability shared by routes and groups.
///
/// Implementors only expose their owned [`MiddlewareStack`]; every operation is
/// provided here and returns `&mut Self` for chaining.
///
/// # Example
///
/// ```rust
/// use brrtroutes::middleware::MiddlewareAware;
/// use brrtroutes::route::Route;
///
/// let mut route = Route::new("/users", "UserController::index", None, Some(&["GET"])).unwrap();
/// route.middleware("auth").middleware("csrf").prepend_middleware("request_id");
/// let ids: Vec<_> = route
///     .get_middleware_stack()
///     .filter_map(|e| e.identifier())
///     .collect();
/// assert_eq!(ids, ["request_id", "auth", "csrf"]);
/// ```
pub trait MiddlewareAware {
    fn middleware_stack(&self) -> &MiddlewareStack;

    fn middleware_stack_mut(&mut self) -> &mut MiddlewareStack;

    fn middleware(&mut self, entry: impl Into<MiddlewareEntry>) -> &mut Self
    where
        Self: Sized,
    {
        self.middleware_stack_mut().push(entry);
        self
    }

    fn middlewares<I>(&mut self, entries: I) -> &mut Self
    where
        Self: Sized,
        I: IntoIterator,
        I::Item: Into<MiddlewareEntry>,
    {
        self.middleware_stack_mut().extend(entries);
        self
    }

    fn prepend_middleware(&mut self, entry: impl Into<MiddlewareEntry>) -> &mut Self
    where
        Self: Sized,
    {
        self.middleware_stack_mut().prepend(entry);
        self
    }

    fn lazy_pipe(
        &mut self,
        prefix: &str,
        resolver: Arc<dyn MiddlewareResolver>,
        middleware: Option<&str>,
    ) -> &mut Self
    where
        Self: Sized,
    {
        self.middleware_stack_mut().lazy_pipe(prefix, resolver, middleware);
        self
    }

    fn shift_middleware(
        &mut self,
        resolver: &dyn MiddlewareResolver,
    ) -> Result<Option<Arc<dyn Middleware>>, DispatchError> {
        self.middleware_stack_mut().shift(resolver)
    }

    fn get_middleware_stack(&self) -> std::collections::vec_deque::Iter<'_, MiddlewareEntry> {
        self.middleware_stack().entries.iter()
    }
}

use std::collections::HashMap;
use std::sync::Arc;

use dashmap::DashMap;
use tracing::{debug, warn};

use super::Middleware;
use crate::error::DispatchError;

/// Dependency lookup used to turn middleware identifiers into runnable units.
///
/// Implemented by whatever service container the embedding application uses.
/// Lookups may happen on every request, so implementations should be cheap or
/// be wrapped in a [`CachingResolver`].
pub trait MiddlewareResolver: Send + Sync {
    fn get(&self, id: &str) -> Result<Arc<dyn Middleware>, DispatchError>;
}

impl<T: MiddlewareResolver + ?Sized> MiddlewareResolver for Arc<T> {
    fn get(&self, id: &str) -> Result<Arc<dyn Middleware>, DispatchError> {
        (**self).get(id)
    }
}

/// In-memory resolver keyed by identifier
///
/// Populated at startup, read-only afterwards.
///
/// # Example
///
/// ```rust
/// use brrtroutes::middleware::{middleware_fn, MiddlewareRegistry, MiddlewareResolver};
///
/// let mut registry = MiddlewareRegistry::new();
/// registry.register("auth", middleware_fn(|req, next| next.handle(req)));
/// assert!(registry.get("auth").is_ok());
/// assert!(registry.get("missing").is_err());
/// ```
#[derive(Default, Clone)]
pub struct MiddlewareRegistry {
    units: HashMap<String, Arc<dyn Middleware>>,
}

impl MiddlewareRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a unit under `id`, replacing any previous unit with that id
    pub fn register<M>(&mut self, id: impl Into<String>, unit: M) -> &mut Self
    where
        M: Middleware + 'static,
    {
        self.register_arc(id, Arc::new(unit))
    }

    /// Register an already shared unit under `id`
    pub fn register_arc(&mut self, id: impl Into<String>, unit: Arc<dyn Middleware>) -> &mut Self {
        let id = id.into();
        if self.units.insert(id.clone(), unit).is_some() {
            debug!(middleware = %id, "Replaced registered middleware");
        }
        self
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.units.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.units.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

impl MiddlewareResolver for MiddlewareRegistry {
    fn get(&self, id: &str) -> Result<Arc<dyn Middleware>, DispatchError> {
        match self.units.get(id) {
            Some(unit) => Ok(Arc::clone(unit)),
            None => {
                warn!(middleware = %id, "Middleware identifier not registered");
                Err(DispatchError::UnresolvedMiddleware { id: id.to_string() })
            }
        }
    }
}

/// Memoizing wrapper over another resolver.
///
/// The first successful lookup of an identifier is kept and returned for every
/// later lookup. Failed lookups are not cached, so a unit registered later in the
/// inner resolver is still picked up.
pub struct CachingResolver<R> {
    inner: R,
    cache: DashMap<String, Arc<dyn Middleware>>,
}

impl<R: MiddlewareResolver> CachingResolver<R> {
    #[must_use]
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            cache: DashMap::new(),
        }
    }

    /// Number of identifiers resolved so far
    #[must_use]
    pub fn cached(&self) -> usize {
        self.cache.len()
    }

    #[must_use]
    pub fn inner(&self) -> &R {
        &self.inner
    }
}

impl<R: MiddlewareResolver> MiddlewareResolver for CachingResolver<R> {
    fn get(&self, id: &str) -> Result<Arc<dyn Middleware>, DispatchError> {
        if let Some(unit) = self.cache.get(id) {
            return Ok(Arc::clone(unit.value()));
        }
        let unit = self.inner.get(id)?;
        self.cache.insert(id.to_string(), Arc::clone(&unit));
        Ok(unit)
    }
}

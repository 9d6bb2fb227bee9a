//! Duplicate route detection.
//!
//! Two routes collide when their paths are identical and their method sets
//! overlap: either side accepts any method, or they share at least one method.
//! Such a pair would make the matcher's choice ambiguous, so the collision is
//! reported at registration time instead of surfacing per request.
//!
//! Host, port and scheme refinements are not considered: routes with the same
//! path and overlapping methods collide even if they are restricted to different
//! hosts or schemes.

use std::collections::HashMap;

use tracing::warn;

use crate::error::RouteError;
use crate::route::{AllowedMethods, Route};

/// Registration-time collision check over the routes accepted so far.
///
/// The detector keeps a path index of accepted routes. [`detect_duplicate`]
/// only reads it; [`remember`] adds a route once the collector has actually
/// accepted it, so a declaration rejected later in registration never blocks a
/// subsequent valid one.
///
/// [`detect_duplicate`]: DuplicateRouteDetector::detect_duplicate
/// [`remember`]: DuplicateRouteDetector::remember
#[derive(Debug, Default)]
pub struct DuplicateRouteDetector {
    by_path: HashMap<String, Vec<Footprint>>,
}

#[derive(Debug)]
struct Footprint {
    name: String,
    methods: AllowedMethods,
}

impl DuplicateRouteDetector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail when `candidate` collides with a remembered route.
    ///
    /// # Errors
    ///
    /// [`RouteError::DuplicateRoute`] naming the shared path and the name of the
    /// route registered first.
    pub fn detect_duplicate(&self, candidate: &Route) -> Result<(), RouteError> {
        let Some(existing) = self.by_path.get(candidate.path()) else {
            return Ok(());
        };
        match existing
            .iter()
            .find(|f| f.methods.overlaps(candidate.allowed_methods()))
        {
            Some(conflict) => {
                warn!(
                    path = %candidate.path(),
                    name = %candidate.name(),
                    existing = %conflict.name,
                    "Duplicate route rejected"
                );
                Err(RouteError::DuplicateRoute {
                    path: candidate.path().to_string(),
                    existing: conflict.name.clone(),
                })
            }
            None => Ok(()),
        }
    }

    /// Record an accepted route
    pub fn remember(&mut self, route: &Route) {
        self.by_path
            .entry(route.path().to_string())
            .or_default()
            .push(Footprint {
                name: route.name().into_owned(),
                methods: route.allowed_methods().clone(),
            });
    }

    /// Number of remembered routes
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_path.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_path.is_empty()
    }
}

/// Whether two routes would collide if registered with the same collector
#[must_use]
pub fn routes_conflict(a: &Route, b: &Route) -> bool {
    a.path() == b.path() && a.allowed_methods().overlaps(b.allowed_methods())
}

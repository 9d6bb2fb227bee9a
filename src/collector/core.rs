use std::collections::hash_map::Entry;
use std::collections::HashMap;

use tracing::{debug, warn};

use super::{RouteCollection, RouteMatcher, RouteRegistrar};
use crate::duplicate::DuplicateRouteDetector;
use crate::error::RouteError;
use crate::group::GroupEntry;
use crate::ids::GroupId;
use crate::middleware::{MiddlewareAware, MiddlewareStack};
use crate::route::{GroupRef, Route};
use crate::runtime_config::CollectorConfig;

/// Top-level route registry bound to one matcher.
///
/// Every declaration, direct or through a group, ends in
/// [`add_route`](RouteRegistrar::add_route) here:
///
/// 1. duplicate detection against the routes accepted so far (when enabled),
/// 2. name uniqueness check,
/// 3. hand-off to the matcher, which may adjust or refuse the route,
/// 4. both checks again on the route the matcher returned, then indexing under
///    its name.
///
/// Steps 1 and 2 keep an obvious conflict away from the matcher. Step 4 is what
/// the detector remembers and the registry stores, so both always agree with
/// the matcher's form of the route. A route rejected at any step is not stored,
/// so the registry and the detector never see it. A rejection in step 4 comes
/// after the matcher has accepted the route.
///
/// Registration is single-threaded and happens before requests are served.
/// Embedders that register from several threads must guard the whole collector
/// with one lock.
pub struct RouteCollector<M> {
    router: M,
    detect_duplicates: bool,
    routes: HashMap<String, Route>,
    order: Vec<String>,
    groups: HashMap<GroupId, GroupEntry>,
    duplicate_detector: Option<DuplicateRouteDetector>,
}

impl<M: RouteMatcher> RouteCollector<M> {
    /// Create a collector with duplicate detection enabled
    #[must_use]
    pub fn new(router: M) -> Self {
        Self::with_duplicate_detection(router, true)
    }

    /// Create a collector, choosing whether duplicate routes are detected
    ///
    /// # Arguments
    ///
    /// * `router` - The matcher every accepted route is forwarded to
    /// * `detect_duplicates` - Reject routes whose path and methods collide with
    ///   an earlier route
    #[must_use]
    pub fn with_duplicate_detection(router: M, detect_duplicates: bool) -> Self {
        Self {
            router,
            detect_duplicates,
            routes: HashMap::new(),
            order: Vec::new(),
            groups: HashMap::new(),
            duplicate_detector: None,
        }
    }

    /// Create a collector from runtime configuration
    #[must_use]
    pub fn with_config(router: M, config: &CollectorConfig) -> Self {
        Self::with_duplicate_detection(router, config.detect_duplicates)
    }

    #[must_use]
    pub fn detects_duplicates(&self) -> bool {
        self.detect_duplicates
    }

    /// All registered routes keyed by name
    #[must_use]
    pub fn get_routes(&self) -> &HashMap<String, Route> {
        &self.routes
    }

    /// Look up a route by name; `None` when no route has that name
    #[must_use]
    pub fn get_route_name(&self, name: &str) -> Option<&Route> {
        self.routes.get(name)
    }

    /// Mutable lookup by name, e.g. to add middleware after declaration
    pub fn get_route_name_mut(&mut self, name: &str) -> Option<&mut Route> {
        self.routes.get_mut(name)
    }

    /// Routes in the order they were registered
    pub fn routes_in_order(&self) -> impl Iterator<Item = &Route> + '_ {
        self.order.iter().filter_map(|name| self.routes.get(name))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    #[must_use]
    pub fn get_group(&self, id: GroupId) -> Option<&GroupEntry> {
        self.groups.get(&id)
    }

    pub fn get_group_mut(&mut self, id: GroupId) -> Option<&mut GroupEntry> {
        self.groups.get_mut(&id)
    }

    pub fn groups(&self) -> impl Iterator<Item = &GroupEntry> + '_ {
        self.groups.values()
    }

    /// Declare the conventional CRUD routes in a new group under `prefix_path`.
    ///
    /// See [`RouteGroup::crud`](crate::group::RouteGroup::crud) for the routes
    /// and names produced.
    ///
    /// # Errors
    ///
    /// The first registration error.
    pub fn crud(
        &mut self,
        prefix_path: &str,
        controller: &str,
        prefix_name: &str,
    ) -> Result<&mut GroupEntry, RouteError> {
        self.group(prefix_path, |group| {
            group.crud(controller, prefix_name)?;
            Ok(())
        })
    }

    /// Effective middleware stack of the route named `name`.
    ///
    /// Outermost group first, then each nested group, then the route's own
    /// stack. The result is a fresh copy suitable for one
    /// [`Pipeline`](crate::middleware::Pipeline) template.
    #[must_use]
    pub fn middleware_stack_for(&self, name: &str) -> Option<MiddlewareStack> {
        let route = self.routes.get(name)?;

        let mut chain = Vec::new();
        let mut next = route.parent_group().map(|group| group.id);
        while let Some(id) = next {
            let Some(group) = self.groups.get(&id) else {
                break;
            };
            chain.push(group);
            next = group.parent();
        }

        let mut stack = MiddlewareStack::new();
        for group in chain.iter().rev() {
            stack.append_stack(group.middleware_stack());
        }
        stack.append_stack(route.middleware_stack());
        Some(stack)
    }

    #[must_use]
    pub fn matcher(&self) -> &M {
        &self.router
    }

    pub fn matcher_mut(&mut self) -> &mut M {
        &mut self.router
    }

    #[must_use]
    pub fn into_matcher(self) -> M {
        self.router
    }
}

impl<M: RouteMatcher> RouteRegistrar for RouteCollector<M> {
    fn add_route(&mut self, route: Route) -> Result<&mut Route, RouteError> {
        if self.detect_duplicates {
            self.duplicate_detector
                .get_or_insert_with(DuplicateRouteDetector::new)
                .detect_duplicate(&route)?;
        }

        let candidate = route.name().into_owned();
        if self.routes.contains_key(&candidate) {
            warn!(name = %candidate, path = %route.path(), "Duplicate route name rejected");
            return Err(RouteError::DuplicateName { name: candidate });
        }

        let path = route.path().to_string();
        let mut route = self.router.add_route(route).map_err(|source| {
            warn!(path = %path, error = %source, "Matcher rejected route");
            RouteError::Matcher { path, source }
        })?;

        if let Some(detector) = self.duplicate_detector.as_ref() {
            detector.detect_duplicate(&route)?;
        }

        let name = route.name().into_owned();
        match self.routes.entry(name) {
            Entry::Occupied(existing) => {
                warn!(name = %existing.key(), "Duplicate route name rejected");
                Err(RouteError::DuplicateName {
                    name: existing.key().clone(),
                })
            }
            Entry::Vacant(slot) => {
                route.set_name(slot.key().clone());
                if let Some(detector) = self.duplicate_detector.as_mut() {
                    detector.remember(&route);
                }
                self.order.push(slot.key().clone());
                debug!(
                    name = %slot.key(),
                    path = %route.path(),
                    methods = ?route.allowed_methods().as_slice(),
                    "Route registered"
                );
                Ok(slot.insert(route))
            }
        }
    }

    fn register_group(&mut self, group: GroupEntry) -> &mut GroupEntry {
        self.groups.entry(group.id()).or_insert(group)
    }

    fn enclosing_group(&self) -> Option<GroupRef> {
        None
    }
}

impl<M> std::fmt::Debug for RouteCollector<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteCollector")
            .field("detect_duplicates", &self.detect_duplicates)
            .field("routes", &self.order)
            .field("groups", &self.groups.len())
            .finish_non_exhaustive()
    }
}

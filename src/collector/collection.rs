use crate::error::RouteError;
use crate::group::{GroupEntry, RouteGroup};
use crate::route::{GroupRef, Route, RouteCallback};

/// Anything routes can be registered through: the collector itself, or a group
/// that rewrites routes before forwarding them to its parent.
///
/// This is the object-safe core; the declaration helpers live in
/// [`RouteCollection`], which every registrar gets for free.
pub trait RouteRegistrar {
    /// Register a route, returning the stored route for further configuration.
    ///
    /// # Errors
    ///
    /// Duplicate path/method or name conflicts, and matcher failures.
    fn add_route(&mut self, route: Route) -> Result<&mut Route, RouteError>;

    /// Store a finished group so it outlives its builder
    fn register_group(&mut self, group: GroupEntry) -> &mut GroupEntry;

    /// The group new routes and nested groups are declared under, if any
    fn enclosing_group(&self) -> Option<GroupRef>;
}

/// Declaration helpers shared by collectors and groups.
///
/// Every helper builds a [`Route`] and passes it through the registrar's own
/// [`add_route`](RouteRegistrar::add_route), so group prefixing and naming apply
/// no matter which helper declared the route.
///
/// # Example
///
/// ```rust
/// use brrtroutes::collector::{RouteCollection, RouteCollector, RouteMatcher};
/// use brrtroutes::route::Route;
///
/// struct Accept;
/// impl RouteMatcher for Accept {
///     fn add_route(&mut self, route: Route) -> anyhow::Result<Route> {
///         Ok(route)
///     }
/// }
///
/// let mut routes = RouteCollector::new(Accept);
/// routes.get("/", "HomeController::index", Some("home")).unwrap();
/// routes
///     .group("/admin", |admin| {
///         admin.get("/users", "UserController::index", None)?;
///         admin.post("/users", "UserController::create", None)?;
///         Ok(())
///     })
///     .unwrap();
///
/// assert!(routes.get_route_name("/admin/users:GET").is_some());
/// assert!(routes.get_route_name("/admin/users:POST").is_some());
/// ```
pub trait RouteCollection: RouteRegistrar {
    /// Declare a route accepting `methods` (`None` for any method)
    fn route(
        &mut self,
        path: &str,
        callback: impl Into<RouteCallback>,
        name: Option<&str>,
        methods: Option<&[&str]>,
    ) -> Result<&mut Route, RouteError> {
        let route = Route::new(path, callback, name, methods)?;
        self.add_route(route)
    }

    fn get(
        &mut self,
        path: &str,
        callback: impl Into<RouteCallback>,
        name: Option<&str>,
    ) -> Result<&mut Route, RouteError> {
        self.route(path, callback, name, Some(&["GET"]))
    }

    fn post(
        &mut self,
        path: &str,
        callback: impl Into<RouteCallback>,
        name: Option<&str>,
    ) -> Result<&mut Route, RouteError> {
        self.route(path, callback, name, Some(&["POST"]))
    }

    fn put(
        &mut self,
        path: &str,
        callback: impl Into<RouteCallback>,
        name: Option<&str>,
    ) -> Result<&mut Route, RouteError> {
        self.route(path, callback, name, Some(&["PUT"]))
    }

    fn patch(
        &mut self,
        path: &str,
        callback: impl Into<RouteCallback>,
        name: Option<&str>,
    ) -> Result<&mut Route, RouteError> {
        self.route(path, callback, name, Some(&["PATCH"]))
    }

    fn delete(
        &mut self,
        path: &str,
        callback: impl Into<RouteCallback>,
        name: Option<&str>,
    ) -> Result<&mut Route, RouteError> {
        self.route(path, callback, name, Some(&["DELETE"]))
    }

    fn head(
        &mut self,
        path: &str,
        callback: impl Into<RouteCallback>,
        name: Option<&str>,
    ) -> Result<&mut Route, RouteError> {
        self.route(path, callback, name, Some(&["HEAD"]))
    }

    fn options(
        &mut self,
        path: &str,
        callback: impl Into<RouteCallback>,
        name: Option<&str>,
    ) -> Result<&mut Route, RouteError> {
        self.route(path, callback, name, Some(&["OPTIONS"]))
    }

    /// Declare a route accepting every method
    fn any(
        &mut self,
        path: &str,
        callback: impl Into<RouteCallback>,
        name: Option<&str>,
    ) -> Result<&mut Route, RouteError> {
        self.route(path, callback, name, None)
    }

    /// Declare a group of routes under `prefix`.
    ///
    /// `builder` runs synchronously, exactly once, before this returns. The
    /// finished group is stored with the owning collector even when the builder
    /// fails; routes it registered before failing stay registered.
    ///
    /// # Errors
    ///
    /// Whatever error the builder returned.
    fn group<F>(&mut self, prefix: &str, builder: F) -> Result<&mut GroupEntry, RouteError>
    where
        Self: Sized,
        F: FnOnce(&mut RouteGroup<'_>) -> Result<(), RouteError>,
    {
        let mut group = RouteGroup::new(prefix, self);
        let built = builder(&mut group);
        let entry = group.into_entry();
        let entry = self.register_group(entry);
        built.map(|()| entry)
    }
}

impl<T: RouteRegistrar + ?Sized> RouteCollection for T {}

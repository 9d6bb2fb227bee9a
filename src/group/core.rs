use std::sync::Arc;

use tracing::info;

use crate::collector::{RouteCollection, RouteRegistrar};
use crate::error::RouteError;
use crate::ids::GroupId;
use crate::middleware::{MiddlewareAware, MiddlewareStack};
use crate::route::{join_path, GroupRef, Route};

/// Path segment for CRUD member routes; only numeric ids match
pub const CRUD_ID_SEGMENT: &str = r"/{id:\d+}";

/// A prefix scope that routes are declared through while its builder runs.
///
/// Every route added here has the group's prefix prepended and this group
/// recorded as its parent, then is forwarded to the parent registrar (the
/// collector, or an enclosing group). The route the collector stores is never
/// rewritten afterwards. Groups nest: a group used as the parent of another
/// composes both prefixes, outermost first, and the route keeps the innermost
/// group as its parent.
///
/// When the builder returns, the group is converted into a [`GroupEntry`] owned by
/// the collector, which keeps its middleware stack.
///
/// # Example
///
/// ```rust
/// use brrtroutes::collector::{RouteCollection, RouteCollector, RouteMatcher};
/// use brrtroutes::middleware::MiddlewareAware;
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
/// routes
///     .group("/admin", |admin| {
///         admin.get("/", "AdminController::dashboard", Some("admin"))?;
///         admin.group("/users", |users| {
///             users.get("/{id}", "UserController::show", Some("admin.user"))?;
///             Ok(())
///         })?;
///         Ok(())
///     })
///     .unwrap()
///     .middleware("auth");
///
/// assert_eq!(routes.get_route_name("admin").unwrap().path(), "/admin");
/// assert_eq!(routes.get_route_name("admin.user").unwrap().path(), "/admin/users/{id}");
/// ```
pub struct RouteGroup<'r> {
    id: GroupId,
    prefix: String,
    full_prefix: Arc<str>,
    parent: Option<GroupId>,
    router: &'r mut dyn RouteRegistrar,
    middleware: MiddlewareStack,
    route_count: usize,
}

impl<'r> RouteGroup<'r> {
    /// Open a group under `router`.
    ///
    /// Prefer [`RouteCollection::group`], which also runs the builder and stores
    /// the finished group.
    pub fn new(prefix: &str, router: &'r mut dyn RouteRegistrar) -> Self {
        let enclosing = router.enclosing_group();
        let full_prefix = match &enclosing {
            Some(outer) => join_path(&outer.prefix, prefix),
            None => prefix.to_string(),
        };
        Self {
            id: GroupId::new(),
            prefix: prefix.to_string(),
            full_prefix: Arc::from(full_prefix.trim_end_matches('/')),
            parent: enclosing.map(|outer| outer.id),
            router,
            middleware: MiddlewareStack::new(),
            route_count: 0,
        }
    }

    #[must_use]
    pub fn id(&self) -> GroupId {
        self.id
    }

    /// The prefix this group was declared with
    #[must_use]
    pub fn get_prefix(&self) -> &str {
        &self.prefix
    }

    /// The prefix including every enclosing group's prefix, without a trailing `/`
    #[must_use]
    pub fn full_prefix(&self) -> &str {
        &self.full_prefix
    }

    /// Declare the conventional CRUD routes for `controller` under this group.
    ///
    /// | name                   | method | path        | handler              |
    /// |------------------------|--------|-------------|----------------------|
    /// | `{name}.index`         | GET    | `/`         | `{controller}::index`  |
    /// | `{name}.create`        | GET    | `/new`      | `{controller}::create` |
    /// | `{name}.create.post`   | POST   | `/new`      | `{controller}::create` |
    /// | `{name}.edit`          | GET    | `/{id:\d+}` | `{controller}::edit`   |
    /// | `{name}.edit.post`     | POST   | `/{id:\d+}` | `{controller}::edit`   |
    /// | `{name}.delete`        | DELETE | `/{id:\d+}` | `{controller}::delete` |
    ///
    /// # Errors
    ///
    /// The first registration error; routes declared before it stay registered.
    pub fn crud(&mut self, controller: &str, prefix_name: &str) -> Result<&mut Self, RouteError> {
        let action = |name: &str| format!("{controller}::{name}");
        let named = |suffix: &str| format!("{prefix_name}.{suffix}");

        self.get("/", action("index"), Some(named("index").as_str()))?;
        self.get("/new", action("create"), Some(named("create").as_str()))?;
        self.post("/new", action("create"), Some(named("create.post").as_str()))?;
        self.get(CRUD_ID_SEGMENT, action("edit"), Some(named("edit").as_str()))?;
        self.post(CRUD_ID_SEGMENT, action("edit"), Some(named("edit.post").as_str()))?;
        self.delete(CRUD_ID_SEGMENT, action("delete"), Some(named("delete").as_str()))?;
        Ok(self)
    }

    fn group_ref(&self) -> GroupRef {
        GroupRef {
            id: self.id,
            prefix: Arc::clone(&self.full_prefix),
        }
    }

    /// Finish the group, keeping what outlives the builder
    pub(crate) fn into_entry(self) -> GroupEntry {
        info!(
            group = %self.id,
            prefix = %self.full_prefix,
            routes = self.route_count,
            middleware = self.middleware.len(),
            "Route group built"
        );
        GroupEntry {
            id: self.id,
            prefix: self.prefix,
            full_prefix: self.full_prefix,
            parent: self.parent,
            middleware: self.middleware,
            route_count: self.route_count,
        }
    }
}

impl RouteRegistrar for RouteGroup<'_> {
    fn add_route(&mut self, mut route: Route) -> Result<&mut Route, RouteError> {
        let path = join_path(&self.prefix, route.path());
        route.set_path(path);
        route.attach_group(self.group_ref());

        let route = self.router.add_route(route)?;
        self.route_count += 1;
        Ok(route)
    }

    fn register_group(&mut self, group: GroupEntry) -> &mut GroupEntry {
        self.router.register_group(group)
    }

    fn enclosing_group(&self) -> Option<GroupRef> {
        Some(self.group_ref())
    }
}

impl MiddlewareAware for RouteGroup<'_> {
    fn middleware_stack(&self) -> &MiddlewareStack {
        &self.middleware
    }

    fn middleware_stack_mut(&mut self) -> &mut MiddlewareStack {
        &mut self.middleware
    }
}

/// A finished group as stored by the collector.
///
/// Member routes keep their own stacks; this stack belongs to the group and is
/// composed ahead of theirs by `RouteCollector::middleware_stack_for`.
#[derive(Debug, Clone)]
pub struct GroupEntry {
    id: GroupId,
    prefix: String,
    full_prefix: Arc<str>,
    parent: Option<GroupId>,
    middleware: MiddlewareStack,
    route_count: usize,
}

impl GroupEntry {
    #[must_use]
    pub fn id(&self) -> GroupId {
        self.id
    }

    /// The prefix the group was declared with
    #[must_use]
    pub fn get_prefix(&self) -> &str {
        &self.prefix
    }

    #[must_use]
    pub fn full_prefix(&self) -> &str {
        &self.full_prefix
    }

    /// Enclosing group, for nested groups
    #[must_use]
    pub fn parent(&self) -> Option<GroupId> {
        self.parent
    }

    /// Number of routes registered through this group, nested groups included
    #[must_use]
    pub fn route_count(&self) -> usize {
        self.route_count
    }

    #[must_use]
    pub fn group_ref(&self) -> GroupRef {
        GroupRef {
            id: self.id,
            prefix: Arc::clone(&self.full_prefix),
        }
    }
}

impl MiddlewareAware for GroupEntry {
    fn middleware_stack(&self) -> &MiddlewareStack {
        &self.middleware
    }

    fn middleware_stack_mut(&mut self) -> &mut MiddlewareStack {
        &mut self.middleware
    }
}

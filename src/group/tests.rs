#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::{RouteGroup, CRUD_ID_SEGMENT};
use crate::collector::{RouteCollection, RouteCollector, RouteMatcher, RouteRegistrar};
use crate::error::RouteError;
use crate::middleware::{MiddlewareAware, MiddlewareEntry};
use crate::route::Route;

struct Accept;

impl RouteMatcher for Accept {
    fn add_route(&mut self, route: Route) -> anyhow::Result<Route> {
        Ok(route)
    }
}

fn path_of<'a>(routes: &'a RouteCollector<Accept>, name: &str) -> &'a str {
    routes.get_route_name(name).unwrap().path()
}

#[test]
fn test_prefix_joining() {
    let mut routes = RouteCollector::new(Accept);
    routes
        .group("/admin", |admin| {
            admin.get("/users", "h", Some("users"))?;
            admin.get("settings", "h", Some("settings"))?;
            admin.get("/", "h", Some("root"))?;
            Ok(())
        })
        .unwrap();

    assert_eq!(path_of(&routes, "users"), "/admin/users");
    assert_eq!(path_of(&routes, "settings"), "/admin/settings");
    assert_eq!(path_of(&routes, "root"), "/admin");
}

#[test]
fn test_trailing_slash_prefix() {
    let mut routes = RouteCollector::new(Accept);
    routes
        .group("/api/", |api| {
            api.get("/status", "h", Some("status"))?;
            api.get("/", "h", Some("root"))?;
            Ok(())
        })
        .unwrap();

    assert_eq!(path_of(&routes, "status"), "/api/status");
    assert_eq!(path_of(&routes, "root"), "/api");
    assert_eq!(routes.groups().next().unwrap().full_prefix(), "/api");
}

#[test]
fn test_trailing_slash_root_route_blocks_only_its_own_path() {
    let mut routes = RouteCollector::new(Accept);
    routes
        .group("/api/", |api| {
            api.get("/", "h", Some("root"))?;
            Ok(())
        })
        .unwrap();

    let err = routes.get("/api", "h", Some("again")).unwrap_err();
    assert!(matches!(err, RouteError::DuplicateRoute { ref path, ref existing }
        if path == "/api" && existing == "root"));
    routes.post("/api", "h", Some("create")).unwrap();
    assert!(routes.get_route_name("/api/api:GET").is_none());
}

/// Moves every path under `/v1`, as a versioning matcher would.
struct Versioned;

impl RouteMatcher for Versioned {
    fn add_route(&mut self, mut route: Route) -> anyhow::Result<Route> {
        let path = format!("/v1{}", route.path());
        route.set_path(path);
        Ok(route)
    }
}

#[test]
fn test_group_keeps_matcher_rewritten_path() {
    let mut routes = RouteCollector::new(Versioned);
    routes
        .group("/admin", |admin| {
            admin.get("/users", "h", Some("users"))?;
            admin.group("/audit", |audit| {
                audit.get("/", "h", Some("audit"))?;
                Ok(())
            })?;
            Ok(())
        })
        .unwrap();

    let users = routes.get_route_name("users").unwrap();
    assert_eq!(users.path(), "/v1/admin/users");
    assert_eq!(users.parent_group().unwrap().prefix.as_ref(), "/admin");

    let audit = routes.get_route_name("audit").unwrap();
    assert_eq!(audit.path(), "/v1/admin/audit");
    assert_eq!(audit.parent_group().unwrap().prefix.as_ref(), "/admin/audit");
}

#[test]
fn test_default_names_use_prefixed_path() {
    let mut routes = RouteCollector::new(Accept);
    routes
        .group("/admin", |admin| {
            admin.get("/users", "h", None)?;
            admin.post("/users", "h", None)?;
            Ok(())
        })
        .unwrap();

    assert!(routes.get_route_name("/admin/users:GET").is_some());
    assert!(routes.get_route_name("/admin/users:POST").is_some());
    assert!(routes.get_route_name("/users:GET").is_none());
}

#[test]
fn test_nested_groups_compose_prefixes() {
    let mut routes = RouteCollector::new(Accept);
    routes
        .group("/api", |api| {
            api.group("/v1", |v1| {
                v1.get("/users", "h", Some("v1.users"))?;
                v1.get("/", "h", Some("v1.root"))?;
                Ok(())
            })?;
            api.get("/health", "h", Some("health"))?;
            Ok(())
        })
        .unwrap();

    assert_eq!(path_of(&routes, "v1.users"), "/api/v1/users");
    assert_eq!(path_of(&routes, "v1.root"), "/api/v1");
    assert_eq!(path_of(&routes, "health"), "/api/health");
}

#[test]
fn test_nested_default_names_do_not_collide() {
    let mut routes = RouteCollector::new(Accept);
    routes
        .group("/a", |a| {
            a.group("/x", |x| {
                x.get("/list", "h", None)?;
                Ok(())
            })?;
            Ok(())
        })
        .unwrap();
    routes
        .group("/b", |b| {
            b.group("/x", |x| {
                x.get("/list", "h", None)?;
                Ok(())
            })?;
            Ok(())
        })
        .unwrap();

    assert!(routes.get_route_name("/a/x/list:GET").is_some());
    assert!(routes.get_route_name("/b/x/list:GET").is_some());
}

#[test]
fn test_parent_group_is_innermost() {
    let mut routes = RouteCollector::new(Accept);
    let mut inner_id = None;
    let outer_id = routes
        .group("/admin", |admin| {
            let inner = admin.group("/users", |users| {
                users.get("/{id}", "h", Some("user"))?;
                Ok(())
            })?;
            inner_id = Some(inner.id());
            Ok(())
        })
        .unwrap()
        .id();

    let route = routes.get_route_name("user").unwrap();
    let parent = route.parent_group().unwrap();
    assert_eq!(Some(parent.id), inner_id);
    assert_eq!(parent.prefix.as_ref(), "/admin/users");

    let inner = routes.get_group(inner_id.unwrap()).unwrap();
    assert_eq!(inner.parent(), Some(outer_id));
    assert_eq!(inner.get_prefix(), "/users");
    assert_eq!(inner.full_prefix(), "/admin/users");
}

#[test]
fn test_builder_error_propagates_and_keeps_earlier_routes() {
    let mut routes = RouteCollector::new(Accept);
    routes.get("/admin/users", "h", Some("existing")).unwrap();

    let err = routes
        .group("/admin", |admin| {
            admin.get("/settings", "h", Some("settings"))?;
            admin.get("/users", "h", Some("clash"))?;
            admin.get("/never", "h", Some("never"))?;
            Ok(())
        })
        .unwrap_err();

    assert!(matches!(err, RouteError::DuplicateRoute { ref existing, .. } if existing == "existing"));
    assert!(routes.get_route_name("settings").is_some());
    assert!(routes.get_route_name("clash").is_none());
    assert!(routes.get_route_name("never").is_none());
    assert_eq!(routes.groups().count(), 1);
}

#[test]
fn test_builder_runs_exactly_once() {
    let mut routes = RouteCollector::new(Accept);
    let mut calls = 0;
    routes
        .group("/once", |_group| {
            calls += 1;
            Ok(())
        })
        .unwrap();
    assert_eq!(calls, 1);
}

#[test]
fn test_group_middleware_stays_on_group() {
    let mut routes = RouteCollector::new(Accept);
    let group = routes
        .group("/admin", |admin| {
            admin.middleware("during");
            admin.get("/users", "h", Some("users"))?.middleware("route");
            Ok(())
        })
        .unwrap();
    group.middleware("after");

    let group_ids: Vec<_> = group
        .get_middleware_stack()
        .filter_map(MiddlewareEntry::identifier)
        .collect();
    assert_eq!(group_ids, ["during", "after"]);

    let route = routes.get_route_name("users").unwrap();
    let route_ids: Vec<_> = route
        .get_middleware_stack()
        .filter_map(MiddlewareEntry::identifier)
        .collect();
    assert_eq!(route_ids, ["route"]);
}

#[test]
fn test_crud_inside_group() {
    let mut routes = RouteCollector::new(Accept);
    routes
        .group("/admin", |admin| {
            admin.group("/users", |users| {
                users.crud("UserController", "admin.users")?;
                Ok(())
            })?;
            Ok(())
        })
        .unwrap();

    assert_eq!(path_of(&routes, "admin.users.index"), "/admin/users");
    assert_eq!(path_of(&routes, "admin.users.create"), "/admin/users/new");
    assert_eq!(
        path_of(&routes, "admin.users.delete"),
        format!("/admin/users{CRUD_ID_SEGMENT}")
    );
    assert!(routes
        .get_route_name("admin.users.edit.post")
        .unwrap()
        .allows_method("POST"));
}

#[test]
fn test_crud_route_count() {
    let mut routes = RouteCollector::new(Accept);
    let count = routes
        .group("/tags", |tags| {
            tags.crud("TagController", "tags")?;
            Ok(())
        })
        .unwrap()
        .route_count();
    assert_eq!(count, 6);
    assert_eq!(routes.len(), 6);
}

#[test]
fn test_route_group_direct_use() {
    let mut routes = RouteCollector::new(Accept);
    {
        let mut group = RouteGroup::new("/manual", &mut routes);
        assert_eq!(group.get_prefix(), "/manual");
        assert_eq!(group.full_prefix(), "/manual");
        assert!(group.enclosing_group().is_some());
        group.get("/x", "h", Some("x")).unwrap();
    }

    assert_eq!(path_of(&routes, "x"), "/manual/x");
    assert_eq!(routes.groups().count(), 0);
}

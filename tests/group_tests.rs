mod common;

use brrtroutes::collector::{RouteCollection, RouteCollector};
use brrtroutes::group::CRUD_ID_SEGMENT;
use brrtroutes::middleware::{MiddlewareAware, MiddlewareEntry};
use brrtroutes::RouteError;
use common::matchers::RecordingMatcher;

fn new_collector() -> RouteCollector<RecordingMatcher> {
    RouteCollector::new(RecordingMatcher::default())
}

#[test]
fn test_admin_users_under_prefix() {
    let mut routes = new_collector();
    routes
        .group("/admin", |admin| {
            admin.get("/users", "UserController::index", None)?;
            Ok(())
        })
        .unwrap();

    let route = routes.get_route_name("/admin/users:GET").unwrap();
    assert_eq!(route.path(), "/admin/users");
    assert_eq!(route.callback().handler_name(), Some("UserController::index"));
    assert_eq!(routes.matcher().paths, ["/admin/users"]);
}

#[test]
fn test_root_route_resolves_to_prefix() {
    let mut routes = new_collector();
    routes
        .group("/dashboard", |dashboard| {
            dashboard.any("/", "DashboardController::index", Some("dashboard"))?;
            Ok(())
        })
        .unwrap();
    assert_eq!(routes.get_route_name("dashboard").unwrap().path(), "/dashboard");
}

#[test]
fn test_crud_generates_six_routes() {
    let mut routes = new_collector();
    routes
        .group("/shop", |shop| {
            shop.group("/products", |products| {
                products.crud("ProductController", "shop.products")?;
                Ok(())
            })?;
            Ok(())
        })
        .unwrap();

    let member = format!("/shop/products{CRUD_ID_SEGMENT}");
    let expected = [
        ("shop.products.index", "/shop/products", "GET"),
        ("shop.products.create", "/shop/products/new", "GET"),
        ("shop.products.create.post", "/shop/products/new", "POST"),
        ("shop.products.edit", member.as_str(), "GET"),
        ("shop.products.edit.post", member.as_str(), "POST"),
        ("shop.products.delete", member.as_str(), "DELETE"),
    ];
    for (name, path, method) in expected {
        let route = routes
            .get_route_name(name)
            .unwrap_or_else(|| panic!("missing {name}"));
        assert_eq!(route.path(), path);
        assert!(route.allows_method(method));
        assert_eq!(route.allowed_methods().as_slice().unwrap().len(), 1);
    }
    assert!(member.ends_with(r"{id:\d+}"));
    assert_eq!(routes.len(), 6);
}

#[test]
fn test_two_crud_groups_with_distinct_prefixes() {
    let mut routes = new_collector();
    routes.crud("/posts", "PostController", "posts").unwrap();
    routes.crud("/pages", "PageController", "pages").unwrap();
    assert_eq!(routes.len(), 12);
    assert_eq!(routes.groups().count(), 2);
}

#[test]
fn test_failed_builder_reports_first_error() {
    let mut routes = new_collector();
    let err = routes
        .group("/api", |api| {
            api.get("/a", "h", Some("same"))?;
            api.get("/b", "h", Some("same"))?;
            Ok(())
        })
        .unwrap_err();
    assert!(matches!(err, RouteError::DuplicateName { ref name } if name == "same"));
    assert_eq!(routes.get_route_name("same").unwrap().path(), "/api/a");
}

#[test]
fn test_group_middleware_composes_with_routes() {
    let mut routes = new_collector();
    routes
        .group("/admin", |admin| {
            admin.prepend_middleware("session");
            admin
                .get("/reports", "ReportController::index", Some("reports"))?
                .middleware("audit");
            Ok(())
        })
        .unwrap()
        .middleware("auth");

    let stack = routes.middleware_stack_for("reports").unwrap();
    let ids: Vec<_> = stack.entries().filter_map(MiddlewareEntry::identifier).collect();
    assert_eq!(ids, ["session", "auth", "audit"]);
}

#[test]
fn test_routes_outside_groups_have_no_parent() {
    let mut routes = new_collector();
    routes.get("/plain", "h", Some("plain")).unwrap();
    let route = routes.get_route_name("plain").unwrap();
    assert!(route.parent_group().is_none());
    assert_eq!(routes.middleware_stack_for("plain").unwrap().len(), 0);
}

use crate::route::Route;

/// The external path matcher routes are registered with.
///
/// The collector never matches paths itself. It hands every accepted route to
/// the matcher, which may compile the path template, adjust the route, or refuse
/// it (for example on a malformed template). The route returned is the one the
/// collector indexes.
///
/// Matchers must honor the registry's invariants: names are unique, and no two
/// routes share a path with overlapping methods.
pub trait RouteMatcher {
    fn add_route(&mut self, route: Route) -> anyhow::Result<Route>;
}

impl<M: RouteMatcher + ?Sized> RouteMatcher for &mut M {
    fn add_route(&mut self, route: Route) -> anyhow::Result<Route> {
        (**self).add_route(route)
    }
}

impl<M: RouteMatcher + ?Sized> RouteMatcher for Box<M> {
    fn add_route(&mut self, route: Route) -> anyhow::Result<Route> {
        (**self).add_route(route)
    }
}

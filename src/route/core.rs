use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use super::methods::{AllowedMethods, HTTP_METHOD_SEPARATOR};
use super::request::RouteRequest;
use crate::error::RouteError;
use crate::ids::GroupId;
use crate::middleware::{MiddlewareAware, MiddlewareStack, RequestHandler};

/// What a route dispatches to once matched.
///
/// The registry never interprets the callback; it is carried through to the
/// matcher and whatever dispatcher sits behind it.
#[derive(Clone)]
pub enum RouteCallback {
    /// Handler identifier, e.g. `"PostController::index"`
    Handler(Arc<str>),
    /// Callable handler
    Callable(Arc<dyn RequestHandler>),
}

impl RouteCallback {
    /// Handler identifier, if this callback is one
    #[must_use]
    pub fn handler_name(&self) -> Option<&str> {
        match self {
            RouteCallback::Handler(name) => Some(name.as_ref()),
            RouteCallback::Callable(_) => None,
        }
    }
}

impl fmt::Debug for RouteCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteCallback::Handler(name) => f.debug_tuple("Handler").field(name).finish(),
            RouteCallback::Callable(_) => f.write_str("Callable(..)"),
        }
    }
}

impl From<&str> for RouteCallback {
    fn from(name: &str) -> Self {
        RouteCallback::Handler(Arc::from(name))
    }
}

impl From<String> for RouteCallback {
    fn from(name: String) -> Self {
        RouteCallback::Handler(Arc::from(name))
    }
}

impl From<Arc<dyn RequestHandler>> for RouteCallback {
    fn from(handler: Arc<dyn RequestHandler>) -> Self {
        RouteCallback::Callable(handler)
    }
}

/// Lookup-only reference from a route to the group that prefixed it.
///
/// Holds the group's id and full prefix; the group entry itself lives in the
/// owning collector (see `RouteCollector::get_group`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupRef {
    pub id: GroupId,
    pub prefix: Arc<str>,
}

/// A declared route: path template, callback, methods, name and matching
/// refinements, plus its own middleware stack.
///
/// Methods are validated and uppercased once, at construction, and cannot change
/// afterwards. When no explicit name is set, the name is derived from the current
/// path: the path alone for any-method routes, otherwise
/// `path:METHOD[:METHOD...]`.
///
/// # Example
///
/// ```rust
/// use brrtroutes::route::Route;
///
/// let route = Route::new("/users", "UserController::index", None, Some(&["get", "head"])).unwrap();
/// assert_eq!(route.name(), "/users:GET:HEAD");
/// assert!(route.allows_method("HEAD"));
/// assert!(!route.allows_method("POST"));
/// ```
#[derive(Clone, Debug)]
pub struct Route {
    path: String,
    callback: RouteCallback,
    methods: AllowedMethods,
    name: Option<String>,
    host: Option<String>,
    port: Option<u16>,
    schemes: Option<Vec<String>>,
    options: HashMap<String, Value>,
    middleware: MiddlewareStack,
    parent_group: Option<GroupRef>,
}

impl Route {
    /// Create a route.
    ///
    /// # Errors
    ///
    /// [`RouteError::InvalidArgument`] when `methods` is an empty list or contains
    /// an entry that is not an HTTP token.
    pub fn new(
        path: impl Into<String>,
        callback: impl Into<RouteCallback>,
        name: Option<&str>,
        methods: Option<&[&str]>,
    ) -> Result<Self, RouteError> {
        let methods = AllowedMethods::parse(methods)?;
        Ok(Self {
            path: path.into(),
            callback: callback.into(),
            methods,
            name: name.filter(|n| !n.is_empty()).map(str::to_string),
            host: None,
            port: None,
            schemes: None,
            options: HashMap::new(),
            middleware: MiddlewareStack::new(),
            parent_group: None,
        })
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn set_path(&mut self, path: impl Into<String>) -> &mut Self {
        self.path = path.into();
        self
    }

    /// Explicit name, or the default derived from the current path and methods
    #[must_use]
    pub fn name(&self) -> Cow<'_, str> {
        match &self.name {
            Some(name) => Cow::Borrowed(name),
            None => Cow::Owned(self.default_name()),
        }
    }

    /// Whether a name was set explicitly
    #[must_use]
    pub fn has_explicit_name(&self) -> bool {
        self.name.is_some()
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = Some(name.into());
        self
    }

    fn default_name(&self) -> String {
        match self.methods.joined() {
            Some(methods) => format!("{}{}{}", self.path, HTTP_METHOD_SEPARATOR, methods),
            None => self.path.clone(),
        }
    }

    #[must_use]
    pub fn callback(&self) -> &RouteCallback {
        &self.callback
    }

    #[must_use]
    pub fn allowed_methods(&self) -> &AllowedMethods {
        &self.methods
    }

    /// Whether `method` is accepted (case-insensitive)
    #[must_use]
    pub fn allows_method(&self, method: &str) -> bool {
        self.methods.allows(method)
    }

    #[must_use]
    pub fn allows_any_method(&self) -> bool {
        self.methods.is_any()
    }

    #[must_use]
    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    /// Restrict the route to one host (exact match, no wildcards)
    pub fn set_host(&mut self, host: impl Into<String>) -> &mut Self {
        self.host = Some(host.into());
        self
    }

    #[must_use]
    pub fn port(&self) -> Option<u16> {
        self.port
    }

    pub fn set_port(&mut self, port: u16) -> &mut Self {
        self.port = Some(port);
        self
    }

    /// Allowed schemes (lowercase), `None` for any
    #[must_use]
    pub fn schemes(&self) -> Option<&[String]> {
        self.schemes.as_deref()
    }

    /// Restrict the route to the given schemes; they are lowercased
    pub fn set_schemes(&mut self, schemes: &[&str]) -> &mut Self {
        self.schemes = Some(schemes.iter().map(|s| s.to_ascii_lowercase()).collect());
        self
    }

    /// Shorthand for [`set_schemes`](Self::set_schemes) with a single scheme
    pub fn set_scheme(&mut self, scheme: &str) -> &mut Self {
        self.set_schemes(&[scheme])
    }

    #[must_use]
    pub fn allows_scheme(&self, scheme: &str) -> bool {
        match &self.schemes {
            None => true,
            Some(list) => list.iter().any(|s| s.eq_ignore_ascii_case(scheme)),
        }
    }

    #[must_use]
    pub fn allows_any_scheme(&self) -> bool {
        self.schemes.is_none()
    }

    /// Options passed through to the matcher untouched
    #[must_use]
    pub fn options(&self) -> &HashMap<String, Value> {
        &self.options
    }

    pub fn set_options(&mut self, options: HashMap<String, Value>) -> &mut Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn parent_group(&self) -> Option<&GroupRef> {
        self.parent_group.as_ref()
    }

    /// Attach the group that produced this route.
    ///
    /// Prepends the group's prefix unless the path already starts with it, so
    /// applying the same group twice leaves the path unchanged. A trailing `/` on
    /// the prefix is ignored. The reference points at the last group applied.
    pub fn set_parent_group(&mut self, group: GroupRef) -> &mut Self {
        let prefix = group.prefix.trim_end_matches('/');
        if !self.path.starts_with(prefix) {
            self.path = super::join_path(prefix, &self.path);
        }
        debug!(path = %self.path, group = %group.id, "Route attached to group");
        self.parent_group = Some(group);
        self
    }

    /// Record `group` as the parent without touching the path.
    ///
    /// Used by groups, which have already prefixed the path. A reference that is
    /// already present wins, so nested groups leave the innermost one in place.
    pub(crate) fn attach_group(&mut self, group: GroupRef) {
        if self.parent_group.is_none() {
            self.parent_group = Some(group);
        }
    }

    /// Evaluate the refinements a path match cannot express.
    ///
    /// True when the request's scheme is allowed, and host and port are either
    /// unconstrained or equal to the request's. Host comparison ignores ASCII case.
    #[must_use]
    pub fn matches_conditions<R: RouteRequest + ?Sized>(&self, request: &R) -> bool {
        if !self.allows_scheme(request.scheme()) {
            return false;
        }
        if let Some(host) = &self.host {
            if !request.host().is_some_and(|h| h.eq_ignore_ascii_case(host)) {
                return false;
            }
        }
        match self.port {
            Some(port) => request.port() == Some(port),
            None => true,
        }
    }
}

impl MiddlewareAware for Route {
    fn middleware_stack(&self) -> &MiddlewareStack {
        &self.middleware
    }

    fn middleware_stack_mut(&mut self) -> &mut MiddlewareStack {
        &mut self.middleware
    }
}

use http::header::HOST;

/// The parts of an incoming request routes are evaluated against.
///
/// Routes only read these values and never mutate the request.
pub trait RouteRequest {
    fn path(&self) -> &str;

    fn method(&self) -> &str;

    /// Lowercase scheme, e.g. `https`
    fn scheme(&self) -> &str;

    fn host(&self) -> Option<&str>;

    fn port(&self) -> Option<u16>;
}

/// Reads the target from the URI first and falls back to the `Host` header.
///
/// Server-side requests usually carry an origin-form URI (`/path?query`), in which
/// case the scheme defaults to `http` and the port to the scheme's default.
impl<B> RouteRequest for http::Request<B> {
    fn path(&self) -> &str {
        self.uri().path()
    }

    fn method(&self) -> &str {
        http::Request::method(self).as_str()
    }

    fn scheme(&self) -> &str {
        self.uri().scheme_str().unwrap_or("http")
    }

    fn host(&self) -> Option<&str> {
        self.uri().host().or_else(|| host_header(self).map(|(host, _)| host))
    }

    fn port(&self) -> Option<u16> {
        self.uri()
            .port_u16()
            .or_else(|| host_header(self).and_then(|(_, port)| port))
            .or_else(|| default_port(RouteRequest::scheme(self)))
    }
}

fn host_header<B>(req: &http::Request<B>) -> Option<(&str, Option<u16>)> {
    let raw = req.headers().get(HOST)?.to_str().ok()?;
    match raw.rsplit_once(':') {
        // bracketed IPv6 without a port ends in ']'
        Some((host, port)) if !port.ends_with(']') => Some((host, port.parse().ok())),
        _ => Some((raw, None)),
    }
}

fn default_port(scheme: &str) -> Option<u16> {
    match scheme {
        "http" | "ws" => Some(80),
        "https" | "wss" => Some(443),
        _ => None,
    }
}

#![allow(dead_code)]

pub mod matchers {
    use brrtroutes::collector::RouteMatcher;
    use brrtroutes::route::Route;

    /// Accepts every route and records the paths it was given, in order
    #[derive(Debug, Default)]
    pub struct RecordingMatcher {
        pub paths: Vec<String>,
    }

    impl RouteMatcher for RecordingMatcher {
        fn add_route(&mut self, route: Route) -> anyhow::Result<Route> {
            self.paths.push(route.path().to_string());
            Ok(route)
        }
    }

    /// Refuses any path containing `needle`
    #[derive(Debug)]
    pub struct RejectingMatcher {
        pub needle: &'static str,
    }

    impl RouteMatcher for RejectingMatcher {
        fn add_route(&mut self, route: Route) -> anyhow::Result<Route> {
            if route.path().contains(self.needle) {
                anyhow::bail!("cannot compile '{}'", route.path());
            }
            Ok(route)
        }
    }
}

pub mod requests {
    use brrtroutes::middleware::HttpRequest;
    use bytes::Bytes;

    pub fn request(method: &str, uri: &str) -> HttpRequest {
        http::Request::builder()
            .method(method)
            .uri(uri)
            .body(Bytes::new())
            .unwrap()
    }

    /// Origin-form request carrying its authority in the `Host` header
    pub fn request_with_host(method: &str, path: &str, host: &str) -> HttpRequest {
        http::Request::builder()
            .method(method)
            .uri(path)
            .header(http::header::HOST, host)
            .body(Bytes::new())
            .unwrap()
    }
}

pub mod units {
    use std::sync::Arc;

    use brrtroutes::middleware::{
        handler_fn, HttpRequest, HttpResponse, Middleware, RequestHandler,
    };
    use brrtroutes::DispatchError;
    use bytes::Bytes;
    use parking_lot::Mutex;

    pub type CallLog = Arc<Mutex<Vec<String>>>;

    /// Middleware that appends its tag to a shared log, then delegates
    pub struct Tracing {
        pub tag: &'static str,
        pub log: CallLog,
    }

    impl Tracing {
        pub fn new(tag: &'static str, log: &CallLog) -> Self {
            Self {
                tag,
                log: Arc::clone(log),
            }
        }
    }

    impl Middleware for Tracing {
        fn process(
            &self,
            request: HttpRequest,
            next: &dyn RequestHandler,
        ) -> Result<HttpResponse, DispatchError> {
            self.log.lock().push(self.tag.to_string());
            next.handle(request)
        }
    }

    /// Final handler that logs "handler" and answers with the request path
    pub fn echo_path(log: &CallLog) -> Arc<dyn RequestHandler> {
        let log = Arc::clone(log);
        Arc::new(handler_fn(move |req| {
            log.lock().push("handler".to_string());
            Ok(http::Response::new(Bytes::from(req.uri().path().to_string())))
        }))
    }
}

pub mod tracing_capture {
    use std::sync::Arc;

    use parking_lot::Mutex;
    use tracing::field::{Field, Visit};
    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::layer::{Context, SubscriberExt};
    use tracing_subscriber::{Layer, Registry};

    #[derive(Debug, Clone)]
    pub struct CapturedEvent {
        pub level: Level,
        pub message: String,
        pub fields: Vec<(String, String)>,
    }

    impl CapturedEvent {
        pub fn field(&self, name: &str) -> Option<&str> {
            self.fields
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.as_str())
        }
    }

    #[derive(Default)]
    struct FieldVisitor {
        message: String,
        fields: Vec<(String, String)>,
    }

    impl Visit for FieldVisitor {
        fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
            let value = format!("{value:?}");
            if field.name() == "message" {
                self.message = value;
            } else {
                self.fields.push((field.name().to_string(), value));
            }
        }

        fn record_str(&mut self, field: &Field, value: &str) {
            if field.name() == "message" {
                self.message = value.to_string();
            } else {
                self.fields.push((field.name().to_string(), value.to_string()));
            }
        }
    }

    struct CaptureLayer {
        events: Arc<Mutex<Vec<CapturedEvent>>>,
    }

    impl<S: Subscriber> Layer<S> for CaptureLayer {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            let mut visitor = FieldVisitor::default();
            event.record(&mut visitor);
            self.events.lock().push(CapturedEvent {
                level: *event.metadata().level(),
                message: visitor.message,
                fields: visitor.fields,
            });
        }
    }

    /// Captures events emitted on the current thread while alive
    pub struct TestTracing {
        events: Arc<Mutex<Vec<CapturedEvent>>>,
        _guard: tracing::subscriber::DefaultGuard,
    }

    impl TestTracing {
        pub fn init() -> Self {
            let events = Arc::new(Mutex::new(Vec::new()));
            let subscriber = Registry::default().with(CaptureLayer {
                events: Arc::clone(&events),
            });
            let guard = tracing::subscriber::set_default(subscriber);
            Self {
                events,
                _guard: guard,
            }
        }

        pub fn events(&self) -> Vec<CapturedEvent> {
            self.events.lock().clone()
        }

        pub fn at_level(&self, level: Level) -> Vec<CapturedEvent> {
            self.events
                .lock()
                .iter()
                .filter(|e| e.level == level)
                .cloned()
                .collect()
        }
    }
}

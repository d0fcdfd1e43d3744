use http::Method;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};

use crate::context::Context;
use crate::middleware::HandlerFunc;
use crate::router::{RouteMatch, Router};

fn not_found(c: &mut Context) {
    let body = format!("404 NOT FOUND: {}\n", c.path());
    c.string(404, body);
}

/// Route table plus the handler registered for every `METHOD-pattern` key.
///
/// Built during setup and then only read: [`handle`](Self::handle) takes
/// `&self` so one dispatcher can serve every request coroutine at once.
#[derive(Clone, Default)]
pub struct Dispatcher {
    router: Router,
    handlers: HashMap<String, HandlerFunc>,
}

fn handler_key(method: &Method, pattern: &str) -> String {
    format!("{method}-{pattern}")
}

impl Dispatcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` as the route handler for `method` + `pattern`.
    ///
    /// Registering the same method and pattern again replaces the handler.
    pub fn add_route(&mut self, method: Method, pattern: &str, handler: HandlerFunc) {
        let key = handler_key(&method, pattern);
        self.router.add_route(method, pattern);

        if self.handlers.insert(key.clone(), handler).is_some() {
            warn!(route = %key, "Replaced existing route handler");
        } else {
            info!(
                route = %key,
                total_handlers = self.handlers.len(),
                "Route registered"
            );
        }
    }

    #[must_use]
    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Resolve the request and run `chain` followed by the route handler.
    ///
    /// When no route matches, the not-found handler takes the route handler's
    /// place so middleware still runs around it.
    pub fn handle(&self, c: &mut Context, mut chain: Vec<HandlerFunc>) {
        let matched = self
            .router
            .get_route(c.method(), c.path())
            .and_then(|RouteMatch { pattern, params }| {
                let handler = self.handlers.get(&handler_key(c.method(), &pattern))?;
                Some((Arc::clone(handler), params))
            });

        match matched {
            Some((handler, params)) => {
                c.params = params;
                chain.push(handler);
            }
            None => {
                warn!(
                    request_id = %c.request_id,
                    method = %c.method(),
                    path = %c.path(),
                    "No route matched"
                );
                chain.push(Arc::new(not_found));
            }
        }

        c.assemble(chain);
        c.next();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::Request;

    fn dispatcher() -> Dispatcher {
        let mut d = Dispatcher::new();
        d.add_route(
            Method::GET,
            "/hello/:name",
            Arc::new(|c: &mut Context| {
                let body = format!("hello {}", c.param("name"));
                c.string(200, body);
            }),
        );
        d
    }

    #[test]
    fn test_dispatch_binds_params() {
        let d = dispatcher();
        let mut c = Context::new(Request::new(Method::GET, "/hello/cweb"));
        d.handle(&mut c, Vec::new());
        assert_eq!(c.param("name"), "cweb");
        assert_eq!(c.response().body_string(), "hello cweb");
    }

    #[test]
    fn test_dispatch_not_found() {
        let d = dispatcher();
        let mut c = Context::new(Request::new(Method::GET, "/nope"));
        d.handle(&mut c, Vec::new());
        assert_eq!(c.status_code(), 404);
        assert_eq!(c.response().body_string(), "404 NOT FOUND: /nope\n");
    }

    #[test]
    fn test_dispatch_runs_middleware_first() {
        let d = dispatcher();
        let mut c = Context::new(Request::new(Method::GET, "/hello/cweb"));
        let mw: HandlerFunc = Arc::new(|c: &mut Context| {
            c.set_header("X-Middleware", "1");
            c.next();
        });
        d.handle(&mut c, vec![mw]);
        let res = c.into_response();
        assert_eq!(res.header("X-Middleware"), Some("1"));
        assert_eq!(res.body_string(), "hello cweb");
    }

    #[test]
    fn test_replacing_a_handler() {
        let mut d = dispatcher();
        d.add_route(
            Method::GET,
            "/hello/:name",
            Arc::new(|c: &mut Context| c.string(200, "replaced")),
        );
        let mut c = Context::new(Request::new(Method::GET, "/hello/x"));
        d.handle(&mut c, Vec::new());
        assert_eq!(c.response().body_string(), "replaced");
        assert_eq!(d.router().routes().len(), 1);
    }
}

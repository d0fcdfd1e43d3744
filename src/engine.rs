//! # Engine Module
//!
//! The [`Engine`] is the application object: it owns the dispatcher (route
//! table and route handlers), the route groups with their middleware and the
//! optional HTML template set. Everything is registered up front; once
//! [`Engine::run`] moves the engine behind an `Arc` it is only read.
//!
//! ## Groups
//!
//! A [`RouterGroup`] is a path prefix plus middleware. Routes registered on a
//! group get the prefix prepended; a request runs the middleware of every
//! group whose prefix is a prefix of its path, in the order the groups were
//! created. The engine itself acts as the root group with an empty prefix, so
//! its middleware applies to every request.
//!
//! ```rust
//! use cweb::{middleware::Logger, Context, Engine};
//!
//! let mut engine = Engine::new();
//! engine.use_middleware(Logger);
//! engine.get("/", |c: &mut Context| c.string(200, "index"));
//!
//! let mut v1 = engine.group("/v1");
//! v1.get("/hello/:name", |c: &mut Context| {
//!     let body = format!("hello {}", c.param("name"));
//!     c.string(200, body);
//! });
//! ```

use anyhow::Result;
use http::Method;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use crate::context::{Context, ResponseWriter};
use crate::dispatcher::Dispatcher;
use crate::middleware::{Handler, HandlerFunc, Logger, Recovery};
use crate::server::{AppService, HttpServer, Request, ServerHandle};
use crate::static_files::StaticFiles;
use crate::template::Templates;

struct GroupEntry {
    prefix: String,
    middlewares: Vec<HandlerFunc>,
}

pub struct Engine {
    /// Index 0 is the root group
    groups: Vec<GroupEntry>,
    dispatcher: Dispatcher,
    templates: Option<Arc<Templates>>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// An engine with no middleware
    #[must_use]
    pub fn new() -> Self {
        Self {
            groups: vec![GroupEntry {
                prefix: String::new(),
                middlewares: Vec::new(),
            }],
            dispatcher: Dispatcher::new(),
            templates: None,
        }
    }

    /// An engine with [`Logger`] and [`Recovery`] installed
    #[must_use]
    pub fn default_engine() -> Self {
        let mut engine = Self::new();
        engine.use_middleware(Logger).use_middleware(Recovery);
        engine
    }

    fn root(&mut self) -> RouterGroup<'_> {
        RouterGroup {
            engine: self,
            index: 0,
        }
    }

    /// Create a group below the root
    pub fn group(&mut self, prefix: &str) -> RouterGroup<'_> {
        self.root().into_group(prefix)
    }

    /// Add middleware that runs for every request
    pub fn use_middleware<H: Handler + 'static>(&mut self, handler: H) -> &mut Self {
        self.root().use_middleware(handler);
        self
    }

    pub fn add_route<H: Handler + 'static>(
        &mut self,
        method: Method,
        path: &str,
        handler: H,
    ) -> &mut Self {
        self.root().add_route(method, path, handler);
        self
    }

    pub fn get<H: Handler + 'static>(&mut self, path: &str, handler: H) -> &mut Self {
        self.add_route(Method::GET, path, handler)
    }

    pub fn post<H: Handler + 'static>(&mut self, path: &str, handler: H) -> &mut Self {
        self.add_route(Method::POST, path, handler)
    }

    pub fn put<H: Handler + 'static>(&mut self, path: &str, handler: H) -> &mut Self {
        self.add_route(Method::PUT, path, handler)
    }

    pub fn delete<H: Handler + 'static>(&mut self, path: &str, handler: H) -> &mut Self {
        self.add_route(Method::DELETE, path, handler)
    }

    /// Serve files from `root` under `relative` (see [`RouterGroup::static_files`])
    pub fn static_files(&mut self, relative: &str, root: impl Into<PathBuf>) -> &mut Self {
        self.root().static_files(relative, root);
        self
    }

    /// Use `templates` for [`Context::html`]
    pub fn set_templates(&mut self, templates: Templates) -> &mut Self {
        self.templates = Some(Arc::new(templates));
        self
    }

    /// Load every template below `dir` (see [`Templates::from_dir`])
    ///
    /// # Errors
    ///
    /// Fails if the directory cannot be read or a template does not compile.
    pub fn load_templates(&mut self, dir: impl Into<PathBuf>) -> Result<&mut Self> {
        let templates = Templates::from_dir(dir.into())?;
        Ok(self.set_templates(templates))
    }

    #[must_use]
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Log the route table
    pub fn dump_routes(&self) {
        self.dispatcher.router().dump_routes();
    }

    /// Run one request through middleware and routing, returning the response.
    ///
    /// This is what the server calls for every request; it needs no socket, so
    /// it is also the way to exercise an application in tests.
    #[must_use]
    pub fn handle(&self, req: Request) -> ResponseWriter {
        let middlewares: Vec<HandlerFunc> = self
            .groups
            .iter()
            .filter(|group| req.path.starts_with(&group.prefix))
            .flat_map(|group| group.middlewares.iter().cloned())
            .collect();

        let mut c = Context::new(req);
        c.set_templates(self.templates.clone());
        self.dispatcher.handle(&mut c, middlewares);
        c.into_response()
    }

    /// Start serving on `addr`.
    ///
    /// The engine is frozen from here on: it is moved behind an `Arc` and
    /// shared read-only by every request coroutine.
    ///
    /// # Errors
    ///
    /// Returns an error if the address is invalid or cannot be bound.
    pub fn run(self, addr: &str) -> std::io::Result<ServerHandle> {
        info!(addr = %addr, "Starting HTTP server");
        HttpServer(AppService::new(Arc::new(self))).start(addr)
    }
}

/// A path prefix with its own middleware, borrowed from an [`Engine`].
pub struct RouterGroup<'a> {
    engine: &'a mut Engine,
    index: usize,
}

impl<'a> RouterGroup<'a> {
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.engine.groups[self.index].prefix
    }

    fn push_group(engine: &mut Engine, prefix: String) -> usize {
        info!(prefix = %prefix, "Route group created");
        engine.groups.push(GroupEntry {
            prefix,
            middlewares: Vec::new(),
        });
        engine.groups.len() - 1
    }

    fn into_group(self, prefix: &str) -> RouterGroup<'a> {
        let prefix = format!("{}{}", self.prefix(), prefix);
        let index = Self::push_group(self.engine, prefix);
        RouterGroup {
            engine: self.engine,
            index,
        }
    }

    /// Create a nested group; its prefix is this group's prefix plus `prefix`
    pub fn group(&mut self, prefix: &str) -> RouterGroup<'_> {
        let prefix = format!("{}{}", self.prefix(), prefix);
        let index = Self::push_group(self.engine, prefix);
        RouterGroup {
            engine: &mut *self.engine,
            index,
        }
    }

    /// Add middleware for requests below this group's prefix
    pub fn use_middleware<H: Handler + 'static>(&mut self, handler: H) -> &mut Self {
        self.engine.groups[self.index]
            .middlewares
            .push(Arc::new(handler));
        self
    }

    pub fn add_route<H: Handler + 'static>(
        &mut self,
        method: Method,
        comp: &str,
        handler: H,
    ) -> &mut Self {
        let pattern = format!("{}{}", self.prefix(), comp);
        self.engine
            .dispatcher
            .add_route(method, &pattern, Arc::new(handler));
        self
    }

    pub fn get<H: Handler + 'static>(&mut self, path: &str, handler: H) -> &mut Self {
        self.add_route(Method::GET, path, handler)
    }

    pub fn post<H: Handler + 'static>(&mut self, path: &str, handler: H) -> &mut Self {
        self.add_route(Method::POST, path, handler)
    }

    pub fn put<H: Handler + 'static>(&mut self, path: &str, handler: H) -> &mut Self {
        self.add_route(Method::PUT, path, handler)
    }

    pub fn delete<H: Handler + 'static>(&mut self, path: &str, handler: H) -> &mut Self {
        self.add_route(Method::DELETE, path, handler)
    }

    /// Serve the files below `root` at `GET <prefix><relative>/*filepath`.
    pub fn static_files(&mut self, relative: &str, root: impl Into<PathBuf>) -> &mut Self {
        let pattern = format!("{}/*filepath", relative.trim_end_matches('/'));
        self.get(&pattern, StaticFiles::new(root))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn text(c: &'static str) -> impl Fn(&mut Context) + Send + Sync {
        move |ctx: &mut Context| ctx.string(200, c)
    }

    #[test]
    fn test_group_prefixes_nest() {
        let mut engine = Engine::new();
        {
            let mut v1 = engine.group("/v1");
            assert_eq!(v1.prefix(), "/v1");
            let nested = v1.group("/admin");
            assert_eq!(nested.prefix(), "/v1/admin");
        }
        engine.group("/v2").get("/x", text("v2x"));

        let res = engine.handle(Request::new(Method::GET, "/v2/x"));
        assert_eq!(res.body_string(), "v2x");
    }

    #[test]
    fn test_group_middleware_selected_by_prefix() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut engine = Engine::new();

        let root_seen = Arc::clone(&seen);
        engine.use_middleware(move |c: &mut Context| {
            root_seen.lock().unwrap().push("root");
            c.next();
        });
        engine.get("/open", text("open"));

        let v1_seen = Arc::clone(&seen);
        let mut v1 = engine.group("/v1");
        v1.use_middleware(move |c: &mut Context| {
            v1_seen.lock().unwrap().push("v1");
            c.next();
        });
        v1.get("/closed", text("closed"));

        let _ = engine.handle(Request::new(Method::GET, "/open"));
        assert_eq!(*seen.lock().unwrap(), vec!["root"]);

        seen.lock().unwrap().clear();
        let res = engine.handle(Request::new(Method::GET, "/v1/closed"));
        assert_eq!(*seen.lock().unwrap(), vec!["root", "v1"]);
        assert_eq!(res.body_string(), "closed");
    }

    #[test]
    fn test_middleware_runs_for_not_found() {
        let mut engine = Engine::new();
        engine.use_middleware(|c: &mut Context| {
            c.set_header("X-Seen", "1");
            c.next();
        });
        let res = engine.handle(Request::new(Method::GET, "/missing"));
        assert_eq!(res.status(), 404);
        assert_eq!(res.header("X-Seen"), Some("1"));
    }

    #[test]
    fn test_set_templates_reaches_context() {
        let mut templates = Templates::new();
        templates.add_template("t.html", "hi {{ who }}").unwrap();
        let mut engine = Engine::new();
        engine.set_templates(templates);
        engine.get("/", |c: &mut Context| {
            c.html(200, "t.html", serde_json::json!({ "who": "there" }))
        });
        let res = engine.handle(Request::new(Method::GET, "/"));
        assert_eq!(res.body_string(), "hi there");
    }

    #[test]
    fn test_static_files_route() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("css")).unwrap();
        std::fs::write(dir.path().join("css/a.css"), "body{}").unwrap();

        let mut engine = Engine::new();
        engine.static_files("/assets", dir.path());

        let res = engine.handle(Request::new(Method::GET, "/assets/css/a.css"));
        assert_eq!(res.status(), 200);
        assert_eq!(res.header("Content-Type"), Some("text/css"));
        assert_eq!(res.body_string(), "body{}");

        let res = engine.handle(Request::new(Method::GET, "/assets/css/b.css"));
        assert_eq!(res.status(), 404);

        let res = engine.handle(Request::new(Method::GET, "/assets/../Cargo.toml"));
        assert_eq!(res.status(), 404);
    }

    #[test]
    fn test_captures_see_decoded_path() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("my file.txt"), "spaced").unwrap();

        let mut engine = Engine::new();
        engine.get("/hello/:name", |c: &mut Context| {
            let body = c.param("name").to_string();
            c.string(200, body);
        });
        engine.static_files("/assets", dir.path());

        let res = engine.handle(Request::new(Method::GET, "/hello/geek%20tutu"));
        assert_eq!(res.body_string(), "geek tutu");

        let res = engine.handle(Request::new(Method::GET, "/assets/my%20file.txt"));
        assert_eq!(res.status(), 200);
        assert_eq!(res.body_string(), "spaced");
    }
}

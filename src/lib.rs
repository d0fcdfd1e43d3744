//! # cweb
//!
//! **cweb** is a small HTTP framework on the `may` coroutine runtime: a
//! per-method segment trie for routing with `:name` and `*name` captures, and
//! a per-request [`Context`] that drives an ordered chain of middleware and a
//! final handler.
//!
//! ## Architecture
//!
//! - **[`router`]** - Segment trie per HTTP method, pattern parsing and parameter extraction
//! - **[`context`]** - Per-request state, the `next` / `abort` chain and response helpers
//! - **[`dispatcher`]** - Route handler table keyed by `METHOD-pattern`, not-found fallback
//! - **[`engine`]** - Application object with route groups and group middleware
//! - **[`middleware`]** - The [`Handler`] trait plus logger, recovery and token auth
//! - **[`server`]** - `may_minihttp` transport adapter
//! - **[`template`]** / **[`static_files`]** - HTML rendering and file serving
//! - **[`logging`]** / **[`runtime_config`]** - Environment-driven setup
//!
//! ### Request flow
//!
//! ```text
//! may_minihttp ──> server::parse_request ──> Engine::handle
//!                                               │
//!                    group middleware (by path prefix, creation order)
//!                                               │
//!                    Dispatcher::handle: Router::get_route ──> params
//!                                               │
//!                    Context::assemble + next: mw1 -> mw2 -> handler
//!                                               │
//! may_minihttp <── server::write_response <── ResponseWriter
//! ```
//!
//! ## Example
//!
//! ```rust
//! use cweb::{Context, Engine, H};
//! use cweb::server::Request;
//! use http::Method;
//!
//! let mut engine = Engine::default_engine();
//! engine.get("/hello/:name", |c: &mut Context| {
//!     let mut body = H::new();
//!     body.insert("name".to_string(), c.param("name").into());
//!     c.json(200, &body);
//! });
//!
//! let res = engine.handle(Request::new(Method::GET, "/hello/geektutu"));
//! assert_eq!(res.status(), 200);
//! assert_eq!(res.body_string(), r#"{"name":"geektutu"}"#);
//! ```
//!
//! Serving over HTTP is `engine.run("127.0.0.1:9999")?.join()`.

pub mod cli;
pub mod context;
pub mod dispatcher;
pub mod engine;
pub mod ids;
pub mod logging;
pub mod middleware;
pub mod router;
pub mod runtime_config;
pub mod server;
pub mod static_files;
pub mod template;

pub use context::{Context, ResponseError, ResponseWriter, H};
pub use engine::{Engine, RouterGroup};
pub use middleware::{Handler, HandlerFunc};
pub use router::Router;
pub use server::Request;

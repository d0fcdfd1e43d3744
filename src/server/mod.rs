//! HTTP transport: converts `may_minihttp` requests into [`Request`]s, runs
//! them through the [`Engine`](crate::Engine) and writes the result back.

pub mod http_server;
pub mod request;
pub mod response;
pub mod service;

pub use http_server::{HttpServer, ServerHandle};
pub use request::{decode_path, parse_query_params, parse_request, Request};
pub use response::{status_reason, write_response};
pub use service::AppService;

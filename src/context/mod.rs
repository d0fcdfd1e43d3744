//! # Context Module
//!
//! Per-request execution context and the handler chain it drives.
//!
//! A [`Context`] wraps one request/response exchange. The dispatcher fills in
//! the captured route parameters, installs the chain (global middleware, group
//! middleware, then the route handler) with [`Context::assemble`] and starts
//! it with [`Context::next`].
//!
//! ## Middleware flow
//!
//! Handlers run strictly nested on the request's coroutine. A middleware that
//! calls `next()` sees the downstream handlers complete before its post-logic
//! runs:
//!
//! ```text
//! logger pre  -> auth pre -> route handler -> auth post -> logger post
//! ```
//!
//! [`Context::abort`] ends the chain early and writes a JSON error body; no
//! handler that has not started yet will run afterwards.
//!
//! ## Responses
//!
//! Output helpers (`string`, `json`, `data`, `html`) buffer into a
//! [`ResponseWriter`] that follows HTTP's write-once status rule. Body
//! construction failures are turned into a `500` abort rather than an error
//! the handler has to deal with.

mod core;
mod error;
mod response;

pub use core::{Context, H};
pub use error::ResponseError;
pub use response::ResponseWriter;

//! # Middleware Module
//!
//! The [`Handler`] trait shared by middleware and route handlers, plus the
//! stock middleware:
//!
//! - [`Logger`] - one `info` line per request with status and latency
//! - [`Recovery`] - converts handler panics into `500` responses
//! - [`AuthMiddleware`] - static token check that aborts with `401`

mod auth;
mod core;
mod logger;
mod recovery;

pub use auth::AuthMiddleware;
pub use core::{Handler, HandlerFunc};
pub use logger::Logger;
pub use recovery::Recovery;

//! # Dispatcher Module
//!
//! Connects the [`router`](crate::router) to the handler chain. The
//! [`Dispatcher`] owns the route table together with the handler registered for
//! each method and pattern. For one request it:
//!
//! 1. looks the method and path up in the route table
//! 2. stores the captured parameters on the [`Context`](crate::Context)
//! 3. appends the route handler (or the 404 handler) to the middleware chain
//! 4. starts the chain
//!
//! Route handlers are plain [`Handler`](crate::Handler)s; they run on the
//! request's own coroutine, nested inside the middleware that precede them.

mod core;

pub use core::Dispatcher;

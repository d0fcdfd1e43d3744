use std::sync::Arc;

use crate::context::Context;

/// A step in a request's handler chain.
///
/// Middleware and route handlers share this one trait. A middleware runs its
/// pre-logic, calls [`Context::next`] to run everything downstream, then runs
/// its post-logic; a route handler usually just writes the response.
///
/// Plain closures taking `&mut Context` implement it:
///
/// ```rust
/// use cweb::{Context, Handler};
///
/// let hello = |c: &mut Context| c.string(200, "hello");
/// fn assert_handler<H: Handler>(_: &H) {}
/// assert_handler(&hello);
/// ```
pub trait Handler: Send + Sync {
    fn handle(&self, c: &mut Context);
}

impl<F> Handler for F
where
    F: Fn(&mut Context) + Send + Sync,
{
    fn handle(&self, c: &mut Context) {
        self(c)
    }
}

/// Shared handler as stored in route tables and chains
pub type HandlerFunc = Arc<dyn Handler>;

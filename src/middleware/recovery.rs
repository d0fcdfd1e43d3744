use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use tracing::error;

use super::Handler;
use crate::context::Context;

/// Turns a panic anywhere downstream into a `500 Internal Server Error`.
///
/// Requires the default `panic = "unwind"` strategy.
pub struct Recovery;

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "unknown panic payload"
    }
}

impl Handler for Recovery {
    fn handle(&self, c: &mut Context) {
        if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| c.next())) {
            error!(
                request_id = %c.request_id,
                method = %c.method(),
                path = %c.path(),
                panic = %panic_message(payload.as_ref()),
                "Handler panicked"
            );
            c.abort(500, "Internal Server Error");
        }
    }
}

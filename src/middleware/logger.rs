use std::time::Instant;

use tracing::info;

use super::Handler;
use crate::context::Context;

/// Logs one line per request once the rest of the chain has finished.
pub struct Logger;

impl Handler for Logger {
    fn handle(&self, c: &mut Context) {
        let start = Instant::now();
        c.next();
        info!(
            request_id = %c.request_id,
            method = %c.method(),
            path = %c.path(),
            status = c.response().status(),
            latency_us = start.elapsed().as_micros() as u64,
            "Request completed"
        );
    }
}

use http::StatusCode;
use may_minihttp::Response;
use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use tracing::warn;

use crate::context::ResponseWriter;

/// `may_minihttp` keeps a fixed number of header slots per response
const MAX_RESPONSE_HEADERS: usize = 15;

/// Distinct header lines the shared table keeps for reuse
const MAX_INTERNED_HEADERS: usize = 4096;

/// `'static` storage for header lines.
///
/// `may_minihttp` only accepts `&'static str` headers, so each line is leaked.
/// Up to `capacity` distinct lines are remembered and handed out again; once
/// the table is full, new lines are still leaked and written but no longer
/// remembered, so high-cardinality values (`Location`, `ETag`) cannot crowd
/// out the ones that repeat.
pub(crate) struct HeaderInterner {
    lines: Mutex<HashSet<&'static str>>,
    capacity: usize,
    overflowed: AtomicBool,
}

impl HeaderInterner {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            lines: Mutex::new(HashSet::new()),
            capacity,
            overflowed: AtomicBool::new(false),
        }
    }

    pub(crate) fn intern(&self, line: String) -> &'static str {
        let mut lines = match self.lines.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(existing) = lines.get(line.as_str()) {
            return *existing;
        }
        let leaked: &'static str = Box::leak(line.into_boxed_str());
        if lines.len() < self.capacity {
            lines.insert(leaked);
        } else if !self.overflowed.swap(true, Ordering::Relaxed) {
            warn!(
                capacity = self.capacity,
                "Header line table full; new header lines are no longer reused"
            );
        }
        leaked
    }
}

static HEADER_LINES: Lazy<HeaderInterner> =
    Lazy::new(|| HeaderInterner::new(MAX_INTERNED_HEADERS));

/// Canonical reason phrase for `status`
#[must_use]
pub fn status_reason(status: u16) -> &'static str {
    StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("Unknown")
}

/// Copy a finished [`ResponseWriter`] onto the wire response.
pub fn write_response(res: &mut Response, writer: ResponseWriter) {
    let (status, headers, body) = writer.into_parts();
    res.status_code(usize::from(status), status_reason(status));

    for (i, (name, value)) in headers.into_iter().enumerate() {
        if i >= MAX_RESPONSE_HEADERS {
            warn!(header = %name, "Response header limit reached, header dropped");
            continue;
        }
        res.header(HEADER_LINES.intern(format!("{name}: {value}")));
    }

    res.body_vec(body);
}

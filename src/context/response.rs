use tracing::{debug, warn};

/// Buffered response built up by handlers.
///
/// Mirrors the write-once rules of a real HTTP response writer: the status
/// line is committed by the first [`write_header`](Self::write_header) (or
/// implicitly as `200` by the first body write), later status writes are
/// ignored, and headers set after the commit are dropped. The transport
/// flushes the buffer once the handler chain has finished.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseWriter {
    status: Option<u16>,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
}

impl ResponseWriter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a header, replacing any existing value with the same name.
    ///
    /// Ignored once the status has been committed.
    pub fn set_header(&mut self, key: &str, value: &str) {
        if self.is_committed() {
            debug!(header = %key, "Header set after status was committed; ignored");
            return;
        }
        match self
            .headers
            .iter_mut()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
        {
            Some(entry) => entry.1 = value.to_string(),
            None => self.headers.push((key.to_string(), value.to_string())),
        }
    }

    /// Commit the status code.
    ///
    /// Returns `false` and leaves the committed status untouched if one was
    /// already written.
    pub fn write_header(&mut self, code: u16) -> bool {
        if let Some(committed) = self.status {
            warn!(
                committed_status = committed,
                ignored_status = code,
                "Superfluous status write"
            );
            return false;
        }
        self.status = Some(code);
        true
    }

    /// Append to the body, committing `200` first if no status was written.
    pub fn write(&mut self, data: &[u8]) {
        if self.status.is_none() {
            self.write_header(200);
        }
        self.body.extend_from_slice(data);
    }

    #[must_use]
    pub fn is_committed(&self) -> bool {
        self.status.is_some()
    }

    /// Status to send; `200` when nothing was committed
    #[must_use]
    pub fn status(&self) -> u16 {
        self.status.unwrap_or(200)
    }

    #[must_use]
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Body as text, lossily decoded
    #[must_use]
    pub fn body_string(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    #[must_use]
    pub fn into_parts(self) -> (u16, Vec<(String, String)>, Vec<u8>) {
        (self.status.unwrap_or(200), self.headers, self.body)
    }
}

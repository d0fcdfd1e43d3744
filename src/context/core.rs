use http::Method;
use serde::Serialize;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tracing::error;

use super::error::ResponseError;
use super::response::ResponseWriter;
use crate::ids::RequestId;
use crate::middleware::HandlerFunc;
use crate::server::Request;
use crate::template::Templates;

/// Shorthand for building JSON objects; keys serialize in sorted order
pub type H = BTreeMap<String, Value>;

/// Per-request state threaded through a handler chain.
///
/// Holds the inbound request, the parameters captured by the router, the
/// ordered handler chain and the response being built. One `Context` lives
/// for exactly one request and is never shared.
pub struct Context {
    /// The inbound request
    pub req: Request,
    path: String,
    method: Method,
    /// Parameters captured by the matched route
    pub params: HashMap<String, String>,
    pub request_id: RequestId,
    status_code: u16,
    writer: ResponseWriter,
    handlers: Vec<HandlerFunc>,
    /// Number of handlers entered so far
    index: usize,
    templates: Option<Arc<Templates>>,
}

impl Context {
    #[must_use]
    pub fn new(req: Request) -> Self {
        let request_id = RequestId::from_header_or_new(req.header("x-request-id"));
        Self {
            path: req.path.clone(),
            method: req.method.clone(),
            req,
            params: HashMap::new(),
            request_id,
            status_code: 200,
            writer: ResponseWriter::new(),
            handlers: Vec::new(),
            index: 0,
            templates: None,
        }
    }

    pub(crate) fn set_templates(&mut self, templates: Option<Arc<Templates>>) {
        self.templates = templates;
    }

    /// Install the handler chain and rewind to before its first handler.
    pub fn assemble(&mut self, handlers: Vec<HandlerFunc>) {
        self.handlers = handlers;
        self.index = 0;
    }

    /// Run the remaining handlers of the chain, in order.
    ///
    /// A handler may call `next` itself to run everything after it and then
    /// resume its own post-logic once they return. Handlers already entered,
    /// directly or by a nested `next`, are never run again.
    pub fn next(&mut self) {
        while self.index < self.handlers.len() {
            let handler = Arc::clone(&self.handlers[self.index]);
            self.index += 1;
            handler.handle(self);
        }
    }

    /// Stop the chain and answer with `{"message": message}`.
    ///
    /// No handler that has not been entered yet will run, including when an
    /// enclosing `next` resumes.
    pub fn abort(&mut self, code: u16, message: &str) {
        self.index = self.handlers.len();
        self.json(code, &serde_json::json!({ "message": message }));
    }

    /// True once `abort` was called or the whole chain has been entered
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.index >= self.handlers.len()
    }

    fn abort_with_error(&mut self, err: &ResponseError) {
        error!(
            request_id = %self.request_id,
            path = %self.path,
            error = %err,
            "Failed to build response body"
        );
        self.abort(500, &err.to_string());
    }

    /// Decoded request path, without the query string. Fixed for the
    /// lifetime of the context.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Captured route parameter, or `""`
    #[must_use]
    pub fn param(&self, key: &str) -> &str {
        self.params.get(key).map_or("", String::as_str)
    }

    /// Query string value, or `""`
    #[must_use]
    pub fn query(&self, key: &str) -> &str {
        self.req.query(key).unwrap_or("")
    }

    /// Form value from an urlencoded body (falling back to the query string), or `""`
    #[must_use]
    pub fn post_form(&self, key: &str) -> String {
        self.req.form_value(key).unwrap_or_default()
    }

    /// Request header value, or `""`
    #[must_use]
    pub fn header(&self, key: &str) -> &str {
        self.req.header(key).unwrap_or("")
    }

    /// Set a response header. Has no effect once the status is committed.
    pub fn set_header(&mut self, key: &str, value: &str) {
        self.writer.set_header(key, value);
    }

    /// Commit the response status.
    ///
    /// The status can only be committed once; later calls are ignored (and
    /// logged) and [`status_code`](Self::status_code) keeps the first value.
    pub fn status(&mut self, code: u16) {
        if self.writer.write_header(code) {
            self.status_code = code;
        }
    }

    #[must_use]
    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    /// Plain text response
    pub fn string(&mut self, code: u16, body: impl AsRef<str>) {
        self.set_header("Content-Type", "text/plain");
        self.status(code);
        self.writer.write(body.as_ref().as_bytes());
    }

    /// JSON response.
    ///
    /// The value is serialized before anything is committed; if that fails
    /// the request is aborted with `500` and the serializer's message.
    pub fn json<T: Serialize + ?Sized>(&mut self, code: u16, obj: &T) {
        match serde_json::to_vec(obj) {
            Ok(bytes) => {
                self.set_header("Content-Type", "application/json");
                self.status(code);
                self.writer.write(&bytes);
            }
            Err(e) => self.abort_with_error(&ResponseError::from(e)),
        }
    }

    /// Raw bytes response
    pub fn data(&mut self, code: u16, data: &[u8]) {
        self.status(code);
        self.writer.write(data);
    }

    /// Render the named template as an HTML response.
    ///
    /// A missing template set or a render failure aborts with `500` and the
    /// error text.
    pub fn html<S: Serialize>(&mut self, code: u16, name: &str, data: S) {
        let rendered = match &self.templates {
            Some(templates) => templates.render(name, data).map_err(ResponseError::from),
            None => Err(ResponseError::NoTemplates),
        };
        match rendered {
            Ok(body) => {
                self.set_header("Content-Type", "text/html");
                self.status(code);
                self.writer.write(body.as_bytes());
            }
            Err(e) => self.abort_with_error(&e),
        }
    }

    /// The response built so far
    #[must_use]
    pub fn response(&self) -> &ResponseWriter {
        &self.writer
    }

    #[must_use]
    pub fn into_response(self) -> ResponseWriter {
        self.writer
    }
}

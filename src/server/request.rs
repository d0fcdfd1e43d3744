use http::Method;
use std::collections::HashMap;
use std::io::{self, Read};
use tracing::debug;

/// Inbound request as seen by handlers.
///
/// Built from a `may_minihttp::Request` by [`parse_request`], or directly with
/// [`Request::new`] when driving an [`Engine`](crate::Engine) without a socket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// HTTP method (GET, POST, etc.)
    pub method: Method,
    /// Percent-decoded request path without the query string
    pub path: String,
    /// HTTP headers (lowercase keys)
    pub headers: HashMap<String, String>,
    /// Parsed query string parameters (first value wins)
    pub query_params: HashMap<String, String>,
    /// Raw request body
    pub body: Vec<u8>,
}

impl Request {
    /// Create a request for `uri`, which may carry a query string.
    ///
    /// The path is percent-decoded; the query is split off the raw text first
    /// so an encoded `%3F` stays part of the path.
    #[must_use]
    pub fn new(method: Method, uri: &str) -> Self {
        let path = decode_path(uri.split('?').next().unwrap_or("/"));
        Self {
            method,
            path,
            headers: HashMap::new(),
            query_params: parse_query_params(uri),
            body: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers
            .insert(name.to_ascii_lowercase(), value.to_string());
        self
    }

    #[must_use]
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Header value by name (case-insensitive)
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Query string value by key
    #[must_use]
    pub fn query(&self, key: &str) -> Option<&str> {
        self.query_params.get(key).map(String::as_str)
    }

    /// Form value by key.
    ///
    /// Looks in an `application/x-www-form-urlencoded` body first and falls
    /// back to the query string.
    #[must_use]
    pub fn form_value(&self, key: &str) -> Option<String> {
        let is_form = self
            .header("content-type")
            .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"));
        if is_form {
            let found = url::form_urlencoded::parse(&self.body)
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.into_owned());
            if found.is_some() {
                return found;
            }
        }
        self.query(key).map(str::to_string)
    }
}

/// Percent-decode a request path; text that does not decode to UTF-8 is
/// kept as sent.
#[must_use]
pub fn decode_path(raw: &str) -> String {
    match urlencoding::decode(raw) {
        Ok(decoded) => decoded.into_owned(),
        Err(e) => {
            debug!(path = %raw, error = %e, "Path is not valid UTF-8 once decoded; using it raw");
            raw.to_string()
        }
    }
}

/// Parse query string parameters from a URL path
///
/// Extracts everything after the `?` character and URL-decodes parameter names
/// and values. When a key repeats, the first value is kept.
#[must_use]
pub fn parse_query_params(path: &str) -> HashMap<String, String> {
    let mut params = HashMap::new();
    if let Some((_, query_str)) = path.split_once('?') {
        for (k, v) in url::form_urlencoded::parse(query_str.as_bytes()) {
            params.entry(k.into_owned()).or_insert_with(|| v.into_owned());
        }
    }
    params
}

/// Convert a raw `may_minihttp` request into a [`Request`].
///
/// # Errors
///
/// Returns `InvalidInput` for a method token that is not valid HTTP, or the
/// underlying error if reading the body fails.
pub fn parse_request(req: may_minihttp::Request) -> io::Result<Request> {
    let method = Method::from_bytes(req.method().as_bytes())
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    let raw_path = req.path().to_string();

    let headers: HashMap<String, String> = req
        .headers()
        .iter()
        .map(|h| {
            (
                h.name.to_ascii_lowercase(),
                String::from_utf8_lossy(h.value).to_string(),
            )
        })
        .collect();

    let mut body = Vec::new();
    req.body().read_to_end(&mut body)?;

    let mut request = Request::new(method, &raw_path);
    request.headers = headers;
    request.body = body;

    debug!(
        method = %request.method,
        path = %request.path,
        header_count = request.headers.len(),
        query_count = request.query_params.len(),
        body_size_bytes = request.body.len(),
        "HTTP request parsed"
    );

    Ok(request)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_query_params() {
        let q = parse_query_params("/p?x=1&y=2");
        assert_eq!(q.get("x"), Some(&"1".to_string()));
        assert_eq!(q.get("y"), Some(&"2".to_string()));
    }

    #[test]
    fn test_parse_query_params_first_value_wins() {
        let q = parse_query_params("/p?x=1&x=2&name=a%20b");
        assert_eq!(q.get("x"), Some(&"1".to_string()));
        assert_eq!(q.get("name"), Some(&"a b".to_string()));
    }

    #[test]
    fn test_new_strips_query() {
        let req = Request::new(Method::GET, "/hello?name=cweb");
        assert_eq!(req.path, "/hello");
        assert_eq!(req.query("name"), Some("cweb"));
        assert_eq!(req.query("other"), None);
    }

    #[test]
    fn test_new_decodes_path() {
        let req = Request::new(Method::GET, "/hello/geek%20tutu?q=a%20b");
        assert_eq!(req.path, "/hello/geek tutu");
        assert_eq!(req.query("q"), Some("a b"));

        // Encoded `?` belongs to the path, `+` is not a space in paths
        let req = Request::new(Method::GET, "/files/what%3F+now");
        assert_eq!(req.path, "/files/what?+now");
        assert!(req.query_params.is_empty());
    }

    #[test]
    fn test_decode_path_keeps_invalid_utf8_raw() {
        assert_eq!(decode_path("/a/%FF"), "/a/%FF");
        assert_eq!(decode_path("/caf%C3%A9"), "/café");
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let req = Request::new(Method::GET, "/").with_header("X-Token", "abc");
        assert_eq!(req.header("x-token"), Some("abc"));
        assert_eq!(req.header("X-TOKEN"), Some("abc"));
    }

    #[test]
    fn test_form_value() {
        let req = Request::new(Method::POST, "/login?username=fromquery&page=2")
            .with_header("Content-Type", "application/x-www-form-urlencoded")
            .with_body("username=alice&password=s%3Dcret");
        assert_eq!(req.form_value("username"), Some("alice".to_string()));
        assert_eq!(req.form_value("password"), Some("s=cret".to_string()));
        assert_eq!(req.form_value("page"), Some("2".to_string()));
        assert_eq!(req.form_value("missing"), None);
    }

    #[test]
    fn test_form_value_ignores_non_form_body() {
        let req = Request::new(Method::POST, "/login")
            .with_header("Content-Type", "application/json")
            .with_body("username=alice");
        assert_eq!(req.form_value("username"), None);
    }
}

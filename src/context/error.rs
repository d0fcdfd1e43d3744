use std::fmt;

/// Failure while building a response body.
///
/// Every variant ends the request with a `500` abort carrying the error text.
#[derive(Debug)]
pub enum ResponseError {
    /// The value passed to `json` could not be serialized
    Serialize(serde_json::Error),
    /// The template engine failed to render
    Template(minijinja::Error),
    /// `html` was called but the engine has no templates loaded
    NoTemplates,
}

impl fmt::Display for ResponseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseError::Serialize(e) => write!(f, "{e}"),
            ResponseError::Template(e) => write!(f, "{e}"),
            ResponseError::NoTemplates => write!(f, "no HTML templates loaded"),
        }
    }
}

impl std::error::Error for ResponseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ResponseError::Serialize(e) => Some(e),
            ResponseError::Template(e) => Some(e),
            ResponseError::NoTemplates => None,
        }
    }
}

impl From<serde_json::Error> for ResponseError {
    fn from(e: serde_json::Error) -> Self {
        ResponseError::Serialize(e)
    }
}

impl From<minijinja::Error> for ResponseError {
    fn from(e: minijinja::Error) -> Self {
        ResponseError::Template(e)
    }
}

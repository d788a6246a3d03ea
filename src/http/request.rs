use serde_json::Value;

use super::method::HttpMethod;

/// A single request relative to the client's base URL.
///
/// Path segments are kept apart so each one is percent-encoded on its own;
/// an id like `@#!$%^&*` must arrive as one segment, not as a fragment.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestInput {
    pub method: HttpMethod,
    pub path_segments: Vec<String>,
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl RequestInput {
    pub fn new<I, S>(method: HttpMethod, path_segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            method,
            path_segments: path_segments.into_iter().map(Into::into).collect(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// `/brands/x` style rendering used in logs and reports.
    pub fn display_path(&self) -> String {
        format!("/{}", self.path_segments.join("/"))
    }
}

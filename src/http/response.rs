use serde_json::Value;

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub duration_ms: u128,
    pub body: String,
}

impl HttpResponse {
    /// Body parsed as JSON, `None` for empty or non-JSON bodies.
    pub fn json(&self) -> Option<Value> {
        if self.body.trim().is_empty() {
            return None;
        }
        serde_json::from_str(&self.body).ok()
    }
}

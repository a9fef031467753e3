use serde::{Deserialize, Serialize};

/// Standard error response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: &str, message: &str) -> Self {
        Self {
            status: "error".to_string(),
            code: code.to_string(),
            message: message.to_string(),
        }
    }

    /// Pull a human-readable message out of an error body, if it has one.
    ///
    /// Accepts the full envelope as well as the bare `{"message": ...}` and
    /// `{"error": ...}` shapes the backend returns on validation failures.
    pub fn message_from_body(body: &[u8]) -> Option<String> {
        if let Ok(envelope) = serde_json::from_slice::<ErrorResponse>(body) {
            return Some(envelope.message).filter(|m| !m.trim().is_empty());
        }

        let value: serde_json::Value = serde_json::from_slice(body).ok()?;
        ["message", "error", "detail"]
            .iter()
            .find_map(|key| value.get(*key).and_then(|v| v.as_str()))
            .map(str::to_string)
            .filter(|m| !m.trim().is_empty())
    }
}

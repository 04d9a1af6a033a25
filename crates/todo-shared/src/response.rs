//! Error payloads returned by the backend on non-2xx responses.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Error body sent alongside a failing status.
///
/// The backend reports failures as `{"detail": "..."}`. Validation failures
/// use a list of `{"loc": [...], "msg": "...", "type": "..."}` entries under
/// `detail` instead. Some proxies answer with `{"message": "..."}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorBody {
    /// Parse an error body leniently. Empty or malformed text yields `None`.
    pub fn parse(text: &str) -> Option<Self> {
        if text.trim().is_empty() {
            return None;
        }
        serde_json::from_str(text).ok()
    }

    /// Human-readable message carried by the body, if any.
    pub fn message(&self) -> Option<String> {
        let from_detail = match &self.detail {
            Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
            Some(Value::Array(items)) => {
                let msgs: Vec<&str> = items
                    .iter()
                    .filter_map(|item| item.get("msg").and_then(Value::as_str))
                    .collect();
                (!msgs.is_empty()).then(|| msgs.join("; "))
            }
            _ => None,
        };

        from_detail.or_else(|| self.message.clone().filter(|m| !m.is_empty()))
    }
}

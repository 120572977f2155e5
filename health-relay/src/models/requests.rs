use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct SymptomsRequest {
    #[validate(length(max = 10000, message = "symptoms text is too long"))]
    pub symptoms: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ChatRequest {
    #[validate(length(max = 10000, message = "message is too long"))]
    pub message: String,
    /// Optional background passed to the model ahead of the message.
    #[serde(default)]
    #[validate(length(max = 10000, message = "context is too long"))]
    pub context: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub query: Option<String>,
}

impl SearchQuery {
    /// The trimmed query, or `None` when absent or blank.
    pub fn term(&self) -> Option<&str> {
        self.query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
    }
}

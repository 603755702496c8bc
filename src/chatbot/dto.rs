use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Forwarded as-is, including when absent.
    #[serde(default, alias = "Message")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorMessage {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_binding() {
        let request: ChatRequest = serde_json::from_str(r#"{"message":"Hello"}"#).unwrap();
        assert_eq!(request.message.as_deref(), Some("Hello"));

        let request: ChatRequest = serde_json::from_str(r#"{"Message":"Hello"}"#).unwrap();
        assert_eq!(request.message.as_deref(), Some("Hello"));

        let request: ChatRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request.message, None);
    }
}

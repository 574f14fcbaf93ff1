//! Chat-completion request/response types.
//!
//! These model the single JSON request/response pair exchanged with the
//! remote endpoint per turn. The response side only declares the fields the
//! widget reads; everything else the endpoint returns is ignored.

use serde::{Deserialize, Serialize};

use crate::chat::Turn;

/// Outbound payload for one turn.
///
/// `messages` always starts with the synthesized system turn followed by the
/// full conversation history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<Turn>,
    pub temperature: f64,
    pub max_tokens: u32,
}

/// Generation parameters attached to every request.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationParams {
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
}

/// Response body from the endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

impl ChatCompletionResponse {
    /// Generated text of the first choice, if the endpoint returned any.
    pub fn first_content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
    }

    /// Finish reason of the first choice.
    pub fn first_finish_reason(&self) -> Option<&str> {
        self.choices.first().and_then(|c| c.finish_reason.as_deref())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub index: u32,
    pub message: ChoiceMessage,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

/// Token usage reported by the endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub prompt_tokens: u32,
    #[serde(default)]
    pub completion_tokens: u32,
    #[serde(default)]
    pub total_tokens: u32,
}

/// Errors from the remote completion call.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("request timed out after {after_ms}ms")]
    Timeout { after_ms: u64 },

    #[error("deserialization error: {0}")]
    Deserialization(String),

    #[error("response contained no generated text")]
    EmptyResponse,

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serializes_expected_fields() {
        let request = ChatCompletionRequest {
            model: "gpt-4o".to_string(),
            messages: vec![Turn::system("be nice"), Turn::user("hi")],
            temperature: 0.8,
            max_tokens: 800,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "gpt-4o");
        assert_eq!(json["max_tokens"], 800);
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "hi");
        assert!((json["temperature"].as_f64().unwrap() - 0.8).abs() < f64::EPSILON);
    }

    #[test]
    fn test_response_first_content() {
        let body = r#"{
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "model": "gpt-4o-2024-08-06",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "Hello!"}, "finish_reason": "stop"}
            ],
            "usage": {"prompt_tokens": 12, "completion_tokens": 3, "total_tokens": 15}
        }"#;
        let resp: ChatCompletionResponse = serde_json::from_str(body).unwrap();
        assert_eq!(resp.first_content(), Some("Hello!"));
        assert_eq!(resp.first_finish_reason(), Some("stop"));
        assert_eq!(resp.usage.unwrap().completion_tokens, 3);
    }

    #[test]
    fn test_response_without_choices() {
        let resp: ChatCompletionResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert_eq!(resp.first_content(), None);

        let resp: ChatCompletionResponse =
            serde_json::from_str(r#"{"choices": [{"message": {"content": null}}]}"#).unwrap();
        assert_eq!(resp.first_content(), None);
    }

    #[test]
    fn test_llm_error_display() {
        let err = LlmError::Status {
            status: 500,
            body: "upstream exploded".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 500: upstream exploded");
        assert_eq!(
            LlmError::Timeout { after_ms: 1500 }.to_string(),
            "request timed out after 1500ms"
        );
    }
}

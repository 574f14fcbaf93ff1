//! ProxyProvider -- concrete [`CompletionProvider`] for a chat-completion proxy.
//!
//! POSTs the payload as JSON to a single configured URL (typically an edge
//! worker that attaches the upstream API key) and decodes an OpenAI-style
//! chat-completion body. No authentication header is sent and no retry is
//! attempted.

use concierge_core::llm::provider::CompletionProvider;
use concierge_types::llm::{ChatCompletionRequest, ChatCompletionResponse, LlmError};
use tracing::debug;

/// Longest slice of an error body kept in [`LlmError::Status`].
const MAX_ERROR_BODY: usize = 512;

/// Chat-completion provider talking to a proxy endpoint.
pub struct ProxyProvider {
    client: reqwest::Client,
    endpoint_url: reqwest::Url,
}

impl ProxyProvider {
    /// Create a provider for `endpoint_url`.
    ///
    /// Fails with [`LlmError::InvalidRequest`] unless the URL is an absolute
    /// `http` or `https` URL.
    pub fn new(endpoint_url: &str) -> Result<Self, LlmError> {
        let endpoint_url = parse_endpoint(endpoint_url)?;
        let client = reqwest::Client::builder()
            .user_agent(concat!("concierge/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| LlmError::Transport(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint_url,
        })
    }
}

fn parse_endpoint(raw: &str) -> Result<reqwest::Url, LlmError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(LlmError::InvalidRequest("endpoint URL is empty".to_string()));
    }

    let url = reqwest::Url::parse(trimmed)
        .map_err(|e| LlmError::InvalidRequest(format!("invalid endpoint URL '{trimmed}': {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(LlmError::InvalidRequest(format!(
            "unsupported endpoint scheme '{other}'"
        ))),
    }
}

impl CompletionProvider for ProxyProvider {
    fn name(&self) -> &str {
        "proxy"
    }

    async fn complete(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, LlmError> {
        debug!(
            url = %self.endpoint_url,
            messages = request.messages.len(),
            "Sending completion request"
        );

        let response = self
            .client
            .post(self.endpoint_url.clone())
            .header("content-type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| LlmError::Transport(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Status {
                status: status.as_u16(),
                body: truncate(&body, MAX_ERROR_BODY),
            });
        }

        response
            .json::<ChatCompletionResponse>()
            .await
            .map_err(|e| LlmError::Deserialization(format!("failed to parse response: {e}")))
    }
}

/// Cut `text` to at most `max` bytes on a char boundary.
fn truncate(text: &str, max: usize) -> String {
    if text.len() <= max {
        return text.to_string();
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &text[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::Json;
    use axum::Router;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::post;
    use concierge_types::chat::Turn;
    use serde_json::{Value, json};

    async fn spawn_endpoint(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}/")
    }

    fn request() -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: "gpt-4o".to_string(),
            messages: vec![Turn::system("be helpful"), Turn::user("any castles?")],
            temperature: 0.8,
            max_tokens: 800,
        }
    }

    #[tokio::test]
    async fn test_complete_posts_payload_and_decodes_reply() {
        let router = Router::new().route(
            "/",
            post(|headers: HeaderMap, Json(body): Json<Value>| async move {
                let content_type = headers
                    .get("content-type")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                let reply = format!(
                    "{} messages, model {}, max {}, type {}",
                    body["messages"].as_array().map(|m| m.len()).unwrap_or(0),
                    body["model"].as_str().unwrap_or(""),
                    body["max_tokens"],
                    content_type,
                );
                Json(json!({
                    "id": "chatcmpl-1",
                    "choices": [{"index": 0, "message": {"role": "assistant", "content": reply}, "finish_reason": "stop"}]
                }))
            }),
        );
        let url = spawn_endpoint(router).await;

        let provider = ProxyProvider::new(&url).unwrap();
        let response = provider.complete(&request()).await.unwrap();

        assert_eq!(
            response.first_content(),
            Some("2 messages, model gpt-4o, max 800, type application/json")
        );
    }

    #[tokio::test]
    async fn test_complete_maps_server_error_status() {
        let router = Router::new().route(
            "/",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "upstream unavailable") }),
        );
        let url = spawn_endpoint(router).await;

        let err = ProxyProvider::new(&url)
            .unwrap()
            .complete(&request())
            .await
            .unwrap_err();
        match err {
            LlmError::Status { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "upstream unavailable");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_complete_maps_undecodable_body() {
        let router = Router::new().route("/", post(|| async { "not json at all" }));
        let url = spawn_endpoint(router).await;

        let err = ProxyProvider::new(&url)
            .unwrap()
            .complete(&request())
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::Deserialization(_)));
    }

    #[tokio::test]
    async fn test_complete_maps_connection_failure() {
        // Bind then drop to get a port nothing listens on.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = ProxyProvider::new(&format!("http://{addr}/"))
            .unwrap()
            .complete(&request())
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::Transport(_)));
    }

    #[test]
    fn test_new_rejects_unusable_endpoints() {
        for bad in ["", "   ", "not a url", "ftp://example.com/chat"] {
            let err = ProxyProvider::new(bad).err().unwrap();
            assert!(
                matches!(err, LlmError::InvalidRequest(_)),
                "{bad:?} gave {err:?}"
            );
        }
        assert!(ProxyProvider::new(" https://proxy.example.workers.dev ").is_ok());
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdef", 3), "abc...");
        // 'é' is two bytes; never split it.
        assert_eq!(truncate("ééé", 3), "é...");
    }
}

//! CompletionProvider trait definition.
//!
//! The one seam between the dialogue controller and the network. Uses native
//! async fn in traits (RPITIT) so implementations stay plain `async fn`s.

use concierge_types::llm::{ChatCompletionRequest, ChatCompletionResponse, LlmError};

/// Backend that turns a chat-completion payload into a response.
///
/// Implementations live in concierge-infra (e.g., `ProxyProvider`). A single
/// call is made per submitted message; implementations must not retry.
pub trait CompletionProvider: Send + Sync {
    /// Human-readable provider name, recorded on the request span.
    fn name(&self) -> &str;

    /// Send the payload and return the decoded response body.
    ///
    /// Any non-success HTTP status must surface as an error.
    fn complete(
        &self,
        request: &ChatCompletionRequest,
    ) -> impl std::future::Future<Output = Result<ChatCompletionResponse, LlmError>> + Send;
}

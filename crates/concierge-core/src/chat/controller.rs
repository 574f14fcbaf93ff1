//! Dialogue controller.
//!
//! Reacts to the two UI events the widget has -- panel toggle and message
//! submit -- and runs one exchange per submitted message:
//!
//! 1. trim, ignore empty input
//! 2. append the user turn and render it with a placeholder
//! 3. build `[system_turn, ...history]` + generation parameters
//! 4. one remote call (optionally bounded by a timeout)
//! 5. on success append + render the assistant turn, on failure render the
//!    fallback text and record nothing

use std::time::Duration;

use tracing::{Instrument, debug, error, info, info_span};

use concierge_types::catalog::CatalogSnapshot;
use concierge_types::chat::Turn;
use concierge_types::config::DEFAULT_FALLBACK_MESSAGE;
use concierge_types::llm::{ChatCompletionRequest, GenerationParams, LlmError};
use concierge_types::widget::{BlockKind, PanelState};

use crate::llm::provider::CompletionProvider;
use crate::render::surface::DisplaySurface;

use super::prompt::SystemPromptBuilder;
use super::store::ConversationStore;

/// Text shown in the placeholder block while a reply is pending.
pub const PLACEHOLDER_TEXT: &str = "Typing...";

/// Result of submitting one message.
#[derive(Debug)]
pub enum ExchangeOutcome {
    /// Input was empty after trimming; nothing happened.
    Ignored,
    /// The endpoint replied; the reply is now the newest assistant turn.
    Answered(String),
    /// The remote call failed; `fallback` was rendered instead of a reply.
    Failed { fallback: String, error: LlmError },
}

impl ExchangeOutcome {
    /// Text rendered for this exchange, if any.
    pub fn rendered_text(&self) -> Option<&str> {
        match self {
            ExchangeOutcome::Ignored => None,
            ExchangeOutcome::Answered(reply) => Some(reply),
            ExchangeOutcome::Failed { fallback, .. } => Some(fallback),
        }
    }
}

/// Drives one chat session.
///
/// Owns the session's [`ConversationStore`]; nothing else can append to it.
/// `handle_user_message` takes `&mut self`, so a second submission cannot
/// start while a reply is pending.
pub struct DialogueController<P: CompletionProvider, D: DisplaySurface> {
    store: ConversationStore,
    catalog: CatalogSnapshot,
    prompt: SystemPromptBuilder,
    params: GenerationParams,
    provider: P,
    display: D,
    panel: PanelState,
    request_timeout: Option<Duration>,
    fallback_message: String,
}

impl<P: CompletionProvider, D: DisplaySurface> DialogueController<P, D> {
    /// Start a session with an empty store and a collapsed panel.
    pub fn new(
        provider: P,
        display: D,
        catalog: CatalogSnapshot,
        params: GenerationParams,
    ) -> Self {
        Self {
            store: ConversationStore::new(),
            catalog,
            prompt: SystemPromptBuilder::default(),
            params,
            provider,
            display,
            panel: PanelState::Collapsed,
            request_timeout: None,
            fallback_message: DEFAULT_FALLBACK_MESSAGE.to_string(),
        }
    }

    /// Replace the instruction template.
    pub fn with_prompt(mut self, prompt: SystemPromptBuilder) -> Self {
        self.prompt = prompt;
        self
    }

    /// Abandon remote calls that take longer than `timeout`.
    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_fallback_message(mut self, message: impl Into<String>) -> Self {
        self.fallback_message = message.into();
        self
    }

    pub fn store(&self) -> &ConversationStore {
        &self.store
    }

    pub fn catalog(&self) -> &CatalogSnapshot {
        &self.catalog
    }

    pub fn params(&self) -> &GenerationParams {
        &self.params
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    pub fn panel_state(&self) -> PanelState {
        self.panel
    }

    /// Flip the panel between collapsed and expanded.
    pub fn toggle_panel(&mut self) -> PanelState {
        self.panel = self.panel.toggled();
        self.display.set_panel_state(self.panel);
        debug!(panel = %self.panel, "Panel toggled");
        self.panel
    }

    /// The payload that would be sent right now: a fresh system turn followed
    /// by every stored turn, plus the generation parameters.
    pub fn build_request(&self) -> ChatCompletionRequest {
        let history = self.store.snapshot();
        let mut messages = Vec::with_capacity(history.len() + 1);
        messages.push(self.prompt.system_turn(&self.catalog));
        messages.extend_from_slice(history);

        ChatCompletionRequest {
            model: self.params.model.clone(),
            messages,
            temperature: self.params.temperature,
            max_tokens: self.params.max_tokens,
        }
    }

    /// Run one exchange for a submitted message.
    pub async fn handle_user_message(&mut self, text: &str) -> ExchangeOutcome {
        let message = text.trim();
        if message.is_empty() {
            debug!("Ignoring empty message");
            return ExchangeOutcome::Ignored;
        }

        self.store.append(Turn::user(message));
        self.display.append_block(BlockKind::User, message);
        let placeholder = self.display.append_block(BlockKind::Placeholder, PLACEHOLDER_TEXT);
        self.display.scroll_to_latest();
        self.display.set_input_enabled(false);

        let request = self.build_request();
        let result = self.request_reply(&request).await;

        self.display.remove_block(placeholder);
        let outcome = match result {
            Ok(reply) => {
                self.store.append(Turn::assistant(reply.clone()));
                self.display.append_block(BlockKind::Assistant, &reply);
                ExchangeOutcome::Answered(reply)
            }
            Err(e) => {
                error!(
                    session_id = %self.store.session_id(),
                    error = %e,
                    "Completion request failed"
                );
                self.display
                    .append_block(BlockKind::Fallback, &self.fallback_message);
                ExchangeOutcome::Failed {
                    fallback: self.fallback_message.clone(),
                    error: e,
                }
            }
        };
        self.display.scroll_to_latest();
        self.display.set_input_enabled(true);

        outcome
    }

    /// Make the single remote call for `request` and extract the reply text.
    async fn request_reply(&self, request: &ChatCompletionRequest) -> Result<String, LlmError> {
        let span = info_span!(
            "gen_ai.chat",
            gen_ai.system = self.provider.name(),
            gen_ai.request.model = %request.model,
            gen_ai.request.max_tokens = request.max_tokens,
            gen_ai.request.temperature = request.temperature,
            session_id = %self.store.session_id(),
            messages = request.messages.len(),
        );

        async {
            let call = self.provider.complete(request);
            let response = match self.request_timeout {
                Some(limit) => tokio::time::timeout(limit, call).await.map_err(|_| {
                    LlmError::Timeout {
                        after_ms: limit.as_millis() as u64,
                    }
                })??,
                None => call.await?,
            };

            // Blank text is still a reply; only a missing field is a failure.
            let reply = response
                .first_content()
                .ok_or(LlmError::EmptyResponse)?
                .to_string();

            if let Some(usage) = &response.usage {
                info!(
                    gen_ai.usage.input_tokens = usage.prompt_tokens,
                    gen_ai.usage.output_tokens = usage.completion_tokens,
                    gen_ai.response.finish_reasons = response.first_finish_reason().unwrap_or("unknown"),
                    "Reply received"
                );
            } else {
                info!(chars = reply.len(), "Reply received");
            }

            Ok::<_, LlmError>(reply)
        }
        .instrument(span)
        .await
    }
}

//! `concierge prompt` -- inspect what would be sent to the endpoint.

use concierge_core::chat::controller::DialogueController;
use concierge_core::llm::provider::CompletionProvider;
use concierge_core::render::panel::HtmlPanel;
use concierge_core::render::surface::DisplaySurface;
use concierge_types::config::WidgetConfig;

use super::build_controller;

/// Print the system instruction (or the full payload with `json`) for a fresh session.
pub async fn print_prompt(config: &WidgetConfig, json: bool) -> anyhow::Result<()> {
    let controller = build_controller(config, HtmlPanel::new()).await?;
    println!("{}", render_prompt(&controller, json)?);
    Ok(())
}

fn render_prompt<P, D>(controller: &DialogueController<P, D>, json: bool) -> anyhow::Result<String>
where
    P: CompletionProvider,
    D: DisplaySurface,
{
    let request = controller.build_request();
    if json {
        return Ok(serde_json::to_string_pretty(&request)?);
    }

    let system = request
        .messages
        .first()
        .map(|turn| turn.content().to_string())
        .unwrap_or_default();
    Ok(system)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use concierge_core::chat::controller::ExchangeOutcome;
    use concierge_types::llm::{ChatCompletionRequest, ChatCompletionResponse, LlmError};
    use serde_json::json;
    use tempfile::TempDir;

    use crate::cli::build_controller_with;

    /// Answers every request with a fixed reply and keeps what it was sent.
    #[derive(Clone, Default)]
    struct RecordingProvider {
        seen: Arc<Mutex<Vec<ChatCompletionRequest>>>,
    }

    impl CompletionProvider for RecordingProvider {
        fn name(&self) -> &str {
            "recording"
        }

        async fn complete(
            &self,
            request: &ChatCompletionRequest,
        ) -> Result<ChatCompletionResponse, LlmError> {
            self.seen.lock().unwrap().push(request.clone());
            Ok(serde_json::from_value(json!({
                "choices": [{"message": {"role": "assistant", "content": "Welcome to Offbeat Retreats!"}}]
            }))
            .unwrap())
        }
    }

    async fn config_with_catalog(tmp: &TempDir, catalog: &str) -> WidgetConfig {
        let path = tmp.path().join("rentals.json");
        tokio::fs::write(&path, catalog).await.unwrap();
        WidgetConfig {
            catalog_source: path.to_str().unwrap().to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_prompt_embeds_catalog() {
        let tmp = TempDir::new().unwrap();
        let config = config_with_catalog(&tmp, r#"[{"name": "Treehouse Hideaway"}]"#).await;
        let controller = build_controller(&config, HtmlPanel::new()).await.unwrap();

        let text = render_prompt(&controller, false).unwrap();
        assert!(text.contains("Treehouse Hideaway"));
        assert!(!text.contains("{catalog}"));
    }

    #[tokio::test]
    async fn test_prompt_json_is_the_outbound_payload() {
        let tmp = TempDir::new().unwrap();
        let config = config_with_catalog(&tmp, "[]").await;
        let controller = build_controller(&config, HtmlPanel::new()).await.unwrap();

        let text = render_prompt(&controller, true).unwrap();
        let payload: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(payload["model"], "gpt-4o");
        assert_eq!(payload["max_tokens"], 800);
        assert_eq!(payload["temperature"], 0.8);
        assert_eq!(payload["messages"].as_array().unwrap().len(), 1);
        assert_eq!(payload["messages"][0]["role"], "system");
    }

    #[tokio::test]
    async fn test_prompt_with_missing_catalog_embeds_empty_array() {
        let config = WidgetConfig {
            catalog_source: "/definitely/not/here/rentals.json".to_string(),
            ..Default::default()
        };
        let controller = build_controller(&config, HtmlPanel::new()).await.unwrap();

        let text = render_prompt(&controller, false).unwrap();
        assert!(text.contains("[]"));
    }

    #[tokio::test]
    async fn test_missing_catalog_file_still_reaches_remote_call() {
        let tmp = TempDir::new().unwrap();
        let config = WidgetConfig {
            catalog_source: tmp.path().join("rentals.json").to_str().unwrap().to_string(),
            ..Default::default()
        };
        let provider = RecordingProvider::default();
        let mut controller = build_controller_with(&config, provider.clone(), HtmlPanel::new())
            .await
            .unwrap();
        assert!(controller.catalog().is_empty());

        let outcome = controller.handle_user_message("any castles?").await;
        assert!(matches!(outcome, ExchangeOutcome::Answered(_)));

        let seen = provider.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        let sent = &seen[0];
        assert_eq!(sent.messages.len(), 2);
        assert!(sent.messages[0].content().contains("Available rentals:\n[]"));
        assert_eq!(sent.messages[1].content(), "any castles?");
    }

    #[tokio::test]
    async fn test_prompt_template_file_replaces_default() {
        let tmp = TempDir::new().unwrap();
        let template = tmp.path().join("template.txt");
        tokio::fs::write(&template, "You run a tiny yurt rental.\nStock:\n{catalog}")
            .await
            .unwrap();
        let config = WidgetConfig {
            prompt_template: Some(template.to_str().unwrap().to_string()),
            ..config_with_catalog(&tmp, r#"[{"name": "Yurt"}]"#).await
        };

        let controller = build_controller(&config, HtmlPanel::new()).await.unwrap();
        let text = render_prompt(&controller, false).unwrap();
        assert!(text.starts_with("You run a tiny yurt rental."));
        assert!(text.contains("\"name\": \"Yurt\""));
        assert!(!text.contains("Offbeat Retreats"));
    }

    #[tokio::test]
    async fn test_missing_prompt_template_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let config = WidgetConfig {
            prompt_template: Some(tmp.path().join("nope.txt").to_str().unwrap().to_string()),
            ..config_with_catalog(&tmp, "[]").await
        };

        let err = build_controller(&config, HtmlPanel::new()).await.err().unwrap();
        assert!(err.to_string().contains("Failed to read prompt template"));
    }
}

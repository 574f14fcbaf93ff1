//! Widget configuration types.
//!
//! `WidgetConfig` represents the optional `config.toml` that overrides the
//! compiled-in endpoint, generation parameters, catalog source, and timeout.

use serde::{Deserialize, Serialize};

use crate::llm::GenerationParams;

/// Endpoint the widget talks to when nothing else is configured.
///
/// Points at a locally running proxy worker; the proxy holds the upstream
/// API key so the widget never does.
pub const DEFAULT_ENDPOINT_URL: &str = "http://127.0.0.1:8787";

/// Text rendered in place of a reply when the remote call fails.
pub const DEFAULT_FALLBACK_MESSAGE: &str = "Sorry, I encountered an error. Please try again.";

/// Top-level configuration for the widget.
///
/// Every field has a default, so an empty file is a valid configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WidgetConfig {
    /// Proxy endpoint receiving the chat-completion payload.
    #[serde(default = "default_endpoint_url")]
    pub endpoint_url: String,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// Cap on generated tokens per reply.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Local path or `http(s)://` URL of the listing catalog.
    #[serde(default = "default_catalog_source")]
    pub catalog_source: String,

    /// Seconds before an unanswered remote call is abandoned. `0` disables the timeout.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_fallback_message")]
    pub fallback_message: String,

    /// File replacing the built-in instruction template. `{catalog}` marks
    /// where the catalog goes; without it the catalog is appended.
    #[serde(default)]
    pub prompt_template: Option<String>,
}

fn default_endpoint_url() -> String {
    DEFAULT_ENDPOINT_URL.to_string()
}

fn default_model() -> String {
    "gpt-4o".to_string()
}

fn default_temperature() -> f64 {
    0.8
}

fn default_max_tokens() -> u32 {
    800
}

fn default_catalog_source() -> String {
    "./rentals.json".to_string()
}

fn default_request_timeout_secs() -> u64 {
    60
}

fn default_fallback_message() -> String {
    DEFAULT_FALLBACK_MESSAGE.to_string()
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            endpoint_url: default_endpoint_url(),
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            catalog_source: default_catalog_source(),
            request_timeout_secs: default_request_timeout_secs(),
            fallback_message: default_fallback_message(),
            prompt_template: None,
        }
    }
}

impl WidgetConfig {
    /// Generation parameters attached to every outbound request.
    pub fn generation_params(&self) -> GenerationParams {
        GenerationParams {
            model: self.model.clone(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }

    /// Request timeout, or `None` when disabled.
    pub fn request_timeout(&self) -> Option<std::time::Duration> {
        (self.request_timeout_secs > 0)
            .then(|| std::time::Duration::from_secs(self.request_timeout_secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widget_config_default_values() {
        let config = WidgetConfig::default();
        assert_eq!(config.endpoint_url, DEFAULT_ENDPOINT_URL);
        assert_eq!(config.model, "gpt-4o");
        assert!((config.temperature - 0.8).abs() < f64::EPSILON);
        assert_eq!(config.max_tokens, 800);
        assert_eq!(config.catalog_source, "./rentals.json");
        assert_eq!(config.request_timeout_secs, 60);
        assert_eq!(config.fallback_message, DEFAULT_FALLBACK_MESSAGE);
        assert!(config.prompt_template.is_none());
    }

    #[test]
    fn test_widget_config_deserialize_with_defaults() {
        let config: WidgetConfig = toml::from_str("").unwrap();
        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.max_tokens, 800);
    }

    #[test]
    fn test_widget_config_deserialize_with_values() {
        let toml_str = r#"
endpoint_url = "https://proxy.example.workers.dev"
model = "gpt-4o-mini"
temperature = 0.5
max_tokens = 400
catalog_source = "https://example.com/rentals.json"
request_timeout_secs = 0
prompt_template = "templates/concierge.txt"
"#;
        let config: WidgetConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.endpoint_url, "https://proxy.example.workers.dev");
        assert_eq!(config.model, "gpt-4o-mini");
        assert!((config.temperature - 0.5).abs() < f64::EPSILON);
        assert_eq!(config.max_tokens, 400);
        assert_eq!(config.catalog_source, "https://example.com/rentals.json");
        assert!(config.request_timeout().is_none());
        assert_eq!(config.fallback_message, DEFAULT_FALLBACK_MESSAGE);
        assert_eq!(config.prompt_template.as_deref(), Some("templates/concierge.txt"));
    }

    #[test]
    fn test_generation_params_follow_config() {
        let config = WidgetConfig {
            model: "gpt-4.1".to_string(),
            max_tokens: 256,
            ..Default::default()
        };
        let params = config.generation_params();
        assert_eq!(params.model, "gpt-4.1");
        assert_eq!(params.max_tokens, 256);
        assert_eq!(
            config.request_timeout(),
            Some(std::time::Duration::from_secs(60))
        );
    }
}

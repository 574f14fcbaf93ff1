//! CLI command definitions for the `concierge` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod chat;
pub mod prompt;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use clap_complete::Shell;

use concierge_core::chat::controller::DialogueController;
use concierge_core::chat::prompt::SystemPromptBuilder;
use concierge_core::llm::provider::CompletionProvider;
use concierge_core::render::surface::DisplaySurface;
use concierge_infra::catalog::load_catalog;
use concierge_infra::llm::ProxyProvider;
use concierge_types::config::WidgetConfig;

/// Chat with the Offbeat Retreats rental concierge.
#[derive(Parser)]
#[command(name = "concierge", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Read configuration from this file instead of the default location.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Use the instruction template in this file (`{catalog}` marks the catalog).
    #[arg(long, global = true, value_name = "PATH")]
    pub template: Option<PathBuf>,

    /// Suppress all log output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed logs (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Write logs as newline-delimited JSON.
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Export spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive chat session.
    Chat,

    /// Print the system instruction built from the current catalog.
    Prompt {
        /// Print the full outbound request payload as JSON instead.
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completions.
    Completions {
        /// Target shell.
        shell: Shell,
    },
}

/// Load the catalog and wire a controller for `config` around `display`.
pub async fn build_controller<D: DisplaySurface>(
    config: &WidgetConfig,
    display: D,
) -> anyhow::Result<DialogueController<ProxyProvider, D>> {
    let provider = ProxyProvider::new(&config.endpoint_url)?;
    build_controller_with(config, provider, display).await
}

/// Like [`build_controller`], with the completion backend supplied by the caller.
pub async fn build_controller_with<P, D>(
    config: &WidgetConfig,
    provider: P,
    display: D,
) -> anyhow::Result<DialogueController<P, D>>
where
    P: CompletionProvider,
    D: DisplaySurface,
{
    let catalog = load_catalog(&config.catalog_source).await;

    let mut controller =
        DialogueController::new(provider, display, catalog, config.generation_params())
            .with_request_timeout(config.request_timeout())
            .with_fallback_message(config.fallback_message.clone());

    if let Some(path) = &config.prompt_template {
        let template = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read prompt template '{path}'"))?;
        controller = controller.with_prompt(SystemPromptBuilder::new(template));
    }

    Ok(controller)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "concierge", "chat", "-vv", "--log-json", "--config", "/tmp/c.toml",
            "--template", "/tmp/t.txt",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Chat));
        assert_eq!(cli.verbose, 2);
        assert!(cli.log_json);
        assert!(!cli.otel);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/c.toml")));
        assert_eq!(cli.template, Some(PathBuf::from("/tmp/t.txt")));
    }

    #[test]
    fn test_parse_prompt_json() {
        let cli = Cli::try_parse_from(["concierge", "prompt", "--json"]).unwrap();
        assert!(matches!(cli.command, Commands::Prompt { json: true }));
    }
}

//! Concierge terminal entry point.
//!
//! Binary name: `concierge`
//!
//! Parses CLI arguments, sets up tracing, loads the widget configuration, then
//! dispatches to the chat loop or the prompt inspector.

mod cli;

use clap::Parser;
use clap_complete::generate;

use concierge_infra::config::{load_widget_config, read_widget_config, resolve_config_path};
use concierge_observe::tracing_setup::{TracingOptions, init_tracing, shutdown_tracing};
use concierge_types::config::WidgetConfig;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Shell completions don't need config or logging
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "concierge", &mut std::io::stdout());
        return Ok(());
    }

    let options = TracingOptions {
        json: cli.log_json,
        otel: cli.otel,
        ..TracingOptions::from_verbosity(cli.verbose, cli.quiet)
    };
    init_tracing(&options).map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))?;

    // Every exit from here on goes through shutdown so buffered spans are flushed
    let result = run(cli).await;

    shutdown_tracing();
    result
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(&cli).await?;

    match cli.command {
        Commands::Chat => cli::chat::loop_runner::run_chat_loop(&config).await,
        Commands::Prompt { json } => cli::prompt::print_prompt(&config, json).await,
        Commands::Completions { .. } => Ok(()),
    }
}

/// An explicit `--config` must exist and parse; the default location is optional.
async fn load_config(cli: &Cli) -> anyhow::Result<WidgetConfig> {
    let mut config = match &cli.config {
        Some(path) => read_widget_config(path).await?,
        None => load_widget_config(&resolve_config_path()).await,
    };

    if let Some(path) = &cli.template {
        config.prompt_template = Some(path.to_string_lossy().into_owned());
    }

    Ok(config)
}

//! Main chat loop orchestration.
//!
//! Loads the catalog, wires the dialogue controller to a terminal surface,
//! opens the panel, then reads lines until Ctrl+D or `/exit`. Lines starting
//! with `/` are slash commands; everything else is submitted to the
//! controller while the panel is open.

use std::path::Path;

use console::style;
use tracing::{info, warn};

use concierge_core::chat::controller::DialogueController;
use concierge_core::llm::provider::CompletionProvider;
use concierge_core::render::surface::DisplaySurface;
use concierge_types::chat::Role;
use concierge_types::config::WidgetConfig;

use super::banner::print_welcome_banner;
use super::commands::{self, ChatCommand};
use super::input::{ChatInput, InputEvent};
use super::surface::TerminalSurface;
use crate::cli::build_controller;

/// Longest history preview line, in characters.
const PREVIEW_CHARS: usize = 100;

/// Run the interactive chat loop.
pub async fn run_chat_loop(config: &WidgetConfig) -> anyhow::Result<()> {
    let mut controller = build_controller(config, TerminalSurface::new()).await?;
    let session_id = controller.store().session_id();

    print_welcome_banner(
        &config.model,
        &config.endpoint_url,
        controller.catalog().listing_count(),
        &session_id.to_string(),
    );
    info!(%session_id, endpoint = %config.endpoint_url, "Chat session started");

    controller.toggle_panel();

    let prompt = format!("  {} ", style("You >").green().bold());
    let (mut chat_input, _writer) =
        ChatInput::new(prompt).map_err(|e| anyhow::anyhow!("Failed to initialize input: {e}"))?;

    loop {
        match chat_input.read_line().await {
            InputEvent::Eof => {
                println!("\n  {}", style("Session ended.").dim());
                break;
            }
            InputEvent::Interrupted => {
                println!("\n  {}", style("Press Ctrl+D to exit, or keep chatting.").dim());
                continue;
            }
            InputEvent::Message(text) => {
                if let Some(cmd) = commands::parse(&text) {
                    match cmd {
                        ChatCommand::Help => commands::print_help(),
                        ChatCommand::Toggle => {
                            controller.toggle_panel();
                        }
                        ChatCommand::History => print_history(&controller),
                        ChatCommand::Export(path) => {
                            export_document(controller.display(), &path).await;
                        }
                        ChatCommand::Clear => chat_input.clear(),
                        ChatCommand::Exit => {
                            println!("\n  {}", style("Session ended.").dim());
                            break;
                        }
                        ChatCommand::Unknown(cmd_name) => {
                            println!(
                                "\n  {} Unknown command: {}. Type /help for available commands.\n",
                                style("?").yellow().bold(),
                                style(cmd_name).dim()
                            );
                        }
                    }
                    continue;
                }

                if !controller.panel_state().is_expanded() {
                    if !text.trim().is_empty() {
                        println!(
                            "  {}",
                            style("The chat panel is collapsed. Type /toggle to open it.").dim()
                        );
                    }
                    continue;
                }

                controller.handle_user_message(&text).await;
            }
        }
    }

    let store = controller.store();
    info!(
        %session_id,
        user_turns = store.count(Role::User),
        assistant_turns = store.count(Role::Assistant),
        "Chat session ended"
    );
    Ok(())
}

/// Print every stored turn with a one-line preview.
fn print_history<P, D>(controller: &DialogueController<P, D>)
where
    P: CompletionProvider,
    D: DisplaySurface,
{
    let turns = controller.store().snapshot();
    println!();
    if turns.is_empty() {
        println!("  {}", style("No messages yet.").dim());
    }
    for turn in turns {
        let label = match turn.role() {
            Role::User => style("You").green(),
            Role::Assistant => style("Concierge").cyan(),
            Role::System => style("System").dim(),
        };
        println!("  {} {}", label.bold(), preview(turn.content()));
    }
    println!();
}

/// Collapse whitespace and cut to `PREVIEW_CHARS` characters.
fn preview(content: &str) -> String {
    let flat = content.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= PREVIEW_CHARS {
        return flat;
    }
    let cut: String = flat.chars().take(PREVIEW_CHARS - 3).collect();
    format!("{cut}...")
}

async fn export_document(surface: &TerminalSurface, path: &Path) {
    match tokio::fs::write(path, surface.document().to_html()).await {
        Ok(()) => println!(
            "\n  {} Chat panel saved to {}\n",
            style("*").cyan().bold(),
            style(path.display()).dim()
        ),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to export chat panel");
            println!(
                "\n  {} Failed to save {}: {e}\n",
                style("!").red().bold(),
                path.display()
            );
        }
    }
}

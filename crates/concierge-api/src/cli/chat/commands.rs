//! Slash command parsing for the chat loop.
//!
//! Commands start with `/` and control the panel and the session transcript.

use std::path::PathBuf;

use console::style;

/// Available slash commands in the chat loop.
#[derive(Debug, PartialEq)]
pub enum ChatCommand {
    /// Show available commands.
    Help,
    /// Collapse or expand the chat panel.
    Toggle,
    /// Show the conversation so far.
    History,
    /// Write the widget document to a file.
    Export(PathBuf),
    /// Clear the terminal screen.
    Clear,
    /// Exit the chat session.
    Exit,
    /// Unknown command (or a known one missing its argument).
    Unknown(String),
}

/// Parse user input as a slash command.
///
/// Returns `None` if the input doesn't start with `/`.
pub fn parse(input: &str) -> Option<ChatCommand> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    let (cmd, arg) = match trimmed.split_once(' ') {
        Some((cmd, arg)) => (cmd.to_lowercase(), arg.trim()),
        None => (trimmed.to_lowercase(), ""),
    };

    match cmd.as_str() {
        "/help" | "/h" | "/?" => Some(ChatCommand::Help),
        "/toggle" | "/t" => Some(ChatCommand::Toggle),
        "/history" => Some(ChatCommand::History),
        "/export" => {
            if arg.is_empty() {
                Some(ChatCommand::Unknown("/export requires a file path".to_string()))
            } else {
                Some(ChatCommand::Export(PathBuf::from(arg)))
            }
        }
        "/clear" | "/cls" => Some(ChatCommand::Clear),
        "/exit" | "/quit" | "/q" => Some(ChatCommand::Exit),
        other => Some(ChatCommand::Unknown(other.to_string())),
    }
}

/// Print the help text listing all available commands.
pub fn print_help() {
    println!();
    println!("  {}", style("Available commands:").bold());
    println!();
    println!("  {}           {}", style("/help").cyan(), "Show this help message");
    println!("  {}         {}", style("/toggle").cyan(), "Collapse or expand the chat panel");
    println!("  {}        {}", style("/history").cyan(), "Show the conversation so far");
    println!("  {}  {}", style("/export <file>").cyan(), "Save the chat panel as HTML");
    println!("  {}          {}", style("/clear").cyan(), "Clear the screen");
    println!("  {}           {}", style("/exit").cyan(), "End the chat session");
    println!();
    println!(
        "  {}",
        style("Ctrl+D to exit, Ctrl+C safe (no message loss)").dim()
    );
    println!();
}

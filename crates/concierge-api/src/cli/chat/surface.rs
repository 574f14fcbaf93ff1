//! Terminal display surface.
//!
//! `TerminalSurface` prints message blocks as they are rendered: replies go
//! through `termimad`, the placeholder becomes an `indicatif` spinner, and the
//! fallback is styled as a warning. Every call is mirrored into an
//! [`HtmlPanel`] so `/export` can write out the widget document.

use std::io::Write;
use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use termimad::MadSkin;
use termimad::crossterm::style::Color;

use concierge_core::render::panel::HtmlPanel;
use concierge_core::render::surface::DisplaySurface;
use concierge_types::widget::{BlockId, BlockKind, PanelState};

/// Label printed above each reply.
const ASSISTANT_LABEL: &str = "Concierge";

/// Display surface printing to the terminal.
pub struct TerminalSurface {
    skin: MadSkin,
    document: HtmlPanel,
    spinner: Option<(BlockId, ProgressBar)>,
}

impl TerminalSurface {
    pub fn new() -> Self {
        let mut skin = MadSkin::default_dark();
        skin.bold.set_fg(Color::Cyan);
        skin.headers[0].set_fg(Color::Cyan);
        skin.headers[1].set_fg(Color::Cyan);
        skin.inline_code.set_fg(Color::Yellow);

        Self {
            skin,
            document: HtmlPanel::new(),
            spinner: None,
        }
    }

    /// The widget document mirroring everything printed so far.
    pub fn document(&self) -> &HtmlPanel {
        &self.document
    }

    fn start_spinner(&mut self, id: BlockId, text: &str) {
        let spinner = ProgressBar::new_spinner();
        let spinner_style = ProgressStyle::default_spinner()
            .template("  {spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        spinner.set_style(spinner_style);
        spinner.set_message(text.to_string());
        spinner.enable_steady_tick(Duration::from_millis(80));
        self.spinner = Some((id, spinner));
    }

    fn print_reply(&self, text: &str) {
        println!();
        println!("  {}", style(ASSISTANT_LABEL).cyan().bold());
        let rendered = self.skin.term_text(text);
        for line in rendered.to_string().lines() {
            println!("  {line}");
        }
        println!();
    }
}

impl Default for TerminalSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplaySurface for TerminalSurface {
    fn append_block(&mut self, kind: BlockKind, text: &str) -> BlockId {
        let id = self.document.append_block(kind, text);
        match kind {
            // The readline prompt already echoed the user's line.
            BlockKind::User => {}
            BlockKind::Placeholder => self.start_spinner(id, text),
            BlockKind::Assistant => self.print_reply(text),
            BlockKind::Fallback => {
                println!();
                println!("  {} {}", style("!").red().bold(), text);
                println!(
                    "  {}",
                    style("Type a message to retry, /exit to quit.").dim()
                );
                println!();
            }
        }
        id
    }

    fn remove_block(&mut self, id: BlockId) {
        if let Some((spinner_id, spinner)) = self.spinner.take() {
            if spinner_id == id {
                spinner.finish_and_clear();
            } else {
                self.spinner = Some((spinner_id, spinner));
            }
        }
        self.document.remove_block(id);
    }

    fn scroll_to_latest(&mut self) {
        self.document.scroll_to_latest();
        let _ = std::io::stdout().flush();
    }

    fn set_panel_state(&mut self, state: PanelState) {
        self.document.set_panel_state(state);
        let message = match state {
            PanelState::Expanded => "Chat panel open.",
            PanelState::Collapsed => "Chat panel collapsed. Type /toggle to reopen it.",
        };
        println!("  {}", style(message).dim());
    }

    fn set_input_enabled(&mut self, enabled: bool) {
        self.document.set_input_enabled(enabled);
    }
}

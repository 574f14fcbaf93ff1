//! Headless widget document.
//!
//! `HtmlPanel` is the in-memory model of the chat widget: the toggle control
//! with its open/close indicator icons, the message list, and the input row.
//! It implements [`DisplaySurface`] and can serialize itself to markup with
//! [`HtmlPanel::to_html`].

use concierge_types::widget::{BlockId, BlockKind, PanelState};
use tracing::debug;

use super::markup::format_markup;
use super::surface::DisplaySurface;

/// A block currently present in the message list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedBlock {
    pub id: BlockId,
    pub kind: BlockKind,
    /// Escaped markup produced by [`format_markup`].
    pub markup: String,
}

/// In-memory chat widget document.
#[derive(Debug, Clone)]
pub struct HtmlPanel {
    blocks: Vec<RenderedBlock>,
    next_id: u64,
    panel: PanelState,
    open_icon_visible: bool,
    close_icon_visible: bool,
    input_enabled: bool,
    /// Index of the block scrolled into view at the bottom of the list.
    scroll_top: usize,
}

impl HtmlPanel {
    /// A collapsed panel with an empty message list.
    pub fn new() -> Self {
        Self {
            blocks: Vec::new(),
            next_id: 1,
            panel: PanelState::Collapsed,
            open_icon_visible: true,
            close_icon_visible: false,
            input_enabled: true,
            scroll_top: 0,
        }
    }

    pub fn blocks(&self) -> &[RenderedBlock] {
        &self.blocks
    }

    pub fn panel_state(&self) -> PanelState {
        self.panel
    }

    /// Visibility of the (open, close) indicator icons.
    pub fn indicators(&self) -> (bool, bool) {
        (self.open_icon_visible, self.close_icon_visible)
    }

    pub fn input_enabled(&self) -> bool {
        self.input_enabled
    }

    /// Total scrollable height, one unit per block.
    pub fn scroll_height(&self) -> usize {
        self.blocks.len()
    }

    pub fn scroll_top(&self) -> usize {
        self.scroll_top
    }

    /// Whether the newest block is the one in view.
    pub fn is_pinned_to_latest(&self) -> bool {
        self.scroll_top >= self.scroll_height()
    }

    /// Whether a placeholder block is currently shown.
    pub fn has_placeholder(&self) -> bool {
        self.blocks.iter().any(|b| b.kind == BlockKind::Placeholder)
    }

    /// Render the whole widget: toggle control, message list, input row.
    pub fn to_html(&self) -> String {
        let display = |visible: bool| if visible { "block" } else { "none" };
        let active = if self.panel.is_expanded() { " active" } else { "" };
        let disabled = if self.input_enabled { "" } else { " disabled" };

        let mut html = String::new();
        html.push_str(&format!(
            "<button class=\"chat-toggle\" type=\"button\">\
             <span class=\"open-icon\" style=\"display: {}\"></span>\
             <span class=\"close-icon\" style=\"display: {}\"></span>\
             </button>\n",
            display(self.open_icon_visible),
            display(self.close_icon_visible),
        ));
        html.push_str(&format!("<div class=\"chat-box{active}\">\n"));
        html.push_str(&format!(
            "<div class=\"chat-messages\" data-scroll-top=\"{}\">\n",
            self.scroll_top
        ));
        for block in &self.blocks {
            html.push_str(&format!(
                "<div class=\"{}\" id=\"{}\">{}</div>\n",
                block.kind.css_classes(),
                block.id,
                block.markup
            ));
        }
        html.push_str("</div>\n");
        html.push_str(&format!(
            "<form class=\"chat-form\">\
             <input class=\"chat-input\" type=\"text\" placeholder=\"Ask about our rentals...\"{disabled}>\
             <button type=\"submit\"{disabled}>Send</button>\
             </form>\n"
        ));
        html.push_str("</div>\n");
        html
    }
}

impl Default for HtmlPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplaySurface for HtmlPanel {
    fn append_block(&mut self, kind: BlockKind, text: &str) -> BlockId {
        let id = BlockId(self.next_id);
        self.next_id += 1;
        self.blocks.push(RenderedBlock {
            id,
            kind,
            markup: format_markup(text),
        });
        id
    }

    fn remove_block(&mut self, id: BlockId) {
        let before = self.blocks.len();
        self.blocks.retain(|b| b.id != id);
        if self.blocks.len() == before {
            debug!(block = %id, "Attempted to remove unknown block");
        }
        self.scroll_top = self.scroll_top.min(self.scroll_height());
    }

    fn scroll_to_latest(&mut self) {
        self.scroll_top = self.scroll_height();
    }

    fn set_panel_state(&mut self, state: PanelState) {
        self.panel = state;
        self.open_icon_visible = !state.is_expanded();
        self.close_icon_visible = state.is_expanded();
    }

    fn set_input_enabled(&mut self, enabled: bool) {
        self.input_enabled = enabled;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_panel_is_collapsed() {
        let panel = HtmlPanel::new();
        assert_eq!(panel.panel_state(), PanelState::Collapsed);
        assert_eq!(panel.indicators(), (true, false));
        assert!(panel.blocks().is_empty());
        assert!(panel.input_enabled());
    }

    #[test]
    fn test_append_formats_markup() {
        let mut panel = HtmlPanel::new();
        let id = panel.append_block(BlockKind::Assistant, "Hi <b>there</b>\n\nBye");
        assert_eq!(panel.blocks()[0].id, id);
        assert_eq!(
            panel.blocks()[0].markup,
            "Hi &lt;b&gt;there&lt;/b&gt;<br><br>Bye"
        );
    }

    #[test]
    fn test_remove_placeholder() {
        let mut panel = HtmlPanel::new();
        panel.append_block(BlockKind::User, "hello");
        let placeholder = panel.append_block(BlockKind::Placeholder, "Typing...");
        panel.scroll_to_latest();
        assert!(panel.has_placeholder());
        assert_eq!(panel.scroll_top(), 2);

        panel.remove_block(placeholder);
        assert!(!panel.has_placeholder());
        assert_eq!(panel.blocks().len(), 1);
        assert!(panel.is_pinned_to_latest());

        // Removing twice is harmless.
        panel.remove_block(placeholder);
        assert_eq!(panel.blocks().len(), 1);
    }

    #[test]
    fn test_block_ids_are_unique() {
        let mut panel = HtmlPanel::new();
        let a = panel.append_block(BlockKind::User, "a");
        panel.remove_block(a);
        let b = panel.append_block(BlockKind::User, "b");
        assert_ne!(a, b);
    }

    #[test]
    fn test_scroll_pinning() {
        let mut panel = HtmlPanel::new();
        panel.append_block(BlockKind::User, "one");
        assert!(!panel.is_pinned_to_latest());
        panel.scroll_to_latest();
        assert!(panel.is_pinned_to_latest());
        panel.append_block(BlockKind::Assistant, "two");
        assert!(!panel.is_pinned_to_latest());
        panel.scroll_to_latest();
        assert_eq!(panel.scroll_top(), 2);
    }

    #[test]
    fn test_set_panel_state_swaps_icons() {
        let mut panel = HtmlPanel::new();
        panel.set_panel_state(PanelState::Expanded);
        assert_eq!(panel.indicators(), (false, true));
        panel.set_panel_state(PanelState::Collapsed);
        assert_eq!(panel.indicators(), (true, false));
    }

    #[test]
    fn test_to_html_structure() {
        let mut panel = HtmlPanel::new();
        panel.set_panel_state(PanelState::Expanded);
        panel.append_block(BlockKind::User, "Tiny houses?");
        panel.append_block(BlockKind::Assistant, "Yes!\nTwo of them 🏡");
        panel.set_input_enabled(false);

        let html = panel.to_html();
        assert!(html.contains("<div class=\"chat-box active\">"));
        assert!(html.contains("<div class=\"message user\" id=\"msg-1\">Tiny houses?</div>"));
        assert!(html.contains("<div class=\"message bot\" id=\"msg-2\">Yes!<br>Two of them 🏡</div>"));
        assert!(html.contains("<span class=\"open-icon\" style=\"display: none\">"));
        assert!(html.contains("<span class=\"close-icon\" style=\"display: block\">"));
        assert!(html.contains("Send</button>") && html.contains(" disabled>"));
    }
}

//! DisplaySurface trait definition.
//!
//! The dialogue controller only ever talks to the widget through this trait,
//! so the same controller drives the headless `HtmlPanel` in tests and the
//! terminal front-end in the `concierge` binary.

use concierge_types::widget::{BlockId, BlockKind, PanelState};

/// A place message blocks are rendered into.
pub trait DisplaySurface {
    /// Render `text` as a new block at the end of the message list.
    ///
    /// `text` is raw turn content; surfaces apply their own formatting.
    fn append_block(&mut self, kind: BlockKind, text: &str) -> BlockId;

    /// Remove a previously appended block. Unknown ids are ignored.
    fn remove_block(&mut self, id: BlockId);

    /// Pin the message list's scroll position to the newest block.
    fn scroll_to_latest(&mut self);

    /// Show or hide the message list and input row.
    fn set_panel_state(&mut self, state: PanelState);

    /// Enable or disable the input row (disabled while a reply is pending).
    fn set_input_enabled(&mut self, enabled: bool);
}

//! Display primitives shared by every widget surface.

use serde::{Deserialize, Serialize};

use std::fmt;

/// Visibility state of the chat panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelState {
    #[default]
    Collapsed,
    Expanded,
}

impl PanelState {
    /// The state a single toggle activation moves to.
    pub fn toggled(self) -> Self {
        match self {
            PanelState::Collapsed => PanelState::Expanded,
            PanelState::Expanded => PanelState::Collapsed,
        }
    }

    pub fn is_expanded(self) -> bool {
        self == PanelState::Expanded
    }
}

impl fmt::Display for PanelState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PanelState::Collapsed => write!(f, "collapsed"),
            PanelState::Expanded => write!(f, "expanded"),
        }
    }
}

/// Kind of a rendered message block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    /// The visitor's own message.
    User,
    /// A reply from the endpoint.
    Assistant,
    /// Transient "awaiting response" block.
    Placeholder,
    /// Fixed error text shown in place of a reply.
    Fallback,
}

impl BlockKind {
    /// CSS classes the block carries in the widget document.
    ///
    /// Everything that is not the visitor's message is styled as a bot bubble.
    pub fn css_classes(self) -> &'static str {
        match self {
            BlockKind::User => "message user",
            BlockKind::Assistant | BlockKind::Placeholder | BlockKind::Fallback => "message bot",
        }
    }
}

/// Handle to a block appended to a display surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlockId(pub u64);

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "msg-{}", self.0)
    }
}

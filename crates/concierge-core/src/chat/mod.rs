//! Conversation state and the dialogue controller.
//!
//! - `ConversationStore`: append-only turn history for one session
//! - `SystemPromptBuilder`: instruction template + catalog interpolation
//! - `DialogueController`: reacts to panel toggles and message submissions

pub mod controller;
pub mod prompt;
pub mod store;

//! Shared domain types for the Concierge chat widget.
//!
//! Turns, the chat-completion wire shapes, the catalog snapshot, widget
//! display primitives, configuration, and their error types.
//!
//! Zero infrastructure dependencies -- only serde, serde_json, thiserror.

pub mod catalog;
pub mod chat;
pub mod config;
pub mod error;
pub mod llm;
pub mod widget;

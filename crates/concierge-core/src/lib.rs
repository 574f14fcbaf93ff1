//! Conversation logic for the Concierge chat widget.
//!
//! This crate owns the session's conversation store, the dialogue controller
//! that turns UI events into remote calls, and the display seam every widget
//! surface implements. It defines the `CompletionProvider` port that
//! `concierge-infra` implements -- it never depends on an HTTP client itself.

pub mod chat;
pub mod llm;
pub mod render;

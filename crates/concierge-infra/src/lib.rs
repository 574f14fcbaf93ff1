//! Infrastructure implementations for the Concierge chat widget.
//!
//! Implements the `CompletionProvider` port from `concierge-core` over HTTP
//! and provides the catalog and configuration loaders.

pub mod catalog;
pub mod config;
pub mod llm;

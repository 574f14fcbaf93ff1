//! Interactive terminal chat for the concierge widget.
//!
//! Drives the same dialogue controller as the widget document: a welcome
//! banner, async readline input, slash commands, a spinner while a reply is
//! pending and markdown-rendered replies. Entry point:
//! `loop_runner::run_chat_loop`.

pub mod banner;
pub mod commands;
pub mod input;
pub mod loop_runner;
pub mod surface;

//! Display rendering for the chat widget.
//!
//! - `markup`: turn text -> escaped widget markup
//! - `surface`: the `DisplaySurface` trait every front-end implements
//! - `panel`: `HtmlPanel`, the headless widget document

pub mod markup;
pub mod panel;
pub mod surface;

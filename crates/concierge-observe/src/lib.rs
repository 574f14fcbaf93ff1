//! Observability setup for the Concierge chat widget.

pub mod tracing_setup;

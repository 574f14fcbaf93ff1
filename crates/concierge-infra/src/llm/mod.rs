//! Completion provider implementations.

pub mod proxy;

pub use proxy::ProxyProvider;

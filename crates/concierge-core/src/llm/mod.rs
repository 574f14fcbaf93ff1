//! Remote completion abstraction.

pub mod provider;

use thiserror::Error;

/// Errors raised while loading the listing catalog.
///
/// None of these are fatal: callers log them and continue with an empty catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to fetch catalog from '{source_name}': {message}")]
    Fetch {
        source_name: String,
        message: String,
    },

    #[error("catalog source '{source_name}' returned HTTP {status}")]
    Status { source_name: String, status: u16 },

    #[error("failed to decode catalog from '{source_name}': {message}")]
    Decode {
        source_name: String,
        message: String,
    },
}

/// Errors from reading an explicitly requested configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {message}")]
    Read { path: String, message: String },

    #[error("invalid config file '{path}': {message}")]
    Parse { path: String, message: String },
}

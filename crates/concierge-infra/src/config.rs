//! Widget configuration loader.
//!
//! Reads `config.toml` and deserializes it into [`WidgetConfig`]. Every field
//! has a compiled-in default, so the file is optional: a missing file at the
//! default location yields the defaults, an explicitly requested file must
//! exist and parse.

use std::path::{Path, PathBuf};

use concierge_types::config::WidgetConfig;
use concierge_types::error::ConfigError;

/// Highest sampling temperature the endpoint accepts.
const MAX_TEMPERATURE: f64 = 2.0;

/// Default config location: `<config_dir>/concierge/config.toml`, or
/// `./concierge.toml` when the platform has no config directory.
pub fn resolve_config_path() -> PathBuf {
    match dirs::config_dir() {
        Some(dir) => dir.join("concierge").join("config.toml"),
        None => PathBuf::from("concierge.toml"),
    }
}

/// Load configuration from the default location.
///
/// - If the file does not exist, returns [`WidgetConfig::default()`].
/// - If the file exists but fails to read or parse, logs a warning and returns the default.
/// - Otherwise returns the parsed, sanitized config.
pub async fn load_widget_config(path: &Path) -> WidgetConfig {
    match tokio::fs::try_exists(path).await {
        Ok(true) => {}
        Ok(false) => {
            tracing::debug!("No config found at {}, using defaults", path.display());
            return WidgetConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to check {}: {err}, using defaults", path.display());
            return WidgetConfig::default();
        }
    }

    match read_widget_config(path).await {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!("{err}, using defaults");
            WidgetConfig::default()
        }
    }
}

/// Read a config file that must exist and parse.
pub async fn read_widget_config(path: &Path) -> Result<WidgetConfig, ConfigError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

    let config = toml::from_str::<WidgetConfig>(&content).map_err(|e| ConfigError::Parse {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    Ok(sanitize(config))
}

/// Clamp values the endpoint would reject.
///
/// Temperature is kept within `[0, 2]` (non-finite values fall back to the
/// default), `max_tokens` is at least 1, and the endpoint URL is trimmed.
pub fn sanitize(mut config: WidgetConfig) -> WidgetConfig {
    let defaults = WidgetConfig::default();

    if !config.temperature.is_finite() {
        tracing::warn!(
            "temperature is not a number, using {}",
            defaults.temperature
        );
        config.temperature = defaults.temperature;
    } else if !(0.0..=MAX_TEMPERATURE).contains(&config.temperature) {
        let clamped = config.temperature.clamp(0.0, MAX_TEMPERATURE);
        tracing::warn!(
            "temperature {} out of range, clamped to {clamped}",
            config.temperature
        );
        config.temperature = clamped;
    }

    if config.max_tokens == 0 {
        tracing::warn!("max_tokens must be at least 1, using 1");
        config.max_tokens = 1;
    }

    config.endpoint_url = config.endpoint_url.trim().to_string();
    if config.endpoint_url.is_empty() {
        tracing::warn!("endpoint_url is empty, using {}", defaults.endpoint_url);
        config.endpoint_url = defaults.endpoint_url;
    }

    config
}

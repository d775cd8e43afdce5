//! chatline configuration system.
//!
//! Provides TOML-based configuration with validation. All config sections
//! use sensible defaults so partial configs work out of the box. The
//! endpoint base address can be overridden from the environment, which is
//! how deployments point the client at a different server without editing
//! the file.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use chatline_config::{load_config, config_to_json};
//!
//! let config = load_config().expect("failed to load config");
//! let json = config_to_json(&config);
//! println!("{json}");
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{
    ChatConfig, ConnectionConfig, EndpointConfig, IdGeneratorKind, LogLevel, LoggingConfig,
    OutboundConfig, OutboundPolicy, SessionConfig, CONFIG_SCHEMA_VERSION,
};

use std::path::Path;

use chatline_common::ConfigError;

/// Environment variable that overrides `endpoint.base_url`.
pub const BASE_URL_ENV: &str = "CHATLINE_WS_URL";

/// Load config from the platform default path, apply environment overrides,
/// and validate the result.
pub fn load_config() -> Result<ChatConfig, ConfigError> {
    load_config_with_url(None, None)
}

/// Like [`load_config`], but reads an explicit file instead of the default path.
pub fn load_config_from(path: &Path) -> Result<ChatConfig, ConfigError> {
    load_config_with_url(Some(path), None)
}

/// Load from `path` (or the default path), then apply the environment
/// override and finally `base_url`, which wins over both. Validation runs
/// once, on the result.
pub fn load_config_with_url(
    path: Option<&Path>,
    base_url: Option<String>,
) -> Result<ChatConfig, ConfigError> {
    let mut config = match path {
        Some(path) => toml_loader::load_from_path(path)?,
        None => toml_loader::load_default()?,
    };
    apply_overrides(&mut config, std::env::var(BASE_URL_ENV).ok(), base_url);
    validation::validate(&config)?;
    Ok(config)
}

/// Environment value first, then the explicit one.
pub fn apply_overrides(config: &mut ChatConfig, env: Option<String>, explicit: Option<String>) {
    apply_base_url_override(config, env);
    apply_base_url_override(config, explicit);
}

/// Replace the endpoint base address when an override is present and non-empty.
pub fn apply_base_url_override(config: &mut ChatConfig, base_url: Option<String>) {
    if let Some(url) = base_url.map(|u| u.trim().to_string()) {
        if !url.is_empty() {
            tracing::debug!(base_url = %url, "endpoint base overridden from environment");
            config.endpoint.base_url = url;
        }
    }
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &ChatConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}

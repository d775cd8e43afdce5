//! Full configuration validation.
//!
//! Each section has its own check; this orchestrator calls them all and
//! collects errors into a single `ConfigError`.

mod endpoint;
mod helpers;
mod limits;

#[cfg(test)]
mod tests;

use crate::schema::ChatConfig;
use chatline_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &ChatConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    endpoint::validate_endpoint(&mut errors, config);
    limits::validate_session(&mut errors, config);
    limits::validate_connection(&mut errors, config);
    limits::validate_outbound(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

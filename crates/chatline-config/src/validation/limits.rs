//! Validation for numeric limits and session storage settings.

use crate::schema::ChatConfig;

use super::helpers::validate_range;

pub(crate) fn validate_session(errors: &mut Vec<String>, config: &ChatConfig) {
    if config.session.storage_key.trim().is_empty() {
        errors.push("session.storage_key must not be empty".into());
    }
}

pub(crate) fn validate_connection(errors: &mut Vec<String>, config: &ChatConfig) {
    validate_range(
        errors,
        "connection.connect_timeout_secs",
        config.connection.connect_timeout_secs,
        1,
        120,
    );
    validate_range(
        errors,
        "connection.event_buffer",
        config.connection.event_buffer,
        16,
        65536,
    );
}

pub(crate) fn validate_outbound(errors: &mut Vec<String>, config: &ChatConfig) {
    validate_range(
        errors,
        "outbound.max_queued",
        config.outbound.max_queued,
        1,
        1000,
    );
}

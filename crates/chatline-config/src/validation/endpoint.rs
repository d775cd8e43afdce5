//! Endpoint address validation.

use crate::schema::ChatConfig;

/// The base must be a bare WebSocket origin; the path carries everything else.
pub(crate) fn validate_endpoint(errors: &mut Vec<String>, config: &ChatConfig) {
    let base = config.endpoint.base_url.trim();
    let rest = base
        .strip_prefix("ws://")
        .or_else(|| base.strip_prefix("wss://"));

    match rest {
        None => errors.push(format!(
            "endpoint.base_url = {base:?} must start with ws:// or wss://"
        )),
        Some("") => errors.push("endpoint.base_url is missing a host".into()),
        Some(host) if host.contains('?') || host.contains('#') => errors.push(format!(
            "endpoint.base_url = {base:?} must not carry a query or fragment"
        )),
        Some(_) => {}
    }

    let path = &config.endpoint.path;
    if !path.starts_with('/') {
        errors.push(format!("endpoint.path = {path:?} must start with '/'"));
    }
    if path.contains('?') {
        errors.push(format!("endpoint.path = {path:?} must not contain a query"));
    }
}

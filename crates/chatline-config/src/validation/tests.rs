//! Tests for the full validation pipeline.

use super::*;
use crate::schema::*;

#[test]
fn default_config_validates() {
    let config = ChatConfig::default();
    assert!(validate(&config).is_ok());
}

#[test]
fn accepts_secure_websocket_base() {
    let mut config = ChatConfig::default();
    config.endpoint.base_url = "wss://chat.example.com:8443".into();
    assert!(validate(&config).is_ok());
}

#[test]
fn catches_http_base_url() {
    let mut config = ChatConfig::default();
    config.endpoint.base_url = "http://localhost:8000".into();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("endpoint.base_url"));
}

#[test]
fn catches_base_url_without_host() {
    let mut config = ChatConfig::default();
    config.endpoint.base_url = "ws://".into();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("missing a host"));
}

#[test]
fn catches_base_url_with_query() {
    let mut config = ChatConfig::default();
    config.endpoint.base_url = "ws://localhost:8000?x=1".into();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("query or fragment"));
}

#[test]
fn catches_relative_path() {
    let mut config = ChatConfig::default();
    config.endpoint.path = "ws/chat".into();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("endpoint.path"));
}

#[test]
fn catches_empty_storage_key() {
    let mut config = ChatConfig::default();
    config.session.storage_key = " ".into();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("session.storage_key"));
}

#[test]
fn catches_connect_timeout_out_of_range() {
    let mut config = ChatConfig::default();
    config.connection.connect_timeout_secs = 0;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("connection.connect_timeout_secs"));
}

#[test]
fn catches_event_buffer_too_small() {
    let mut config = ChatConfig::default();
    config.connection.event_buffer = 4;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("connection.event_buffer"));
}

#[test]
fn catches_max_queued_zero() {
    let mut config = ChatConfig::default();
    config.outbound.max_queued = 0;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("outbound.max_queued"));
}

#[test]
fn collects_multiple_errors() {
    let mut config = ChatConfig::default();
    config.endpoint.path = "chat".into();
    config.outbound.max_queued = 5000;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("endpoint.path"));
    assert!(err.contains("outbound.max_queued"));
    assert!(err.contains("; "));
}

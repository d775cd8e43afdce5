use serde::{Deserialize, Serialize};

/// Where the chat server lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    /// Scheme, host and port of the server (`ws://` or `wss://`).
    pub base_url: String,
    /// Path of the chat endpoint, appended to `base_url`.
    pub path: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            base_url: "ws://localhost:8000".into(),
            path: "/ws/chat".into(),
        }
    }
}

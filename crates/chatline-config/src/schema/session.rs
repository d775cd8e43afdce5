//! Session identifier persistence settings.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Which identifier generator backs new session ids.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum IdGeneratorKind {
    /// Use the OS random source when it is available, otherwise fall back.
    #[default]
    Auto,
    Secure,
    Fallback,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// File that persists the session id. Defaults to the platform data dir.
    pub store_path: Option<PathBuf>,
    /// Key under which the session id is stored.
    pub storage_key: String,
    pub id_generator: IdGeneratorKind,
    /// Extra seed for the fallback generator, mixed with per-run clock entropy.
    pub fallback_seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            store_path: None,
            storage_key: "chat_session_id".into(),
            id_generator: IdGeneratorKind::Auto,
            fallback_seed: None,
        }
    }
}

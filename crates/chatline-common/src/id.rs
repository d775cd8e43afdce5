use serde::{Deserialize, Serialize};
use std::fmt;

/// Length of the hyphenated UUID form, e.g. `xxxxxxxx-xxxx-4xxx-yxxx-xxxxxxxxxxxx`.
pub const SESSION_ID_LEN: usize = 36;

pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Identifies one logical conversation to the server.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    pub fn new() -> Self {
        Self(new_id())
    }

    /// Accept a previously persisted identifier if it is a hyphenated UUID.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.len() != SESSION_ID_LEN {
            return None;
        }
        uuid::Uuid::parse_str(raw)
            .ok()
            .map(|_| Self(raw.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<uuid::Uuid> for SessionId {
    fn from(uuid: uuid::Uuid) -> Self {
        Self(uuid.hyphenated().to_string())
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

//! Error types for the chat client.

use std::path::PathBuf;

use chatline_common::ChatlineError;

/// Failure to read or write the persisted session id.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not determine data directory")]
    NoDataDir,

    #[error("failed to read session store {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write session store {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("session store {path} is corrupt: {reason}")]
    Corrupt { path: PathBuf, reason: String },
}

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    /// The connection was not open, so the text was not transmitted.
    #[error("not connected")]
    NotConnected,

    #[error(transparent)]
    Store(#[from] StoreError),

    /// The conversation task has stopped and no longer accepts commands.
    #[error("chat client has shut down")]
    ClientClosed,
}

impl From<StoreError> for ChatlineError {
    fn from(err: StoreError) -> Self {
        ChatlineError::Storage(err.to_string())
    }
}

impl From<ChatError> for ChatlineError {
    fn from(err: ChatError) -> Self {
        match err {
            ChatError::NotConnected => ChatlineError::Network(err.to_string()),
            ChatError::Store(e) => e.into(),
            ChatError::ClientClosed => ChatlineError::Other(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_error_display() {
        let err = StoreError::Corrupt {
            path: PathBuf::from("/tmp/session.json"),
            reason: "expected an object".into(),
        };
        assert_eq!(
            err.to_string(),
            "session store /tmp/session.json is corrupt: expected an object"
        );
        assert_eq!(
            StoreError::NoDataDir.to_string(),
            "could not determine data directory"
        );
    }

    #[test]
    fn chat_error_maps_into_chatline_error() {
        let err: ChatlineError = ChatError::NotConnected.into();
        assert!(matches!(err, ChatlineError::Network(_)));

        let err: ChatlineError = ChatError::Store(StoreError::NoDataDir).into();
        assert!(matches!(err, ChatlineError::Storage(ref m) if m.contains("data directory")));

        let err: ChatlineError = ChatError::ClientClosed.into();
        assert_eq!(err.to_string(), "chat client has shut down");
    }
}

pub mod errors;
pub mod id;

pub use errors::{ChatlineError, ConfigError};
pub use id::{new_id, SessionId, SESSION_ID_LEN};

pub type Result<T> = std::result::Result<T, ChatlineError>;

//! Durable session identifier.
//!
//! The session id names one server-side conversation. It is created on
//! first use, persisted so it survives restarts, and replaced only when the
//! user clears the history.

mod generator;
mod storage;
mod store;

pub use generator::{
    select_generator, FallbackGenerator, GeneratorChoice, IdentifierGenerator, SecureGenerator,
};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use store::{SessionStore, SESSION_KEY};

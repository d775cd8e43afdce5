//! Lifecycle of the conversation's single connection.

mod endpoint;
mod manager;

pub use endpoint::Endpoint;
pub use manager::{ConnectionManager, ConnectionState, LinkEvent};

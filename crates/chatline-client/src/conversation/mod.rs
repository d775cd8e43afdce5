//! Conversation state and the task that drives it.
//!
//! [`Conversation`] is the synchronous core: message list, streaming flag,
//! outbound policy and clear-history sequencing. [`ChatClient`] runs one
//! conversation on a background task, applying user commands and transport
//! events one at a time, and publishes a [`ChatView`] after every change.

mod client;
mod runner;
mod state;
mod types;

pub use client::ChatClient;
pub use state::Conversation;
pub use types::{ChatView, ClientOptions, OutboundOptions, OutboundPolicy};

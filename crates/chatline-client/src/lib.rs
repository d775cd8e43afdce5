//! Client side of a streaming chat conversation.
//!
//! One conversation holds one WebSocket connection to the chat server,
//! keyed by a session id that survives restarts. The server streams the
//! assistant's reply as typed JSON frames which are folded into an ordered
//! message list; front-ends render from [`ChatView`] snapshots.
//!
//! Leaves first: [`session`] persists the session id, [`transport`] moves
//! raw text frames, [`connection`] owns the connection lifecycle,
//! [`protocol`] decodes frames and applies them, and [`conversation`] ties
//! everything together behind [`ChatClient`].

pub mod connection;
pub mod conversation;
pub mod error;
pub mod message;
pub mod protocol;
pub mod session;
pub mod transport;

#[cfg(test)]
pub(crate) mod test_support;

pub use connection::{ConnectionManager, ConnectionState, Endpoint};
pub use conversation::{
    ChatClient, ChatView, ClientOptions, Conversation, OutboundOptions, OutboundPolicy,
};
pub use error::{ChatError, StoreError};
pub use message::{Message, Sender};
pub use protocol::{apply, decode, DecodeError, Frame, Transcript};
pub use session::{
    select_generator, FallbackGenerator, FileStore, GeneratorChoice, IdentifierGenerator,
    KeyValueStore, MemoryStore, SecureGenerator, SessionStore, SESSION_KEY,
};
pub use transport::{ConnectionId, Link, Transport, TransportEvent, WsTransport};

//! Duplex text transport.
//!
//! A [`Transport`] opens connections; each open connection is a [`Link`]
//! used to send text or request a close. Everything the connection observes
//! (open, inbound text, error, close) comes back as a [`TransportEvent`] on
//! one channel, tagged with the [`ConnectionId`] it belongs to, in the order
//! it happened.

mod types;
mod ws;

pub use types::{ConnectionId, EventSender, Link, Transport, TransportEvent};
pub use ws::WsTransport;

use std::fmt;

use tokio::sync::mpsc;

/// Distinguishes successive connections of one conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(pub u64);

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Lifecycle and data events reported by a connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    /// Handshake completed; the connection can carry text.
    Opened { conn: ConnectionId },
    /// One inbound text frame.
    Message { conn: ConnectionId, text: String },
    /// Something went wrong. A `Closed` for the same connection follows.
    Error { conn: ConnectionId, message: String },
    /// The connection is gone. Always the last event of a connection.
    Closed { conn: ConnectionId },
}

impl TransportEvent {
    pub fn conn(&self) -> ConnectionId {
        match self {
            TransportEvent::Opened { conn }
            | TransportEvent::Message { conn, .. }
            | TransportEvent::Error { conn, .. }
            | TransportEvent::Closed { conn } => *conn,
        }
    }
}

pub type EventSender = mpsc::Sender<TransportEvent>;

/// Opens connections. Opening never blocks; progress is reported as events.
pub trait Transport: Send {
    fn open(&mut self, url: &str, conn: ConnectionId, events: EventSender) -> Box<dyn Link>;
}

/// Handle to one open (or opening) connection.
pub trait Link: Send {
    /// Queue a text frame. Returns `false` if the connection is already gone.
    fn send_text(&mut self, text: &str) -> bool;

    /// Request the connection to close. A `Closed` event follows.
    fn close(&mut self);
}

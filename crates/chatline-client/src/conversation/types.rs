//! Options, snapshots, and commands for the conversation task.

use std::time::Duration;

use chatline_common::SessionId;

use crate::connection::{ConnectionState, Endpoint};
use crate::message::Message;

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// What to do with a message submitted while the connection is down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutboundPolicy {
    /// Echo it locally and start a reconnect; the text is not transmitted.
    #[default]
    Drop,
    /// Hold it and transmit once the connection opens.
    Queue,
}

#[derive(Debug, Clone)]
pub struct OutboundOptions {
    pub policy: OutboundPolicy,
    /// Oldest held messages are discarded beyond this bound.
    pub max_queued: usize,
}

impl Default for OutboundOptions {
    fn default() -> Self {
        Self {
            policy: OutboundPolicy::Drop,
            max_queued: 32,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub endpoint: Endpoint,
    /// Handshake timeout for the WebSocket transport.
    pub connect_timeout: Duration,
    /// Capacity of the command and event queues.
    pub event_buffer: usize,
    /// Connect as soon as the conversation task starts.
    pub auto_connect: bool,
    pub outbound: OutboundOptions,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            endpoint: Endpoint::default(),
            connect_timeout: Duration::from_secs(15),
            event_buffer: 256,
            auto_connect: true,
            outbound: OutboundOptions::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// Everything a front-end needs to render the conversation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatView {
    pub messages: Vec<Message>,
    pub is_streaming: bool,
    pub is_connected: bool,
    pub connection: ConnectionState,
    /// Session of the live connection, if any.
    pub session_id: Option<SessionId>,
    /// Messages held by the `Queue` outbound policy.
    pub queued: usize,
}

impl ChatView {
    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub(crate) enum ChatCommand {
    Connect,
    Close,
    SendMessage(String),
    ClearHistory,
    Shutdown,
}

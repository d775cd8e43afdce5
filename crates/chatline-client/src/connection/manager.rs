//! Connection manager: at most one live connection, keyed by session id.
//!
//! State machine:
//!
//! ```text
//! idle --connect--> connecting --opened--> open --closed--> closed
//! connecting --error--> error --closed--> error
//! closed|error --connect--> connecting
//! ```
//!
//! Nothing moves `closed -> connecting` on its own; a caller has to invoke
//! [`ConnectionManager::connect`] again.

use std::fmt;

use chatline_common::SessionId;
use tracing::{debug, info, warn};

use super::endpoint::Endpoint;
use crate::error::{ChatError, StoreError};
use crate::session::SessionStore;
use crate::transport::{ConnectionId, EventSender, Link, Transport, TransportEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    #[default]
    Idle,
    Connecting,
    Open,
    Closed,
    /// The last connection failed before it opened.
    Error,
}

impl ConnectionState {
    pub fn as_str(self) -> &'static str {
        match self {
            ConnectionState::Idle => "idle",
            ConnectionState::Connecting => "connecting",
            ConnectionState::Open => "open",
            ConnectionState::Closed => "closed",
            ConnectionState::Error => "error",
        }
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a transport event means for the conversation, after filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkEvent {
    Opened,
    /// Raw inbound text, not yet decoded.
    Frame(String),
    Errored(String),
    Closed,
    /// A connection released by [`ConnectionManager::close`] has finished.
    Released(ConnectionId),
}

struct ActiveLink {
    id: ConnectionId,
    session_id: SessionId,
    link: Box<dyn Link>,
}

pub struct ConnectionManager {
    transport: Box<dyn Transport>,
    endpoint: Endpoint,
    events: EventSender,
    active: Option<ActiveLink>,
    state: ConnectionState,
    next_id: u64,
}

impl ConnectionManager {
    pub fn new(transport: Box<dyn Transport>, endpoint: Endpoint, events: EventSender) -> Self {
        Self {
            transport,
            endpoint,
            events,
            active: None,
            state: ConnectionState::Idle,
            next_id: 1,
        }
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == ConnectionState::Open
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Session id the live connection was opened with.
    pub fn session_id(&self) -> Option<&SessionId> {
        self.active.as_ref().map(|a| &a.session_id)
    }

    /// Open a connection unless one is already open or opening.
    pub fn connect(&mut self, store: &mut SessionStore) -> Result<(), StoreError> {
        if self.active.is_some()
            && matches!(
                self.state,
                ConnectionState::Open | ConnectionState::Connecting
            )
        {
            debug!(state = %self.state, "connect ignored, connection already live");
            return Ok(());
        }

        // A failed link may still be waiting for its close; stop listening to it.
        if let Some(mut stale) = self.active.take() {
            stale.link.close();
        }

        let session_id = store.get_or_create_session_id()?;
        let id = ConnectionId(self.next_id);
        self.next_id += 1;

        let url = self.endpoint.url_for(&session_id);
        info!(conn = %id, session_id = %session_id, "opening chat connection");
        let link = self.transport.open(&url, id, self.events.clone());

        self.active = Some(ActiveLink {
            id,
            session_id,
            link,
        });
        self.state = ConnectionState::Connecting;
        Ok(())
    }

    /// Release the live connection. Everything it reports from now on is
    /// ignored, except its final close which surfaces as `Released`.
    pub fn close(&mut self) -> Option<ConnectionId> {
        let mut active = self.active.take()?;
        active.link.close();
        self.state = ConnectionState::Closed;
        info!(conn = %active.id, "chat connection released");
        Some(active.id)
    }

    /// Transmit raw text if the connection is open. Otherwise start a
    /// reconnect and report that nothing was sent.
    pub fn send(&mut self, text: &str, store: &mut SessionStore) -> Result<(), ChatError> {
        if self.state == ConnectionState::Open {
            if let Some(active) = self.active.as_mut() {
                if active.link.send_text(text) {
                    debug!(conn = %active.id, len = text.len(), "message sent");
                    return Ok(());
                }
            }
        }

        warn!(state = %self.state, "send while not connected, reconnecting");
        if let Err(e) = self.connect(store) {
            warn!(error = %e, "reconnect failed");
        }
        Err(ChatError::NotConnected)
    }

    /// Apply a transport event to the state machine.
    pub fn handle_event(&mut self, event: TransportEvent) -> Option<LinkEvent> {
        let conn = event.conn();
        let current = self.active.as_ref().is_some_and(|a| a.id == conn);

        if !current {
            return match event {
                TransportEvent::Closed { conn } => Some(LinkEvent::Released(conn)),
                _ => {
                    debug!(conn = %conn, "dropping event from released connection");
                    None
                }
            };
        }

        match event {
            TransportEvent::Opened { .. } => {
                self.state = ConnectionState::Open;
                info!(conn = %conn, "chat connection open");
                Some(LinkEvent::Opened)
            }
            TransportEvent::Message { text, .. } => Some(LinkEvent::Frame(text)),
            TransportEvent::Error { message, .. } => {
                warn!(conn = %conn, error = %message, "chat connection error");
                if self.state == ConnectionState::Connecting {
                    self.state = ConnectionState::Error;
                }
                Some(LinkEvent::Errored(message))
            }
            TransportEvent::Closed { .. } => {
                self.active = None;
                if self.state != ConnectionState::Error {
                    self.state = ConnectionState::Closed;
                }
                info!(conn = %conn, "chat connection closed");
                Some(LinkEvent::Closed)
            }
        }
    }
}

impl fmt::Debug for ConnectionManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionManager")
            .field("endpoint", &self.endpoint)
            .field("state", &self.state)
            .field("conn", &self.active.as_ref().map(|a| a.id))
            .finish()
    }
}

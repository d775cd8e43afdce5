use std::collections::VecDeque;

use chatline_common::SessionId;
use tracing::{debug, error, info, warn};

use super::types::{ChatView, OutboundOptions, OutboundPolicy};
use crate::connection::{ConnectionManager, ConnectionState, LinkEvent};
use crate::message::Message;
use crate::protocol::{self, Transcript};
use crate::session::SessionStore;
use crate::transport::{ConnectionId, TransportEvent};

/// A single conversation: transcript, session, and connection.
///
/// Every mutation goes through `&mut self`, so user actions and inbound
/// frames are applied strictly one at a time.
pub struct Conversation {
    transcript: Transcript,
    store: SessionStore,
    connection: ConnectionManager,
    outbound: OutboundOptions,
    pending: VecDeque<String>,
    /// Released connection whose close must arrive before reconnecting.
    reconnect_after: Option<ConnectionId>,
}

impl Conversation {
    pub fn new(store: SessionStore, connection: ConnectionManager, outbound: OutboundOptions) -> Self {
        Self {
            transcript: Transcript::new(),
            store,
            connection,
            outbound,
            pending: VecDeque::new(),
            reconnect_after: None,
        }
    }

    // -- accessors --

    pub fn messages(&self) -> &[Message] {
        &self.transcript.messages
    }

    pub fn is_streaming(&self) -> bool {
        self.transcript.streaming
    }

    pub fn is_connected(&self) -> bool {
        self.connection.is_open()
    }

    pub fn connection_state(&self) -> ConnectionState {
        self.connection.state()
    }

    pub fn session_id(&self) -> Option<&SessionId> {
        self.connection.session_id()
    }

    pub fn queued(&self) -> usize {
        self.pending.len()
    }

    pub fn view(&self) -> ChatView {
        ChatView {
            messages: self.transcript.messages.clone(),
            is_streaming: self.transcript.streaming,
            is_connected: self.connection.is_open(),
            connection: self.connection.state(),
            session_id: self.connection.session_id().cloned(),
            queued: self.pending.len(),
        }
    }

    // -- user actions --

    /// Open the connection for the persisted session unless one is live.
    pub fn connect(&mut self) {
        if let Err(e) = self.connection.connect(&mut self.store) {
            error!(error = %e, "cannot connect without a session id");
        }
    }

    /// Release the connection without reconnecting.
    pub fn close(&mut self) {
        self.reconnect_after = None;
        self.connection.close();
        self.transcript.streaming = false;
    }

    /// Echo the text locally and transmit it if the connection is open.
    pub fn send_message(&mut self, text: &str) {
        if text.trim().is_empty() {
            debug!("ignoring empty message");
            return;
        }

        self.transcript.messages.push(Message::user(text));
        match self.connection.send(text, &mut self.store) {
            Ok(()) => self.transcript.streaming = true,
            Err(_) => self.hold_or_drop(text),
        }
    }

    /// Start a new server-side session with an empty transcript.
    pub fn clear_history(&mut self) {
        let rotated = self.store.rotate_session_id();

        self.transcript = Transcript::new();
        self.pending.clear();
        self.reconnect_after = None;
        let released = self.connection.close();

        if let Err(e) = rotated {
            error!(error = %e, "failed to rotate session id, staying disconnected");
            return;
        }

        match released {
            Some(conn) => {
                debug!(conn = %conn, "reconnect deferred until the old connection closes");
                self.reconnect_after = Some(conn);
            }
            None => self.connect(),
        }
    }

    // -- transport events --

    pub fn handle_transport_event(&mut self, event: TransportEvent) {
        let Some(event) = self.connection.handle_event(event) else {
            return;
        };

        match event {
            LinkEvent::Opened => {
                self.transcript.streaming = false;
                self.flush_pending();
            }
            LinkEvent::Frame(raw) => match protocol::decode(&raw) {
                Ok(frame) => {
                    debug!(kind = frame.kind(), "frame received");
                    let transcript = std::mem::take(&mut self.transcript);
                    self.transcript = protocol::apply(transcript, frame);
                }
                Err(e) => warn!(error = %e, "ignoring undecodable frame"),
            },
            // The close that follows carries the state change.
            LinkEvent::Errored(_) => {}
            LinkEvent::Closed => self.transcript.streaming = false,
            LinkEvent::Released(conn) => {
                if self.reconnect_after == Some(conn) {
                    self.reconnect_after = None;
                    self.connect();
                }
            }
        }
    }

    fn hold_or_drop(&mut self, text: &str) {
        match self.outbound.policy {
            OutboundPolicy::Drop => {
                warn!("message shown locally but not transmitted, connection not open");
            }
            OutboundPolicy::Queue => {
                if self.pending.len() >= self.outbound.max_queued.max(1) {
                    self.pending.pop_front();
                    warn!(max = self.outbound.max_queued, "outbound queue full, dropped oldest message");
                }
                self.pending.push_back(text.to_string());
                info!(queued = self.pending.len(), "message queued until connection opens");
            }
        }
    }

    fn flush_pending(&mut self) {
        while let Some(text) = self.pending.pop_front() {
            if self.connection.send(&text, &mut self.store).is_err() {
                self.pending.push_front(text);
                break;
            }
            self.transcript.streaming = true;
        }
    }
}

impl std::fmt::Debug for Conversation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Conversation")
            .field("messages", &self.transcript.messages.len())
            .field("streaming", &self.transcript.streaming)
            .field("connection", &self.connection)
            .field("queued", &self.pending.len())
            .finish()
    }
}

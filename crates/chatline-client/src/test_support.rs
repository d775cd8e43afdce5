//! Test doubles: an in-process transport and store helpers.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::mpsc;

use crate::conversation::Conversation;
use crate::session::{FallbackGenerator, MemoryStore, SessionStore};
use crate::transport::{ConnectionId, EventSender, Link, Transport, TransportEvent};

static NEXT_SEED: AtomicU64 = AtomicU64::new(1);

/// Session store over shared memory with a unique, deterministic generator.
pub(crate) fn memory_session_store(shared: &MemoryStore) -> SessionStore {
    let seed = NEXT_SEED.fetch_add(1, Ordering::Relaxed);
    SessionStore::new(
        Box::new(shared.clone()),
        Box::new(FallbackGenerator::seeded(seed)),
    )
}

/// Feed every queued transport event into the conversation.
pub(crate) fn drain(conversation: &mut Conversation, rx: &mut mpsc::Receiver<TransportEvent>) {
    while let Ok(event) = rx.try_recv() {
        conversation.handle_transport_event(event);
    }
}

#[derive(Default)]
struct FakeState {
    opened: Vec<(ConnectionId, String)>,
    sent: Vec<(ConnectionId, String)>,
    closed: Vec<ConnectionId>,
    senders: HashMap<ConnectionId, EventSender>,
}

/// Records what the connection layer asks for and lets tests play the
/// server side by emitting events. Closing a link emits `Closed` at once.
#[derive(Clone, Default)]
pub(crate) struct FakeTransport {
    state: Arc<Mutex<FakeState>>,
}

impl FakeTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap()
    }

    pub(crate) fn open_count(&self) -> usize {
        self.state().opened.len()
    }

    pub(crate) fn urls(&self) -> Vec<String> {
        self.state().opened.iter().map(|(_, url)| url.clone()).collect()
    }

    pub(crate) fn last_conn(&self) -> ConnectionId {
        self.state().opened.last().expect("no connection opened").0
    }

    pub(crate) fn sent(&self) -> Vec<String> {
        self.state().sent.iter().map(|(_, text)| text.clone()).collect()
    }

    pub(crate) fn closed(&self) -> Vec<ConnectionId> {
        self.state().closed.clone()
    }

    /// Deliver an event exactly as a real connection task would.
    pub(crate) async fn emit(&self, event: TransportEvent) {
        let tx = self
            .state()
            .senders
            .get(&event.conn())
            .cloned()
            .expect("event for a connection that was never opened");
        tx.send(event).await.expect("event channel closed");
    }

    pub(crate) async fn open_last(&self) {
        let conn = self.last_conn();
        self.emit(TransportEvent::Opened { conn }).await;
    }

    pub(crate) async fn frame(&self, text: &str) {
        let conn = self.last_conn();
        self.emit(TransportEvent::Message {
            conn,
            text: text.to_string(),
        })
        .await;
    }
}

impl Transport for FakeTransport {
    fn open(&mut self, url: &str, conn: ConnectionId, events: EventSender) -> Box<dyn Link> {
        let mut state = self.state();
        state.opened.push((conn, url.to_string()));
        state.senders.insert(conn, events);
        Box::new(FakeLink {
            conn,
            state: Arc::clone(&self.state),
            closed: false,
        })
    }
}

struct FakeLink {
    conn: ConnectionId,
    state: Arc<Mutex<FakeState>>,
    closed: bool,
}

impl Link for FakeLink {
    fn send_text(&mut self, text: &str) -> bool {
        if self.closed {
            return false;
        }
        let mut state = self.state.lock().unwrap();
        state.sent.push((self.conn, text.to_string()));
        true
    }

    fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        let mut state = self.state.lock().unwrap();
        state.closed.push(self.conn);
        if let Some(tx) = state.senders.get(&self.conn) {
            let _ = tx.try_send(TransportEvent::Closed { conn: self.conn });
        }
    }
}

//! WebSocket transport over `tokio-tungstenite`.
//!
//! Each opened connection runs in its own task: handshake, then a loop that
//! forwards queued outbound text and reports inbound frames. The task always
//! finishes by emitting `Closed`, whichever way the connection ends.

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tracing::{debug, info, warn};

use super::types::{ConnectionId, EventSender, Link, Transport, TransportEvent};

/// Opens WebSocket connections. Requires a running tokio runtime.
#[derive(Debug, Clone)]
pub struct WsTransport {
    connect_timeout: Duration,
}

impl WsTransport {
    pub fn new(connect_timeout: Duration) -> Self {
        Self { connect_timeout }
    }
}

impl Default for WsTransport {
    fn default() -> Self {
        Self::new(Duration::from_secs(15))
    }
}

impl Transport for WsTransport {
    fn open(&mut self, url: &str, conn: ConnectionId, events: EventSender) -> Box<dyn Link> {
        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
        tokio::spawn(run_link(
            url.to_string(),
            conn,
            self.connect_timeout,
            outbound_rx,
            events,
        ));
        Box::new(WsLink { outbound_tx })
    }
}

enum Outbound {
    Text(String),
    Close,
}

struct WsLink {
    outbound_tx: mpsc::UnboundedSender<Outbound>,
}

impl Link for WsLink {
    fn send_text(&mut self, text: &str) -> bool {
        self.outbound_tx
            .send(Outbound::Text(text.to_string()))
            .is_ok()
    }

    fn close(&mut self) {
        let _ = self.outbound_tx.send(Outbound::Close);
    }
}

// ---------------------------------------------------------------------------
// Connection task
// ---------------------------------------------------------------------------

async fn run_link(
    url: String,
    conn: ConnectionId,
    connect_timeout: Duration,
    mut outbound_rx: mpsc::UnboundedReceiver<Outbound>,
    events: EventSender,
) {
    info!(
        conn = %conn,
        url = %url.split('?').next().unwrap_or(""),
        "Connecting to chat server"
    );

    let handshake = tokio::time::timeout(connect_timeout, connect_async(url.as_str()));
    tokio::pin!(handshake);

    let ws_stream = loop {
        tokio::select! {
            result = &mut handshake => match result {
                Ok(Ok((ws, _))) => break ws,
                Ok(Err(e)) => {
                    fail(&events, conn, format!("connection failed: {e}")).await;
                    return;
                }
                Err(_elapsed) => {
                    let secs = connect_timeout.as_secs();
                    fail(&events, conn, format!("connection timed out after {secs}s")).await;
                    return;
                }
            },
            out = outbound_rx.recv() => match out {
                Some(Outbound::Text(_)) => {
                    debug!(conn = %conn, "dropping text queued before the handshake finished");
                }
                Some(Outbound::Close) | None => {
                    info!(conn = %conn, "Close requested during handshake");
                    let _ = events.send(TransportEvent::Closed { conn }).await;
                    return;
                }
            },
        }
    };

    if events.send(TransportEvent::Opened { conn }).await.is_err() {
        return;
    }

    let (mut sink, mut stream) = ws_stream.split();

    loop {
        tokio::select! {
            biased;

            out = outbound_rx.recv() => match out {
                Some(Outbound::Text(text)) => {
                    if let Err(e) = sink.send(WsMessage::Text(text.into())).await {
                        report(&events, conn, format!("send failed: {e}")).await;
                        break;
                    }
                }
                Some(Outbound::Close) | None => {
                    let _ = sink.close().await;
                    info!(conn = %conn, "Chat connection closed by client");
                    break;
                }
            },

            frame = stream.next() => match frame {
                Some(Ok(WsMessage::Text(text))) => {
                    let event = TransportEvent::Message {
                        conn,
                        text: text.as_str().to_owned(),
                    };
                    if events.send(event).await.is_err() {
                        break;
                    }
                }
                Some(Ok(WsMessage::Ping(data))) => {
                    let _ = sink.send(WsMessage::Pong(data)).await;
                }
                Some(Ok(WsMessage::Close(_))) | None => {
                    info!(conn = %conn, "Chat server closed connection");
                    break;
                }
                Some(Err(e)) => {
                    report(&events, conn, format!("websocket error: {e}")).await;
                    break;
                }
                Some(Ok(WsMessage::Binary(_))) => {
                    debug!(conn = %conn, "ignoring binary frame");
                }
                Some(Ok(_)) => {}
            },
        }
    }

    let _ = events.send(TransportEvent::Closed { conn }).await;
}

/// Report an error on a connection that stays in the loop until closed.
async fn report(events: &EventSender, conn: ConnectionId, message: String) {
    warn!(conn = %conn, error = %message, "Chat connection error");
    let _ = events.send(TransportEvent::Error { conn, message }).await;
}

/// Report a connection that never opened, then close it.
async fn fail(events: &EventSender, conn: ConnectionId, message: String) {
    report(events, conn, message).await;
    let _ = events.send(TransportEvent::Closed { conn }).await;
}

//! Public handle for a running conversation.

use tokio::sync::{mpsc, watch};

use super::runner::conversation_loop;
use super::state::Conversation;
use super::types::{ChatCommand, ChatView, ClientOptions};
use crate::connection::ConnectionManager;
use crate::error::ChatError;
use crate::session::SessionStore;
use crate::transport::{Transport, WsTransport};

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Handle for interacting with a conversation running on a background task.
///
/// Commands are queued and applied in order. State is observed through
/// [`ChatView`] snapshots. Dropping every handle stops the task and closes
/// the connection.
#[derive(Clone)]
pub struct ChatClient {
    command_tx: mpsc::Sender<ChatCommand>,
    view_rx: watch::Receiver<ChatView>,
}

impl ChatClient {
    /// Start the conversation task over the given transport.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn start(options: ClientOptions, store: SessionStore, transport: Box<dyn Transport>) -> Self {
        let buffer = options.event_buffer.max(1);
        let (event_tx, event_rx) = mpsc::channel(buffer);
        let (command_tx, command_rx) = mpsc::channel(buffer);
        let (view_tx, view_rx) = watch::channel(ChatView::default());

        let connection = ConnectionManager::new(transport, options.endpoint, event_tx);
        let conversation = Conversation::new(store, connection, options.outbound);

        tokio::spawn(conversation_loop(
            conversation,
            command_rx,
            event_rx,
            view_tx,
            options.auto_connect,
        ));

        Self {
            command_tx,
            view_rx,
        }
    }

    /// Start over a WebSocket transport.
    pub fn websocket(options: ClientOptions, store: SessionStore) -> Self {
        let transport = WsTransport::new(options.connect_timeout);
        Self::start(options, store, Box::new(transport))
    }

    async fn command(&self, cmd: ChatCommand) -> Result<(), ChatError> {
        self.command_tx
            .send(cmd)
            .await
            .map_err(|_| ChatError::ClientClosed)
    }

    pub async fn send_message(&self, text: impl Into<String>) -> Result<(), ChatError> {
        self.command(ChatCommand::SendMessage(text.into())).await
    }

    /// Forget the transcript and continue under a new session id.
    pub async fn clear_history(&self) -> Result<(), ChatError> {
        self.command(ChatCommand::ClearHistory).await
    }

    pub async fn connect(&self) -> Result<(), ChatError> {
        self.command(ChatCommand::Connect).await
    }

    pub async fn close(&self) -> Result<(), ChatError> {
        self.command(ChatCommand::Close).await
    }

    /// Stop the task. Other handles see [`ChatError::ClientClosed`] afterwards.
    pub async fn shutdown(&self) -> Result<(), ChatError> {
        self.command(ChatCommand::Shutdown).await
    }

    /// Latest published snapshot.
    pub fn view(&self) -> ChatView {
        self.view_rx.borrow().clone()
    }

    /// Receiver that is notified whenever the snapshot changes.
    pub fn subscribe(&self) -> watch::Receiver<ChatView> {
        self.view_rx.clone()
    }

    pub fn is_connected(&self) -> bool {
        self.view_rx.borrow().is_connected
    }

    pub fn is_streaming(&self) -> bool {
        self.view_rx.borrow().is_streaming
    }
}

impl std::fmt::Debug for ChatClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let view = self.view_rx.borrow();
        f.debug_struct("ChatClient")
            .field("connection", &view.connection)
            .field("messages", &view.messages.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::connection::ConnectionState;
    use crate::message::Message;
    use crate::session::MemoryStore;
    use crate::test_support::{memory_session_store, FakeTransport};

    fn start(auto_connect: bool) -> (ChatClient, FakeTransport) {
        let fake = FakeTransport::new();
        let options = ClientOptions {
            auto_connect,
            ..ClientOptions::default()
        };
        let store = memory_session_store(&MemoryStore::new());
        let client = ChatClient::start(options, store, Box::new(fake.clone()));
        (client, fake)
    }

    async fn wait_until(client: &ChatClient, pred: impl FnMut(&ChatView) -> bool) -> ChatView {
        let mut rx = client.subscribe();
        let view = tokio::time::timeout(Duration::from_secs(5), rx.wait_for(pred))
            .await
            .expect("timed out waiting for view")
            .expect("conversation task stopped")
            .clone();
        view
    }

    async fn open(client: &ChatClient, fake: &FakeTransport) {
        wait_until(client, |v| v.connection == ConnectionState::Connecting).await;
        fake.open_last().await;
        wait_until(client, |v| v.is_connected).await;
    }

    #[tokio::test]
    async fn auto_connect_opens_on_start() {
        let (client, fake) = start(true);
        let view = wait_until(&client, |v| v.session_id.is_some()).await;
        assert_eq!(fake.open_count(), 1);
        assert_eq!(view.connection, ConnectionState::Connecting);
        assert!(fake.urls()[0].ends_with(view.session_id.unwrap().as_str()));
    }

    #[tokio::test]
    async fn manual_connect_waits_for_command() {
        let (client, fake) = start(false);
        client.send_message("ping").await.unwrap();

        let view = wait_until(&client, |v| !v.messages.is_empty()).await;
        assert_eq!(view.messages, vec![Message::user("ping")]);
        assert!(!view.is_streaming);
        assert!(fake.sent().is_empty());
        assert_eq!(fake.open_count(), 1);
    }

    #[tokio::test]
    async fn streamed_reply_is_published() {
        let (client, fake) = start(true);
        open(&client, &fake).await;

        client.send_message("Hi").await.unwrap();
        wait_until(&client, |v| v.is_streaming).await;
        assert_eq!(fake.sent(), vec!["Hi".to_string()]);

        fake.frame(r#"{"type":"content","payload":"Hel"}"#).await;
        fake.frame(r#"{"type":"content","payload":"lo"}"#).await;
        fake.frame(r#"{"type":"end"}"#).await;

        let view = wait_until(&client, |v| !v.is_streaming && v.messages.len() == 2).await;
        assert_eq!(view.messages[1], Message::assistant("Hello"));
        assert!(!client.is_streaming());
    }

    #[tokio::test]
    async fn clear_history_reconnects_under_new_session() {
        let (client, fake) = start(true);
        open(&client, &fake).await;
        let old = client.view().session_id.unwrap();

        fake.frame(r#"{"type":"history","payload":[{"sender":"user","text":"old"}]}"#)
            .await;
        wait_until(&client, |v| !v.messages.is_empty()).await;

        client.clear_history().await.unwrap();
        let view = wait_until(&client, |v| {
            v.session_id.as_ref().is_some_and(|s| *s != old)
        })
        .await;

        assert!(view.messages.is_empty());
        assert_eq!(view.connection, ConnectionState::Connecting);
        assert_eq!(fake.open_count(), 2);
        assert!(fake.urls()[1].ends_with(view.session_id.unwrap().as_str()));
    }

    #[tokio::test]
    async fn commands_fail_after_shutdown() {
        let (client, fake) = start(true);
        open(&client, &fake).await;

        let mut rx = client.subscribe();
        client.shutdown().await.unwrap();
        while rx.changed().await.is_ok() {}

        assert!(!client.is_connected());
        assert_eq!(fake.closed().len(), 1);
        assert!(matches!(
            client.send_message("late").await,
            Err(ChatError::ClientClosed)
        ));
    }
}

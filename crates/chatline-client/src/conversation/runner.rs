//! Background task that owns the conversation.

use tokio::sync::{mpsc, watch};
use tracing::{debug, info};

use super::state::Conversation;
use super::types::{ChatCommand, ChatView};
use crate::transport::TransportEvent;

/// Apply commands and transport events one at a time until shutdown.
///
/// The view is republished after each step when it changed.
pub(crate) async fn conversation_loop(
    mut conversation: Conversation,
    mut command_rx: mpsc::Receiver<ChatCommand>,
    mut event_rx: mpsc::Receiver<TransportEvent>,
    view_tx: watch::Sender<ChatView>,
    auto_connect: bool,
) {
    if auto_connect {
        conversation.connect();
        publish(&conversation, &view_tx);
    }

    loop {
        tokio::select! {
            cmd = command_rx.recv() => {
                let Some(cmd) = cmd else {
                    debug!("all client handles dropped");
                    break;
                };
                match cmd {
                    ChatCommand::Connect => conversation.connect(),
                    ChatCommand::Close => conversation.close(),
                    ChatCommand::SendMessage(text) => conversation.send_message(&text),
                    ChatCommand::ClearHistory => conversation.clear_history(),
                    ChatCommand::Shutdown => break,
                }
            }
            Some(event) = event_rx.recv() => conversation.handle_transport_event(event),
        }
        publish(&conversation, &view_tx);
    }

    conversation.close();
    publish(&conversation, &view_tx);
    info!("conversation task stopped");
}

fn publish(conversation: &Conversation, view_tx: &watch::Sender<ChatView>) {
    view_tx.send_if_modified(|view| {
        let next = conversation.view();
        if *view == next {
            return false;
        }
        *view = next;
        true
    });
}

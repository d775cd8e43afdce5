use super::frame::Frame;
use crate::message::Message;

/// The part of conversation state that inbound frames act on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    pub messages: Vec<Message>,
    /// The assistant's reply is still arriving.
    pub streaming: bool,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }
}

/// Fold one frame into the transcript.
///
/// Chunks arrive in send order over one connection, so extending the last
/// assistant message is enough to reassemble a reply.
pub fn apply(mut transcript: Transcript, frame: Frame) -> Transcript {
    match frame {
        Frame::History(messages) => {
            transcript.messages = messages;
            transcript.streaming = false;
        }
        Frame::Content(chunk) => {
            match transcript.messages.last_mut() {
                Some(last) if last.is_assistant() => last.text.push_str(&chunk),
                _ => transcript.messages.push(Message::assistant(chunk)),
            }
            transcript.streaming = true;
        }
        Frame::End => transcript.streaming = false,
        Frame::Error(description) => {
            transcript
                .messages
                .push(Message::assistant(format!("Error: {description}")));
            transcript.streaming = false;
        }
    }
    transcript
}

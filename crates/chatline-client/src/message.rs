use serde::{Deserialize, Serialize};

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Assistant,
}

/// One entry of the conversation, in the shape the server uses for history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub sender: Sender,
    pub text: String,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::Assistant,
            text: text.into(),
        }
    }

    pub fn is_assistant(&self) -> bool {
        self.sender == Sender::Assistant
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sender_uses_lowercase_wire_names() {
        let json = serde_json::to_string(&Message::user("hi")).unwrap();
        assert_eq!(json, r#"{"sender":"user","text":"hi"}"#);

        let msg: Message = serde_json::from_str(r#"{"sender":"assistant","text":"hey"}"#).unwrap();
        assert_eq!(msg, Message::assistant("hey"));
        assert!(msg.is_assistant());
    }

    #[test]
    fn unknown_sender_is_rejected() {
        let result = serde_json::from_str::<Message>(r#"{"sender":"system","text":"x"}"#);
        assert!(result.is_err());
    }
}

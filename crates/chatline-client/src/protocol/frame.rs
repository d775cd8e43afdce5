use serde::Deserialize;
use serde_json::Value;

use crate::message::Message;

/// Frame type names used in the `type` field.
pub mod kinds {
    pub const HISTORY: &str = "history";
    pub const CONTENT: &str = "content";
    pub const END: &str = "end";
    pub const ERROR: &str = "error";
}

/// One decoded server frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    /// Full server-side history, replacing whatever the client holds.
    History(Vec<Message>),
    /// Next chunk of the assistant's current reply.
    Content(String),
    /// The assistant's reply is complete.
    End,
    /// Server-reported failure, shown to the user in-band.
    Error(String),
}

impl Frame {
    pub fn kind(&self) -> &'static str {
        match self {
            Frame::History(_) => kinds::HISTORY,
            Frame::Content(_) => kinds::CONTENT,
            Frame::End => kinds::END,
            Frame::Error(_) => kinds::ERROR,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("frame is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("frame is not a JSON object")]
    NotAnObject,

    #[error("frame has no type")]
    MissingType,

    #[error("unknown frame type {0:?}")]
    UnknownType(String),

    #[error("invalid {kind} payload: {reason}")]
    Payload { kind: &'static str, reason: String },
}

#[derive(Deserialize)]
struct Envelope {
    #[serde(rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    payload: Value,
}

/// Parse one inbound text frame.
pub fn decode(raw: &str) -> Result<Frame, DecodeError> {
    let value: Value = serde_json::from_str(raw)?;
    if !value.is_object() {
        return Err(DecodeError::NotAnObject);
    }
    let envelope: Envelope = serde_json::from_value(value)?;
    let kind = envelope.kind.ok_or(DecodeError::MissingType)?;

    match kind.as_str() {
        kinds::HISTORY => serde_json::from_value::<Vec<Message>>(envelope.payload)
            .map(Frame::History)
            .map_err(|e| DecodeError::Payload {
                kind: kinds::HISTORY,
                reason: e.to_string(),
            }),
        kinds::CONTENT => match envelope.payload {
            Value::String(chunk) => Ok(Frame::Content(chunk)),
            other => Err(DecodeError::Payload {
                kind: kinds::CONTENT,
                reason: format!("expected a string chunk, got {}", json_type(&other)),
            }),
        },
        kinds::END => Ok(Frame::End),
        kinds::ERROR => Ok(Frame::Error(match envelope.payload {
            Value::String(description) => description,
            Value::Null => "unknown error".to_string(),
            other => other.to_string(),
        })),
        _ => Err(DecodeError::UnknownType(kind)),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

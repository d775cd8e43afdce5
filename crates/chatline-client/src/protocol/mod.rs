//! Wire protocol: inbound frame decoding and the transcript reducer.
//!
//! The client sends the user's text as a bare text frame. The server
//! answers with JSON envelopes `{"type": ..., "payload": ...}`.

mod frame;
mod reducer;

pub use frame::{decode, kinds, DecodeError, Frame};
pub use reducer::{apply, Transcript};

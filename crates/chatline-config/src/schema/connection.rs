//! Connection lifecycle and outbound message settings.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionConfig {
    /// Handshake timeout in seconds (valid range: 1-120).
    pub connect_timeout_secs: u32,
    /// Capacity of the command and transport event queues (valid range: 16-65536).
    pub event_buffer: u32,
    /// Open the connection as soon as the client starts.
    pub auto_connect: bool,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 15,
            event_buffer: 256,
            auto_connect: true,
        }
    }
}

/// What happens to a message submitted while the connection is down.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutboundPolicy {
    /// Echo locally, start a reconnect, and do not transmit the message.
    #[default]
    Drop,
    /// Hold the message and transmit it once the connection opens.
    Queue,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutboundConfig {
    pub policy: OutboundPolicy,
    /// Upper bound on held messages under the `queue` policy (valid range: 1-1000).
    pub max_queued: u32,
}

impl Default for OutboundConfig {
    fn default() -> Self {
        Self {
            policy: OutboundPolicy::Drop,
            max_queued: 32,
        }
    }
}

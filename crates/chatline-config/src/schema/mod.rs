//! Configuration schema types for chatline.
//!
//! All structs use `serde(default)` so partial configs work correctly.
//! Missing fields are filled with defaults that target a local development
//! server.

mod connection;
mod endpoint;
mod session;
mod system;

pub use connection::*;
pub use endpoint::*;
pub use session::*;
pub use system::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration for chatline.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ChatConfig {
    pub endpoint: EndpointConfig,
    pub session: SessionConfig,
    pub connection: ConnectionConfig,
    pub outbound: OutboundConfig,
    pub logging: LoggingConfig,
}

// =============================================================================
// Tests
// =============================================================================

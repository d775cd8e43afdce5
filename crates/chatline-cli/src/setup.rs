//! Turn loaded configuration into client components.

use std::path::Path;
use std::time::Duration;

use chatline_client::{
    select_generator, ClientOptions, Endpoint, FileStore, GeneratorChoice, OutboundOptions,
    OutboundPolicy, SessionStore, StoreError,
};
use chatline_config::{ChatConfig, IdGeneratorKind, SessionConfig};

pub fn client_options(config: &ChatConfig) -> ClientOptions {
    let policy = match config.outbound.policy {
        chatline_config::OutboundPolicy::Drop => OutboundPolicy::Drop,
        chatline_config::OutboundPolicy::Queue => OutboundPolicy::Queue,
    };

    ClientOptions {
        endpoint: Endpoint::new(&config.endpoint.base_url, &config.endpoint.path),
        connect_timeout: Duration::from_secs(u64::from(config.connection.connect_timeout_secs)),
        event_buffer: config.connection.event_buffer as usize,
        auto_connect: config.connection.auto_connect,
        outbound: OutboundOptions {
            policy,
            max_queued: config.outbound.max_queued as usize,
        },
    }
}

fn generator_choice(kind: IdGeneratorKind) -> GeneratorChoice {
    match kind {
        IdGeneratorKind::Auto => GeneratorChoice::Auto,
        IdGeneratorKind::Secure => GeneratorChoice::Secure,
        IdGeneratorKind::Fallback => GeneratorChoice::Fallback,
    }
}

/// File-backed session store. An explicit path wins over the configured
/// one, which wins over the platform data directory.
pub fn session_store(
    config: &SessionConfig,
    override_path: Option<&Path>,
) -> Result<SessionStore, StoreError> {
    let path = match override_path.or(config.store_path.as_deref()) {
        Some(path) => path.to_path_buf(),
        None => FileStore::default_path()?,
    };
    tracing::debug!(path = %path.display(), "session store");

    let generator = select_generator(generator_choice(config.id_generator), config.fallback_seed);
    Ok(SessionStore::new(Box::new(FileStore::new(path)), generator).with_key(&config.storage_key))
}

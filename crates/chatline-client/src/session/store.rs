//! The session store: one persisted session id, created lazily.

use chatline_common::SessionId;
use tracing::{info, warn};

use super::generator::IdentifierGenerator;
use super::storage::KeyValueStore;
use crate::error::StoreError;

/// Default key the session id is stored under.
pub const SESSION_KEY: &str = "chat_session_id";

/// Owns the durable session id. Nothing else writes it.
pub struct SessionStore {
    storage: Box<dyn KeyValueStore>,
    generator: Box<dyn IdentifierGenerator>,
    key: String,
}

impl SessionStore {
    pub fn new(storage: Box<dyn KeyValueStore>, generator: Box<dyn IdentifierGenerator>) -> Self {
        Self {
            storage,
            generator,
            key: SESSION_KEY.to_string(),
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Return the persisted id, creating and persisting one if absent.
    ///
    /// A stored value that is not a hyphenated UUID is replaced.
    pub fn get_or_create_session_id(&mut self) -> Result<SessionId, StoreError> {
        if let Some(raw) = self.storage.get(&self.key)? {
            match SessionId::parse(&raw) {
                Some(id) => return Ok(id),
                None => warn!(key = %self.key, "discarding malformed stored session id"),
            }
        }

        let id = self.generator.generate();
        self.storage.set(&self.key, id.as_str())?;
        info!(session_id = %id, generator = self.generator.name(), "created session id");
        Ok(id)
    }

    /// Generate a fresh id and overwrite the persisted one unconditionally.
    ///
    /// The new id always differs from the stored one.
    pub fn rotate_session_id(&mut self) -> Result<SessionId, StoreError> {
        let current = self
            .storage
            .get(&self.key)?
            .and_then(|raw| SessionId::parse(&raw));

        let mut id = self.generator.generate();
        while Some(&id) == current.as_ref() {
            warn!(generator = self.generator.name(), "generator repeated the current session id");
            id = self.generator.generate();
        }
        self.storage.set(&self.key, id.as_str())?;
        info!(session_id = %id, "rotated session id");
        Ok(id)
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("key", &self.key)
            .field("generator", &self.generator.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{FallbackGenerator, FileStore, MemoryStore, SecureGenerator};

    fn memory_store(shared: &MemoryStore) -> SessionStore {
        SessionStore::new(
            Box::new(shared.clone()),
            Box::new(FallbackGenerator::from_clock()),
        )
    }

    #[test]
    fn get_or_create_is_idempotent() {
        let shared = MemoryStore::new();
        let mut store = memory_store(&shared);
        let first = store.get_or_create_session_id().unwrap();
        let second = store.get_or_create_session_id().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn id_survives_a_new_store_over_the_same_storage() {
        let shared = MemoryStore::new();
        let first = memory_store(&shared).get_or_create_session_id().unwrap();
        let after_reload = memory_store(&shared).get_or_create_session_id().unwrap();
        assert_eq!(first, after_reload);
    }

    #[test]
    fn rotation_changes_identity() {
        let shared = MemoryStore::new();
        let mut store = memory_store(&shared);
        let before = store.get_or_create_session_id().unwrap();

        let rotated = store.rotate_session_id().unwrap();
        assert_ne!(rotated, before);

        let after = store.get_or_create_session_id().unwrap();
        assert_eq!(after, rotated);
        assert_ne!(after, before);
    }

    #[test]
    fn rotation_never_repeats_earlier_ids() {
        let shared = MemoryStore::new();
        let mut store = memory_store(&shared);
        let mut seen = vec![store.get_or_create_session_id().unwrap()];
        for _ in 0..10 {
            store.rotate_session_id().unwrap();
            let current = store.get_or_create_session_id().unwrap();
            assert!(!seen.contains(&current));
            seen.push(current);
        }
    }

    #[test]
    fn rotation_after_restart_with_same_seed_changes_identity() {
        let shared = MemoryStore::new();
        let seeded = |seed| {
            SessionStore::new(
                Box::new(shared.clone()),
                Box::new(FallbackGenerator::seeded(seed)),
            )
        };

        let before = seeded(9).get_or_create_session_id().unwrap();
        let rotated = seeded(9).rotate_session_id().unwrap();
        assert_ne!(before, rotated);
        assert_eq!(
            seeded(9).get_or_create_session_id().unwrap(),
            rotated
        );
    }

    #[test]
    fn malformed_stored_value_is_replaced() {
        let mut shared = MemoryStore::new();
        shared.set(SESSION_KEY, "definitely-not-a-uuid").unwrap();

        let mut store = memory_store(&shared);
        let id = store.get_or_create_session_id().unwrap();
        assert_ne!(id.as_str(), "definitely-not-a-uuid");
        assert_eq!(shared.get(SESSION_KEY).unwrap().as_deref(), Some(id.as_str()));
    }

    #[test]
    fn custom_key_is_used() {
        let shared = MemoryStore::new();
        let mut store = memory_store(&shared).with_key("other_key");
        let id = store.get_or_create_session_id().unwrap();
        assert_eq!(shared.get("other_key").unwrap().as_deref(), Some(id.as_str()));
        assert_eq!(shared.get(SESSION_KEY).unwrap(), None);
    }

    #[test]
    fn file_backed_store_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let secure = || Box::new(SecureGenerator::probe().unwrap());

        let first = SessionStore::new(Box::new(FileStore::new(&path)), secure())
            .get_or_create_session_id()
            .unwrap();
        let second = SessionStore::new(Box::new(FileStore::new(&path)), secure())
            .get_or_create_session_id()
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn storage_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{broken").unwrap();

        let mut store = SessionStore::new(
            Box::new(FileStore::new(&path)),
            Box::new(FallbackGenerator::seeded(5)),
        );
        assert!(matches!(
            store.get_or_create_session_id(),
            Err(StoreError::Corrupt { .. })
        ));
    }
}

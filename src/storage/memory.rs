// ABOUTME: In-process session store keeping the serialized record in a key/value map
// ABOUTME: Used for ephemeral sessions and tests; same record layout as the file store

use async_trait::async_trait;
use gymlog_core::constants::storage::SESSION_STORAGE_KEY;
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::{SessionStore, StoredSession};
use crate::errors::AppResult;
use crate::models::Session;

/// Key/value session store living in memory
#[derive(Default)]
pub struct MemorySessionStore {
    entries: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemorySessionStore {
    /// Empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with a session, as if it had been saved earlier
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be serialized
    pub fn with_session(session: &Session) -> AppResult<Self> {
        let mut entries = HashMap::new();
        entries.insert(SESSION_STORAGE_KEY.to_owned(), StoredSession::encode(session)?);
        Ok(Self {
            entries: RwLock::new(entries),
        })
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self) -> AppResult<Option<Session>> {
        let entries = self.entries.read().await;
        entries
            .get(SESSION_STORAGE_KEY)
            .map(|bytes| StoredSession::decode(bytes))
            .transpose()
    }

    async fn save(&self, session: &Session) -> AppResult<()> {
        let bytes = StoredSession::encode(session)?;
        self.entries
            .write()
            .await
            .insert(SESSION_STORAGE_KEY.to_owned(), bytes);
        Ok(())
    }

    async fn clear(&self) -> AppResult<()> {
        self.entries.write().await.remove(SESSION_STORAGE_KEY);
        Ok(())
    }
}

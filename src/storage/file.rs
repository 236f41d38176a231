// ABOUTME: File-backed session store with atomic replace-by-rename writes
// ABOUTME: One JSON file per storage key inside the configured storage directory
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use gymlog_core::constants::storage::SESSION_STORAGE_KEY;
use std::io::ErrorKind as IoErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::debug;

use super::{SessionStore, StoredSession};
use crate::errors::{AppError, AppResult};
use crate::models::Session;

/// Session store persisting to `<dir>/<key>.json`
///
/// Writes land in a temporary sibling first, are flushed to disk, and then
/// renamed over the target, so concurrent readers never see a partial record.
pub struct FileSessionStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileSessionStore {
    /// Store using the default session key inside `dir`
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self::with_key(dir, SESSION_STORAGE_KEY)
    }

    /// Store using a custom key inside `dir`
    pub fn with_key(dir: impl AsRef<Path>, key: &str) -> Self {
        Self {
            path: dir.as_ref().join(format!("{key}.json")),
            write_lock: Mutex::new(()),
        }
    }

    /// Location of the session file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        self.path.with_extension("json.tmp")
    }

    async fn write_atomically(&self, bytes: &[u8]) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let temp_path = self.temp_path();
        let mut file = fs::File::create(&temp_path).await?;
        file.write_all(bytes).await?;
        file.sync_all().await?;
        drop(file);

        fs::rename(&temp_path, &self.path).await
    }
}

fn storage_error(action: &str, path: &Path, error: std::io::Error) -> AppError {
    AppError::storage(format!("Failed to {action} {}: {error}", path.display())).with_source(error)
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn load(&self) -> AppResult<Option<Session>> {
        match fs::read(&self.path).await {
            Ok(bytes) => StoredSession::decode(&bytes).map(Some),
            Err(e) if e.kind() == IoErrorKind::NotFound => Ok(None),
            Err(e) => Err(storage_error("read", &self.path, e)),
        }
    }

    async fn save(&self, session: &Session) -> AppResult<()> {
        let bytes = StoredSession::encode(session)?;
        let _guard = self.write_lock.lock().await;

        if let Err(e) = self.write_atomically(&bytes).await {
            // Best effort: a stale temp file is harmless but untidy
            let _ = fs::remove_file(self.temp_path()).await;
            return Err(storage_error("write", &self.path, e));
        }

        debug!(path = %self.path.display(), "session persisted");
        Ok(())
    }

    async fn clear(&self) -> AppResult<()> {
        let _guard = self.write_lock.lock().await;
        match fs::remove_file(&self.path).await {
            Ok(()) => {
                debug!(path = %self.path.display(), "session file removed");
                Ok(())
            }
            Err(e) if e.kind() == IoErrorKind::NotFound => Ok(()),
            Err(e) => Err(storage_error("remove", &self.path, e)),
        }
    }
}

// ABOUTME: Instrumented session stores for integration tests
// ABOUTME: CountingStore counts writes, FailingStore injects storage failures on demand

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use async_trait::async_trait;
use gymlog_client::errors::{AppError, AppResult};
use gymlog_client::models::Session;
use gymlog_client::storage::{MemorySessionStore, SessionStore};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// In-memory store that counts saves and clears
#[derive(Default)]
pub struct CountingStore {
    inner: MemorySessionStore,
    saves: AtomicUsize,
    clears: AtomicUsize,
}

impl CountingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: &Session) -> Self {
        Self {
            inner: MemorySessionStore::with_session(session).unwrap(),
            ..Self::default()
        }
    }

    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub fn clears(&self) -> usize {
        self.clears.load(Ordering::SeqCst)
    }

    /// What a fresh process would read back
    pub async fn persisted(&self) -> Option<Session> {
        self.inner.load().await.unwrap()
    }
}

#[async_trait]
impl SessionStore for CountingStore {
    async fn load(&self) -> AppResult<Option<Session>> {
        self.inner.load().await
    }

    async fn save(&self, session: &Session) -> AppResult<()> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        self.inner.save(session).await
    }

    async fn clear(&self) -> AppResult<()> {
        self.clears.fetch_add(1, Ordering::SeqCst);
        self.inner.clear().await
    }
}

/// In-memory store whose operations can be switched to fail
#[derive(Default)]
pub struct FailingStore {
    inner: MemorySessionStore,
    fail_load: AtomicBool,
    fail_save: AtomicBool,
    fail_clear: AtomicBool,
}

impl FailingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: &Session) -> Self {
        Self {
            inner: MemorySessionStore::with_session(session).unwrap(),
            ..Self::default()
        }
    }

    pub fn fail_loads(&self, fail: bool) {
        self.fail_load.store(fail, Ordering::SeqCst);
    }

    pub fn fail_saves(&self, fail: bool) {
        self.fail_save.store(fail, Ordering::SeqCst);
    }

    pub fn fail_clears(&self, fail: bool) {
        self.fail_clear.store(fail, Ordering::SeqCst);
    }

    pub async fn persisted(&self) -> Option<Session> {
        self.inner.load().await.unwrap()
    }
}

#[async_trait]
impl SessionStore for FailingStore {
    async fn load(&self) -> AppResult<Option<Session>> {
        if self.fail_load.load(Ordering::SeqCst) {
            return Err(AppError::storage("disk unavailable"));
        }
        self.inner.load().await
    }

    async fn save(&self, session: &Session) -> AppResult<()> {
        if self.fail_save.load(Ordering::SeqCst) {
            return Err(AppError::storage("disk full"));
        }
        self.inner.save(session).await
    }

    async fn clear(&self) -> AppResult<()> {
        if self.fail_clear.load(Ordering::SeqCst) {
            return Err(AppError::storage("disk unavailable"));
        }
        self.inner.clear().await
    }
}

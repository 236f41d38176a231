// ABOUTME: Durable session persistence behind the SessionStore trait
// ABOUTME: Defines the persisted record layout shared by the file and in-memory stores
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Session Storage
//!
//! The session survives process restarts as one serialized record under one
//! durable key. Absence of the key means "no session". Only
//! `SessionManager` writes to a store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use gymlog_core::constants::storage::SESSION_RECORD_VERSION;
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};
use crate::models::Session;

mod file;
mod memory;

pub use file::FileSessionStore;
pub use memory::MemorySessionStore;

/// Durable key/value persistence of the serialized session
///
/// `save` must be atomic with respect to `load`: a reader sees either the
/// previous record or the new one, never a partial write. Failures are
/// always reported to the caller.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Read the persisted session, `None` when no session is stored
    async fn load(&self) -> AppResult<Option<Session>>;

    /// Persist the session, replacing any previous one
    async fn save(&self, session: &Session) -> AppResult<()>;

    /// Remove the persisted session; succeeds when nothing is stored
    async fn clear(&self) -> AppResult<()>;
}

/// Persisted record layout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredSession {
    /// Record layout version
    pub version: u32,
    /// When the record was written
    pub saved_at: DateTime<Utc>,
    /// User and token pair
    pub session: Session,
}

impl StoredSession {
    /// Serialize a session into the persisted layout
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails
    pub fn encode(session: &Session) -> AppResult<Vec<u8>> {
        let record = Self {
            version: SESSION_RECORD_VERSION,
            saved_at: Utc::now(),
            session: session.clone(),
        };
        Ok(serde_json::to_vec(&record)?)
    }

    /// Parse a persisted record back into a session
    ///
    /// # Errors
    ///
    /// Returns a storage error for corrupt records or unknown layout versions
    pub fn decode(bytes: &[u8]) -> AppResult<Session> {
        let record: Self = serde_json::from_slice(bytes).map_err(|e| {
            AppError::storage(format!("Stored session is corrupt: {e}")).with_source(e)
        })?;

        if record.version != SESSION_RECORD_VERSION {
            return Err(AppError::storage(format!(
                "Unsupported stored session version {}",
                record.version
            )));
        }

        Ok(record.session)
    }
}

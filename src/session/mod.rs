// ABOUTME: Owns the single in-memory session and keeps it in step with durable storage
// ABOUTME: Publishes session-changed events so presentation code can route on them
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Session Management
//!
//! [`SessionManager`] is the only writer of the session store. Every
//! mutation follows the same order: persist, then install in memory, then
//! publish. A failed persist leaves the in-memory session untouched, with one
//! exception: signing out always clears memory and publishes
//! [`SessionEvent::Ended`] even when the store cannot be cleared.
//!
//! Every sign-in, restore, and sign-out starts a new session generation.
//! Token renewal and forced sign-out are bound to the generation they were
//! started for, so a renewal that outlives its session never touches the
//! session that replaced it.

mod events;

pub use events::SessionEvent;

use std::sync::Arc;
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, info, instrument, warn};

use crate::client::auth::AuthApi;
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;
use crate::models::{Session, TokenPair, User, UserUpdate};
use crate::storage::SessionStore;

/// Live session together with the generation that installed it
#[derive(Default)]
struct Slot {
    session: Option<Session>,
    generation: u64,
}

impl Slot {
    fn replace(&mut self, session: Option<Session>) -> Option<Session> {
        self.generation = self.generation.wrapping_add(1);
        std::mem::replace(&mut self.session, session)
    }
}

/// Holder of the current session
pub struct SessionManager {
    store: Arc<dyn SessionStore>,
    auth: AuthApi,
    current: Mutex<Slot>,
    events: broadcast::Sender<SessionEvent>,
}

impl SessionManager {
    /// Create a manager with no session loaded yet; call [`Self::restore`] at startup
    #[must_use]
    pub fn new(store: Arc<dyn SessionStore>, auth: AuthApi, event_capacity: usize) -> Self {
        let (events, _) = broadcast::channel(event_capacity.max(1));
        Self {
            store,
            auth,
            current: Mutex::new(Slot::default()),
            events,
        }
    }

    /// Subscribe to session-changed events published from now on
    ///
    /// The channel keeps the last `event_capacity` events. A subscriber that
    /// falls further behind receives [`broadcast::error::RecvError::Lagged`]
    /// and misses the skipped transitions; it must then re-read
    /// [`Self::current_user`] instead of relying on the event sequence.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// Client used for the session endpoints
    #[must_use]
    pub const fn auth(&self) -> &AuthApi {
        &self.auth
    }

    /// Load the persisted session into memory
    ///
    /// Publishes [`SessionEvent::Available`] when a session was stored and
    /// [`SessionEvent::Ended`] otherwise.
    ///
    /// # Errors
    ///
    /// Returns a storage error when the record cannot be read or is corrupt;
    /// the manager is then signed out
    #[instrument(skip(self))]
    pub async fn restore(&self) -> AppResult<Option<User>> {
        let mut current = self.current.lock().await;

        match self.store.load().await {
            Ok(Some(session)) => {
                let user = session.user.clone();
                current.replace(Some(session));
                AppLogger::log_session_event(Some(&user.id), "restore", true);
                self.publish(SessionEvent::Available(user.clone()));
                Ok(Some(user))
            }
            Ok(None) => {
                current.replace(None);
                AppLogger::log_session_event(None, "restore", true);
                self.publish(SessionEvent::Ended);
                Ok(None)
            }
            Err(e) => {
                current.replace(None);
                warn!(error = %e, "stored session could not be loaded");
                AppLogger::log_session_event(None, "restore", false);
                self.publish(SessionEvent::Ended);
                Err(e)
            }
        }
    }

    /// Authenticate with credentials and establish a new session
    ///
    /// # Errors
    ///
    /// Returns a validation error for blank credentials, a domain error when
    /// the service rejects them, or a storage error when the session cannot
    /// be persisted. The previous session state is kept on any failure.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn sign_in(&self, email: &str, password: &str) -> AppResult<User> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(AppError::invalid_input("Email and password are required"));
        }

        let session = match self.auth.create_session(email, password).await {
            Ok(session) => session,
            Err(e) => {
                AppLogger::log_session_event(None, "sign_in", false);
                return Err(e);
            }
        };

        let mut current = self.current.lock().await;
        self.store.save(&session).await?;

        let user = session.user.clone();
        current.replace(Some(session));
        AppLogger::log_session_event(Some(&user.id), "sign_in", true);
        self.publish(SessionEvent::Available(user.clone()));
        Ok(user)
    }

    /// End the session
    ///
    /// Memory is cleared and [`SessionEvent::Ended`] is published even when
    /// the store cannot be cleared.
    ///
    /// # Errors
    ///
    /// Returns the storage error raised while clearing the persisted record
    #[instrument(skip(self))]
    pub async fn sign_out(&self) -> AppResult<()> {
        let mut current = self.current.lock().await;
        self.end(&mut current).await
    }

    /// End the session only if it is still the one of `generation`
    ///
    /// Returns `false` without touching storage or publishing when another
    /// session was installed since.
    ///
    /// # Errors
    ///
    /// Returns the storage error raised while clearing the persisted record
    pub(crate) async fn sign_out_if(&self, generation: u64) -> AppResult<bool> {
        let mut current = self.current.lock().await;
        if current.generation != generation {
            debug!(
                generation,
                live = current.generation,
                "session replaced meanwhile, keeping it"
            );
            return Ok(false);
        }
        self.end(&mut current).await.map(|()| true)
    }

    async fn end(&self, current: &mut Slot) -> AppResult<()> {
        let cleared = self.store.clear().await;
        let user_id = current.replace(None).map(|session| session.user.id);

        if let Err(e) = &cleared {
            warn!(error = %e, "session record could not be removed");
        }
        AppLogger::log_session_event(user_id.as_deref(), "sign_out", cleared.is_ok());
        self.publish(SessionEvent::Ended);
        cleared
    }

    /// Merge a partial profile update into the signed-in user
    ///
    /// # Errors
    ///
    /// Returns a not-signed-in error when there is no session, or a storage
    /// error when the updated session cannot be persisted
    #[instrument(skip(self, update))]
    pub async fn update_profile(&self, update: UserUpdate) -> AppResult<User> {
        let mut current = self.current.lock().await;
        let Some(session) = current.session.as_ref() else {
            return Err(AppError::not_signed_in());
        };

        let mut updated = session.clone();
        updated.user.merge(update);
        self.store.save(&updated).await?;

        let user = updated.user.clone();
        current.session = Some(updated);
        AppLogger::log_session_event(Some(&user.id), "update_profile", true);
        self.publish(SessionEvent::Updated(user.clone()));
        Ok(user)
    }

    /// Install a renewed token pair into the session of `generation`, keeping the user
    ///
    /// No event is published: the signed-in user did not change.
    ///
    /// # Errors
    ///
    /// Returns a not-signed-in error when that session ended or was replaced
    /// meanwhile, or a storage error when the new pair cannot be persisted
    pub(crate) async fn apply_renewed_tokens(
        &self,
        generation: u64,
        tokens: TokenPair,
    ) -> AppResult<()> {
        let mut current = self.current.lock().await;
        if current.generation != generation {
            debug!(generation, "renewed tokens belong to an ended session, discarding");
            return Err(AppError::not_signed_in());
        }
        let Some(session) = current.session.as_ref() else {
            return Err(AppError::not_signed_in());
        };

        let renewed = Session {
            user: session.user.clone(),
            tokens,
        };
        self.store.save(&renewed).await?;

        AppLogger::log_session_event(Some(&renewed.user.id), "token_renewal", true);
        info!("session tokens renewed");
        current.session = Some(renewed);
        Ok(())
    }

    /// Generation of the live session and its refresh token
    pub(crate) async fn renewal_credentials(&self) -> (u64, Option<String>) {
        let current = self.current.lock().await;
        let token = current
            .session
            .as_ref()
            .map(|session| session.tokens.refresh_token.clone());
        (current.generation, token)
    }

    /// Generation of the live session and its access token
    pub(crate) async fn bearer_credentials(&self) -> (u64, Option<String>) {
        let current = self.current.lock().await;
        let token = current
            .session
            .as_ref()
            .map(|session| session.tokens.access_token.clone());
        (current.generation, token)
    }

    /// Current access token, if signed in
    pub async fn access_token(&self) -> Option<String> {
        self.current
            .lock()
            .await
            .session
            .as_ref()
            .map(|session| session.tokens.access_token.clone())
    }

    /// Current refresh token, if signed in
    pub async fn refresh_token(&self) -> Option<String> {
        self.current
            .lock()
            .await
            .session
            .as_ref()
            .map(|session| session.tokens.refresh_token.clone())
    }

    /// Signed-in user, if any
    pub async fn current_user(&self) -> Option<User> {
        self.current
            .lock()
            .await
            .session
            .as_ref()
            .map(|session| session.user.clone())
    }

    /// Whether a session is held in memory
    pub async fn is_authenticated(&self) -> bool {
        self.current.lock().await.session.is_some()
    }

    fn publish(&self, event: SessionEvent) {
        // No subscribers is fine; events are only a notification channel
        let _ = self.events.send(event);
    }
}

// ABOUTME: Explicit dependency container handed to every collaborator of the session subsystem
// ABOUTME: Wires configuration, session store, SessionManager, RequestClient and AccountService
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Dependency injection context
//!
//! There is no process-wide session. Screens, commands, and tests receive a
//! [`ClientContext`] and reach every collaborator through it; two contexts
//! never share session state.

use std::sync::Arc;
use tracing::info;

use crate::account::AccountService;
use crate::client::auth::AuthApi;
use crate::client::RequestClient;
use crate::config::environment::ClientConfig;
use crate::errors::AppResult;
use crate::session::SessionManager;
use crate::storage::{FileSessionStore, SessionStore};

/// Session subsystem dependencies
///
/// # Dependencies
/// - `config`: API location, timeouts, and renewal policy
/// - `session`: owner of the live session and publisher of session events
/// - `client`: authenticated request client with refresh coordination
/// - `account`: sign-up, profile, and avatar flows
#[derive(Clone)]
pub struct ClientContext {
    config: Arc<ClientConfig>,
    session: Arc<SessionManager>,
    client: RequestClient,
    account: AccountService,
}

impl ClientContext {
    /// Build a context persisting the session under `config.storage_dir`
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP clients cannot be built
    pub fn from_config(config: ClientConfig) -> AppResult<Self> {
        let store = Arc::new(FileSessionStore::new(&config.storage_dir));
        info!(path = %store.path().display(), "using file session store");
        Self::with_store(config, store)
    }

    /// Build a context over a caller-provided session store
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP clients cannot be built
    pub fn with_store(config: ClientConfig, store: Arc<dyn SessionStore>) -> AppResult<Self> {
        let config = Arc::new(config);
        let auth = AuthApi::new(Arc::clone(&config))?;
        let session = Arc::new(SessionManager::new(store, auth, config.event_capacity));
        let client = RequestClient::new(Arc::clone(&config), Arc::clone(&session))?;
        let account = AccountService::new(client.clone(), Arc::clone(&session));

        Ok(Self {
            config,
            session,
            client,
            account,
        })
    }

    /// Get client configuration
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get the session manager for identity operations
    #[must_use]
    pub const fn session(&self) -> &Arc<SessionManager> {
        &self.session
    }

    /// Get the request client for data operations
    #[must_use]
    pub const fn client(&self) -> &RequestClient {
        &self.client
    }

    /// Get the account service
    #[must_use]
    pub const fn account(&self) -> &AccountService {
        &self.account
    }
}

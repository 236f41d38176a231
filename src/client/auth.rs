// ABOUTME: Unauthenticated calls of the session endpoints: sign-in, renewal, and registration
// ABOUTME: None of these requests carry a bearer token

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

use super::{elapsed_ms, read_success_body};
use crate::config::environment::ClientConfig;
use crate::errors::{AppError, AppResult, ErrorClassifier};
use crate::models::{
    NewAccount, RefreshRequest, Session, SignInRequest, SignInResponse, TokenPair, TokenResponse,
};
use crate::utils::http_client::create_client_with_timeout;
use gymlog_core::constants::endpoints;

/// Client for `POST /sessions`, `POST /sessions/refresh`, and `POST /users`
#[derive(Clone)]
pub struct AuthApi {
    http: Client,
    config: Arc<ClientConfig>,
}

impl AuthApi {
    /// Create the session endpoint client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built
    pub fn new(config: Arc<ClientConfig>) -> AppResult<Self> {
        let http = create_client_with_timeout(config.request_timeout, config.connect_timeout)?;
        Ok(Self { http, config })
    }

    /// Configuration this client was built with
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Exchange credentials for a user and token pair
    ///
    /// # Errors
    ///
    /// Returns a domain error carrying the service message when the
    /// credentials are rejected, and a network error when the service cannot
    /// be reached
    pub async fn create_session(&self, email: &str, password: &str) -> AppResult<Session> {
        let response: SignInResponse = self
            .post_json(endpoints::SESSIONS, &SignInRequest { email, password })
            .await?;
        Ok(Session::from(response))
    }

    /// Exchange a refresh token for a new token pair
    ///
    /// # Errors
    ///
    /// Returns an error if the service rejects the refresh token or cannot be reached
    pub async fn refresh_session(&self, refresh_token: &str) -> AppResult<TokenPair> {
        let response: TokenResponse = self
            .post_json(endpoints::SESSIONS_REFRESH, &RefreshRequest { refresh_token })
            .await?;
        Ok(TokenPair::from(response))
    }

    /// Register a new account
    ///
    /// # Errors
    ///
    /// Returns a domain error when the service rejects the registration
    pub async fn register(&self, account: &NewAccount) -> AppResult<()> {
        self.post(endpoints::USERS, account).await.map(|_| ())
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> AppResult<T>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let bytes = self.post(path, body).await?;
        serde_json::from_slice(&bytes).map_err(ErrorClassifier::payload)
    }

    async fn post<B>(&self, path: &str, body: &B) -> AppResult<bytes::Bytes>
    where
        B: Serialize + Sync,
    {
        let url = self
            .config
            .endpoint(path)
            .map_err(|e| AppError::internal(e.to_string()))?;
        let started = Instant::now();

        let response = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(ErrorClassifier::transport)?;

        debug!(
            http.path = %path,
            http.status = response.status().as_u16(),
            http.duration_ms = elapsed_ms(started.elapsed()),
            "session endpoint answered"
        );

        read_success_body(response).await
    }
}

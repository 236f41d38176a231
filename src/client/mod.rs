// ABOUTME: Authenticated request client that attaches the bearer token at send time
// ABOUTME: Recovers a single authorization failure per request through refresh-and-replay
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Request Client
//!
//! Every data call goes through [`RequestClient::execute`]. The access token
//! is read from the [`SessionManager`] when the request is sent, so a request
//! replayed after a renewal always carries the fresh token.
//!
//! ## Authorization failures
//!
//! A `401` on an authenticated request is handed to the refresh coordinator:
//!
//! - the first failure while idle starts exactly one renewal call and queues
//!   the request
//! - failures arriving while a renewal is in flight are queued behind it
//! - on success the queue is replayed in enqueue order with the new token
//! - on failure the user is signed out and every queued request fails with
//!   an auth-expired error
//!
//! A replayed request that is rejected again is fatal and is never queued a
//! second time. Every other failure bypasses the coordinator.
//!
//! A rejected request stays bound to the session generation it was sent
//! under. Renewal results, replays, and forced sign-outs only ever apply to
//! that session; once it was replaced, the request fails with an
//! auth-expired error and the new session is left alone.

/// Session endpoints called without a bearer token
pub mod auth;
/// Typed calls of the fitness API
pub mod endpoints;
mod refresh;

pub use refresh::RefreshState;

use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::environment::ClientConfig;
use crate::errors::{AppError, AppResult, ErrorClassifier, ErrorKind};
use crate::logging::AppLogger;
use crate::session::SessionManager;
use crate::utils::http_client::api_client;
use gymlog_core::constants::defaults::MAX_REPLAYS_PER_REQUEST;
use refresh::{Admission, QueueTicket, RefreshCoordinator};

/// File attached to a multipart avatar upload
#[derive(Debug, Clone)]
pub struct AvatarUpload {
    /// File name reported to the service
    pub file_name: String,
    /// MIME type, e.g. `image/png`
    pub mime: String,
    /// File contents
    pub bytes: Bytes,
}

impl AvatarUpload {
    /// Create an upload from in-memory contents
    pub fn new(file_name: impl Into<String>, mime: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            mime: mime.into(),
            bytes: bytes.into(),
        }
    }

    /// Upload named after its owner, e.g. `ana souza.png` with type `image/png`
    pub fn for_user(user_name: &str, extension: &str, bytes: impl Into<Bytes>) -> Self {
        let extension = extension.trim_start_matches('.').to_lowercase();
        let subtype = if extension == "jpg" { "jpeg" } else { &extension };
        Self::new(
            format!("{user_name}.{extension}").to_lowercase(),
            format!("image/{subtype}"),
            bytes,
        )
    }
}

/// Request body, rebuilt on every send so a replay can resend it
#[derive(Debug, Clone)]
pub enum RequestBody {
    /// No body
    Empty,
    /// JSON document
    Json(Value),
    /// Multipart form with a single file field
    Multipart {
        /// Form field name
        field: &'static str,
        /// Attached file
        upload: AvatarUpload,
    },
}

impl RequestBody {
    fn apply(&self, builder: RequestBuilder) -> AppResult<RequestBuilder> {
        match self {
            Self::Empty => Ok(builder),
            Self::Json(value) => Ok(builder.json(value)),
            Self::Multipart { field, upload } => {
                let part = Part::bytes(upload.bytes.to_vec())
                    .file_name(upload.file_name.clone())
                    .mime_str(&upload.mime)
                    .map_err(|e| {
                        AppError::invalid_input(format!("Invalid file type {}", upload.mime))
                            .with_source(e)
                    })?;
                Ok(builder.multipart(Form::new().part(*field, part)))
            }
        }
    }
}

/// A data request as described by its caller
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    path: String,
    body: RequestBody,
    authenticated: bool,
    replays: u8,
    generation: Option<u64>,
}

impl ApiRequest {
    /// Request with the given method and API path
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: RequestBody::Empty,
            authenticated: true,
            replays: 0,
            generation: None,
        }
    }

    /// `GET` request
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// `POST` request
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// `PUT` request
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    /// `PATCH` request
    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    /// Attach a JSON body
    ///
    /// # Errors
    ///
    /// Returns a serialization error if `body` cannot be encoded
    pub fn json<T: serde::Serialize + ?Sized>(mut self, body: &T) -> AppResult<Self> {
        self.body = RequestBody::Json(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Attach a file as a multipart form field
    #[must_use]
    pub fn multipart(mut self, field: &'static str, upload: AvatarUpload) -> Self {
        self.body = RequestBody::Multipart { field, upload };
        self
    }

    /// Send without a bearer token; authorization failures are then ordinary errors
    #[must_use]
    pub const fn without_auth(mut self) -> Self {
        self.authenticated = false;
        self
    }

    /// HTTP method
    #[must_use]
    pub const fn method(&self) -> &Method {
        &self.method
    }

    /// API path
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Times this request was already replayed
    #[must_use]
    pub const fn replays(&self) -> u8 {
        self.replays
    }

    const fn can_replay(&self) -> bool {
        self.replays < MAX_REPLAYS_PER_REQUEST
    }

    fn into_replay(mut self) -> Self {
        self.replays = self.replays.saturating_add(1);
        self
    }

    const fn bound_to(mut self, generation: u64) -> Self {
        self.generation = Some(generation);
        self
    }
}

/// Successful response
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// HTTP status code
    pub status: u16,
    /// Raw body
    pub body: Bytes,
}

impl ApiResponse {
    /// Decode the body as JSON
    ///
    /// # Errors
    ///
    /// Returns an unexpected-response error if the body does not match `T`
    pub fn json<T: DeserializeOwned>(&self) -> AppResult<T> {
        serde_json::from_slice(&self.body).map_err(ErrorClassifier::payload)
    }
}

/// Read the body of a response, classifying non-success statuses
pub(crate) async fn read_success_body(response: Response) -> AppResult<Bytes> {
    let status = response.status();
    let body = response.bytes().await.map_err(ErrorClassifier::transport)?;
    if status.is_success() {
        Ok(body)
    } else {
        Err(ErrorClassifier::status(status, &body))
    }
}

enum Dispatch {
    Completed(ApiResponse),
    Unauthorized { generation: u64 },
}

struct ClientInner {
    http: Client,
    config: Arc<ClientConfig>,
    session: Arc<SessionManager>,
    refresh: RefreshCoordinator,
}

/// Shared HTTP client for data requests; cheap to clone
#[derive(Clone)]
pub struct RequestClient {
    inner: Arc<ClientInner>,
}

impl RequestClient {
    /// Create a client bound to a session manager
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built
    pub fn new(config: Arc<ClientConfig>, session: Arc<SessionManager>) -> AppResult<Self> {
        let http = api_client(&config)?;
        Ok(Self {
            inner: Arc::new(ClientInner {
                http,
                config,
                session,
                refresh: RefreshCoordinator::new(),
            }),
        })
    }

    /// Send a request, recovering one authorization failure through renewal
    ///
    /// # Errors
    ///
    /// Returns the classified failure of the request, or an auth-expired
    /// error when the session could not be renewed
    pub async fn execute(&self, request: ApiRequest) -> AppResult<ApiResponse> {
        self.inner.execute(request).await
    }

    /// Send a request and decode its JSON body
    ///
    /// # Errors
    ///
    /// Same as [`Self::execute`], plus an unexpected-response error when the
    /// body does not decode into `T`
    pub async fn execute_json<T: DeserializeOwned>(&self, request: ApiRequest) -> AppResult<T> {
        self.execute(request).await?.json()
    }

    /// Whether a renewal is in flight
    #[must_use]
    pub fn refresh_state(&self) -> RefreshState {
        self.inner.refresh.state()
    }

    /// Requests waiting for the renewal outcome
    #[must_use]
    pub fn pending_replays(&self) -> usize {
        self.inner.refresh.pending()
    }

    /// Session manager consulted for tokens
    #[must_use]
    pub fn session(&self) -> &Arc<SessionManager> {
        &self.inner.session
    }

    /// Configuration this client was built with
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }
}

impl ClientInner {
    async fn execute(self: &Arc<Self>, request: ApiRequest) -> AppResult<ApiResponse> {
        let sent_epoch = self.refresh.epoch();
        match self.dispatch(&request).await? {
            Dispatch::Completed(response) => Ok(response),
            Dispatch::Unauthorized { generation } if request.can_replay() => {
                self.recover(request.bound_to(generation), sent_epoch).await
            }
            Dispatch::Unauthorized { generation } => {
                Err(self.expire_session(&request, generation).await)
            }
        }
    }

    async fn recover(self: &Arc<Self>, request: ApiRequest, sent_epoch: u64) -> AppResult<ApiResponse> {
        match self.refresh.admit(request, sent_epoch) {
            Admission::ReplayNow(request) => {
                debug!(http.path = %request.path, "tokens renewed since send, replaying");
                self.replay(request).await
            }
            Admission::Queued {
                ticket,
                receiver,
                start_renewal,
            } => {
                let _ticket = QueueTicket::new(&self.refresh, ticket);
                if start_renewal {
                    tokio::spawn(Arc::clone(self).renew_and_drain());
                }
                receiver
                    .await
                    .unwrap_or_else(|_| Err(AppError::internal("Queued request was abandoned")))
            }
        }
    }

    /// Run one renewal and settle every queued request
    async fn renew_and_drain(self: Arc<Self>) {
        let (generation, refresh_token) = self.session.renewal_credentials().await;
        let renewed = match refresh_token {
            Some(refresh_token) => self.renew(generation, &refresh_token).await,
            None => Err(AppError::not_signed_in()),
        };

        match renewed {
            Ok(()) => {
                let queue = self.refresh.renewal_succeeded();
                debug!(queued = queue.len(), "replaying queued requests");
                for pending in queue {
                    if pending.responder.is_closed() {
                        continue;
                    }
                    let result = self.replay(pending.request).await;
                    let _ = pending.responder.send(result);
                }
            }
            Err(e) => {
                warn!(error = %e, generation, "session renewal failed, signing out");
                if let Err(e) = self.session.sign_out_if(generation).await {
                    warn!(error = %e, "sign-out after failed renewal could not clear storage");
                }
                for pending in self.refresh.renewal_failed() {
                    let _ = pending.responder.send(Err(AppError::auth_expired()));
                }
            }
        }
    }

    async fn renew(&self, generation: u64, refresh_token: &str) -> AppResult<()> {
        let mut attempt = 0;
        let tokens = loop {
            match self.session.auth().refresh_session(refresh_token).await {
                Ok(tokens) => break tokens,
                Err(e)
                    if e.kind() == ErrorKind::Network
                        && attempt < self.config.refresh_retry_attempts =>
                {
                    attempt += 1;
                    debug!(attempt, error = %e, "retrying session renewal");
                    tokio::time::sleep(self.config.refresh_retry_backoff).await;
                }
                Err(e) => return Err(e),
            }
        };

        self.session.apply_renewed_tokens(generation, tokens).await
    }

    async fn replay(&self, request: ApiRequest) -> AppResult<ApiResponse> {
        let request = request.into_replay();
        match self.dispatch(&request).await? {
            Dispatch::Completed(response) => Ok(response),
            Dispatch::Unauthorized { generation } => {
                Err(self.expire_session(&request, generation).await)
            }
        }
    }

    async fn expire_session(&self, request: &ApiRequest, generation: u64) -> AppError {
        warn!(
            http.path = %request.path,
            replays = request.replays,
            generation,
            "request rejected after renewal, signing out"
        );
        if let Err(e) = self.session.sign_out_if(generation).await {
            warn!(error = %e, "sign-out could not clear storage");
        }
        AppError::auth_expired()
    }

    async fn dispatch(&self, request: &ApiRequest) -> AppResult<Dispatch> {
        let url = self
            .config
            .endpoint(&request.path)
            .map_err(|e| AppError::internal(e.to_string()))?;

        let (generation, token) = self.session.bearer_credentials().await;
        if request.generation.is_some_and(|bound| bound != generation) {
            debug!(http.path = %request.path, "session replaced before replay, dropping request");
            return Err(AppError::auth_expired());
        }

        let mut builder = self
            .http
            .request(request.method.clone(), url)
            .timeout(self.config.request_timeout);
        if request.authenticated {
            if let Some(token) = token {
                builder = builder.bearer_auth(token);
            }
        }
        let builder = request.body.apply(builder)?;

        let request_id = Uuid::new_v4().to_string();
        let started = Instant::now();
        let response = builder.send().await.map_err(|e| {
            debug!(request.id = %request_id, http.path = %request.path, error = %e, "request failed");
            ErrorClassifier::transport(e)
        })?;

        let status = response.status();
        AppLogger::log_api_request(
            &request_id,
            request.method.as_str(),
            &request.path,
            status.as_u16(),
            elapsed_ms(started.elapsed()),
            request.replays > 0,
        );

        if status == StatusCode::UNAUTHORIZED && request.authenticated {
            return Ok(Dispatch::Unauthorized { generation });
        }

        let body = read_success_body(response).await?;
        Ok(Dispatch::Completed(ApiResponse {
            status: status.as_u16(),
            body,
        }))
    }
}

pub(crate) fn elapsed_ms(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gymlog_core::constants::storage::AVATAR_FIELD;

    #[test]
    fn test_replay_counter_allows_one_replay() {
        let request = ApiRequest::get("/groups");
        assert!(request.can_replay());

        let replayed = request.into_replay();
        assert_eq!(replayed.replays(), 1);
        assert!(!replayed.can_replay());
    }

    #[test]
    fn test_json_body_attached() {
        let request = ApiRequest::put("/users")
            .json(&serde_json::json!({"name": "Ana"}))
            .unwrap();
        assert!(matches!(request.body, RequestBody::Json(_)));
        assert_eq!(request.method(), &Method::PUT);
    }

    #[test]
    fn test_rejected_request_keeps_its_session_binding() {
        let request = ApiRequest::get("/groups").bound_to(3).into_replay();
        assert_eq!(request.generation, Some(3));
        assert_eq!(ApiRequest::get("/groups").generation, None);
    }

    #[test]
    fn test_elapsed_ms_saturates() {
        assert_eq!(elapsed_ms(Duration::from_millis(42)), 42);
        assert_eq!(elapsed_ms(Duration::MAX), u64::MAX);
    }

    #[test]
    fn test_without_auth_clears_flag() {
        assert!(!ApiRequest::post("/users").without_auth().authenticated);
    }

    #[test]
    fn test_response_payload_mismatch_is_unknown_kind() {
        let response = ApiResponse {
            status: 200,
            body: Bytes::from_static(b"[1, 2]"),
        };
        let error = response.json::<Vec<String>>().unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Unknown);
    }

    #[test]
    fn test_upload_named_after_user() {
        let upload = AvatarUpload::for_user("Ana Souza", ".JPG", vec![0_u8]);
        assert_eq!(upload.file_name, "ana souza.jpg");
        assert_eq!(upload.mime, "image/jpeg");
    }

    #[test]
    fn test_avatar_field_name() {
        let request = ApiRequest::patch("/users/avatar").multipart(
            AVATAR_FIELD,
            AvatarUpload::new("me.png", "image/png", vec![1_u8, 2, 3]),
        );
        assert!(matches!(
            request.body,
            RequestBody::Multipart { field: "avatar", .. }
        ));
    }
}

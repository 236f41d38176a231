// ABOUTME: Session credentials and the wire formats of the session endpoints
// ABOUTME: TokenPair redacts its secrets from Debug output
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::fmt;

use super::User;

/// Access and refresh credentials
///
/// Both tokens are opaque to the client. The access token is attached to
/// every authenticated request; the refresh token is only ever sent to the
/// renewal endpoint.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// Short-lived bearer credential
    pub access_token: String,
    /// Long-lived renewal credential
    pub refresh_token: String,
}

impl TokenPair {
    /// Create a token pair
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
        }
    }
}

impl fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenPair")
            .field("access_token", &"[REDACTED]")
            .field("refresh_token", &"[REDACTED]")
            .finish()
    }
}

/// The live pairing of a user and their credentials
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Signed-in user
    pub user: User,
    /// Current credentials
    pub tokens: TokenPair,
}

/// Body of `POST /sessions`
#[derive(Clone, Serialize)]
pub struct SignInRequest<'a> {
    /// Login email
    pub email: &'a str,
    /// Plain password, sent over TLS only
    pub password: &'a str,
}

/// Response of `POST /sessions`
#[derive(Debug, Clone, Deserialize)]
pub struct SignInResponse {
    /// Signed-in user
    pub user: User,
    /// Access token
    pub token: String,
    /// Refresh token
    pub refresh_token: String,
}

impl From<SignInResponse> for Session {
    fn from(response: SignInResponse) -> Self {
        Self {
            user: response.user,
            tokens: TokenPair::new(response.token, response.refresh_token),
        }
    }
}

/// Body of `POST /sessions/refresh`
#[derive(Debug, Clone, Serialize)]
pub struct RefreshRequest<'a> {
    /// Current refresh token
    pub refresh_token: &'a str,
}

/// Response of `POST /sessions/refresh`
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    /// New access token
    pub token: String,
    /// New refresh token
    pub refresh_token: String,
}

impl From<TokenResponse> for TokenPair {
    fn from(response: TokenResponse) -> Self {
        Self::new(response.token, response.refresh_token)
    }
}

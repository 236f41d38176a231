// ABOUTME: Unified error type and error taxonomy for the Gymlog client
// ABOUTME: Every failure carries an ErrorCode that resolves to exactly one ErrorKind
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling System
//!
//! Presentation code never inspects transport errors directly. Every failure
//! surfaced by the session subsystem is an [`AppError`] whose [`ErrorCode`]
//! maps to one [`ErrorKind`], so a caller only ever decides between showing
//! a message and sending the user back to the sign-in flow.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::constants::messages;

/// User-facing failure categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Caller-supplied input rejected before a request was sent
    Validation,
    /// The backing service answered with a structured, displayable message
    Domain,
    /// The session could not be renewed or re-validated
    AuthExpired,
    /// No response, timeout, or connectivity failure
    Network,
    /// Anything else
    Unknown,
}

/// Error codes used throughout the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    // Validation
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput,

    // Domain
    #[serde(rename = "SERVICE_REJECTED")]
    ServiceRejected,

    // Authentication
    #[serde(rename = "AUTH_EXPIRED")]
    AuthExpired,
    #[serde(rename = "NOT_SIGNED_IN")]
    NotSignedIn,

    // Network
    #[serde(rename = "NETWORK_UNAVAILABLE")]
    NetworkUnavailable,
    #[serde(rename = "REQUEST_TIMEOUT")]
    RequestTimeout,

    // Unknown
    #[serde(rename = "UNEXPECTED_RESPONSE")]
    UnexpectedResponse,
    #[serde(rename = "STORAGE_ERROR")]
    StorageError,
    #[serde(rename = "SERIALIZATION_ERROR")]
    SerializationError,
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError,
}

impl ErrorCode {
    /// The taxonomy category this code belongs to
    #[must_use]
    pub const fn kind(self) -> ErrorKind {
        match self {
            Self::InvalidInput => ErrorKind::Validation,
            Self::ServiceRejected => ErrorKind::Domain,
            Self::AuthExpired | Self::NotSignedIn => ErrorKind::AuthExpired,
            Self::NetworkUnavailable | Self::RequestTimeout => ErrorKind::Network,
            Self::UnexpectedResponse
            | Self::StorageError
            | Self::SerializationError
            | Self::InternalError => ErrorKind::Unknown,
        }
    }

    /// Short description of this error code
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::InvalidInput => "The provided input is invalid",
            Self::ServiceRejected => "The service rejected the request",
            Self::AuthExpired => "The session has expired",
            Self::NotSignedIn => "No user is signed in",
            Self::NetworkUnavailable => "The service could not be reached",
            Self::RequestTimeout => "The request timed out",
            Self::UnexpectedResponse => "The service returned an unexpected response",
            Self::StorageError => "Session storage operation failed",
            Self::SerializationError => "Data serialization/deserialization failed",
            Self::InternalError => "An internal client error occurred",
        }
    }
}

/// Unified error type for the client
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// HTTP status of the response that produced this error, if any
    pub status: Option<u16>,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            status: None,
            source: None,
        }
    }

    /// Attach the HTTP status that produced this error
    #[must_use]
    pub const fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// The taxonomy category of this error
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.code.kind()
    }

    /// Whether presentation code should route to the sign-in flow instead of
    /// showing an inline message
    #[must_use]
    pub const fn requires_sign_in(&self) -> bool {
        matches!(self.kind(), ErrorKind::AuthExpired)
    }

    /// Message suitable for display
    ///
    /// Validation, domain and network messages are shown as-is; anything
    /// else falls back to the caller's generic message.
    #[must_use]
    pub fn user_message<'a>(&'a self, fallback: &'a str) -> &'a str {
        match self.kind() {
            ErrorKind::Validation | ErrorKind::Domain | ErrorKind::Network => &self.message,
            ErrorKind::AuthExpired => messages::SESSION_EXPIRED,
            ErrorKind::Unknown => fallback,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

/// Error body returned by the backing service
///
/// The service answers failures with `{"status": "error", "message": "..."}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceErrorBody {
    /// Always `"error"` when present
    #[serde(default)]
    pub status: Option<String>,
    /// User-displayable message
    pub message: String,
}

/// Convenience functions for creating common errors
impl AppError {
    /// Caller-supplied input was rejected before sending
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// The service answered with a structured message
    pub fn service_rejected(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceRejected, message)
    }

    /// The session could not be renewed
    #[must_use]
    pub fn auth_expired() -> Self {
        Self::new(ErrorCode::AuthExpired, messages::SESSION_EXPIRED)
    }

    /// An operation needed a live session and there was none
    #[must_use]
    pub fn not_signed_in() -> Self {
        Self::new(ErrorCode::NotSignedIn, "No user is signed in")
    }

    /// Connectivity failure
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NetworkUnavailable, message)
    }

    /// Request exceeded its timeout
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::RequestTimeout, message)
    }

    /// Unexpected response from the service
    pub fn unexpected_response(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::UnexpectedResponse, message)
    }

    /// Session storage failure
    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StorageError, message)
    }

    /// Internal client error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::new(ErrorCode::SerializationError, error.to_string()).with_source(error)
    }
}

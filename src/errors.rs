// ABOUTME: Error taxonomy re-exports and the classifier for transport and HTTP failures
// ABOUTME: Maps reqwest errors, HTTP statuses, and bad payloads onto exactly one ErrorKind
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Error Classification
//!
//! Low-level failures never reach presentation code as-is. The
//! [`ErrorClassifier`] turns them into an [`AppError`] whose kind is one of
//! validation, domain, auth-expired, network, or unknown.

use reqwest::StatusCode;
use tracing::debug;

pub use gymlog_core::errors::{AppError, AppResult, ErrorCode, ErrorKind, ServiceErrorBody};

/// Total mapping from transport and HTTP failures to [`AppError`]
pub struct ErrorClassifier;

impl ErrorClassifier {
    /// Classify a failure raised by the HTTP client before a response was read
    #[must_use]
    pub fn transport(error: reqwest::Error) -> AppError {
        if error.is_timeout() {
            return AppError::timeout("The request timed out. Check your connection and try again.")
                .with_source(error);
        }

        if error.is_connect() || error.is_request() || error.is_body() {
            return AppError::network("Could not reach the server. Check your connection.")
                .with_source(error);
        }

        if error.is_decode() {
            return AppError::unexpected_response(format!("Failed to read response: {error}"))
                .with_source(error);
        }

        let status = error.status().map(|status| status.as_u16());
        let classified = AppError::internal(format!("HTTP client error: {error}"));
        match status {
            Some(status) => classified.with_status(status).with_source(error),
            None => classified.with_source(error),
        }
    }

    /// Classify a non-success HTTP response from its status and body
    ///
    /// A structured `{"message": ...}` body is always a domain error whose
    /// message is shown verbatim, whatever the status.
    #[must_use]
    pub fn status(status: StatusCode, body: &[u8]) -> AppError {
        if let Ok(service_error) = serde_json::from_slice::<ServiceErrorBody>(body) {
            debug!(status = status.as_u16(), "service rejected request");
            return AppError::service_rejected(service_error.message).with_status(status.as_u16());
        }

        let classified = match status {
            StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
                AppError::timeout(format!("The server did not answer in time ({status})"))
            }
            StatusCode::BAD_GATEWAY | StatusCode::SERVICE_UNAVAILABLE => {
                AppError::network(format!("The server is unavailable ({status})"))
            }
            _ => AppError::unexpected_response(format!("Unexpected response status {status}")),
        };
        classified.with_status(status.as_u16())
    }

    /// Classify a success response whose payload does not match the expected shape
    #[must_use]
    pub fn payload(error: serde_json::Error) -> AppError {
        AppError::unexpected_response(format!("Unexpected response payload: {error}"))
            .with_source(error)
    }
}

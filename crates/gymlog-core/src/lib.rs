// ABOUTME: Core types and constants for the Gymlog fitness client
// ABOUTME: Foundation crate with the error taxonomy, session models, and endpoint constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Gymlog Core
//!
//! Foundation crate providing shared types and constants for the Gymlog
//! client. It has no networking or storage dependencies so that presentation
//! code can depend on it without pulling in the HTTP stack.
//!
//! ## Modules
//!
//! - **errors**: `AppError`, `ErrorCode` and the `ErrorKind` taxonomy every failure resolves to
//! - **models**: `User`, `TokenPair`, `Session` and the data transfer objects of the fitness API
//! - **constants**: endpoint paths, storage keys, and client defaults

/// Unified error handling with error codes and the user-facing error taxonomy
pub mod errors;

/// Session, user, and fitness data models
pub mod models;

/// Endpoint paths, storage keys, and default values
pub mod constants;

// ABOUTME: Main library entry point for the Gymlog fitness client
// ABOUTME: Session persistence, authenticated requests, and transparent token renewal
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Gymlog Client
//!
//! The session and authenticated-request subsystem of the Gymlog fitness
//! app. Screens (or the bundled `gymlog-cli`) use it to sign users in, keep
//! the session across restarts, and call the fitness API without ever
//! handling an expired access token themselves.
//!
//! ## Architecture
//!
//! - **Storage**: durable persistence of the serialized session
//! - **Session**: `SessionManager`, the single owner of the live session and
//!   publisher of session events
//! - **Client**: `RequestClient`, which attaches the bearer token to every
//!   request and owns the `RefreshCoordinator` that renews expired sessions
//!   and replays the requests that failed meanwhile
//! - **Errors**: the `ErrorClassifier` mapping transport failures onto the
//!   user-facing error taxonomy
//! - **Context**: `ClientContext`, the explicit dependency container handed
//!   to every collaborator
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use gymlog_client::config::environment::ClientConfig;
//! use gymlog_client::context::ClientContext;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ClientConfig::from_env()?;
//!     let context = ClientContext::from_config(config)?;
//!
//!     if context.session().restore().await?.is_none() {
//!         context.session().sign_in("ana@example.com", "secret").await?;
//!     }
//!
//!     let groups = context.client().groups().await?;
//!     println!("{groups:?}");
//!     Ok(())
//! }
//! ```

/// Account flows built on the session and request client (sign-up, profile, avatar)
pub mod account;

/// Authenticated request client, refresh coordination, and typed endpoints
pub mod client;

/// Environment-based configuration
pub mod config;

/// Explicit dependency container for collaborators
pub mod context;

/// Error taxonomy re-exports and the transport error classifier
pub mod errors;

/// Logging configuration and structured logging setup
pub mod logging;

/// Session ownership, lifecycle operations, and session events
pub mod session;

/// Durable session persistence
pub mod storage;

/// Shared HTTP client construction
pub mod utils;

/// Re-exported foundation types
pub use gymlog_core::{constants, models};

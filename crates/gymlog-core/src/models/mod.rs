// ABOUTME: Core data models for the Gymlog client
// ABOUTME: Re-exports User, TokenPair, Session and the fitness API data transfer objects
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! - `User`, `UserUpdate`: identity attributes and partial profile updates
//! - `TokenPair`, `Session`: credentials and the live authenticated identity
//! - `Exercise`, `HistoryByDay`, `HistoryEntry`: fitness data rendered by screens
//! - `NewAccount`, `ProfileChange`: request bodies of the account endpoints

mod account;
mod exercise;
mod id;
mod session;
mod user;

pub use account::{NewAccount, ProfileChange};
pub use exercise::{Exercise, HistoryByDay, HistoryEntry, LogHistoryRequest};
pub use session::{RefreshRequest, Session, SignInRequest, SignInResponse, TokenPair, TokenResponse};
pub use user::{AvatarResponse, User, UserUpdate};

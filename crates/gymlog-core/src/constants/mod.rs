// ABOUTME: Endpoint paths, storage keys, and default values for the Gymlog client
// ABOUTME: Grouped by domain so call sites read as endpoints::SESSIONS, defaults::API_URL, etc.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Constants Module

/// Paths of the backing service API
pub mod endpoints {
    /// Sign-in: email + password in, user + token pair out
    pub const SESSIONS: &str = "/sessions";
    /// Renewal: refresh token in, token pair out
    pub const SESSIONS_REFRESH: &str = "/sessions/refresh";
    /// Registration and profile update
    pub const USERS: &str = "/users";
    /// Multipart avatar upload
    pub const USERS_AVATAR: &str = "/users/avatar";
    /// Muscle groups
    pub const GROUPS: &str = "/groups";
    /// Single exercise, followed by `/{id}`
    pub const EXERCISES: &str = "/exercises";
    /// Exercises of one group, followed by `/{group}`
    pub const EXERCISES_BY_GROUP: &str = "/exercises/bygroup";
    /// Workout history
    pub const HISTORY: &str = "/history";
    /// Public avatar images, followed by `/{avatar}`
    pub const AVATAR: &str = "/avatar";
}

/// Session persistence
pub mod storage {
    /// The single durable key holding the serialized session
    pub const SESSION_STORAGE_KEY: &str = "gymlog.session";
    /// Version written into every stored record
    pub const SESSION_RECORD_VERSION: u32 = 1;
    /// Multipart field name of the avatar upload
    pub const AVATAR_FIELD: &str = "avatar";
}

/// Default configuration values
pub mod defaults {
    /// Backing service URL
    pub const API_URL: &str = "http://localhost:3333";
    /// Per-request timeout
    pub const REQUEST_TIMEOUT_SECS: u64 = 30;
    /// Connection timeout
    pub const CONNECT_TIMEOUT_SECS: u64 = 10;
    /// Extra renewal attempts after a network failure during refresh
    pub const REFRESH_RETRY_ATTEMPTS: u32 = 0;
    /// Delay between renewal attempts
    pub const REFRESH_RETRY_BACKOFF_MS: u64 = 250;
    /// Buffered session events per subscriber
    pub const SESSION_EVENT_CAPACITY: usize = 64;
    /// Times a single request may be replayed after an authorization failure
    pub const MAX_REPLAYS_PER_REQUEST: u8 = 1;
    /// Directory name under the platform data dir
    pub const STORAGE_DIR_NAME: &str = "gymlog";
}

/// Local input rules checked before any request
pub mod validation {
    /// Shortest accepted password
    pub const MIN_PASSWORD_LENGTH: usize = 6;
}

/// User-facing fallback messages
pub mod messages {
    /// Shown when a failure has no displayable message
    pub const GENERIC_FAILURE: &str = "Something went wrong. Please try again later.";
    /// Shown when the session could not be renewed
    pub const SESSION_EXPIRED: &str = "Your session has expired. Please sign in again.";
}

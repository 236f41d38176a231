// ABOUTME: Request bodies of the registration and profile endpoints
// ABOUTME: NewAccount for POST /users, ProfileChange for PUT /users
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// Registration data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAccount {
    /// Display name
    pub name: String,
    /// Login email
    pub email: String,
    /// Initial password
    pub password: String,
}

/// Profile edit as submitted to `PUT /users`
///
/// Password fields are only sent when the user changes their password.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileChange {
    /// New display name
    pub name: String,
    /// New password
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Current password, required by the service when `password` is set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_password: Option<String>,
}

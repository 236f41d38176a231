// ABOUTME: User identity model and partial profile updates
// ABOUTME: Profile updates merge field-by-field and never replace the user wholesale
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// Signed-in user as returned by the service
///
/// # Examples
///
/// ```rust
/// use gymlog_core::models::{User, UserUpdate};
///
/// let mut user = User {
///     id: "7".into(),
///     name: "Ana".into(),
///     email: "ana@example.com".into(),
///     avatar: None,
/// };
/// user.merge(UserUpdate::name("Ana Souza"));
/// assert_eq!(user.name, "Ana Souza");
/// assert_eq!(user.email, "ana@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Service-assigned identifier
    #[serde(deserialize_with = "super::id::deserialize")]
    pub id: String,
    /// Display name
    pub name: String,
    /// Login email
    pub email: String,
    /// Avatar file reference, resolved against the avatar endpoint
    #[serde(default)]
    pub avatar: Option<String>,
}

impl User {
    /// Apply a partial update; absent fields are left untouched
    pub fn merge(&mut self, update: UserUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(avatar) = update.avatar {
            self.avatar = Some(avatar);
        }
    }
}

/// Partial profile update
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserUpdate {
    /// New display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New avatar reference
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl UserUpdate {
    /// Update only the display name
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            avatar: None,
        }
    }

    /// Update only the avatar reference
    pub fn avatar(avatar: impl Into<String>) -> Self {
        Self {
            name: None,
            avatar: Some(avatar.into()),
        }
    }

    /// Whether the update changes nothing
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.avatar.is_none()
    }
}

/// Response of the avatar upload endpoint
///
/// The service answers with the whole updated user; only the avatar matters.
#[derive(Debug, Clone, Deserialize)]
pub struct AvatarResponse {
    /// New avatar reference
    pub avatar: String,
}

// ABOUTME: Account flows combining remote calls with local session updates
// ABOUTME: Sign-up then sign-in, profile edit then name merge, avatar upload then avatar merge
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;
use tracing::{info, instrument};

use crate::client::{AvatarUpload, RequestClient};
use crate::errors::{AppError, AppResult};
use crate::models::{NewAccount, ProfileChange, User, UserUpdate};
use crate::session::SessionManager;
use gymlog_core::constants::validation::MIN_PASSWORD_LENGTH;

/// Account operations of the signed-in user
#[derive(Clone)]
pub struct AccountService {
    client: RequestClient,
    session: Arc<SessionManager>,
}

impl AccountService {
    /// Create the service over a request client and its session manager
    #[must_use]
    pub const fn new(client: RequestClient, session: Arc<SessionManager>) -> Self {
        Self { client, session }
    }

    /// Register a new account and sign in with it
    ///
    /// # Errors
    ///
    /// Returns a validation error for incomplete input, a domain error when
    /// the service rejects the registration, or any sign-in failure
    #[instrument(skip(self, account), fields(email = %account.email))]
    pub async fn sign_up(&self, account: NewAccount) -> AppResult<User> {
        validate_new_account(&account)?;
        self.client.register(&account).await?;
        info!("account registered");
        self.session.sign_in(&account.email, &account.password).await
    }

    /// Submit a profile edit and merge the new name into the session
    ///
    /// # Errors
    ///
    /// Returns a validation error for incomplete input, a not-signed-in error
    /// without a session, or the classified failure of `PUT /users`
    #[instrument(skip(self, change))]
    pub async fn update_profile(&self, change: ProfileChange) -> AppResult<User> {
        validate_profile_change(&change)?;
        if !self.session.is_authenticated().await {
            return Err(AppError::not_signed_in());
        }

        self.client.update_user(&change).await?;
        self.session
            .update_profile(UserUpdate::name(change.name.trim()))
            .await
    }

    /// Upload a new avatar and merge its reference into the session
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty file, a not-signed-in error
    /// without a session, or the classified failure of the upload
    #[instrument(skip(self, upload), fields(file_name = %upload.file_name))]
    pub async fn update_avatar(&self, upload: AvatarUpload) -> AppResult<User> {
        if upload.bytes.is_empty() {
            return Err(AppError::invalid_input("The selected image is empty"));
        }
        if !self.session.is_authenticated().await {
            return Err(AppError::not_signed_in());
        }

        let response = self.client.upload_avatar(upload).await?;
        self.session
            .update_profile(UserUpdate::avatar(response.avatar))
            .await
    }

    /// Public URL of the user's avatar image, if they have one
    #[must_use]
    pub fn avatar_url(&self, user: &User) -> Option<String> {
        user.avatar
            .as_deref()
            .map(|avatar| self.client.config().avatar_url(avatar))
    }
}

fn validate_new_account(account: &NewAccount) -> AppResult<()> {
    if account.name.trim().is_empty() {
        return Err(AppError::invalid_input("Name is required"));
    }
    validate_email(&account.email)?;
    validate_password(&account.password)
}

fn validate_profile_change(change: &ProfileChange) -> AppResult<()> {
    if change.name.trim().is_empty() {
        return Err(AppError::invalid_input("Name is required"));
    }
    if let Some(password) = &change.password {
        validate_password(password)?;
        if change.old_password.as_deref().is_none_or(str::is_empty) {
            return Err(AppError::invalid_input(
                "The current password is required to set a new one",
            ));
        }
    }
    Ok(())
}

fn validate_email(email: &str) -> AppResult<()> {
    let valid = email
        .trim()
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
    if valid {
        Ok(())
    } else {
        Err(AppError::invalid_input("Enter a valid email"))
    }
}

fn validate_password(password: &str) -> AppResult<()> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AppError::invalid_input(format!(
            "The password must have at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    Ok(())
}

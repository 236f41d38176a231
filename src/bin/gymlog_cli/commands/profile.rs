// ABOUTME: Account commands for gymlog-cli
// ABOUTME: Handles sign-up, profile edits, and avatar uploads
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use gymlog_client::{
    client::AvatarUpload,
    context::ClientContext,
    errors::{AppError, AppResult},
    models::{NewAccount, ProfileChange},
};
use std::path::Path;
use tracing::info;

use crate::helpers::display::display_user;
use crate::helpers::secret::{read_secret, NEW_PASSWORD_ENV, PASSWORD_ENV};

/// Register and sign in
pub async fn signup(context: &ClientContext, name: String, email: String) -> AppResult<()> {
    let password = read_secret(PASSWORD_ENV, "Password").await?;
    let user = context
        .account()
        .sign_up(NewAccount {
            name,
            email,
            password,
        })
        .await?;
    println!("Welcome, {}!", user.name);
    Ok(())
}

/// Change the display name and optionally the password
pub async fn update(context: &ClientContext, name: String, change_password: bool) -> AppResult<()> {
    let (password, old_password) = if change_password {
        let old_password = read_secret(PASSWORD_ENV, "Current password").await?;
        let password = read_secret(NEW_PASSWORD_ENV, "New password").await?;
        (Some(password), Some(old_password))
    } else {
        (None, None)
    };

    let user = context
        .account()
        .update_profile(ProfileChange {
            name,
            password,
            old_password,
        })
        .await?;
    println!("Profile updated");
    display_user(&user, context.account().avatar_url(&user).as_deref());
    Ok(())
}

/// Upload an image file as the new avatar
pub async fn avatar(context: &ClientContext, file: &Path) -> AppResult<()> {
    let user = context
        .session()
        .current_user()
        .await
        .ok_or_else(AppError::not_signed_in)?;

    let extension = file
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or_else(|| AppError::invalid_input("The image file needs an extension"))?;
    let bytes = tokio::fs::read(file).await.map_err(|e| {
        AppError::invalid_input(format!("Cannot read {}: {e}", file.display())).with_source(e)
    })?;

    info!(path = %file.display(), size = bytes.len(), "uploading avatar");
    let user = context
        .account()
        .update_avatar(AvatarUpload::for_user(&user.name, extension, bytes))
        .await?;
    println!("Avatar updated");
    display_user(&user, context.account().avatar_url(&user).as_deref());
    Ok(())
}

// ABOUTME: Session commands for gymlog-cli
// ABOUTME: Handles login, logout, and whoami against the stored session
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use gymlog_client::{
    context::ClientContext,
    errors::{AppError, AppResult},
};
use tracing::info;

use crate::helpers::display::display_user;
use crate::helpers::secret::{read_secret, PASSWORD_ENV};

/// Sign in and keep the session on disk
pub async fn login(context: &ClientContext, email: &str) -> AppResult<()> {
    let password = read_secret(PASSWORD_ENV, "Password").await?;
    let user = context.session().sign_in(email, &password).await?;
    info!(user.id = %user.id, "signed in");
    println!("Signed in as {}", user.name);
    Ok(())
}

/// Sign out and remove the stored session
pub async fn logout(context: &ClientContext) -> AppResult<()> {
    context.session().sign_out().await?;
    println!("Signed out");
    Ok(())
}

/// Show the signed-in user
pub async fn whoami(context: &ClientContext) -> AppResult<()> {
    let user = context
        .session()
        .current_user()
        .await
        .ok_or_else(AppError::not_signed_in)?;
    display_user(&user, context.account().avatar_url(&user).as_deref());
    Ok(())
}

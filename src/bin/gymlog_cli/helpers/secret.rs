// ABOUTME: Reads passwords for gymlog-cli without exposing them on the command line
// ABOUTME: Takes the secret from an environment variable or one line of standard input
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use gymlog_client::errors::{AppError, AppResult};
use std::env;
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};

/// Current account password
pub const PASSWORD_ENV: &str = "GYMLOG_PASSWORD";
/// Replacement password for `profile --change-password`
pub const NEW_PASSWORD_ENV: &str = "GYMLOG_NEW_PASSWORD";

/// Read a secret from `env_var`, falling back to one line of standard input
///
/// # Errors
///
/// Returns a validation error when standard input cannot be read or the
/// secret is empty
pub async fn read_secret(env_var: &str, prompt: &str) -> AppResult<String> {
    if let Some(secret) = env::var(env_var).ok().filter(|value| !value.is_empty()) {
        return Ok(secret);
    }

    let mut stderr = io::stderr();
    let _ = stderr.write_all(format!("{prompt}: ").as_bytes()).await;
    let _ = stderr.flush().await;

    let mut line = String::new();
    BufReader::new(io::stdin())
        .read_line(&mut line)
        .await
        .map_err(|e| AppError::invalid_input(format!("Cannot read {prompt}")).with_source(e))?;

    let secret = line.trim_end_matches(['\r', '\n']).to_owned();
    if secret.is_empty() {
        return Err(AppError::invalid_input(format!(
            "{prompt} is required (set {env_var} or type it on standard input)"
        )));
    }
    Ok(secret)
}

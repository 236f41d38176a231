// ABOUTME: Environment configuration management for the Gymlog client
// ABOUTME: Handles environment variables, defaults, and validation of runtime configuration
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Environment-based configuration management

use anyhow::{bail, Context, Result};
use gymlog_core::constants::{defaults, endpoints};
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;
use url::Url;

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the fitness API
    pub api_url: Url,
    /// Per-request timeout; expiry is a network error, never an authorization failure
    pub request_timeout: Duration,
    /// Connection timeout
    pub connect_timeout: Duration,
    /// Directory holding the persisted session
    pub storage_dir: PathBuf,
    /// Extra renewal attempts after a network failure during refresh
    pub refresh_retry_attempts: u32,
    /// Delay between renewal attempts
    pub refresh_retry_backoff: Duration,
    /// Buffered session events per subscriber
    pub event_capacity: usize,
}

impl Default for ClientConfig {
    #[allow(clippy::expect_used)] // Safe: compile-time constant URL
    fn default() -> Self {
        Self {
            api_url: Url::parse(defaults::API_URL).expect("default API URL is valid"),
            request_timeout: Duration::from_secs(defaults::REQUEST_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(defaults::CONNECT_TIMEOUT_SECS),
            storage_dir: default_storage_dir(),
            refresh_retry_attempts: defaults::REFRESH_RETRY_ATTEMPTS,
            refresh_retry_backoff: Duration::from_millis(defaults::REFRESH_RETRY_BACKOFF_MS),
            event_capacity: defaults::SESSION_EVENT_CAPACITY,
        }
    }
}

impl ClientConfig {
    /// Configuration pointing at the given API, other values defaulted
    ///
    /// # Errors
    ///
    /// Returns an error if `api_url` is not an absolute URL
    pub fn for_api(api_url: &str) -> Result<Self> {
        Ok(Self {
            api_url: parse_api_url(api_url)?,
            ..Self::default()
        })
    }

    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to an unparsable value or the
    /// resulting configuration is invalid
    pub fn from_env() -> Result<Self> {
        info!("Loading client configuration from environment variables");

        let config = Self {
            api_url: parse_api_url(&env_var_or("GYMLOG_API_URL", defaults::API_URL))?,
            request_timeout: Duration::from_secs(
                env_var_or(
                    "GYMLOG_REQUEST_TIMEOUT_SECS",
                    &defaults::REQUEST_TIMEOUT_SECS.to_string(),
                )
                .parse()
                .context("GYMLOG_REQUEST_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
            connect_timeout: Duration::from_secs(
                env_var_or(
                    "GYMLOG_CONNECT_TIMEOUT_SECS",
                    &defaults::CONNECT_TIMEOUT_SECS.to_string(),
                )
                .parse()
                .context("GYMLOG_CONNECT_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
            storage_dir: env::var("GYMLOG_STORAGE_DIR")
                .map_or_else(|_| default_storage_dir(), PathBuf::from),
            refresh_retry_attempts: env_var_or(
                "GYMLOG_REFRESH_RETRY_ATTEMPTS",
                &defaults::REFRESH_RETRY_ATTEMPTS.to_string(),
            )
            .parse()
            .context("GYMLOG_REFRESH_RETRY_ATTEMPTS must be a non-negative number")?,
            refresh_retry_backoff: Duration::from_millis(defaults::REFRESH_RETRY_BACKOFF_MS),
            event_capacity: env_var_or(
                "GYMLOG_EVENT_CAPACITY",
                &defaults::SESSION_EVENT_CAPACITY.to_string(),
            )
            .parse()
            .context("GYMLOG_EVENT_CAPACITY must be a positive number")?,
        };

        config.validate()?;
        info!(
            api_url = %config.api_url,
            storage_dir = %config.storage_dir.display(),
            "Client configuration loaded"
        );
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid value
    pub fn validate(&self) -> Result<()> {
        if self.request_timeout.is_zero() {
            bail!("Request timeout must be greater than 0");
        }
        if self.connect_timeout.is_zero() {
            bail!("Connect timeout must be greater than 0");
        }
        if self.event_capacity == 0 {
            bail!("Session event capacity must be greater than 0");
        }
        Ok(())
    }

    /// Absolute URL of an API path
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be joined onto the API URL
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        let base = self.api_url.as_str().trim_end_matches('/');
        Url::parse(&format!("{base}{path}")).with_context(|| format!("Invalid endpoint path {path}"))
    }

    /// Public URL of an avatar image
    #[must_use]
    pub fn avatar_url(&self, avatar: &str) -> String {
        format!(
            "{}{}/{}",
            self.api_url.as_str().trim_end_matches('/'),
            endpoints::AVATAR,
            urlencoding::encode(avatar)
        )
    }
}

/// Platform data directory for the session file
fn default_storage_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(env::temp_dir)
        .join(defaults::STORAGE_DIR_NAME)
}

fn parse_api_url(value: &str) -> Result<Url> {
    let url = Url::parse(value).with_context(|| format!("Invalid API URL: {value}"))?;
    if url.cannot_be_a_base() {
        bail!("API URL must be absolute: {value}");
    }
    Ok(url)
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

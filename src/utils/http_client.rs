// ABOUTME: Shared HTTP client construction with connection pooling and timeout configuration
// ABOUTME: Builds the reqwest clients used for session and data requests

use reqwest::{Client, ClientBuilder};
use std::time::Duration;

use crate::config::environment::ClientConfig;
use crate::errors::{AppError, AppResult};

/// User agent sent with every request
pub const USER_AGENT: &str = concat!("gymlog-client/", env!("CARGO_PKG_VERSION"));

/// Create a new HTTP client with custom timeout settings
///
/// # Errors
///
/// Returns an error if the TLS backend cannot be initialized
pub fn create_client_with_timeout(timeout: Duration, connect_timeout: Duration) -> AppResult<Client> {
    create_custom_client(|builder| builder.timeout(timeout).connect_timeout(connect_timeout))
}

/// Create a new HTTP client with custom configuration
///
/// # Errors
///
/// Returns an error if the configured client cannot be built
pub fn create_custom_client<F>(config_fn: F) -> AppResult<Client>
where
    F: FnOnce(ClientBuilder) -> ClientBuilder,
{
    config_fn(ClientBuilder::new().user_agent(USER_AGENT))
        .build()
        .map_err(|e| AppError::internal(format!("Failed to build HTTP client: {e}")).with_source(e))
}

/// Create the client shared by session and data requests
///
/// Only the connect timeout is set on the client; the request timeout is
/// applied per request so replays get a fresh budget.
///
/// # Errors
///
/// Returns an error if the client cannot be built
pub fn api_client(config: &ClientConfig) -> AppResult<Client> {
    create_custom_client(|builder| builder.connect_timeout(config.connect_timeout))
}

// ABOUTME: Configuration management module for the Gymlog client
// ABOUTME: Environment-only configuration of the API endpoint, timeouts, and session storage
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module
//!
//! - **Environment**: client configuration from environment variables

/// Environment-based client configuration
pub mod environment;

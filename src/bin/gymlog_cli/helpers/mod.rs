// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Re-exports helper modules for gymlog-cli
// ABOUTME: Provides display formatting and secret input utilities

pub mod display;
pub mod secret;

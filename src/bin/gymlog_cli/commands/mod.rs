// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Re-exports command modules for gymlog-cli
// ABOUTME: Provides access to session, workout, and profile commands

pub mod profile;
pub mod session;
pub mod workout;

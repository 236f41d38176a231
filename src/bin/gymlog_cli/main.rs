// ABOUTME: Gymlog CLI - command-line front end of the Gymlog session client
// ABOUTME: Signs in, keeps the session on disk, and calls the fitness API with transparent renewal
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Sign in; the password is read from GYMLOG_PASSWORD or standard input
//! gymlog-cli login --email ana@example.com
//!
//! # Create an account and sign in with it
//! GYMLOG_PASSWORD=secret gymlog-cli signup --name "Ana Souza" --email ana@example.com
//!
//! # Browse the catalogue
//! gymlog-cli groups
//! gymlog-cli exercises costas
//! gymlog-cli exercise 12
//!
//! # Record a completed exercise and show the history
//! gymlog-cli done 12
//! gymlog-cli history
//!
//! # Profile
//! gymlog-cli whoami
//! gymlog-cli profile --name "Ana S."
//! GYMLOG_PASSWORD=secret GYMLOG_NEW_PASSWORD=new-secret gymlog-cli profile --name "Ana S." --change-password
//! gymlog-cli avatar ./me.png
//!
//! # Sign out
//! gymlog-cli logout
//! ```

mod commands;
mod helpers;

use clap::{Parser, Subcommand};
use gymlog_client::{
    config::environment::ClientConfig, context::ClientContext, logging::LoggingConfig,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

#[derive(Parser)]
#[command(
    name = "gymlog-cli",
    about = "Gymlog fitness client",
    long_about = "Command-line client for the Gymlog fitness API. The session survives between invocations and expired access tokens are renewed transparently."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Sign in with email and password
    Login {
        /// Account email
        #[arg(long)]
        email: String,
    },

    /// Sign out and forget the stored session
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Create an account and sign in with it
    Signup {
        /// Display name
        #[arg(long)]
        name: String,

        /// Account email
        #[arg(long)]
        email: String,
    },

    /// List muscle groups
    Groups,

    /// List the exercises of a muscle group
    Exercises {
        /// Muscle group, as listed by `groups`
        group: String,
    },

    /// Show one exercise
    Exercise {
        /// Exercise ID
        id: String,
    },

    /// Show the workout history
    History,

    /// Mark an exercise as done
    Done {
        /// Exercise ID
        id: String,
    },

    /// Update the profile
    Profile {
        /// New display name
        #[arg(long)]
        name: String,

        /// Also change the password (current one from GYMLOG_PASSWORD, new one
        /// from GYMLOG_NEW_PASSWORD, or both from standard input)
        #[arg(long)]
        change_password: bool,
    },

    /// Upload a new avatar image
    Avatar {
        /// Image file (png or jpg)
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    LoggingConfig::from_env().verbose(cli.verbose).init()?;

    let config = ClientConfig::from_env()?;
    debug!(api_url = %config.api_url, "loaded configuration");
    let context = ClientContext::from_config(config)?;

    match run(&context, cli.command).await {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(error) => {
            helpers::display::display_error(&error);
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn run(context: &ClientContext, command: Command) -> gymlog_client::errors::AppResult<()> {
    // Commands other than login and signup need the stored session
    let restored = context.session().restore().await;

    match command {
        Command::Login { email } => commands::session::login(context, &email).await,
        Command::Logout => commands::session::logout(context).await,
        Command::Whoami => {
            restored?;
            commands::session::whoami(context).await
        }
        Command::Signup { name, email } => commands::profile::signup(context, name, email).await,
        Command::Groups => {
            restored?;
            commands::workout::groups(context).await
        }
        Command::Exercises { group } => {
            restored?;
            commands::workout::exercises(context, &group).await
        }
        Command::Exercise { id } => {
            restored?;
            commands::workout::exercise(context, &id).await
        }
        Command::History => {
            restored?;
            commands::workout::history(context).await
        }
        Command::Done { id } => {
            restored?;
            commands::workout::done(context, &id).await
        }
        Command::Profile {
            name,
            change_password,
        } => {
            restored?;
            commands::profile::update(context, name, change_password).await
        }
        Command::Avatar { file } => {
            restored?;
            commands::profile::avatar(context, &file).await
        }
    }
}

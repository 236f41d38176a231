// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Output formatting helpers for gymlog-cli
// ABOUTME: Provides consistent display functions for users, exercises, history, and errors

use gymlog_client::{
    constants::messages,
    errors::AppError,
    models::{Exercise, HistoryByDay, User},
};

/// Display the signed-in user
pub fn display_user(user: &User, avatar_url: Option<&str>) {
    println!("{}", "=".repeat(50));
    println!("   Name: {}", user.name);
    println!("   Email: {}", user.email);
    println!("   ID: {}", user.id);
    println!("   Avatar: {}", avatar_url.unwrap_or("none"));
    println!("{}", "=".repeat(50));
}

/// One-line summary of an exercise
pub fn display_exercise_row(exercise: &Exercise) {
    println!(
        "  [{}] {} - {} series x {} repetitions",
        exercise.id, exercise.name, exercise.series, exercise.repetitions
    );
}

/// Full exercise details
pub fn display_exercise(exercise: &Exercise) {
    println!("\n{}", exercise.name);
    println!("{}", "=".repeat(50));
    println!("   Group: {}", exercise.group);
    println!("   Series: {}", exercise.series);
    println!("   Repetitions: {}", exercise.repetitions);
    println!("   Demo: {}", exercise.demo);
    println!("   Thumbnail: {}", exercise.thumb);
}

/// Workout history grouped by day
pub fn display_history(days: &[HistoryByDay]) {
    if days.is_empty() {
        println!("No exercises logged yet. Let's train today!");
        return;
    }

    for day in days {
        println!("\n{}", day.title);
        println!("{}", "-".repeat(50));
        for entry in &day.data {
            println!("   {}  {} ({})", entry.hour, entry.name, entry.group);
        }
    }
}

/// Render a failure the way the app does: message verbatim, or a prompt to sign in again
pub fn display_error(error: &AppError) {
    if error.requires_sign_in() {
        eprintln!("{}", messages::SESSION_EXPIRED);
        eprintln!("Run `gymlog-cli login` to sign in again.");
        return;
    }
    eprintln!("Error: {}", error.user_message(messages::GENERIC_FAILURE));
}

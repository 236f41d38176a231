// ABOUTME: Workout commands for gymlog-cli
// ABOUTME: Browses the exercise catalogue and records completed exercises

use gymlog_client::{context::ClientContext, errors::AppResult};

use crate::helpers::display::{display_exercise, display_exercise_row, display_history};

/// List muscle groups
pub async fn groups(context: &ClientContext) -> AppResult<()> {
    let groups = context.client().groups().await?;
    if groups.is_empty() {
        println!("No muscle groups available");
    }
    for group in groups {
        println!("{group}");
    }
    Ok(())
}

/// List the exercises of one group
pub async fn exercises(context: &ClientContext, group: &str) -> AppResult<()> {
    let exercises = context.client().exercises_by_group(group).await?;
    println!("{} exercises in {group}", exercises.len());
    for exercise in &exercises {
        display_exercise_row(exercise);
    }
    Ok(())
}

/// Show one exercise
pub async fn exercise(context: &ClientContext, id: &str) -> AppResult<()> {
    let exercise = context.client().exercise(id).await?;
    display_exercise(&exercise);
    Ok(())
}

/// Show the workout history
pub async fn history(context: &ClientContext) -> AppResult<()> {
    let days = context.client().history().await?;
    display_history(&days);
    Ok(())
}

/// Record a completed exercise
pub async fn done(context: &ClientContext, id: &str) -> AppResult<()> {
    context.client().log_history(id).await?;
    println!("Exercise {id} added to your history");
    Ok(())
}

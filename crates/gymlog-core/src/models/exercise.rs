// ABOUTME: Exercise catalogue and workout history models
// ABOUTME: Shapes of the /groups, /exercises and /history payloads

use serde::{Deserialize, Serialize};

/// An exercise of the catalogue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    /// Service-assigned identifier
    #[serde(deserialize_with = "super::id::deserialize")]
    pub id: String,
    /// Exercise name
    pub name: String,
    /// Number of series
    pub series: u32,
    /// Repetitions per series
    pub repetitions: u32,
    /// Muscle group
    pub group: String,
    /// Demonstration animation file
    pub demo: String,
    /// Thumbnail image file
    pub thumb: String,
}

/// One completed exercise in the history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// History record identifier
    #[serde(deserialize_with = "super::id::deserialize")]
    pub id: String,
    /// Exercise name
    pub name: String,
    /// Muscle group
    pub group: String,
    /// Time of day the exercise was logged, formatted by the service
    pub hour: String,
    /// Creation timestamp as sent by the service
    pub created_at: String,
}

/// History entries of a single day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryByDay {
    /// Day label
    pub title: String,
    /// Entries of that day
    pub data: Vec<HistoryEntry>,
}

/// Body of `POST /history`
#[derive(Debug, Clone, Serialize)]
pub struct LogHistoryRequest<'a> {
    /// Exercise that was completed
    pub exercise_id: &'a str,
}

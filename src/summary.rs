//! End-of-workout summary.

use crate::core::{format_weight, SetRecord};
use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

/// Completed sets of a finished workout, as shown on the summary sheet.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorkoutSummary {
    pub exercise: String,
    pub finished_at: DateTime<Utc>,
    /// Only sets whose completion flag was set.
    pub sets: Vec<SetRecord>,
}

impl WorkoutSummary {
    /// Build a summary, keeping only completed sets.
    pub fn new(
        exercise: impl Into<String>,
        sets: impl IntoIterator<Item = SetRecord>,
        finished_at: DateTime<Utc>,
    ) -> Self {
        Self {
            exercise: exercise.into(),
            finished_at,
            sets: sets.into_iter().filter(|set| set.completed).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// e.g. `Today Wednesday 15 October`, in local time.
    pub fn date_line(&self) -> String {
        format!(
            "Today {}",
            self.finished_at.with_timezone(&Local).format("%A %d %B")
        )
    }

    /// One line per completed set: `1  45kg x 10`. A set missing either
    /// value shows only its number.
    pub fn set_lines(&self) -> Vec<String> {
        self.sets
            .iter()
            .enumerate()
            .map(|(i, set)| match (set.weight, set.reps) {
                (Some(weight), Some(reps)) => {
                    format!("{}  {}kg x {}", i + 1, format_weight(weight), reps)
                }
                _ => (i + 1).to_string(),
            })
            .collect()
    }

    /// Sum of weight × reps over sets with both values.
    pub fn total_volume(&self) -> f32 {
        self.sets
            .iter()
            .filter_map(|set| Some(set.weight? * set.reps? as f32))
            .sum()
    }

    /// Plain-text rendering of the whole summary sheet.
    pub fn render(&self) -> String {
        let mut lines = vec![self.date_line(), self.exercise.clone()];
        if self.is_empty() {
            lines.push("No sets completed".to_string());
        } else {
            lines.extend(self.set_lines());
        }
        lines.join("\n")
    }
}

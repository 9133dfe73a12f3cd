//! Working set records.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Weight pre-filled as "previous" on a first run.
pub const DEFAULT_WEIGHT: f32 = 15.0;

/// Reps pre-filled as "previous" on a first run.
pub const DEFAULT_REPS: u32 = 10;

/// One working set: what was entered this round, what was done last round,
/// and whether the set has been completed.
///
/// Weight and reps are filled independently. `completed` is only ever set by
/// the effect engine when the set's rest period begins.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SetRecord {
    pub id: Uuid,
    pub weight: Option<f32>,
    pub reps: Option<u32>,
    pub completed: bool,
    pub previous_weight: f32,
    pub previous_reps: u32,
}

impl SetRecord {
    /// Create an empty set whose "previous" values are the given defaults.
    pub fn new(previous_weight: f32, previous_reps: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            weight: None,
            reps: None,
            completed: false,
            previous_weight,
            previous_reps,
        }
    }

    /// Entered weight formatted for display and keypad seeding.
    pub fn display_weight(&self) -> Option<String> {
        self.weight.map(format_weight)
    }

    /// Entered reps formatted for display and keypad seeding.
    pub fn display_reps(&self) -> Option<String> {
        self.reps.map(|reps| reps.to_string())
    }

    /// The "previous" column, e.g. `15 x 10`.
    pub fn previous_workout(&self) -> String {
        format!(
            "{} x {}",
            format_weight(self.previous_weight),
            self.previous_reps
        )
    }

    /// Start a new round in place.
    ///
    /// Entered values become the new "previous" values; a field left empty
    /// this round falls back to the given defaults. The id is preserved.
    pub fn reseed(&mut self, default_weight: f32, default_reps: u32) {
        self.previous_weight = self.weight.take().unwrap_or(default_weight);
        self.previous_reps = self.reps.take().unwrap_or(default_reps);
        self.completed = false;
    }
}

impl Default for SetRecord {
    fn default() -> Self {
        Self::new(DEFAULT_WEIGHT, DEFAULT_REPS)
    }
}

/// Shortest decimal form: `135.0` renders as `135`, `12.5` as `12.5`.
pub fn format_weight(weight: f32) -> String {
    weight.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_set_is_empty() {
        let set = SetRecord::default();
        assert_eq!(set.weight, None);
        assert_eq!(set.reps, None);
        assert!(!set.completed);
        assert_eq!(set.previous_weight, DEFAULT_WEIGHT);
        assert_eq!(set.previous_reps, DEFAULT_REPS);
    }

    #[test]
    fn ids_are_unique() {
        assert_ne!(SetRecord::default().id, SetRecord::default().id);
    }

    #[test]
    fn display_helpers_format_values() {
        let mut set = SetRecord::default();
        assert_eq!(set.display_weight(), None);
        assert_eq!(set.display_reps(), None);

        set.weight = Some(135.0);
        set.reps = Some(8);
        assert_eq!(set.display_weight().as_deref(), Some("135"));
        assert_eq!(set.display_reps().as_deref(), Some("8"));

        set.weight = Some(12.5);
        assert_eq!(set.display_weight().as_deref(), Some("12.5"));
    }

    #[test]
    fn previous_workout_uses_defaults() {
        assert_eq!(SetRecord::default().previous_workout(), "15 x 10");
    }

    #[test]
    fn reseed_carries_entered_values_forward() {
        let mut set = SetRecord::default();
        let id = set.id;
        set.weight = Some(40.0);
        set.reps = Some(6);
        set.completed = true;

        set.reseed(DEFAULT_WEIGHT, DEFAULT_REPS);

        assert_eq!(set.id, id);
        assert_eq!(set.previous_weight, 40.0);
        assert_eq!(set.previous_reps, 6);
        assert_eq!(set.weight, None);
        assert_eq!(set.reps, None);
        assert!(!set.completed);
    }

    #[test]
    fn reseed_falls_back_to_defaults_when_nothing_entered() {
        let mut set = SetRecord::new(22.5, 12);
        set.reps = Some(9);

        set.reseed(DEFAULT_WEIGHT, DEFAULT_REPS);

        assert_eq!(set.previous_weight, DEFAULT_WEIGHT);
        assert_eq!(set.previous_reps, 9);
        assert_eq!(set.previous_workout(), "15 x 9");
    }
}

//! Workout phases and the transition table.
//!
//! The table is a pure function from `(phase, intent)` to the next phase.
//! Anything it does not list is illegal and yields `None`.

use super::set::SetRecord;
use super::state::State;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Field of a set that the keypad edits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputField {
    Weight,
    Reps,
}

impl fmt::Display for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Weight => f.write_str("weight"),
            Self::Reps => f.write_str("reps"),
        }
    }
}

/// The workout's current discrete state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Phase {
    NotStarted,
    Active { set: usize },
    Keypad { set: usize, field: InputField },
    RestSelection { set: usize },
    Resting { set: usize, duration: Duration },
    Completed { sets: Vec<SetRecord> },
}

/// A caller-issued request to change phase.
#[derive(Clone, Debug, PartialEq)]
pub enum Intent {
    StartWorkout,
    FinishWorkout(Vec<SetRecord>),
    ToggleTimer,
    SubmitInput,
    CancelRestSelection,
    SelectRest(Duration),
    FinishRest,
    ResetWorkout,
}

impl Intent {
    /// Stable label used in logs and the transition history.
    pub fn name(&self) -> &'static str {
        match self {
            Self::StartWorkout => "Start Workout",
            Self::FinishWorkout(_) => "Finish Workout",
            Self::ToggleTimer => "Toggle Timer",
            Self::SubmitInput => "Next Button",
            Self::CancelRestSelection => "Cancel from Rest Selection",
            Self::SelectRest(_) => "Select Rest",
            Self::FinishRest => "Finish Rest",
            Self::ResetWorkout => "Reset Workout",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SelectRest(duration) => write!(f, "Select Rest ({}s)", duration.as_secs()),
            other => f.write_str(other.name()),
        }
    }
}

impl Phase {
    /// Compute the phase that `intent` leads to, or `None` when the intent is
    /// not legal here.
    ///
    /// `Resting { set }` + `FinishRest` always yields `Active { set: set + 1 }`,
    /// even past the last set. That out-of-range `Active` is how the effect
    /// engine learns the workout is over.
    ///
    /// # Example
    ///
    /// ```rust
    /// use setflow::core::{InputField, Intent, Phase};
    ///
    /// let phase = Phase::NotStarted.progress(&Intent::StartWorkout);
    /// assert_eq!(phase, Some(Phase::Active { set: 0 }));
    ///
    /// let keypad = Phase::Active { set: 0 }.progress(&Intent::ToggleTimer);
    /// assert_eq!(keypad, Some(Phase::Keypad { set: 0, field: InputField::Weight }));
    ///
    /// assert_eq!(Phase::NotStarted.progress(&Intent::FinishRest), None);
    /// ```
    pub fn progress(&self, intent: &Intent) -> Option<Phase> {
        match (self, intent) {
            (Self::NotStarted, Intent::StartWorkout) => Some(Self::Active { set: 0 }),

            (Self::Active { set }, Intent::ToggleTimer) => Some(Self::Keypad {
                set: *set,
                field: InputField::Weight,
            }),
            (Self::Active { .. }, Intent::FinishWorkout(sets)) => {
                Some(Self::Completed { sets: sets.clone() })
            }

            (Self::Keypad { set, .. }, Intent::ToggleTimer) => Some(Self::Active { set: *set }),
            (Self::Keypad { set, field }, Intent::SubmitInput) => Some(match field {
                InputField::Weight => Self::Keypad {
                    set: *set,
                    field: InputField::Reps,
                },
                InputField::Reps => Self::RestSelection { set: *set },
            }),

            (Self::RestSelection { set }, Intent::CancelRestSelection) => Some(Self::Keypad {
                set: *set,
                field: InputField::Weight,
            }),
            (Self::RestSelection { set }, Intent::SelectRest(duration)) => Some(Self::Resting {
                set: *set,
                duration: *duration,
            }),

            (Self::Resting { set, .. }, Intent::FinishRest) => {
                Some(Self::Active { set: set + 1 })
            }

            (Self::Completed { .. }, Intent::ResetWorkout) => Some(Self::NotStarted),

            _ => None,
        }
    }
}

/// Free-function form of [`Phase::progress`].
pub fn transition(phase: &Phase, intent: &Intent) -> Option<Phase> {
    phase.progress(intent)
}

impl State for Phase {
    fn name(&self) -> &str {
        match self {
            Self::NotStarted => "NotStarted",
            Self::Active { .. } => "Active",
            Self::Keypad { .. } => "Keypad",
            Self::RestSelection { .. } => "RestSelection",
            Self::Resting { .. } => "Resting",
            Self::Completed { .. } => "Completed",
        }
    }

    fn is_final(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotStarted => f.write_str("Not Started"),
            Self::Active { set } => write!(f, "Active (Set {})", set + 1),
            Self::Keypad { set, field } => write!(f, "Keypad (Set {}, {field})", set + 1),
            Self::RestSelection { set } => write!(f, "Rest Selection (Set {})", set + 1),
            Self::Resting { set, duration } => write!(
                f,
                "Resting (Set {}, duration {}s)",
                set + 1,
                duration.as_secs()
            ),
            Self::Completed { .. } => f.write_str("Completed"),
        }
    }
}

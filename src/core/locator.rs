//! Which set is active and which of its fields has focus.

use super::phase::{InputField, Phase};
use serde::{Deserialize, Serialize};

/// Pointer into the set collection, derived from the phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentSet {
    pub index: Option<usize>,
    pub field: Option<InputField>,
}

impl CurrentSet {
    /// True when `index` is the active set.
    pub fn is_active(&self, index: usize) -> bool {
        self.index == Some(index)
    }

    /// True when `field` of set `index` has keypad focus.
    pub fn is_focused(&self, index: usize, field: InputField) -> bool {
        self.is_active(index) && self.field == Some(field)
    }
}

/// Derive the current set from a phase. Total and pure.
pub fn locate(phase: &Phase) -> CurrentSet {
    match phase {
        Phase::Active { set } | Phase::RestSelection { set } | Phase::Resting { set, .. } => {
            CurrentSet {
                index: Some(*set),
                field: None,
            }
        }
        Phase::Keypad { set, field } => CurrentSet {
            index: Some(*set),
            field: Some(*field),
        },
        Phase::NotStarted | Phase::Completed { .. } => CurrentSet::default(),
    }
}

impl Phase {
    /// Shorthand for [`locate`].
    pub fn current_set(&self) -> CurrentSet {
        locate(self)
    }
}

//! Phase machine: the current phase plus the history of how it got there.

use crate::core::{Intent, Phase, State, StateHistory, StateTransition};
use crate::effects::transition::TransitionError;
use chrono::Utc;

/// Holds the committed phase. The only way to change it is [`apply`],
/// which consults the transition table.
///
/// [`apply`]: PhaseMachine::apply
#[derive(Clone, Debug)]
pub struct PhaseMachine {
    current: Phase,
    history: StateHistory<Phase>,
}

impl PhaseMachine {
    /// Create a machine in `initial` keeping at most `history_limit` records.
    pub fn new(initial: Phase, history_limit: usize) -> Self {
        Self {
            current: initial,
            history: StateHistory::with_limit(history_limit),
        }
    }

    /// Get current phase (pure)
    pub fn current_state(&self) -> &Phase {
        &self.current
    }

    /// Check if machine is in a final phase (pure)
    pub fn is_final(&self) -> bool {
        self.current.is_final()
    }

    /// Get transition history (pure)
    pub fn history(&self) -> &StateHistory<Phase> {
        &self.history
    }

    /// Commit the phase `intent` leads to and record it.
    ///
    /// On rejection the phase and history are left exactly as they were.
    pub fn apply(&mut self, intent: &Intent) -> Result<&Phase, TransitionError> {
        let next = self
            .current
            .progress(intent)
            .ok_or_else(|| TransitionError::NoTransition {
                from: self.current.to_string(),
                intent: intent.to_string(),
            })?;

        let from = std::mem::replace(&mut self.current, next);
        self.history.record(StateTransition {
            from,
            to: self.current.clone(),
            intent: intent.name().to_string(),
            timestamp: Utc::now(),
        });
        Ok(&self.current)
    }
}

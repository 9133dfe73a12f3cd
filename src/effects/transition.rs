//! Transition errors.

use thiserror::Error;

/// Errors that can occur during transitions.
///
/// These never reach presentation callers: the engine logs them and leaves
/// the phase untouched.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("No transition from '{from}' for intent '{intent}'")]
    NoTransition { from: String, intent: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_transition_names_phase_and_intent() {
        let err = TransitionError::NoTransition {
            from: "Not Started".into(),
            intent: "Finish Rest".into(),
        };
        assert_eq!(
            err.to_string(),
            "No transition from 'Not Started' for intent 'Finish Rest'"
        );
    }
}

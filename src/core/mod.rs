//! Core workout types and logic.
//!
//! This module contains the pure part of the workout machine:
//! - Set records and their display helpers
//! - Phases, intents and the transition table
//! - The current-set locator
//! - Keypad buffer editing
//! - Transition history
//!
//! Nothing here touches a clock or spawns work; that lives in `effects`.

mod history;
mod keypad;
mod locator;
mod phase;
mod set;
mod state;

pub use history::{StateHistory, StateTransition, DEFAULT_HISTORY_LIMIT};
pub use keypad::{KeypadBuffer, KeypadError};
pub use locator::{locate, CurrentSet};
pub use phase::{transition, InputField, Intent, Phase};
pub use set::{format_weight, SetRecord, DEFAULT_REPS, DEFAULT_WEIGHT};
pub use state::State;

//! Effectful side of the workout machine.
//!
//! This module wraps the pure core with the parts that react to phase
//! changes:
//!
//! - **Machine**: commits phases through the transition table and records history
//! - **Timer slot**: which periodic timer should run, with stale-tick detection
//! - **Engine**: per-phase effects, keypad write-back, and tick handling
//!
//! Everything here is still synchronous. Time enters only as an `Instant`
//! argument, and periodic ticks are delivered by the caller.

mod engine;
mod machine;
mod timer;
mod transition;

pub use engine::{WorkoutEngine, WorkoutSnapshot};
pub use machine::PhaseMachine;
pub use timer::{format_clock, TimerKind, TimerSlot};
pub use transition::TransitionError;

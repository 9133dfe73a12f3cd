//! Setflow: a guided single-exercise workout state machine
//!
//! Setflow follows a "pure core, imperative shell" layout. The core
//! decides which phase an intent leads to; the effects layer reacts to each
//! committed phase by starting or stopping timers, seeding the keypad and
//! marking sets complete; the store runs that engine on tokio and publishes
//! snapshots for a presentation layer.
//!
//! # Core Concepts
//!
//! - **Phase**: where the workout is (`NotStarted`, `Active`, `Keypad`, ...)
//! - **Intent**: a request to move to another phase
//! - **Effect**: what happens on entering a phase
//! - **Current set**: which set and field the phase points at
//!
//! # Example
//!
//! ```rust
//! use setflow::{InputField, Intent, Phase, WorkoutConfig, WorkoutEngine};
//! use tokio::time::Instant;
//!
//! let mut engine = WorkoutEngine::new(&WorkoutConfig::default());
//! let now = Instant::now();
//!
//! engine.send(Intent::StartWorkout, now);
//! engine.send(Intent::ToggleTimer, now);
//! for key in "135".chars() {
//!     engine.keypad_input(key);
//! }
//!
//! assert_eq!(engine.phase(), &Phase::Keypad { set: 0, field: InputField::Weight });
//! assert_eq!(engine.sets()[0].weight, Some(135.0));
//!
//! // Illegal intents are ignored.
//! assert!(!engine.send(Intent::FinishRest, now));
//! ```

pub mod config;
pub mod core;
pub mod effects;
pub mod store;
pub mod summary;

// Re-export commonly used types
pub use config::{ConfigError, WorkoutConfig};
pub use core::{locate, CurrentSet, InputField, Intent, Phase, SetRecord, State};
pub use effects::{TimerKind, TransitionError, WorkoutEngine, WorkoutSnapshot};
pub use store::{StoreError, WorkoutStore};
pub use summary::WorkoutSummary;

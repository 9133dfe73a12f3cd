//! Core State trait for workout machine states.
//!
//! States are plain values describing where the machine currently is.
//! Inspecting them never has side effects.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait for state machine states.
///
/// All methods are pure. The history log and the tracing output both
/// rely on `name` to label states without formatting their payloads.
///
/// # Required Traits
///
/// - `Clone`: states are copied into the transition history
/// - `PartialEq`: the store compares phases to detect real changes
/// - `Debug`: states appear in diagnostics
/// - `Serialize` + `Deserialize`: states travel inside observable snapshots
///
/// # Example
///
/// ```rust
/// use setflow::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// enum Warmup {
///     Stretching,
///     Ramping { set: usize },
///     Ready,
/// }
///
/// impl State for Warmup {
///     fn name(&self) -> &str {
///         match self {
///             Self::Stretching => "Stretching",
///             Self::Ramping { .. } => "Ramping",
///             Self::Ready => "Ready",
///         }
///     }
///
///     fn is_final(&self) -> bool {
///         matches!(self, Self::Ready)
///     }
/// }
///
/// assert_eq!(Warmup::Ramping { set: 1 }.name(), "Ramping");
/// assert!(Warmup::Ready.is_final());
/// ```
pub trait State:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Payload-free label used in history entries and log lines.
    fn name(&self) -> &str;

    /// Whether a run ends here. Final states still accept the transitions
    /// the machine defines for them.
    fn is_final(&self) -> bool {
        false
    }
}

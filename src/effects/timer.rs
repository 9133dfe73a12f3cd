//! The effect engine's single timer slot.
//!
//! At most one periodic timer runs at a time: the elapsed-time stopwatch
//! during an active set, or the rest countdown. Every start or cancel bumps
//! the slot's generation, and ticks carrying an older generation are stale.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::Instant;

/// Which periodic timer is running.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerKind {
    Elapsed,
    Countdown,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Slot {
    Idle,
    Elapsed { resumed_at: Instant },
    Countdown,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimerSlot {
    slot: Slot,
    generation: u64,
}

impl Default for TimerSlot {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerSlot {
    pub fn new() -> Self {
        Self {
            slot: Slot::Idle,
            generation: 0,
        }
    }

    pub fn kind(&self) -> Option<TimerKind> {
        match self.slot {
            Slot::Idle => None,
            Slot::Elapsed { .. } => Some(TimerKind::Elapsed),
            Slot::Countdown => Some(TimerKind::Countdown),
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// True when a tick from `generation` belongs to the running timer.
    pub fn is_current(&self, generation: u64) -> bool {
        self.slot != Slot::Idle && self.generation == generation
    }

    /// Instant the running stopwatch was (re)started, if it is running.
    pub fn resumed_at(&self) -> Option<Instant> {
        match self.slot {
            Slot::Elapsed { resumed_at } => Some(resumed_at),
            _ => None,
        }
    }

    pub fn start_elapsed(&mut self, now: Instant) -> u64 {
        self.replace(Slot::Elapsed { resumed_at: now })
    }

    pub fn start_countdown(&mut self) -> u64 {
        self.replace(Slot::Countdown)
    }

    /// Stop whatever is running. Returns the kind that was stopped.
    pub fn cancel(&mut self) -> Option<TimerKind> {
        let stopped = self.kind();
        if stopped.is_some() {
            self.replace(Slot::Idle);
        }
        stopped
    }

    fn replace(&mut self, slot: Slot) -> u64 {
        self.slot = slot;
        self.generation = self.generation.wrapping_add(1);
        self.generation
    }
}

/// Format a duration as `M:SS`, truncating fractional seconds.
pub fn format_clock(elapsed: Duration) -> String {
    let total = elapsed.as_secs();
    format!("{}:{:02}", total / 60, total % 60)
}

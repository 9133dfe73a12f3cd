//! Effect engine and workout state container.
//!
//! `WorkoutEngine` owns everything the presentation layer observes. Intents
//! go through the transition table; each committed phase change runs exactly
//! one effect, and effects may dispatch further intents (rest expiry, the
//! past-the-last-set sentinel, the reset after completion). That recursion is
//! bounded: `Resting → Active(n) → Completed → NotStarted` is the deepest
//! chain.
//!
//! The engine never spawns anything. It records which timer should be
//! running in its [`TimerSlot`]; an async shell such as
//! [`WorkoutStore`](crate::store::WorkoutStore) drives it by calling
//! [`WorkoutEngine::tick`] with the slot's generation.

use crate::config::WorkoutConfig;
use crate::core::{
    locate, CurrentSet, InputField, Intent, KeypadBuffer, KeypadError, Phase, SetRecord,
    StateHistory,
};
use crate::effects::machine::PhaseMachine;
use crate::effects::timer::{format_clock, TimerKind, TimerSlot};
use crate::summary::WorkoutSummary;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info, trace, warn};

/// Everything the presentation layer can observe, captured at one instant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorkoutSnapshot {
    pub phase: Phase,
    pub current: CurrentSet,
    pub sets: Vec<SetRecord>,
    /// Stopwatch for the active set, `M:SS`.
    pub elapsed: String,
    pub rest_remaining: Duration,
    pub rest_total: Duration,
    pub keypad: Option<String>,
    pub summary: Option<WorkoutSummary>,
    pub summary_visible: bool,
    pub timer: Option<TimerKind>,
}

impl WorkoutSnapshot {
    /// Sets from the most recently finished workout.
    pub fn completed_sets(&self) -> &[SetRecord] {
        self.summary.as_ref().map(|s| s.sets.as_slice()).unwrap_or(&[])
    }

    /// Fraction of the rest period already elapsed, in `[0, 1]`.
    pub fn rest_progress(&self) -> f64 {
        if self.rest_total.is_zero() {
            return 0.0;
        }
        let done = self.rest_total.saturating_sub(self.rest_remaining);
        done.as_secs_f64() / self.rest_total.as_secs_f64()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[derive(Debug)]
pub struct WorkoutEngine {
    machine: PhaseMachine,
    sets: Vec<SetRecord>,
    keypad: KeypadBuffer,
    timer: TimerSlot,
    tick_interval: Duration,
    /// Stopwatch time banked before the current run of the elapsed timer.
    banked: Duration,
    elapsed_display: String,
    rest_remaining: Duration,
    rest_total: Duration,
    exercise: String,
    default_weight: f32,
    default_reps: u32,
    summary: Option<WorkoutSummary>,
    summary_visible: bool,
}

/// Shortest tick the countdown accepts; a zero step would never reach zero.
const MIN_TICK: Duration = Duration::from_millis(1);

impl WorkoutEngine {
    /// Create an engine with `config.set_count` empty sets.
    ///
    /// A zero `tick_interval_ms` is raised to one millisecond.
    pub fn new(config: &WorkoutConfig) -> Self {
        let sets = (0..config.set_count)
            .map(|_| SetRecord::new(config.default_weight, config.default_reps))
            .collect();

        Self {
            machine: PhaseMachine::new(Phase::NotStarted, config.history_limit),
            sets,
            keypad: KeypadBuffer::new(),
            timer: TimerSlot::new(),
            tick_interval: config.tick_interval().max(MIN_TICK),
            banked: Duration::ZERO,
            elapsed_display: format_clock(Duration::ZERO),
            rest_remaining: Duration::ZERO,
            rest_total: Duration::ZERO,
            exercise: config.exercise.clone(),
            default_weight: config.default_weight,
            default_reps: config.default_reps,
            summary: None,
            summary_visible: false,
        }
    }

    // ---- intents ----

    /// Dispatch `intent`. Returns whether a phase change was committed.
    ///
    /// Illegal intents are logged and ignored.
    pub fn send(&mut self, intent: Intent, now: Instant) -> bool {
        let from = self.machine.current_state().to_string();
        let phase = match self.machine.apply(&intent) {
            Ok(phase) => phase.clone(),
            Err(err) => {
                warn!(error = %err, "ignoring illegal transition");
                return false;
            }
        };

        info!(from = %from, to = %phase, intent = %intent, "phase changed");
        self.run_effect(phase, now);
        true
    }

    /// Explicitly finish with the current set collection.
    pub fn finish_workout(&mut self, now: Instant) -> bool {
        let sets = self.sets.clone();
        self.send(Intent::FinishWorkout(sets), now)
    }

    /// Type one keypad key into the focused field.
    pub fn keypad_input(&mut self, key: char) -> bool {
        match self.edit_keypad(|buffer, field| buffer.append(key, field)) {
            Ok(()) => true,
            Err(err) => {
                debug!(error = %err, key = %key, "keypad key ignored");
                false
            }
        }
    }

    /// Delete the last keypad character from the focused field.
    pub fn keypad_backspace(&mut self) -> bool {
        match self.edit_keypad(|buffer, _| {
            buffer.backspace();
            Ok(())
        }) {
            Ok(()) => true,
            Err(err) => {
                debug!(error = %err, "keypad backspace ignored");
                false
            }
        }
    }

    /// Hide the summary. The completed sets stay available.
    pub fn dismiss_summary(&mut self) {
        self.summary_visible = false;
    }

    /// Advance the running timer by one tick.
    ///
    /// Returns `false` for a stale `generation`, in which case nothing
    /// changes and the caller should stop ticking.
    pub fn tick(&mut self, generation: u64, now: Instant) -> bool {
        if !self.timer.is_current(generation) {
            trace!(generation, "stale tick dropped");
            return false;
        }

        match self.timer.kind() {
            Some(TimerKind::Elapsed) => {
                let elapsed = self.stopwatch(now);
                self.elapsed_display = format_clock(elapsed);
                trace!(elapsed = %self.elapsed_display, "elapsed tick");
            }
            Some(TimerKind::Countdown) => {
                self.rest_remaining = self.rest_remaining.saturating_sub(self.tick_interval);
                trace!(remaining_ms = self.rest_remaining.as_millis() as u64, "rest tick");
                if self.rest_remaining.is_zero() {
                    self.send(Intent::FinishRest, now);
                    if self.timer.is_current(generation) {
                        self.timer.cancel();
                    }
                }
            }
            None => return false,
        }
        true
    }

    // ---- effects ----

    fn run_effect(&mut self, phase: Phase, now: Instant) {
        match phase {
            Phase::NotStarted => self.reset_effects(),
            Phase::Active { set } => self.active_effects(set, now),
            Phase::Keypad { set, field } => self.keypad_effects(set, field, now),
            Phase::RestSelection { .. } => {}
            Phase::Resting { set, duration } => self.resting_effects(set, duration),
            Phase::Completed { sets } => self.completed_effects(sets, now),
        }
    }

    fn reset_effects(&mut self) {
        self.cancel_timer();
        for set in &mut self.sets {
            set.reseed(self.default_weight, self.default_reps);
        }
    }

    fn active_effects(&mut self, set: usize, now: Instant) {
        self.cancel_timer();
        self.reset_rest();

        if set >= self.sets.len() {
            debug!(set, "past the last set, finishing workout");
            self.finish_workout(now);
            return;
        }

        let generation = self.timer.start_elapsed(now);
        debug!(generation, banked_ms = self.banked.as_millis() as u64, "elapsed timer started");
    }

    fn keypad_effects(&mut self, set: usize, field: InputField, now: Instant) {
        if self.timer.resumed_at().is_some() {
            self.banked = self.stopwatch(now);
            self.elapsed_display = format_clock(self.banked);
        }
        self.cancel_timer();

        let seed = self.sets.get(set).and_then(|record| match field {
            InputField::Weight => record.display_weight(),
            InputField::Reps => record.display_reps(),
        });
        self.keypad.seed(seed);
    }

    fn resting_effects(&mut self, set: usize, duration: Duration) {
        if let Some(record) = self.sets.get_mut(set) {
            record.completed = true;
        }

        self.cancel_timer();
        self.reset_stopwatch();

        self.rest_total = duration;
        self.rest_remaining = duration;
        let generation = self.timer.start_countdown();
        debug!(generation, duration_ms = duration.as_millis() as u64, "rest countdown started");
    }

    fn completed_effects(&mut self, sets: Vec<SetRecord>, now: Instant) {
        self.cancel_timer();
        self.reset_stopwatch();
        self.reset_rest();

        let summary = WorkoutSummary::new(self.exercise.clone(), sets, Utc::now());
        info!(sets = summary.sets.len(), "workout completed");
        self.summary = Some(summary);
        self.summary_visible = true;

        self.send(Intent::ResetWorkout, now);
    }

    // ---- helpers ----

    fn edit_keypad(
        &mut self,
        edit: impl FnOnce(&mut KeypadBuffer, InputField) -> Result<(), KeypadError>,
    ) -> Result<(), KeypadError> {
        let current = locate(self.machine.current_state());
        let (Some(index), Some(field)) = (current.index, current.field) else {
            return Err(KeypadError::NotEditing);
        };

        edit(&mut self.keypad, field)?;

        if let Some(record) = self.sets.get_mut(index) {
            match field {
                InputField::Weight => record.weight = self.keypad.weight(),
                InputField::Reps => record.reps = self.keypad.reps(),
            }
        }
        Ok(())
    }

    fn stopwatch(&self, now: Instant) -> Duration {
        match self.timer.resumed_at() {
            Some(resumed_at) => self.banked + now.saturating_duration_since(resumed_at),
            None => self.banked,
        }
    }

    fn cancel_timer(&mut self) {
        if let Some(kind) = self.timer.cancel() {
            debug!(?kind, generation = self.timer.generation(), "timer cancelled");
        }
    }

    fn reset_stopwatch(&mut self) {
        self.banked = Duration::ZERO;
        self.elapsed_display = format_clock(Duration::ZERO);
    }

    fn reset_rest(&mut self) {
        self.rest_remaining = Duration::ZERO;
        self.rest_total = Duration::ZERO;
    }

    // ---- observation ----

    pub fn phase(&self) -> &Phase {
        self.machine.current_state()
    }

    pub fn current_set(&self) -> CurrentSet {
        locate(self.machine.current_state())
    }

    pub fn sets(&self) -> &[SetRecord] {
        &self.sets
    }

    pub fn elapsed_display(&self) -> &str {
        &self.elapsed_display
    }

    pub fn rest_remaining(&self) -> Duration {
        self.rest_remaining
    }

    pub fn rest_total(&self) -> Duration {
        self.rest_total
    }

    pub fn keypad_buffer(&self) -> Option<&str> {
        self.keypad.as_str()
    }

    pub fn summary(&self) -> Option<&WorkoutSummary> {
        self.summary.as_ref()
    }

    pub fn completed_sets(&self) -> &[SetRecord] {
        self.summary.as_ref().map(|s| s.sets.as_slice()).unwrap_or(&[])
    }

    pub fn summary_visible(&self) -> bool {
        self.summary_visible
    }

    pub fn history(&self) -> &StateHistory<Phase> {
        self.machine.history()
    }

    /// The timer that should be running and its generation.
    pub fn active_timer(&self) -> Option<(TimerKind, u64)> {
        self.timer
            .kind()
            .map(|kind| (kind, self.timer.generation()))
    }

    pub fn snapshot(&self) -> WorkoutSnapshot {
        WorkoutSnapshot {
            phase: self.phase().clone(),
            current: self.current_set(),
            sets: self.sets.clone(),
            elapsed: self.elapsed_display.clone(),
            rest_remaining: self.rest_remaining,
            rest_total: self.rest_total,
            keypad: self.keypad.as_str().map(str::to_owned),
            summary: self.summary.clone(),
            summary_visible: self.summary_visible,
            timer: self.timer.kind(),
        }
    }
}

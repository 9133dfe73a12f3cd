//! Async facade over the workout engine.
//!
//! `WorkoutStore` is what a presentation layer holds. Every intent and every
//! timer tick takes the same lock around the engine, so phase reads and writes
//! never interleave. After each call the store reconciles its single ticker
//! task with the engine's timer slot and publishes a fresh
//! [`WorkoutSnapshot`] on a `watch` channel.

use crate::config::{ConfigError, WorkoutConfig};
use crate::core::{Intent, Phase, StateHistory};
use crate::effects::{WorkoutEngine, WorkoutSnapshot};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;
use thiserror::Error;
use tokio::runtime::{Handle, TryCurrentError};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, warn};

/// Errors raised while constructing a store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("WorkoutStore must be created inside a tokio runtime: {0}")]
    NoRuntime(#[from] TryCurrentError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Observable workout state with intent-only write access.
///
/// Dropping the store cancels any running timer.
pub struct WorkoutStore {
    shared: Arc<Shared>,
}

struct Shared {
    inner: Mutex<Inner>,
    updates: watch::Sender<WorkoutSnapshot>,
    runtime: Handle,
    tick_interval: Duration,
}

struct Inner {
    engine: WorkoutEngine,
    ticker: Option<Ticker>,
}

struct Ticker {
    generation: u64,
    task: JoinHandle<()>,
}

impl Drop for Inner {
    fn drop(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.task.abort();
        }
    }
}

impl WorkoutStore {
    /// Create a store on the current tokio runtime.
    pub fn new(config: WorkoutConfig) -> Result<Self, StoreError> {
        config.validate()?;
        let runtime = Handle::try_current()?;

        let engine = WorkoutEngine::new(&config);
        let (updates, _) = watch::channel(engine.snapshot());

        Ok(Self {
            shared: Arc::new(Shared {
                inner: Mutex::new(Inner {
                    engine,
                    ticker: None,
                }),
                updates,
                runtime,
                tick_interval: config.tick_interval(),
            }),
        })
    }

    pub fn start_workout(&self) {
        self.send(Intent::StartWorkout);
    }

    /// Enter or leave the keypad for the active set.
    pub fn toggle_timer(&self) {
        self.send(Intent::ToggleTimer);
    }

    pub fn submit_input(&self) {
        self.send(Intent::SubmitInput);
    }

    pub fn cancel_rest_selection(&self) {
        self.send(Intent::CancelRestSelection);
    }

    /// Start resting for `duration`. A zero duration is ignored.
    pub fn select_rest(&self, duration: Duration) {
        if duration.is_zero() {
            warn!("ignoring zero rest duration");
            return;
        }
        self.send(Intent::SelectRest(duration));
    }

    /// Skip the remainder of the rest period.
    pub fn finish_rest(&self) {
        self.send(Intent::FinishRest);
    }

    pub fn reset_workout(&self) {
        self.send(Intent::ResetWorkout);
    }

    /// Finish now with whatever sets are completed.
    pub fn finish_workout(&self) {
        self.shared.update(|engine, now| {
            engine.finish_workout(now);
        });
    }

    /// Type `key` (`0`-`9` or `.`) into the focused field.
    pub fn keypad_input(&self, key: char) {
        self.shared.update(|engine, _| {
            engine.keypad_input(key);
        });
    }

    pub fn keypad_backspace(&self) {
        self.shared.update(|engine, _| {
            engine.keypad_backspace();
        });
    }

    pub fn dismiss_summary(&self) {
        self.shared.update(|engine, _| engine.dismiss_summary());
    }

    /// Latest published state.
    pub fn snapshot(&self) -> WorkoutSnapshot {
        self.shared.updates.borrow().clone()
    }

    /// Receive every published state change.
    pub fn subscribe(&self) -> watch::Receiver<WorkoutSnapshot> {
        self.shared.updates.subscribe()
    }

    pub fn phase(&self) -> Phase {
        self.shared.lock().engine.phase().clone()
    }

    pub fn history(&self) -> StateHistory<Phase> {
        self.shared.lock().engine.history().clone()
    }

    fn send(&self, intent: Intent) {
        self.shared.update(|engine, now| {
            engine.send(intent, now);
        });
    }
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `f` under the lock, then reconcile the ticker and publish.
    fn update<R>(self: &Arc<Self>, f: impl FnOnce(&mut WorkoutEngine, Instant) -> R) -> R {
        let mut inner = self.lock();
        let result = f(&mut inner.engine, Instant::now());
        self.sync_ticker(&mut inner);
        self.updates.send_replace(inner.engine.snapshot());
        result
    }

    fn on_tick(self: &Arc<Self>, generation: u64) -> bool {
        self.update(|engine, now| engine.tick(generation, now))
    }

    /// Make the running task match the engine's timer slot.
    fn sync_ticker(self: &Arc<Self>, inner: &mut Inner) {
        let wanted = inner.engine.active_timer();
        let running = inner.ticker.as_ref().map(|t| t.generation);
        if wanted.map(|(_, generation)| generation) == running {
            return;
        }

        if let Some(old) = inner.ticker.take() {
            debug!(generation = old.generation, "aborting ticker");
            old.task.abort();
        }

        if let Some((kind, generation)) = wanted {
            debug!(?kind, generation, "spawning ticker");
            let task = self.runtime.spawn(run_ticker(
                Arc::downgrade(self),
                generation,
                self.tick_interval,
            ));
            inner.ticker = Some(Ticker { generation, task });
        }
    }
}

async fn run_ticker(shared: Weak<Shared>, generation: u64, period: Duration) {
    let mut interval = time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Burst);

    loop {
        interval.tick().await;
        let Some(shared) = shared.upgrade() else {
            break;
        };
        if !shared.on_tick(generation) {
            break;
        }
    }
}

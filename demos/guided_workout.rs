//! Guided Workout
//!
//! This example scripts a short three-set workout through the store.
//!
//! Key concepts:
//! - Intents as the only way to change state
//! - Timers started and stopped by phase effects
//! - Snapshots published on a watch channel
//!
//! Run with: RUST_LOG=setflow=debug cargo run --example guided_workout

use setflow::{Phase, WorkoutConfig, WorkoutStore};
use std::time::Duration;
use tokio::time::sleep;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("setflow=info")),
        )
        .init();

    println!("=== Guided Workout Example ===\n");

    let config = WorkoutConfig::load("setflow.toml")?;
    let store = WorkoutStore::new(config)?;
    let mut updates = store.subscribe();

    // Print every phase change as it is published.
    let watcher = tokio::spawn(async move {
        let mut last = None;
        while updates.changed().await.is_ok() {
            let phase = updates.borrow_and_update().phase.clone();
            if last.as_ref() != Some(&phase) {
                println!("  -> {phase}");
                last = Some(phase);
            }
        }
    });

    store.start_workout();

    for (weight, reps) in [("40", "10"), ("42.5", "8"), ("45", "6")] {
        sleep(Duration::from_millis(1200)).await;
        println!("Lifted for {}", store.snapshot().elapsed);

        store.toggle_timer();
        for key in weight.chars() {
            store.keypad_input(key);
        }
        store.submit_input();
        for key in reps.chars() {
            store.keypad_input(key);
        }
        store.submit_input();

        store.select_rest(Duration::from_secs(1));
        while matches!(store.phase(), Phase::Resting { .. }) {
            sleep(Duration::from_millis(250)).await;
        }
    }

    let snapshot = store.snapshot();
    if let Some(summary) = &snapshot.summary {
        println!("\n{}", summary.render());
        println!("Total volume: {}kg", summary.total_volume());
    }
    println!("\nSnapshot JSON:\n{}", snapshot.to_json()?);

    drop(store);
    watcher.await?;

    println!("\n=== Example Complete ===");
    Ok(())
}

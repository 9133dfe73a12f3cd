//! End-to-end tests of the store on a paused tokio clock.

use setflow::{InputField, Phase, TimerKind, WorkoutConfig, WorkoutStore};
use std::time::Duration;
use tokio::time::sleep;

fn store() -> WorkoutStore {
    WorkoutStore::new(WorkoutConfig::default()).unwrap()
}

fn secs(secs: u64) -> Duration {
    Duration::from_secs(secs)
}

/// Drive the current set from `Active` through the keypad into rest selection.
fn enter_set(store: &WorkoutStore, weight: &str, reps: &str) {
    store.toggle_timer();
    for key in weight.chars() {
        store.keypad_input(key);
    }
    store.submit_input();
    for key in reps.chars() {
        store.keypad_input(key);
    }
    store.submit_input();
}

#[tokio::test(start_paused = true)]
async fn elapsed_time_survives_keypad_round_trip() {
    let store = store();
    store.start_workout();

    sleep(Duration::from_millis(5050)).await;
    assert_eq!(store.snapshot().elapsed, "0:05");

    store.toggle_timer();
    assert_eq!(store.snapshot().timer, None);
    sleep(secs(30)).await;
    assert_eq!(store.snapshot().elapsed, "0:05");

    store.toggle_timer();
    sleep(Duration::from_millis(2_050)).await;
    let snapshot = store.snapshot();
    assert_eq!(snapshot.phase, Phase::Active { set: 0 });
    assert_eq!(snapshot.elapsed, "0:07");
    assert_eq!(snapshot.timer, Some(TimerKind::Elapsed));
}

#[tokio::test(start_paused = true)]
async fn set_entry_reaches_rest() {
    let store = store();
    store.start_workout();

    store.toggle_timer();
    let snapshot = store.snapshot();
    assert_eq!(
        snapshot.phase,
        Phase::Keypad {
            set: 0,
            field: InputField::Weight
        }
    );
    assert_eq!(snapshot.current.index, Some(0));
    assert_eq!(snapshot.current.field, Some(InputField::Weight));

    for key in "135".chars() {
        store.keypad_input(key);
    }
    store.submit_input();
    for key in "8".chars() {
        store.keypad_input(key);
    }
    store.submit_input();
    assert_eq!(store.phase(), Phase::RestSelection { set: 0 });

    store.select_rest(secs(90));
    let snapshot = store.snapshot();
    assert_eq!(
        snapshot.phase,
        Phase::Resting {
            set: 0,
            duration: secs(90)
        }
    );
    assert_eq!(snapshot.rest_total, secs(90));
    assert_eq!(snapshot.rest_remaining, secs(90));
    assert_eq!(snapshot.elapsed, "0:00");
    assert_eq!(snapshot.timer, Some(TimerKind::Countdown));
    assert_eq!(snapshot.sets[0].weight, Some(135.0));
    assert_eq!(snapshot.sets[0].reps, Some(8));
    assert!(snapshot.sets[0].completed);
}

#[tokio::test(start_paused = true)]
async fn rest_counts_down_then_advances_once() {
    let store = store();
    store.start_workout();
    enter_set(&store, "20", "10");
    store.select_rest(secs(60));

    sleep(Duration::from_millis(30_050)).await;
    let snapshot = store.snapshot();
    assert_eq!(snapshot.rest_remaining, secs(30));
    assert!((snapshot.rest_progress() - 0.5).abs() < 1e-9);

    sleep(secs(30)).await;
    let snapshot = store.snapshot();
    assert_eq!(snapshot.phase, Phase::Active { set: 1 });
    assert_eq!(snapshot.rest_remaining, Duration::ZERO);
    assert_eq!(snapshot.timer, Some(TimerKind::Elapsed));

    sleep(secs(5)).await;
    assert_eq!(store.history().count_intent("Finish Rest"), 1);
    assert_eq!(store.phase(), Phase::Active { set: 1 });
}

#[tokio::test(start_paused = true)]
async fn skipping_rest_cancels_countdown() {
    let store = store();
    store.start_workout();
    enter_set(&store, "20", "10");
    store.select_rest(secs(60));

    sleep(secs(10)).await;
    store.finish_rest();
    assert_eq!(store.phase(), Phase::Active { set: 1 });

    sleep(secs(120)).await;
    assert_eq!(store.history().count_intent("Finish Rest"), 1);
    assert_eq!(store.phase(), Phase::Active { set: 1 });
}

#[tokio::test(start_paused = true)]
async fn full_workout_ends_with_summary() {
    let store = store();
    store.start_workout();

    for (weight, reps) in [("40", "10"), ("42.5", "8"), ("45", "6")] {
        enter_set(&store, weight, reps);
        store.select_rest(secs(30));
        store.finish_rest();
    }

    let snapshot = store.snapshot();
    assert_eq!(snapshot.phase, Phase::NotStarted);
    assert_eq!(snapshot.timer, None);
    assert!(snapshot.summary_visible);
    assert_eq!(snapshot.completed_sets().len(), 3);
    assert_eq!(snapshot.completed_sets()[1].weight, Some(42.5));

    // The next workout starts from this one's values.
    assert!(snapshot.sets.iter().all(|set| !set.completed));
    assert_eq!(snapshot.sets[2].previous_workout(), "45 x 6");

    let summary = snapshot.summary.unwrap();
    assert_eq!(summary.set_lines()[0], "1  40kg x 10");
    assert_eq!(summary.total_volume(), 400.0 + 340.0 + 270.0);

    store.dismiss_summary();
    let snapshot = store.snapshot();
    assert!(!snapshot.summary_visible);
    assert_eq!(snapshot.completed_sets().len(), 3);
}

#[tokio::test(start_paused = true)]
async fn early_finish_keeps_only_completed_sets() {
    let store = store();
    store.start_workout();
    enter_set(&store, "50", "5");
    store.select_rest(secs(30));
    store.finish_rest();

    store.finish_workout();
    let snapshot = store.snapshot();
    assert_eq!(snapshot.phase, Phase::NotStarted);
    assert_eq!(snapshot.completed_sets().len(), 1);
    assert_eq!(snapshot.completed_sets()[0].weight, Some(50.0));
}

#[tokio::test(start_paused = true)]
async fn subscribers_see_changes() {
    let store = store();
    let mut updates = store.subscribe();
    assert_eq!(updates.borrow().phase, Phase::NotStarted);

    store.start_workout();
    updates.changed().await.unwrap();
    assert_eq!(updates.borrow_and_update().phase, Phase::Active { set: 0 });

    sleep(Duration::from_millis(1050)).await;
    updates.changed().await.unwrap();
    assert_eq!(updates.borrow_and_update().elapsed, "0:01");
}

#[tokio::test(start_paused = true)]
async fn illegal_intents_are_ignored() {
    let store = store();
    store.finish_rest();
    store.submit_input();
    store.keypad_input('5');

    assert_eq!(store.phase(), Phase::NotStarted);
    assert!(store.history().is_empty());
    assert_eq!(store.snapshot().sets[0].weight, None);
}

#[tokio::test(start_paused = true)]
async fn zero_rest_is_ignored() {
    let store = store();
    store.start_workout();
    enter_set(&store, "20", "10");

    store.select_rest(Duration::ZERO);
    assert_eq!(store.phase(), Phase::RestSelection { set: 0 });

    store.cancel_rest_selection();
    assert_eq!(
        store.phase(),
        Phase::Keypad {
            set: 0,
            field: InputField::Weight
        }
    );
    assert_eq!(store.snapshot().keypad.as_deref(), Some("20"));
}

#[tokio::test(start_paused = true)]
async fn dropping_store_stops_timers() {
    let store = store();
    store.start_workout();
    enter_set(&store, "20", "10");
    store.select_rest(secs(60));
    let updates = store.subscribe();

    drop(store);
    sleep(secs(120)).await;
    assert!(updates.has_changed().is_err());
}

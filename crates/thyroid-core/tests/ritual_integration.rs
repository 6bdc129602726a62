//! Integration tests for the ritual lifecycle through the `App` controller.

use std::sync::Arc;

use thyroid_core::advice::{Advisor, OfflineAdvisor};
use thyroid_core::storage::keys;
use thyroid_core::{
    App, Config, Database, Event, KvStore, ManualClock, MemoryStore, RitualPhase, Suggestion,
    DEFAULT_WAIT_MINUTES,
};
use thyroid_core::ritual::RecordingAlarm;

const T0: u64 = 1_717_000_000_000;

fn mount<S: KvStore>(
    store: S,
    clock: &Arc<ManualClock>,
    alarm: &Arc<RecordingAlarm>,
) -> App<S> {
    App::new(
        store,
        &Config::default(),
        clock.clone(),
        Box::new(alarm.clone()),
    )
}

#[test]
fn test_end_to_end_one_minute_ritual() {
    let clock = Arc::new(ManualClock::new(T0));
    let alarm = Arc::new(RecordingAlarm::new());
    let mut app = mount(MemoryStore::new(), &clock, &alarm);

    assert!(app.symptoms().is_empty());
    assert_eq!(app.phase(), RitualPhase::Waiting);

    app.take_pill(Some(1)).unwrap();
    assert_eq!(app.phase(), RitualPhase::Taken);

    // One tick per simulated second, like the UI loop.
    for _ in 0..61 {
        clock.advance_secs(1);
        app.tick();
    }
    assert_eq!(app.phase(), RitualPhase::ReadyToEat);
    assert_eq!(app.remaining_secs(), 0);
    assert_eq!(alarm.plays(), 1);

    let event = app.finish_ritual().unwrap();
    assert!(matches!(event, Event::RitualReset { from: RitualPhase::ReadyToEat, .. }));
    assert_eq!(app.phase(), RitualPhase::Waiting);
    assert_eq!(app.timer().wait_minutes(), DEFAULT_WAIT_MINUTES);

    let store = app.into_store();
    assert!(store.get(keys::RITUAL_START).unwrap().is_none());
    assert!(store.get(keys::WAIT_MINUTES).unwrap().is_none());
    assert_eq!(
        store.get(keys::RITUAL_STATE).unwrap().as_deref(),
        Some("\"WAITING\"")
    );
}

#[test]
fn test_resume_mid_wait_is_continuous() {
    let clock = Arc::new(ManualClock::new(T0));
    let alarm = Arc::new(RecordingAlarm::new());

    // Uninterrupted reference run.
    let mut reference = mount(MemoryStore::new(), &clock, &alarm);
    reference.take_pill(Some(30)).unwrap();

    // Run that "reloads" halfway.
    let mut reloaded = mount(MemoryStore::new(), &clock, &alarm);
    reloaded.take_pill(Some(30)).unwrap();

    clock.advance_secs(737);
    reference.tick();
    let store = reloaded.into_store();
    let resumed = mount(store, &clock, &alarm);

    assert_eq!(resumed.phase(), RitualPhase::Taken);
    assert_eq!(resumed.remaining_secs(), reference.remaining_secs());
    assert_eq!(resumed.remaining_secs(), 30 * 60 - 737);
    assert_eq!(alarm.plays(), 0);
}

#[test]
fn test_resume_from_sqlite_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("thyroid.db");
    let clock = Arc::new(ManualClock::new(T0));
    let alarm = Arc::new(RecordingAlarm::new());

    {
        let mut app = mount(Database::open_at(&path).unwrap(), &clock, &alarm);
        app.take_pill(Some(2)).unwrap();
    }

    clock.advance_secs(90);
    let app = mount(Database::open_at(&path).unwrap(), &clock, &alarm);
    assert_eq!(app.phase(), RitualPhase::Taken);
    assert_eq!(app.remaining_secs(), 30);

    clock.advance_secs(30);
    let app = mount(Database::open_at(&path).unwrap(), &clock, &alarm);
    assert_eq!(app.phase(), RitualPhase::ReadyToEat);
    assert_eq!(alarm.plays(), 1);

    // Reloading again after completion stays quiet.
    let _app = mount(Database::open_at(&path).unwrap(), &clock, &alarm);
    assert_eq!(alarm.plays(), 1);
}

#[test]
fn test_corrupted_ritual_state_fails_safe() {
    let clock = Arc::new(ManualClock::new(T0));
    let alarm = Arc::new(RecordingAlarm::new());
    let mut store = MemoryStore::new();
    store.set(keys::RITUAL_STATE, "\"TAKEN\"").unwrap();
    store.set(keys::RITUAL_START, "yesterday").unwrap();

    let mut app = mount(store, &clock, &alarm);
    assert_eq!(app.phase(), RitualPhase::Waiting);
    // And a fresh ritual can start.
    app.take_pill(None).unwrap();
    assert_eq!(app.phase(), RitualPhase::Taken);
}

#[test]
fn test_reset_from_taken_recovers() {
    let clock = Arc::new(ManualClock::new(T0));
    let alarm = Arc::new(RecordingAlarm::new());
    let mut app = mount(MemoryStore::new(), &clock, &alarm);

    app.take_pill(Some(60)).unwrap();
    clock.advance_secs(10);
    app.finish_ritual().unwrap();
    assert_eq!(app.phase(), RitualPhase::Waiting);

    clock.advance_secs(3600);
    assert!(app.tick().is_none());
    assert_eq!(alarm.plays(), 0);
}

#[tokio::test]
async fn test_ritual_starts_with_fallback_advice() {
    let clock = Arc::new(ManualClock::new(T0));
    let alarm = Arc::new(RecordingAlarm::new());
    let mut app = mount(MemoryStore::new(), &clock, &alarm);

    let advice = OfflineAdvisor.breakfast("papaya").await;
    assert!(advice.is_fallback());

    let event = app.take_pill_with_advice(&advice).unwrap();
    assert!(matches!(event, Event::RitualStarted { wait_minutes: 30, .. }));
}

#[test]
fn test_suggested_advice_sets_wait() {
    let clock = Arc::new(ManualClock::new(T0));
    let alarm = Arc::new(RecordingAlarm::new());
    let mut app = mount(MemoryStore::new(), &clock, &alarm);

    let advice = Suggestion::Suggested(thyroid_core::BreakfastAdvice {
        minutes: 60.0,
        reason: "Café con leche".into(),
    });
    app.take_pill_with_advice(&advice).unwrap();
    assert_eq!(app.remaining_secs(), 3600);
}

#[test]
fn test_history_through_app() {
    let clock = Arc::new(ManualClock::new(T0));
    let alarm = Arc::new(RecordingAlarm::new());
    let mut app = mount(MemoryStore::new(), &clock, &alarm);

    let entry = app.add_symptoms(["Fatiga", "Niebla mental"], "").unwrap().unwrap();
    assert_eq!(entry.date, clock_today(T0));
    let none: Vec<String> = Vec::new();
    assert!(app.add_symptoms(none, "").unwrap().is_none());
    assert_eq!(app.symptoms().len(), 1);

    let mut profile = app.profile();
    profile.current_dose = 88.0;
    app.save_profile(&profile).unwrap();
    let weight = app.record_weight(68.4).unwrap();
    assert_eq!(weight.dose, 88.0);
    assert_eq!(app.weights().len(), 1);

    let report = app.report();
    assert_eq!(report.top_symptoms[0].symptom, "Fatiga");
    assert_eq!(report.profile.weight, 68.4);
}

fn clock_today(ms: u64) -> chrono::NaiveDate {
    chrono::DateTime::from_timestamp_millis(ms as i64)
        .unwrap()
        .date_naive()
}

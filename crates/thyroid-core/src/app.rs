//! Application controller.
//!
//! `App` owns every piece of mutable state: the key-value store (through
//! [`HistoryStore`]), the ritual timer, the alarm player and the clock.
//! Front ends hold one `App` and go through its methods; there are no
//! process-wide singletons.

use std::sync::Arc;

use tracing::info;

use crate::advice::{BreakfastAdvice, Suggestion};
use crate::clock::Clock;
use crate::error::Result;
use crate::events::Event;
use crate::history::{HistoryStore, SymptomEntry, UserProfile, WeightEntry};
use crate::report::MedicalReport;
use crate::ritual::{AlarmPlayer, RitualPhase, RitualTimer};
use crate::storage::{Config, KvStore};

pub struct App<S: KvStore> {
    history: HistoryStore<S>,
    timer: RitualTimer,
    alarm: Box<dyn AlarmPlayer>,
    clock: Arc<dyn Clock>,
    default_wait_minutes: u32,
}

impl<S: KvStore> App<S> {
    /// Mount the application over `store`.
    ///
    /// Restores any in-progress ritual and evaluates it once immediately, so
    /// a cycle whose window elapsed while the app was closed completes (and
    /// rings) right away.
    pub fn new(
        store: S,
        config: &Config,
        clock: Arc<dyn Clock>,
        alarm: Box<dyn AlarmPlayer>,
    ) -> Self {
        let default_wait_minutes = config.ritual.default_wait_minutes;
        let timer = RitualTimer::restore(&store, default_wait_minutes);
        let mut app = Self {
            history: HistoryStore::new(store),
            timer,
            alarm,
            clock,
            default_wait_minutes,
        };
        if let Some(event) = app.tick() {
            info!(?event, "ritual completed while away");
        }
        app
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn history(&self) -> &HistoryStore<S> {
        &self.history
    }

    pub fn timer(&self) -> &RitualTimer {
        &self.timer
    }

    pub fn phase(&self) -> RitualPhase {
        self.timer.phase()
    }

    pub fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }

    pub fn remaining_secs(&self) -> u64 {
        self.timer.remaining_secs(self.clock.now_ms())
    }

    pub fn snapshot(&self) -> Event {
        self.timer.snapshot(self.clock.now_ms())
    }

    pub fn profile(&self) -> UserProfile {
        self.history.profile()
    }

    pub fn symptoms(&self) -> Vec<SymptomEntry> {
        self.history.symptoms()
    }

    pub fn weights(&self) -> Vec<WeightEntry> {
        self.history.weights()
    }

    pub fn report(&self) -> MedicalReport {
        MedicalReport::build(
            &self.history.profile(),
            &self.history.symptoms(),
            &self.history.weights(),
            self.clock.today(),
        )
    }

    pub fn into_store(self) -> S {
        self.history.into_store()
    }

    // ── Ritual ───────────────────────────────────────────────────────

    /// Start the wait. `None` uses the configured default.
    pub fn take_pill(&mut self, wait_minutes: Option<u32>) -> Result<Event> {
        let wait = wait_minutes.unwrap_or(self.default_wait_minutes);
        let now = self.clock.now_ms();
        self.timer.take_pill(self.history.store_mut(), wait, now)
    }

    /// Start the wait with whatever the advisor produced; a fallback is
    /// used exactly like a real suggestion.
    pub fn take_pill_with_advice(&mut self, advice: &Suggestion<BreakfastAdvice>) -> Result<Event> {
        self.take_pill(Some(advice.value().wait_minutes()))
    }

    pub fn tick(&mut self) -> Option<Event> {
        let now = self.clock.now_ms();
        self.timer
            .tick(self.history.store_mut(), self.alarm.as_ref(), now)
    }

    pub fn finish_ritual(&mut self) -> Result<Event> {
        let now = self.clock.now_ms();
        self.timer.finish(self.history.store_mut(), now)
    }

    // ── History ──────────────────────────────────────────────────────

    pub fn save_profile(&mut self, profile: &UserProfile) -> Result<()> {
        self.history.save_profile(profile)
    }

    pub fn add_symptoms<I, L>(&mut self, labels: I, notes: &str) -> Result<Option<SymptomEntry>>
    where
        I: IntoIterator<Item = L>,
        L: AsRef<str>,
    {
        let today = self.clock.today();
        self.history.add_symptoms(labels, notes, today)
    }

    pub fn record_weight(&mut self, weight: f64) -> Result<WeightEntry> {
        let today = self.clock.today();
        self.history.record_weight(weight, today)
    }

    pub fn welcome_seen(&self) -> bool {
        self.history.welcome_seen()
    }

    pub fn complete_welcome(&mut self) -> Result<()> {
        self.history.mark_welcome_seen()
    }

    /// Wipe all data and return the ritual to a fresh `Waiting`.
    pub fn reset_all(&mut self) -> Result<()> {
        self.history.reset_all()?;
        self.timer = RitualTimer::new(self.default_wait_minutes);
        Ok(())
    }
}

//! Ritual timer implementation.
//!
//! The ritual timer is a wall-clock-anchored state machine. It does not use
//! internal threads - the caller passes the current time to `tick()` at
//! least once per second while a cycle is running, and once on resume.
//!
//! ## State Transitions
//!
//! ```text
//! Waiting --take_pill--> Taken --(elapsed >= wait)--> ReadyToEat --finish--> Waiting
//!                          \______________________finish_______________________/
//! ```
//!
//! Only the anchor (start timestamp) and the configured wait are persisted.
//! Remaining time is derived on every observation, so a reload mid-wait
//! reproduces exactly the value an uninterrupted run would show.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::alarm::{AlarmLatch, AlarmPlayer};
use crate::clock::datetime_of;
use crate::error::{CoreError, RitualError, ValidationError};
use crate::events::Event;
use crate::storage::{keys, load_json, save_json, KvStore};

/// Post-dose wait used when nothing else is configured or suggested.
pub const DEFAULT_WAIT_MINUTES: u32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RitualPhase {
    /// No active countdown.
    Waiting,
    /// Dose taken, absorption window running.
    Taken,
    /// Window elapsed; breakfast allowed.
    ReadyToEat,
}

/// The single active "take medication -> wait -> eat" cycle.
#[derive(Debug, Clone)]
pub struct RitualTimer {
    phase: RitualPhase,
    /// Epoch ms of the dose. Present while Taken; kept through ReadyToEat.
    started_at_ms: Option<u64>,
    wait_minutes: u32,
    default_wait_minutes: u32,
    alarm: AlarmLatch,
}

impl RitualTimer {
    /// A fresh timer in `Waiting`.
    pub fn new(default_wait_minutes: u32) -> Self {
        let default_wait_minutes = default_wait_minutes.max(1);
        Self {
            phase: RitualPhase::Waiting,
            started_at_ms: None,
            wait_minutes: default_wait_minutes,
            default_wait_minutes,
            alarm: AlarmLatch::default(),
        }
    }

    /// Rebuild the timer from persisted state after a restart.
    ///
    /// Anything inconsistent falls back to `Waiting`: a malformed phase, a
    /// `TAKEN` phase without a start timestamp, or a zero wait. The caller
    /// should `tick` immediately afterwards.
    pub fn restore<S: KvStore + ?Sized>(store: &S, default_wait_minutes: u32) -> Self {
        let mut timer = Self::new(default_wait_minutes);

        let phase = load_json::<RitualPhase, _>(store, keys::RITUAL_STATE)
            .unwrap_or(RitualPhase::Waiting);
        if phase == RitualPhase::Waiting {
            return timer;
        }

        let Some(started_at_ms) = load_json::<u64, _>(store, keys::RITUAL_START) else {
            warn!(?phase, "persisted ritual has no start timestamp; resetting to WAITING");
            return timer;
        };
        let wait_minutes = match load_json::<u32, _>(store, keys::WAIT_MINUTES) {
            Some(0) => {
                warn!("persisted wait of 0 minutes; resetting to WAITING");
                return timer;
            }
            Some(m) => m,
            None => timer.default_wait_minutes,
        };

        timer.phase = phase;
        timer.started_at_ms = Some(started_at_ms);
        timer.wait_minutes = wait_minutes;
        if phase == RitualPhase::ReadyToEat {
            // Completion was persisted after the cue played.
            timer.alarm = AlarmLatch::spent();
        }
        debug!(?phase, started_at_ms, wait_minutes, "restored ritual");
        timer
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> RitualPhase {
        self.phase
    }

    pub fn started_at_ms(&self) -> Option<u64> {
        self.started_at_ms
    }

    pub fn wait_minutes(&self) -> u32 {
        self.wait_minutes
    }

    pub fn default_wait_minutes(&self) -> u32 {
        self.default_wait_minutes
    }

    pub fn alarm_fired(&self) -> bool {
        self.alarm.is_fired()
    }

    pub fn total_secs(&self) -> u64 {
        u64::from(self.wait_minutes) * 60
    }

    /// Seconds left at `now_ms`. Pure: never transitions.
    ///
    /// `Waiting` reports the full configured window, `ReadyToEat` zero.
    pub fn remaining_secs(&self, now_ms: u64) -> u64 {
        match (self.phase, self.started_at_ms) {
            (RitualPhase::Taken, Some(start)) => self.remaining_from(start, now_ms).max(0) as u64,
            (RitualPhase::ReadyToEat, _) => 0,
            _ => self.total_secs(),
        }
    }

    /// Epoch ms at which breakfast is allowed, if a cycle is running.
    pub fn ready_at_ms(&self) -> Option<u64> {
        self.started_at_ms
            .map(|start| start + self.total_secs() * 1000)
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self, now_ms: u64) -> Event {
        let remaining_secs = self.remaining_secs(now_ms);
        Event::StateSnapshot {
            phase: self.phase,
            remaining_secs,
            remaining_display: format_remaining(remaining_secs),
            wait_minutes: self.wait_minutes,
            started_at_ms: self.started_at_ms,
            at: datetime_of(now_ms),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// WAITING -> TAKEN.
    ///
    /// Persists `{TAKEN, start = now, wait}` before touching in-memory state
    /// and re-arms the alarm.
    ///
    /// # Errors
    /// Rejects a zero wait, a cycle that is already active, and store
    /// failures. State is unchanged on error.
    pub fn take_pill<S: KvStore + ?Sized>(
        &mut self,
        store: &mut S,
        wait_minutes: u32,
        now_ms: u64,
    ) -> Result<Event, CoreError> {
        if wait_minutes == 0 {
            return Err(ValidationError::NotPositive {
                field: "wait_minutes",
                value: 0.0,
            }
            .into());
        }
        if self.phase != RitualPhase::Waiting {
            return Err(RitualError::AlreadyActive { phase: self.phase }.into());
        }

        save_json(store, keys::RITUAL_START, &now_ms)?;
        save_json(store, keys::WAIT_MINUTES, &wait_minutes)?;
        save_json(store, keys::RITUAL_STATE, &RitualPhase::Taken)?;

        self.phase = RitualPhase::Taken;
        self.started_at_ms = Some(now_ms);
        self.wait_minutes = wait_minutes;
        self.alarm.rearm();

        info!(wait_minutes, started_at_ms = now_ms, "pill taken");
        Ok(Event::RitualStarted {
            wait_minutes,
            started_at_ms: now_ms,
            ready_at_ms: now_ms + u64::from(wait_minutes) * 60_000,
            at: datetime_of(now_ms),
        })
    }

    /// Re-evaluate the countdown. Returns `Some(Event::RitualCompleted)` on
    /// the tick that crosses the threshold and `None` otherwise.
    ///
    /// A failed persistence write is logged; the transition and the alarm
    /// still happen.
    pub fn tick<S: KvStore + ?Sized>(
        &mut self,
        store: &mut S,
        player: &dyn AlarmPlayer,
        now_ms: u64,
    ) -> Option<Event> {
        if self.phase != RitualPhase::Taken {
            return None;
        }
        let Some(start) = self.started_at_ms else {
            warn!("TAKEN without start timestamp; resetting to WAITING");
            self.force_waiting(store);
            return None;
        };

        if self.remaining_from(start, now_ms) > 0 {
            return None;
        }

        self.phase = RitualPhase::ReadyToEat;
        if let Err(e) = save_json(store, keys::RITUAL_STATE, &RitualPhase::ReadyToEat) {
            warn!(error = %e, "failed to persist READY_TO_EAT");
        }
        let alarm_fired = self.alarm.fire(player);
        info!(wait_minutes = self.wait_minutes, "ready to eat");

        Some(Event::RitualCompleted {
            wait_minutes: self.wait_minutes,
            started_at_ms: start,
            alarm_fired,
            at: datetime_of(now_ms),
        })
    }

    /// Any phase -> WAITING. Clears the start timestamp and the wait
    /// override, restoring the default wait.
    ///
    /// # Errors
    /// Returns store failures. In-memory state is reset regardless so a
    /// broken store can never wedge the ritual.
    pub fn finish<S: KvStore + ?Sized>(
        &mut self,
        store: &mut S,
        now_ms: u64,
    ) -> Result<Event, CoreError> {
        let from = self.phase;
        self.reset_in_memory();

        save_json(store, keys::RITUAL_STATE, &RitualPhase::Waiting)?;
        store.remove(keys::RITUAL_START)?;
        store.remove(keys::WAIT_MINUTES)?;

        info!(?from, "ritual finished");
        Ok(Event::RitualReset {
            from,
            at: datetime_of(now_ms),
        })
    }

    // ── Internal ─────────────────────────────────────────────────────

    /// Signed so that a start in the future (clock skew) counts as zero
    /// elapsed and crossing the threshold yields a non-positive value.
    fn remaining_from(&self, start_ms: u64, now_ms: u64) -> i64 {
        let elapsed_secs = (now_ms.saturating_sub(start_ms) / 1000) as i64;
        self.total_secs() as i64 - elapsed_secs
    }

    fn reset_in_memory(&mut self) {
        self.phase = RitualPhase::Waiting;
        self.started_at_ms = None;
        self.wait_minutes = self.default_wait_minutes;
    }

    fn force_waiting<S: KvStore + ?Sized>(&mut self, store: &mut S) {
        self.reset_in_memory();
        let cleared = save_json(store, keys::RITUAL_STATE, &RitualPhase::Waiting)
            .and_then(|_| store.remove(keys::RITUAL_START).map_err(CoreError::from));
        if let Err(e) = cleared {
            warn!(error = %e, "failed to persist WAITING");
        }
    }
}

/// `m:ss`, minutes unbounded.
pub fn format_remaining(secs: u64) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ritual::RitualPhase;

/// Every ritual state change produces an Event.
/// Front ends print or render them; nothing else subscribes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// WAITING -> TAKEN.
    RitualStarted {
        wait_minutes: u32,
        started_at_ms: u64,
        ready_at_ms: u64,
        at: DateTime<Utc>,
    },
    /// TAKEN -> READY_TO_EAT, emitted by the tick that crossed the threshold.
    RitualCompleted {
        wait_minutes: u32,
        started_at_ms: u64,
        /// False when the alarm had already fired for this cycle.
        alarm_fired: bool,
        at: DateTime<Utc>,
    },
    /// Any phase -> WAITING.
    RitualReset {
        from: RitualPhase,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        phase: RitualPhase,
        remaining_secs: u64,
        /// `m:ss`
        remaining_display: String,
        wait_minutes: u32,
        started_at_ms: Option<u64>,
        at: DateTime<Utc>,
    },
}

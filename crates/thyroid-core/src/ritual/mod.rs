mod alarm;
mod engine;

pub use alarm::{AlarmLatch, AlarmPlayer, RecordingAlarm, SilentAlarm, TerminalBell};
pub use engine::{format_remaining, RitualPhase, RitualTimer, DEFAULT_WAIT_MINUTES};

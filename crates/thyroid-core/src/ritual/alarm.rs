//! Alarm cue and its once-per-cycle latch.

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use tracing::{debug, warn};

use crate::error::AlarmError;

/// Something that can play the "ready to eat" cue.
///
/// Implementations may fail; the caller never lets a failure reach the user
/// or block a phase transition.
pub trait AlarmPlayer: Send + Sync {
    fn play(&self) -> Result<(), AlarmError>;
}

/// Guard that lets the alarm fire at most once per ritual cycle.
///
/// Only `rearm` (called on TAKEN entry) resets it; repeated ticks never do.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlarmLatch {
    fired: bool,
}

impl AlarmLatch {
    /// A latch that has already fired, for cycles restored past completion.
    pub fn spent() -> Self {
        Self { fired: true }
    }

    pub fn is_fired(&self) -> bool {
        self.fired
    }

    pub fn rearm(&mut self) {
        self.fired = false;
    }

    /// Play the cue unless it already played this cycle.
    ///
    /// Returns whether this call was the one that fired.
    pub fn fire(&mut self, player: &dyn AlarmPlayer) -> bool {
        if self.fired {
            debug!("alarm already fired this cycle");
            return false;
        }
        self.fired = true;
        if let Err(e) = player.play() {
            warn!(error = %e, "alarm playback failed");
        }
        true
    }
}

/// Rings the terminal bell a few times on stderr.
#[derive(Debug, Clone)]
pub struct TerminalBell {
    tones: u32,
    gap: Duration,
}

impl TerminalBell {
    pub fn new(tones: u32, gap: Duration) -> Self {
        Self { tones, gap }
    }
}

impl Default for TerminalBell {
    fn default() -> Self {
        Self::new(3, Duration::from_millis(150))
    }
}

impl AlarmPlayer for TerminalBell {
    fn play(&self) -> Result<(), AlarmError> {
        let mut err = std::io::stderr().lock();
        for i in 0..self.tones {
            if i > 0 {
                std::thread::sleep(self.gap);
            }
            err.write_all(b"\x07")?;
            err.flush()?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SilentAlarm;

impl AlarmPlayer for SilentAlarm {
    fn play(&self) -> Result<(), AlarmError> {
        Ok(())
    }
}

/// Counts plays instead of making noise.
#[derive(Debug, Default)]
pub struct RecordingAlarm {
    plays: AtomicUsize,
}

impl RecordingAlarm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn plays(&self) -> usize {
        self.plays.load(Ordering::SeqCst)
    }
}

impl AlarmPlayer for RecordingAlarm {
    fn play(&self) -> Result<(), AlarmError> {
        self.plays.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

impl<T: AlarmPlayer + ?Sized> AlarmPlayer for std::sync::Arc<T> {
    fn play(&self) -> Result<(), AlarmError> {
        (**self).play()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenSpeaker;

    impl AlarmPlayer for BrokenSpeaker {
        fn play(&self) -> Result<(), AlarmError> {
            Err(AlarmError::Unavailable("no audio device".into()))
        }
    }

    #[test]
    fn latch_fires_once_until_rearmed() {
        let player = RecordingAlarm::new();
        let mut latch = AlarmLatch::default();

        assert!(latch.fire(&player));
        assert!(!latch.fire(&player));
        assert!(!latch.fire(&player));
        assert_eq!(player.plays(), 1);

        latch.rearm();
        assert!(latch.fire(&player));
        assert_eq!(player.plays(), 2);
    }

    #[test]
    fn playback_failure_is_swallowed_and_still_latches() {
        let mut latch = AlarmLatch::default();
        assert!(latch.fire(&BrokenSpeaker));
        assert!(latch.is_fired());
        assert!(!latch.fire(&BrokenSpeaker));
    }

    #[test]
    fn spent_latch_never_fires() {
        let player = RecordingAlarm::new();
        let mut latch = AlarmLatch::spent();
        assert!(!latch.fire(&player));
        assert_eq!(player.plays(), 0);
    }
}

//! Splash fallback timer.
//!
//! The splash screen advances to `welcome` either when it reports completion
//! or when a fallback deadline passes, whichever comes first. The gate is
//! driven by an explicit millisecond clock supplied by the host, so it has
//! no timer of its own and can be exercised with a fake clock.
//!
//! ```text
//!   Idle --start--> Armed{deadline} --complete--> Done
//!                         |
//!                         +--tick(now >= deadline)--> Done
//! ```
//!
//! `Done` absorbs both events, so at most one of them ever fires. Completion
//! is also accepted from `Idle` for hosts that never start the fallback.

use tracing::debug;

/// Default fallback delay in milliseconds.
pub const DEFAULT_SPLASH_TIMEOUT_MS: u64 = 5_000;

/// State of the splash gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SplashState {
    /// Not started.
    #[default]
    Idle,
    /// Waiting for completion or the deadline.
    Armed {
        /// Clock value at which the fallback fires.
        deadline_ms: u64,
    },
    /// Already advanced (or cancelled); further events are ignored.
    Done,
}

/// What ended the splash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplashExit {
    /// The splash screen reported completion.
    Completed,
    /// The fallback deadline passed.
    TimedOut,
}

/// One-shot splash gate.
#[derive(Debug, Clone, Default)]
pub struct SplashGate {
    state: SplashState,
}

impl SplashGate {
    /// Create an idle gate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    #[inline]
    pub fn state(&self) -> SplashState {
        self.state
    }

    /// Whether a deadline is pending.
    #[inline]
    pub fn is_armed(&self) -> bool {
        matches!(self.state, SplashState::Armed { .. })
    }

    /// Arm the fallback `timeout_ms` after `now_ms`, replacing any earlier run.
    pub fn start(&mut self, now_ms: u64, timeout_ms: u64) {
        let deadline_ms = now_ms.saturating_add(timeout_ms);
        debug!(deadline_ms, "splash timer armed");
        self.state = SplashState::Armed { deadline_ms };
    }

    /// Explicit completion. Cancels the pending deadline, if any.
    ///
    /// Returns `None` once the gate is done. Completion without a started
    /// timer still counts.
    pub fn complete(&mut self) -> Option<SplashExit> {
        if self.state == SplashState::Done {
            return None;
        }
        self.state = SplashState::Done;
        Some(SplashExit::Completed)
    }

    /// Advance the clock. Fires once if the deadline has passed.
    pub fn tick(&mut self, now_ms: u64) -> Option<SplashExit> {
        match self.state {
            SplashState::Armed { deadline_ms } if now_ms >= deadline_ms => {
                self.state = SplashState::Done;
                Some(SplashExit::TimedOut)
            }
            _ => None,
        }
    }

    /// Drop any pending deadline without firing.
    pub fn cancel(&mut self) {
        if self.is_armed() {
            debug!("splash timer cancelled");
        }
        self.state = SplashState::Done;
    }

    /// Return to idle.
    pub fn reset(&mut self) {
        self.state = SplashState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completion_before_deadline_wins() {
        let mut gate = SplashGate::new();
        gate.start(0, DEFAULT_SPLASH_TIMEOUT_MS);

        assert_eq!(gate.tick(100), None);
        assert_eq!(gate.complete(), Some(SplashExit::Completed));
        assert_eq!(gate.tick(5_000), None);
        assert_eq!(gate.tick(60_000), None);
        assert_eq!(gate.state(), SplashState::Done);
    }

    #[test]
    fn deadline_fires_once() {
        let mut gate = SplashGate::new();
        gate.start(1_000, 5_000);

        assert_eq!(gate.tick(5_999), None);
        assert_eq!(gate.tick(6_000), Some(SplashExit::TimedOut));
        assert_eq!(gate.tick(7_000), None);
        assert_eq!(gate.complete(), None);
    }

    #[test]
    fn idle_gate_never_times_out() {
        let mut gate = SplashGate::new();
        assert_eq!(gate.tick(u64::MAX), None);
        assert_eq!(gate.state(), SplashState::Idle);

        assert_eq!(gate.complete(), Some(SplashExit::Completed));
        assert_eq!(gate.complete(), None);
    }

    #[test]
    fn cancel_suppresses_deadline() {
        let mut gate = SplashGate::new();
        gate.start(0, 10);
        gate.cancel();
        assert_eq!(gate.tick(10), None);
        assert!(!gate.is_armed());
    }

    #[test]
    fn restart_after_reset() {
        let mut gate = SplashGate::new();
        gate.start(0, 10);
        gate.complete();
        gate.reset();
        gate.start(100, 10);
        assert_eq!(gate.tick(110), Some(SplashExit::TimedOut));
    }

    #[test]
    fn deadline_saturates() {
        let mut gate = SplashGate::new();
        gate.start(u64::MAX - 1, 10);
        assert_eq!(
            gate.state(),
            SplashState::Armed {
                deadline_ms: u64::MAX
            }
        );
    }
}

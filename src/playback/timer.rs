use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Identity of one armed schedule. Fires carrying an older token are stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerToken(u64);

impl TimerToken {
    #[must_use]
    pub fn generation(self) -> u64 {
        self.0
    }
}

/// What the external scheduler should run: call back with `token` every `period`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSchedule {
    pub token: TimerToken,
    pub period: Duration,
}

/// Cancellable repeating timer handle.
///
/// The crate never owns the clock. Arming hands out a fresh token; the host
/// scheduler reports fires with that token and anything not matching the
/// currently armed one is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlaybackTimer {
    generation: u64,
    armed: Option<TimerSchedule>,
}

impl PlaybackTimer {
    /// Arms (or re-arms) the timer, invalidating any previous token.
    pub fn arm(&mut self, period: Duration) -> TimerSchedule {
        self.generation += 1;
        let schedule = TimerSchedule {
            token: TimerToken(self.generation),
            period,
        };
        self.armed = Some(schedule);
        schedule
    }

    /// Cancels the armed schedule, returning it when one was active.
    pub fn cancel(&mut self) -> Option<TimerSchedule> {
        self.armed.take()
    }

    #[must_use]
    pub fn schedule(self) -> Option<TimerSchedule> {
        self.armed
    }

    #[must_use]
    pub fn is_armed(self) -> bool {
        self.armed.is_some()
    }

    #[must_use]
    pub fn is_current(self, token: TimerToken) -> bool {
        self.armed.is_some_and(|schedule| schedule.token == token)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::PlaybackTimer;

    #[test]
    fn rearm_invalidates_previous_token() {
        let mut timer = PlaybackTimer::default();
        let first = timer.arm(Duration::from_millis(100));
        let second = timer.arm(Duration::from_millis(50));
        assert!(!timer.is_current(first.token));
        assert!(timer.is_current(second.token));
        assert_eq!(timer.schedule().map(|s| s.period), Some(Duration::from_millis(50)));
    }

    #[test]
    fn cancel_disarms_and_leaves_tokens_stale() {
        let mut timer = PlaybackTimer::default();
        let armed = timer.arm(Duration::from_millis(100));
        assert_eq!(timer.cancel(), Some(armed));
        assert!(!timer.is_armed());
        assert!(!timer.is_current(armed.token));
        assert_eq!(timer.cancel(), None);
    }
}

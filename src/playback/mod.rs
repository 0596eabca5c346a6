//! Time-cursor state machine and its cancellable playback timer.
//!
//! Both are clock-agnostic: hosts drive `tick` from whatever scheduler they
//! own, and tests call it directly.

mod cursor;
mod timer;

pub use cursor::{DEFAULT_BASE_TICK_PERIOD, PlaybackState, TickOutcome, TimeCursor};
pub use timer::{PlaybackTimer, TimerSchedule, TimerToken};

use serde::{Deserialize, Serialize};

use crate::playback::{PlaybackState, TimerSchedule};

/// Read-only cursor snapshot passed to observer hooks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CursorContext {
    pub index: usize,
    pub time: f64,
    pub sample_count: usize,
    pub state: PlaybackState,
    pub speed_factor: f64,
}

/// Why playback stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopReason {
    Paused,
    Seeked,
    ReachedEnd,
    ScenarioSwitch,
}

/// Event stream exposed to observers. Every cursor state change emits one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CursorEvent {
    ScenarioLoaded { scenario_id: String, sample_count: usize },
    LoadFailed { scenario_id: String, message: String },
    IndexChanged { index: usize, time: f64 },
    /// Host scheduler should fire `tick` with this schedule.
    PlaybackStarted { schedule: TimerSchedule },
    /// Host scheduler should drop any running schedule.
    PlaybackStopped { reason: StopReason },
    /// `schedule` is set when playing and the timer was re-armed.
    SpeedChanged {
        speed_factor: f64,
        schedule: Option<TimerSchedule>,
    },
}

/// Subscription hook for presentation layers.
///
/// Observers react to cursor changes without mutating session internals.
/// `context` is `None` when no scenario is loaded.
pub trait CursorObserver {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: &CursorEvent, context: Option<CursorContext>);
}

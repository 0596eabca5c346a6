use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{LensError, LensResult};

/// Base cadence: one tick every 100 ms at speed factor 1.
pub const DEFAULT_BASE_TICK_PERIOD: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackState {
    Paused,
    Playing,
}

/// Result of a single `tick`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickOutcome {
    /// Cursor moved to the contained index.
    Advanced(usize),
    /// Cursor sat on the last sample; playback stopped there.
    ReachedEnd,
    /// Not playing; nothing changed.
    Idle,
}

/// The single authoritative time index shared by every view.
///
/// Invariant: `index <= last_index`. Starts paused at index 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeCursor {
    index: usize,
    last_index: usize,
    state: PlaybackState,
    speed_factor: f64,
    base_period: Duration,
}

impl TimeCursor {
    /// Creates a cursor over `sample_count` samples.
    pub fn new(sample_count: usize, base_period: Duration) -> LensResult<Self> {
        if sample_count == 0 {
            return Err(LensError::InvalidControlInput(
                "cursor requires at least one sample".to_owned(),
            ));
        }
        if base_period.is_zero() {
            return Err(LensError::InvalidControlInput(
                "base tick period must be > 0".to_owned(),
            ));
        }
        Ok(Self {
            index: 0,
            last_index: sample_count - 1,
            state: PlaybackState::Paused,
            speed_factor: 1.0,
            base_period,
        })
    }

    #[must_use]
    pub fn index(self) -> usize {
        self.index
    }

    #[must_use]
    pub fn last_index(self) -> usize {
        self.last_index
    }

    #[must_use]
    pub fn state(self) -> PlaybackState {
        self.state
    }

    #[must_use]
    pub fn is_playing(self) -> bool {
        self.state == PlaybackState::Playing
    }

    #[must_use]
    pub fn speed_factor(self) -> f64 {
        self.speed_factor
    }

    #[must_use]
    pub fn base_period(self) -> Duration {
        self.base_period
    }

    /// Effective cadence: `base_period / speed_factor`.
    #[must_use]
    pub fn tick_period(self) -> Duration {
        let nanos = (self.base_period.as_nanos() as f64 / self.speed_factor).round();
        // Float-to-int casts saturate; keep at least one nanosecond.
        Duration::from_nanos((nanos as u64).max(1))
    }

    /// Starts playback. Returns `true` when the state changed.
    ///
    /// No-op when already playing or parked on the last sample.
    pub fn play(&mut self) -> bool {
        if self.is_playing() || self.index == self.last_index {
            return false;
        }
        self.state = PlaybackState::Playing;
        trace!(index = self.index, "cursor play");
        true
    }

    /// Stops playback. Returns `true` when the state changed.
    pub fn pause(&mut self) -> bool {
        if !self.is_playing() {
            return false;
        }
        self.state = PlaybackState::Paused;
        trace!(index = self.index, "cursor pause");
        true
    }

    /// Advances one sample while playing; pauses in place at the end.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.is_playing() {
            return TickOutcome::Idle;
        }
        if self.index >= self.last_index {
            self.index = self.last_index;
            self.state = PlaybackState::Paused;
            trace!(index = self.index, "cursor reached end");
            return TickOutcome::ReachedEnd;
        }
        self.index += 1;
        TickOutcome::Advanced(self.index)
    }

    /// Manual scrub. Clamps into `[0, last_index]` and always pauses.
    ///
    /// Fails on non-finite or fractional input; range clamping is not an error.
    pub fn seek(&mut self, new_index: f64) -> LensResult<usize> {
        if !new_index.is_finite() {
            return Err(LensError::InvalidControlInput(format!(
                "seek index must be finite, got {new_index}"
            )));
        }
        if new_index.fract() != 0.0 {
            return Err(LensError::InvalidControlInput(format!(
                "seek index must be an integer, got {new_index}"
            )));
        }
        let clamped = if new_index <= 0.0 {
            0
        } else if new_index >= self.last_index as f64 {
            self.last_index
        } else {
            new_index as usize
        };
        Ok(self.seek_index(clamped))
    }

    /// Typed scrub entry point. Clamps and pauses.
    pub fn seek_index(&mut self, new_index: usize) -> usize {
        self.index = new_index.min(self.last_index);
        self.state = PlaybackState::Paused;
        trace!(index = self.index, "cursor seek");
        self.index
    }

    /// Changes the cadence multiplier. Leaves index and play state alone.
    pub fn set_speed(&mut self, factor: f64) -> LensResult<()> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(LensError::InvalidControlInput(format!(
                "speed factor must be finite and > 0, got {factor}"
            )));
        }
        self.speed_factor = factor;
        Ok(())
    }
}

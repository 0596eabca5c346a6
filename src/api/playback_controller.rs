use tracing::{debug, trace};

use crate::error::{LensError, LensResult};
use crate::extensions::{CursorEvent, StopReason};
use crate::playback::{TickOutcome, TimerToken};

use super::{LoadedScenario, ScenarioSession};

impl ScenarioSession {
    /// Starts playback and arms the tick timer.
    ///
    /// Returns `Ok(false)` when already playing or parked on the last sample.
    pub fn play(&mut self) -> LensResult<bool> {
        let active = self.require_active_mut()?;
        if !active.cursor.play() {
            return Ok(false);
        }
        let period = active.cursor.tick_period();
        let schedule = self.timer.arm(period);
        debug!(
            period_ms = period.as_secs_f64() * 1e3,
            token = schedule.token.generation(),
            "playback started"
        );
        self.emit_event(CursorEvent::PlaybackStarted { schedule });
        Ok(true)
    }

    /// Stops playback and cancels the tick timer. Returns `true` on change.
    pub fn pause(&mut self) -> bool {
        let Some(active) = self.active.as_mut() else {
            return false;
        };
        if !active.cursor.pause() {
            return false;
        }
        self.timer.cancel();
        self.emit_event(CursorEvent::PlaybackStopped {
            reason: StopReason::Paused,
        });
        true
    }

    /// Advances the cursor one sample while playing.
    ///
    /// On the tick past the last sample playback stops and the timer is
    /// cancelled; the index stays on the last sample.
    pub fn tick(&mut self) -> TickOutcome {
        let Some(active) = self.active.as_mut() else {
            return TickOutcome::Idle;
        };
        let outcome = active.cursor.tick();
        match outcome {
            TickOutcome::Advanced(index) => {
                let time = active.dataset.time()[index];
                self.emit_event(CursorEvent::IndexChanged { index, time });
            }
            TickOutcome::ReachedEnd => {
                self.timer.cancel();
                debug!("playback reached last sample");
                self.emit_event(CursorEvent::PlaybackStopped {
                    reason: StopReason::ReachedEnd,
                });
            }
            TickOutcome::Idle => {}
        }
        outcome
    }

    /// Entry point for the host scheduler. Ignores fires from stale schedules.
    pub fn on_timer_fired(&mut self, token: TimerToken) -> TickOutcome {
        if !self.timer.is_current(token) {
            trace!(token = token.generation(), "ignoring stale timer fire");
            return TickOutcome::Idle;
        }
        self.tick()
    }

    /// Manual scrub: clamps into range and always stops playback.
    pub fn seek(&mut self, new_index: f64) -> LensResult<usize> {
        let active = self.require_active_mut()?;
        let was_playing = active.cursor.is_playing();
        let previous = active.cursor.index();
        let index = active.cursor.seek(new_index)?;
        self.after_seek(was_playing, previous, index);
        Ok(index)
    }

    /// Typed scrub entry point with the same semantics as [`Self::seek`].
    pub fn seek_index(&mut self, new_index: usize) -> LensResult<usize> {
        let active = self.require_active_mut()?;
        let was_playing = active.cursor.is_playing();
        let previous = active.cursor.index();
        let index = active.cursor.seek_index(new_index);
        self.after_seek(was_playing, previous, index);
        Ok(index)
    }

    /// Changes the cadence multiplier for this and later scenarios.
    ///
    /// While playing the timer is re-armed with the new period.
    pub fn set_speed(&mut self, factor: f64) -> LensResult<()> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(LensError::InvalidControlInput(format!(
                "speed factor must be finite and > 0, got {factor}"
            )));
        }
        self.speed_factor = factor;

        let mut schedule = None;
        if let Some(active) = self.active.as_mut() {
            active.cursor.set_speed(factor)?;
            if active.cursor.is_playing() {
                schedule = Some(self.timer.arm(active.cursor.tick_period()));
            }
        }
        debug!(speed_factor = factor, rearmed = schedule.is_some(), "speed changed");
        self.emit_event(CursorEvent::SpeedChanged {
            speed_factor: factor,
            schedule,
        });
        Ok(())
    }

    fn after_seek(&mut self, was_playing: bool, previous: usize, index: usize) {
        if was_playing {
            self.timer.cancel();
            self.emit_event(CursorEvent::PlaybackStopped {
                reason: StopReason::Seeked,
            });
        }
        if index != previous {
            if let Some(time) = self
                .active
                .as_ref()
                .and_then(|active| active.dataset.time_at(index))
            {
                self.emit_event(CursorEvent::IndexChanged { index, time });
            }
        }
    }

    fn require_active_mut(&mut self) -> LensResult<&mut LoadedScenario> {
        self.active.as_mut().ok_or_else(|| {
            LensError::InvalidControlInput("no scenario is loaded".to_owned())
        })
    }
}

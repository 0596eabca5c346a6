use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::core::{ScenarioDataset, analyze};
use crate::error::{LensError, LensResult};
use crate::extensions::{CursorEvent, LeadTimeSummary, StopReason, build_timeline_markers};
use crate::playback::TimeCursor;

use super::{
    DatasetFetcher, LoadOutcome, LoadStatus, LoadTicket, LoadedScenario, ScenarioSession,
    fetch_scenario,
};

impl ScenarioSession {
    /// Starts a scenario switch and returns the ticket for its fetch.
    ///
    /// Any running playback timer is cancelled first so no stale tick can
    /// move a cursor while the switch is in flight. The previous scenario
    /// stays displayed until a newer load is applied.
    pub fn begin_load(&mut self, scenario_id: &str) -> LensResult<LoadTicket> {
        let entry = self.catalog.resolve(scenario_id)?;
        let file = entry.file.clone();

        let stopped = self.timer.cancel().is_some();
        if let Some(active) = self.active.as_mut() {
            active.cursor.pause();
        }
        if stopped {
            self.emit_event(CursorEvent::PlaybackStopped {
                reason: StopReason::ScenarioSwitch,
            });
        }

        self.load_generation += 1;
        let ticket = LoadTicket {
            generation: self.load_generation,
            scenario_id: scenario_id.to_owned(),
            file,
        };
        if let Some(superseded) = self.pending_load.replace(ticket.clone()) {
            debug!(
                superseded = superseded.scenario_id(),
                requested = scenario_id,
                "superseding pending scenario load"
            );
        }
        debug!(
            scenario_id,
            generation = ticket.generation,
            "begin scenario load"
        );
        Ok(ticket)
    }

    /// Applies a finished fetch if it belongs to the latest request.
    ///
    /// Stale outcomes are discarded. Failures are recorded as
    /// `last_load_error`, reported to observers, and leave the previous
    /// scenario untouched.
    pub fn complete_load(&mut self, outcome: LoadOutcome) -> LoadStatus {
        let LoadOutcome { ticket, result } = outcome;
        let is_latest = self
            .pending_load
            .as_ref()
            .is_some_and(|pending| pending.generation == ticket.generation);
        if !is_latest {
            debug!(
                scenario_id = ticket.scenario_id(),
                generation = ticket.generation,
                latest = self.load_generation,
                "discarding stale scenario load"
            );
            return LoadStatus::Discarded;
        }
        self.pending_load = None;

        match result.and_then(|raw| self.build_loaded_scenario(&ticket, &raw)) {
            Ok(loaded) => {
                info!(
                    scenario_id = ticket.scenario_id(),
                    scenario = loaded.dataset.name(),
                    sample_count = loaded.dataset.len(),
                    placeholder = loaded.dataset.is_placeholder(),
                    "scenario loaded"
                );
                let sample_count = loaded.dataset.len();
                let time = loaded.dataset.time()[0];
                self.active = Some(loaded);
                self.last_load_error = None;
                self.emit_event(CursorEvent::ScenarioLoaded {
                    scenario_id: ticket.scenario_id,
                    sample_count,
                });
                self.emit_event(CursorEvent::IndexChanged { index: 0, time });
                LoadStatus::Applied
            }
            Err(err) => {
                warn!(
                    scenario_id = ticket.scenario_id(),
                    error = %err,
                    "scenario load failed"
                );
                self.last_load_error = Some(err.clone());
                self.emit_event(CursorEvent::LoadFailed {
                    scenario_id: ticket.scenario_id,
                    message: err.to_string(),
                });
                LoadStatus::Failed(err)
            }
        }
    }

    /// Convenience: begin, fetch and complete one load in sequence.
    pub async fn load_scenario<F: DatasetFetcher>(
        &mut self,
        fetcher: &F,
        scenario_id: &str,
    ) -> LensResult<LoadStatus> {
        let ticket = self.begin_load(scenario_id)?;
        let outcome = fetch_scenario(fetcher, ticket).await;
        Ok(self.complete_load(outcome))
    }

    /// Drops the displayed scenario and any pending request.
    pub fn clear(&mut self) {
        if self.timer.cancel().is_some() {
            self.emit_event(CursorEvent::PlaybackStopped {
                reason: StopReason::ScenarioSwitch,
            });
        }
        self.active = None;
        self.pending_load = None;
    }

    fn build_loaded_scenario(&self, ticket: &LoadTicket, raw: &str) -> LensResult<LoadedScenario> {
        let dataset = ScenarioDataset::from_json_str(raw)?;
        let analysis = analyze(&dataset, self.config.analysis_options())?;
        let markers = build_timeline_markers(&dataset, &analysis, self.config.marker_placement)?;
        let summary = LeadTimeSummary::from_analysis(&analysis);

        let mut cursor = TimeCursor::new(dataset.len(), self.config.base_tick_period())?;
        cursor.set_speed(self.speed_factor).map_err(|err| {
            LensError::InvalidConfig(format!("stored speed factor rejected: {err}"))
        })?;

        Ok(LoadedScenario {
            id: ticket.scenario_id.clone(),
            dataset: Arc::new(dataset),
            analysis: Arc::new(analysis),
            markers,
            summary,
            cursor,
        })
    }
}

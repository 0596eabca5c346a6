use std::sync::Arc;

use crate::core::{ScenarioAnalysis, ScenarioCatalog, ScenarioDataset};
use crate::error::{LensError, LensResult};
use crate::extensions::{CursorObserver, LeadTimeSummary, TimelineMarker};
use crate::playback::{PlaybackTimer, TimeCursor, TimerSchedule};

use super::{LensConfig, LoadTicket};

/// A scenario that finished loading, with everything derived from it.
///
/// Replaced as a whole on the next successful load.
#[derive(Debug, Clone)]
pub struct LoadedScenario {
    pub(super) id: String,
    pub(super) dataset: Arc<ScenarioDataset>,
    pub(super) analysis: Arc<ScenarioAnalysis>,
    pub(super) markers: Vec<TimelineMarker>,
    pub(super) summary: LeadTimeSummary,
    pub(super) cursor: TimeCursor,
}

impl LoadedScenario {
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn dataset(&self) -> &Arc<ScenarioDataset> {
        &self.dataset
    }

    #[must_use]
    pub fn analysis(&self) -> &Arc<ScenarioAnalysis> {
        &self.analysis
    }

    #[must_use]
    pub fn markers(&self) -> &[TimelineMarker] {
        &self.markers
    }

    #[must_use]
    pub fn summary(&self) -> &LeadTimeSummary {
        &self.summary
    }

    #[must_use]
    pub fn cursor(&self) -> TimeCursor {
        self.cursor
    }
}

/// Explicit owned viewer state: active scenario, cursor, timer, observers.
///
/// All mutation goes through `&mut self`, so a single logical operation owns
/// the state at a time.
pub struct ScenarioSession {
    pub(super) config: LensConfig,
    pub(super) catalog: ScenarioCatalog,
    pub(super) active: Option<LoadedScenario>,
    pub(super) timer: PlaybackTimer,
    pub(super) speed_factor: f64,
    pub(super) load_generation: u64,
    pub(super) pending_load: Option<LoadTicket>,
    pub(super) last_load_error: Option<LensError>,
    pub(super) observers: Vec<Box<dyn CursorObserver>>,
}

impl ScenarioSession {
    pub fn new(catalog: ScenarioCatalog, config: LensConfig) -> LensResult<Self> {
        let config = config.validate()?;
        Ok(Self {
            config,
            catalog,
            active: None,
            timer: PlaybackTimer::default(),
            speed_factor: config.initial_speed_factor,
            load_generation: 0,
            pending_load: None,
            last_load_error: None,
            observers: Vec::new(),
        })
    }

    #[must_use]
    pub fn config(&self) -> LensConfig {
        self.config
    }

    #[must_use]
    pub fn catalog(&self) -> &ScenarioCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn active(&self) -> Option<&LoadedScenario> {
        self.active.as_ref()
    }

    #[must_use]
    pub fn dataset(&self) -> Option<&Arc<ScenarioDataset>> {
        self.active.as_ref().map(LoadedScenario::dataset)
    }

    #[must_use]
    pub fn analysis(&self) -> Option<&Arc<ScenarioAnalysis>> {
        self.active.as_ref().map(LoadedScenario::analysis)
    }

    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        self.active.as_ref().map(|active| active.cursor.index())
    }

    #[must_use]
    pub fn current_time(&self) -> Option<f64> {
        self.active
            .as_ref()
            .and_then(|active| active.dataset.time_at(active.cursor.index()))
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.active
            .as_ref()
            .is_some_and(|active| active.cursor.is_playing())
    }

    #[must_use]
    pub fn speed_factor(&self) -> f64 {
        self.speed_factor
    }

    /// Schedule the host should currently be running, if any.
    #[must_use]
    pub fn timer_schedule(&self) -> Option<TimerSchedule> {
        self.timer.schedule()
    }

    /// Most recent load failure, cleared by the next successful load.
    #[must_use]
    pub fn last_load_error(&self) -> Option<&LensError> {
        self.last_load_error.as_ref()
    }

    #[must_use]
    pub fn pending_load(&self) -> Option<&LoadTicket> {
        self.pending_load.as_ref()
    }
}

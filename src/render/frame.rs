use serde::{Deserialize, Serialize};

use crate::core::{
    BODY_COUNT, CrossingDirection, ScenarioAnalysis, ScenarioDataset, SignalName, Vec3,
};
use crate::error::{LensError, LensResult};
use crate::extensions::TimelineMarker;

/// One body as drawn by the spatial view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyView {
    pub mass: f64,
    pub position: Vec3,
    /// Oldest first, ending with `position`.
    pub trail: Vec<Vec3>,
}

/// Spatial view input for one cursor index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpatialFrame {
    pub index: usize,
    pub time: f64,
    pub bodies: Vec<BodyView>,
    /// Cursor time has reached the ejection instant.
    pub ejected: bool,
}

impl SpatialFrame {
    pub fn build(dataset: &ScenarioDataset, index: usize, trail_length: usize) -> LensResult<Self> {
        let time = dataset.time_at(index).ok_or_else(|| {
            LensError::InvalidControlInput(format!(
                "frame index {index} outside dataset of {} samples",
                dataset.len()
            ))
        })?;
        let positions = dataset.positions();
        let trail_start = (index + 1).saturating_sub(trail_length.max(1));
        let window = &positions[trail_start..=index];

        let masses = dataset.masses();
        let bodies = (0..BODY_COUNT)
            .map(|body| BodyView {
                mass: masses[body],
                position: positions[index][body],
                trail: window.iter().map(|sample| sample[body]).collect(),
            })
            .collect();

        Ok(Self {
            index,
            time,
            bodies,
            ejected: time >= dataset.ejection_time(),
        })
    }
}

/// Cursor readout for one diagnostic signal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalReadout {
    pub signal: SignalName,
    pub value: f64,
    pub threshold: Option<f64>,
    pub direction: Option<CrossingDirection>,
    /// Value at the cursor sits inside the warning region.
    pub warning_active: bool,
    /// The first crossing lies at or before the cursor.
    pub crossed: bool,
}

/// Multi-signal chart input for one cursor index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalChartFrame {
    pub index: usize,
    pub cursor_time: f64,
    pub time_range: (f64, f64),
    pub ejection_time: f64,
    pub readouts: Vec<SignalReadout>,
    pub markers: Vec<TimelineMarker>,
}

impl SignalChartFrame {
    pub fn build(
        dataset: &ScenarioDataset,
        analysis: &ScenarioAnalysis,
        markers: &[TimelineMarker],
        index: usize,
    ) -> LensResult<Self> {
        let cursor_time = dataset.time_at(index).ok_or_else(|| {
            LensError::InvalidControlInput(format!(
                "frame index {index} outside dataset of {} samples",
                dataset.len()
            ))
        })?;

        let readouts = SignalName::ALL
            .into_iter()
            .map(|signal| {
                let value = dataset.signal(signal)[index];
                let entry = analysis.signal(signal);
                let threshold = entry.map(|entry| entry.threshold);
                let direction = entry.map(|entry| entry.direction);
                SignalReadout {
                    signal,
                    value,
                    threshold,
                    direction,
                    warning_active: entry
                        .is_some_and(|entry| entry.direction.is_past(value, entry.threshold)),
                    crossed: entry
                        .and_then(|entry| entry.crossing.index())
                        .is_some_and(|crossing| crossing <= index),
                }
            })
            .collect();

        let time = dataset.time();
        Ok(Self {
            index,
            cursor_time,
            time_range: (time[0], time[time.len() - 1]),
            ejection_time: dataset.ejection_time(),
            readouts,
            markers: markers.to_vec(),
        })
    }

    #[must_use]
    pub fn readout(&self, signal: SignalName) -> Option<&SignalReadout> {
        self.readouts.iter().find(|readout| readout.signal == signal)
    }
}

/// Everything both views need for one draw pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewFrame {
    pub spatial: SpatialFrame,
    pub chart: SignalChartFrame,
}

impl ViewFrame {
    /// Checks that both halves describe the same cursor sample.
    pub fn validate(&self) -> LensResult<()> {
        if self.spatial.index != self.chart.index {
            return Err(LensError::InvalidControlInput(format!(
                "spatial index {} and chart index {} diverged",
                self.spatial.index, self.chart.index
            )));
        }
        if self.spatial.bodies.len() != BODY_COUNT {
            return Err(LensError::InvalidControlInput(format!(
                "spatial frame carries {} bodies",
                self.spatial.bodies.len()
            )));
        }
        Ok(())
    }
}

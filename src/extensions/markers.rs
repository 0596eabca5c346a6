use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::{Crossing, LeadTime, ScenarioAnalysis, ScenarioDataset, SignalName};
use crate::error::{LensError, LensResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkerKind {
    /// First threshold crossing of a diagnostic signal.
    Crossing,
    /// Known ejection instant.
    Ejection,
}

/// Chart annotation anchored on the shared time axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineMarker {
    pub id: String,
    pub kind: MarkerKind,
    pub signal: Option<SignalName>,
    pub time: f64,
    pub index: usize,
    pub text: Option<String>,
    pub lead_time: Option<LeadTime>,
    pub lane: usize,
}

impl TimelineMarker {
    #[must_use]
    pub fn new(id: impl Into<String>, kind: MarkerKind, time: f64, index: usize) -> Self {
        Self {
            id: id.into(),
            kind,
            signal: None,
            time,
            index,
            text: None,
            lead_time: None,
            lane: 0,
        }
    }

    #[must_use]
    pub fn with_signal(mut self, signal: SignalName) -> Self {
        self.signal = Some(signal);
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    #[must_use]
    pub fn with_lead_time(mut self, lead_time: LeadTime) -> Self {
        self.lead_time = Some(lead_time);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkerPlacementConfig {
    /// Minimum separation inside one lane, as a fraction of the dataset span.
    pub min_gap_ratio: f64,
}

impl Default for MarkerPlacementConfig {
    fn default() -> Self {
        Self {
            min_gap_ratio: 0.02,
        }
    }
}

impl MarkerPlacementConfig {
    fn validate(self) -> LensResult<Self> {
        if !self.min_gap_ratio.is_finite() || self.min_gap_ratio < 0.0 {
            return Err(LensError::InvalidConfig(
                "marker `min_gap_ratio` must be finite and >= 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Builds crossing and ejection markers with deterministic lanes.
///
/// Order is stable by time, then ejection after crossings, then id. Signals
/// that never crossed get no marker.
pub fn build_timeline_markers(
    dataset: &ScenarioDataset,
    analysis: &ScenarioAnalysis,
    config: MarkerPlacementConfig,
) -> LensResult<Vec<TimelineMarker>> {
    let config = config.validate()?;

    let mut markers = Vec::with_capacity(SignalName::THRESHOLDED.len() + 1);
    for entry in analysis.iter() {
        let Crossing::At { index, time } = entry.crossing else {
            continue;
        };
        markers.push(
            TimelineMarker::new(
                format!("crossing-{}", entry.signal),
                MarkerKind::Crossing,
                time,
                index,
            )
            .with_signal(entry.signal)
            .with_text(format!("{} crosses", entry.signal))
            .with_lead_time(entry.lead_time),
        );
    }

    let ejection_time = dataset.ejection_time();
    markers.push(
        TimelineMarker::new(
            "ejection",
            MarkerKind::Ejection,
            ejection_time,
            dataset.index_at_or_after(ejection_time),
        )
        .with_text("ejection"),
    );

    markers.sort_by(|a, b| {
        OrderedFloat(a.time)
            .cmp(&OrderedFloat(b.time))
            .then_with(|| kind_rank(a.kind).cmp(&kind_rank(b.kind)))
            .then_with(|| a.id.cmp(&b.id))
    });

    let time = dataset.time();
    let span = time[time.len() - 1] - time[0];
    let min_gap = span * config.min_gap_ratio;
    let mut lane_last_time = Vec::<f64>::new();
    for marker in &mut markers {
        marker.lane = allocate_lane(&mut lane_last_time, marker.time, min_gap);
    }

    Ok(markers)
}

fn kind_rank(kind: MarkerKind) -> u8 {
    match kind {
        MarkerKind::Crossing => 0,
        MarkerKind::Ejection => 1,
    }
}

fn allocate_lane(last_time: &mut Vec<f64>, time: f64, min_gap: f64) -> usize {
    for (lane, lane_last_time) in last_time.iter_mut().enumerate() {
        if time > *lane_last_time + min_gap {
            *lane_last_time = time;
            return lane;
        }
    }
    last_time.push(time);
    last_time.len() - 1
}

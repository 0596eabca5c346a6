use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::crossing::{Crossing, LeadTime, first_crossing};
use crate::core::dataset::ScenarioDataset;
use crate::core::types::{CrossingDirection, SignalDirections, SignalName};
use crate::error::{LensError, LensResult};

/// Tuning for one analysis pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalysisOptions {
    pub directions: SignalDirections,
    /// Absolute tolerance when comparing artifact crossings with derived ones.
    pub crossing_tolerance: f64,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            directions: SignalDirections::default(),
            crossing_tolerance: 1e-9,
        }
    }
}

/// Agreement between the artifact's precomputed crossing and the derived one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CrossingCheck {
    Consistent,
    Mismatch { precomputed: f64, derived: f64 },
    /// Artifact claims a crossing the samples never reach.
    MissingDerived { precomputed: f64 },
    /// Artifact ships no value; the derived one stands alone.
    NotPrecomputed { derived: Option<f64> },
}

impl CrossingCheck {
    #[must_use]
    pub fn is_integrity_issue(self) -> bool {
        matches!(self, Self::Mismatch { .. } | Self::MissingDerived { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalAnalysis {
    pub signal: SignalName,
    pub threshold: f64,
    pub direction: CrossingDirection,
    pub crossing: Crossing,
    pub lead_time: LeadTime,
    pub check: CrossingCheck,
}

/// Per-scenario crossing and lead-time facts, computed once after load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioAnalysis {
    ejection_time: f64,
    signals: IndexMap<SignalName, SignalAnalysis>,
}

impl ScenarioAnalysis {
    #[must_use]
    pub fn ejection_time(&self) -> f64 {
        self.ejection_time
    }

    #[must_use]
    pub fn signal(&self, signal: SignalName) -> Option<&SignalAnalysis> {
        self.signals.get(&signal)
    }

    #[must_use]
    pub fn crossing(&self, signal: SignalName) -> Crossing {
        self.signal(signal)
            .map_or(Crossing::NotCrossed, |entry| entry.crossing)
    }

    #[must_use]
    pub fn lead_time(&self, signal: SignalName) -> LeadTime {
        self.signal(signal)
            .map_or(LeadTime::NoWarning, |entry| entry.lead_time)
    }

    /// Entries in threshold order (`Z`, `dIdt`, `Dmin`, `Vmax`).
    pub fn iter(&self) -> impl Iterator<Item = &SignalAnalysis> {
        self.signals.values()
    }

    /// Signal with the largest numeric lead time. Ties keep the earlier signal.
    #[must_use]
    pub fn earliest_warning(&self) -> Option<&SignalAnalysis> {
        self.signals
            .values()
            .filter_map(|entry| entry.lead_time.percent().map(|lead| (entry, lead)))
            .fold(None::<(&SignalAnalysis, f64)>, |best, (entry, lead)| match best {
                Some((_, best_lead)) if OrderedFloat(lead) <= OrderedFloat(best_lead) => best,
                _ => Some((entry, lead)),
            })
            .map(|(entry, _)| entry)
    }

    #[must_use]
    pub fn has_integrity_issues(&self) -> bool {
        self.signals
            .values()
            .any(|entry| entry.check.is_integrity_issue())
    }
}

/// Derives first crossings and lead times for every thresholded signal.
///
/// The samples are authoritative; precomputed crossings in the artifact are
/// only cross-checked and reported through [`CrossingCheck`].
pub fn analyze(dataset: &ScenarioDataset, options: AnalysisOptions) -> LensResult<ScenarioAnalysis> {
    if !options.crossing_tolerance.is_finite() || options.crossing_tolerance < 0.0 {
        return Err(LensError::InvalidAnalysisInput(
            "crossing tolerance must be finite and >= 0".to_owned(),
        ));
    }

    let ejection_time = dataset.ejection_time();
    let mut signals = IndexMap::with_capacity(SignalName::THRESHOLDED.len());
    for signal in SignalName::THRESHOLDED {
        let (Some(threshold), Some(direction)) = (
            dataset.threshold(signal),
            options.directions.direction(signal),
        ) else {
            continue;
        };

        let crossing = first_crossing(dataset.time(), dataset.signal(signal), threshold, direction);
        let lead_time = LeadTime::from_crossing(crossing, ejection_time)?;
        let check = cross_check(
            dataset.precomputed_crossing(signal),
            crossing,
            options.crossing_tolerance,
        );
        if check.is_integrity_issue() {
            warn!(
                scenario = dataset.name(),
                signal = %signal,
                ?check,
                "precomputed crossing disagrees with samples"
            );
        }
        debug!(
            signal = %signal,
            threshold,
            ?direction,
            ?crossing,
            ?lead_time,
            "analyzed signal"
        );

        signals.insert(
            signal,
            SignalAnalysis {
                signal,
                threshold,
                direction,
                crossing,
                lead_time,
                check,
            },
        );
    }

    Ok(ScenarioAnalysis {
        ejection_time,
        signals,
    })
}

fn cross_check(precomputed: Option<f64>, derived: Crossing, tolerance: f64) -> CrossingCheck {
    match (precomputed, derived.time()) {
        (None, derived) => CrossingCheck::NotPrecomputed { derived },
        (Some(precomputed), None) => CrossingCheck::MissingDerived { precomputed },
        (Some(precomputed), Some(derived)) => {
            if (precomputed - derived).abs() <= tolerance {
                CrossingCheck::Consistent
            } else {
                CrossingCheck::Mismatch {
                    precomputed,
                    derived,
                }
            }
        }
    }
}

use serde::{Deserialize, Serialize};

use crate::core::types::CrossingDirection;
use crate::error::{LensError, LensResult};

/// Outcome of a first-crossing scan.
///
/// `NotCrossed` is a valid result: the signal gave no warning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Crossing {
    At { index: usize, time: f64 },
    NotCrossed,
}

impl Crossing {
    #[must_use]
    pub fn time(self) -> Option<f64> {
        match self {
            Self::At { time, .. } => Some(time),
            Self::NotCrossed => None,
        }
    }

    #[must_use]
    pub fn index(self) -> Option<usize> {
        match self {
            Self::At { index, .. } => Some(index),
            Self::NotCrossed => None,
        }
    }

    #[must_use]
    pub fn is_crossed(self) -> bool {
        matches!(self, Self::At { .. })
    }
}

/// Finds the first sample that enters the warning region.
///
/// For `Rising`, index `i` qualifies when `values[i] >= threshold` and either
/// `i == 0` or `values[i - 1] < threshold`; `Falling` mirrors it. Since every
/// earlier sample was outside the region, the first sample inside it always
/// qualifies, including sample 0. `time` and `values` are expected to be
/// aligned; samples past the shorter of the two are ignored.
#[must_use]
pub fn first_crossing(
    time: &[f64],
    values: &[f64],
    threshold: f64,
    direction: CrossingDirection,
) -> Crossing {
    time.iter()
        .zip(values)
        .position(|(_, &value)| direction.is_past(value, threshold))
        .map_or(Crossing::NotCrossed, |index| Crossing::At {
            index,
            time: time[index],
        })
}

/// Percentage of the ejection time that elapses after the crossing.
///
/// `(ejection_time - crossing_time) / ejection_time * 100`.
pub fn lead_time(crossing_time: f64, ejection_time: f64) -> LensResult<f64> {
    if !crossing_time.is_finite() {
        return Err(LensError::InvalidAnalysisInput(
            "crossing time must be finite".to_owned(),
        ));
    }
    if !ejection_time.is_finite() || ejection_time <= 0.0 {
        return Err(LensError::InvalidAnalysisInput(format!(
            "ejection time must be finite and > 0, got {ejection_time}"
        )));
    }
    Ok((ejection_time - crossing_time) / ejection_time * 100.0)
}

/// Lead time as displayed: either a percentage or "no warning given".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum LeadTime {
    Percent(f64),
    NoWarning,
}

impl LeadTime {
    pub fn from_crossing(crossing: Crossing, ejection_time: f64) -> LensResult<Self> {
        match crossing {
            Crossing::At { time, .. } => lead_time(time, ejection_time).map(Self::Percent),
            Crossing::NotCrossed => Ok(Self::NoWarning),
        }
    }

    #[must_use]
    pub fn percent(self) -> Option<f64> {
        match self {
            Self::Percent(value) => Some(value),
            Self::NoWarning => None,
        }
    }
}

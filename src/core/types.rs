use std::fmt;

use serde::{Deserialize, Serialize};

/// Dimensionless 3-vector. Units and frame are owned by the data generator.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f64; 3]", into = "[f64; 3]")]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    #[must_use]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

impl From<[f64; 3]> for Vec3 {
    fn from(value: [f64; 3]) -> Self {
        Self::new(value[0], value[1], value[2])
    }
}

impl From<Vec3> for [f64; 3] {
    fn from(value: Vec3) -> Self {
        [value.x, value.y, value.z]
    }
}

/// One sample of the three bodies, indexed by body.
pub type BodyTriple = [Vec3; 3];

pub const BODY_COUNT: usize = 3;

/// Diagnostic signals carried by every dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SignalName {
    #[serde(rename = "I")]
    I,
    #[serde(rename = "dIdt")]
    DIdt,
    #[serde(rename = "Z")]
    Z,
    #[serde(rename = "Dmin")]
    Dmin,
    #[serde(rename = "Vmax")]
    Vmax,
}

impl SignalName {
    pub const ALL: [SignalName; 5] = [
        SignalName::I,
        SignalName::DIdt,
        SignalName::Z,
        SignalName::Dmin,
        SignalName::Vmax,
    ];

    /// Signals that carry a threshold and a first-crossing time.
    pub const THRESHOLDED: [SignalName; 4] = [
        SignalName::Z,
        SignalName::DIdt,
        SignalName::Dmin,
        SignalName::Vmax,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::I => "I",
            Self::DIdt => "dIdt",
            Self::Z => "Z",
            Self::Dmin => "Dmin",
            Self::Vmax => "Vmax",
        }
    }

    #[must_use]
    pub fn is_thresholded(self) -> bool {
        !matches!(self, Self::I)
    }
}

impl fmt::Display for SignalName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which side of the threshold counts as the warning condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrossingDirection {
    /// Warning once the value reaches or exceeds the threshold.
    Rising,
    /// Warning once the value drops to or below the threshold.
    Falling,
}

impl CrossingDirection {
    /// Returns `true` when `value` sits inside the warning region.
    #[must_use]
    pub fn is_past(self, value: f64, threshold: f64) -> bool {
        match self {
            Self::Rising => value >= threshold,
            Self::Falling => value <= threshold,
        }
    }
}

/// Crossing direction per thresholded signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalDirections {
    #[serde(rename = "Z")]
    pub z: CrossingDirection,
    #[serde(rename = "dIdt")]
    pub d_i_dt: CrossingDirection,
    #[serde(rename = "Dmin")]
    pub d_min: CrossingDirection,
    #[serde(rename = "Vmax")]
    pub v_max: CrossingDirection,
}

impl Default for SignalDirections {
    fn default() -> Self {
        Self {
            z: CrossingDirection::Rising,
            d_i_dt: CrossingDirection::Rising,
            d_min: CrossingDirection::Falling,
            v_max: CrossingDirection::Rising,
        }
    }
}

impl SignalDirections {
    /// Direction for `signal`. `I` has no threshold and reports `None`.
    #[must_use]
    pub fn direction(self, signal: SignalName) -> Option<CrossingDirection> {
        match signal {
            SignalName::I => None,
            SignalName::Z => Some(self.z),
            SignalName::DIdt => Some(self.d_i_dt),
            SignalName::Dmin => Some(self.d_min),
            SignalName::Vmax => Some(self.v_max),
        }
    }
}

/// Named dataset rule reported by load-time validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatasetInvariant {
    EmptyTime,
    LengthMismatch,
    NonIncreasingTime,
    EjectionTimeOutOfRange,
    NonPositiveEjectionTime,
    MissingSignal,
    MissingThreshold,
    InvalidMasses,
    NonFiniteValue,
}

impl fmt::Display for DatasetInvariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::EmptyTime => "empty time axis",
            Self::LengthMismatch => "length mismatch",
            Self::NonIncreasingTime => "non-increasing time",
            Self::EjectionTimeOutOfRange => "ejection time out of range",
            Self::NonPositiveEjectionTime => "non-positive ejection time",
            Self::MissingSignal => "missing signal",
            Self::MissingThreshold => "missing threshold",
            Self::InvalidMasses => "invalid masses",
            Self::NonFiniteValue => "non-finite value",
        };
        f.write_str(label)
    }
}

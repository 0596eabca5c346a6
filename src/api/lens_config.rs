use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::{AnalysisOptions, SignalDirections};
use crate::error::{LensError, LensResult};
use crate::extensions::MarkerPlacementConfig;

/// Public session bootstrap configuration.
///
/// Serializable so hosts can persist/load viewer setup without inventing
/// their own format. Missing fields fall back to defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LensConfig {
    /// Wall-clock period of one tick at speed factor 1.
    #[serde(default = "default_base_tick_period_ms")]
    pub base_tick_period_ms: u64,
    #[serde(default = "default_initial_speed_factor")]
    pub initial_speed_factor: f64,
    #[serde(default)]
    pub signal_directions: SignalDirections,
    #[serde(default = "default_crossing_tolerance")]
    pub crossing_tolerance: f64,
    /// Samples of history drawn behind each body, including the current one.
    #[serde(default = "default_trail_length")]
    pub trail_length: usize,
    #[serde(default)]
    pub marker_placement: MarkerPlacementConfig,
}

impl Default for LensConfig {
    fn default() -> Self {
        Self {
            base_tick_period_ms: default_base_tick_period_ms(),
            initial_speed_factor: default_initial_speed_factor(),
            signal_directions: SignalDirections::default(),
            crossing_tolerance: default_crossing_tolerance(),
            trail_length: default_trail_length(),
            marker_placement: MarkerPlacementConfig::default(),
        }
    }
}

impl LensConfig {
    #[must_use]
    pub fn with_base_tick_period_ms(mut self, period_ms: u64) -> Self {
        self.base_tick_period_ms = period_ms;
        self
    }

    #[must_use]
    pub fn with_signal_directions(mut self, directions: SignalDirections) -> Self {
        self.signal_directions = directions;
        self
    }

    #[must_use]
    pub fn with_trail_length(mut self, trail_length: usize) -> Self {
        self.trail_length = trail_length;
        self
    }

    #[must_use]
    pub fn base_tick_period(self) -> Duration {
        Duration::from_millis(self.base_tick_period_ms)
    }

    #[must_use]
    pub fn analysis_options(self) -> AnalysisOptions {
        AnalysisOptions {
            directions: self.signal_directions,
            crossing_tolerance: self.crossing_tolerance,
        }
    }

    pub fn validate(self) -> LensResult<Self> {
        if self.base_tick_period_ms == 0 {
            return Err(LensError::InvalidConfig(
                "`base_tick_period_ms` must be > 0".to_owned(),
            ));
        }
        if !self.initial_speed_factor.is_finite() || self.initial_speed_factor <= 0.0 {
            return Err(LensError::InvalidConfig(
                "`initial_speed_factor` must be finite and > 0".to_owned(),
            ));
        }
        if !self.crossing_tolerance.is_finite() || self.crossing_tolerance < 0.0 {
            return Err(LensError::InvalidConfig(
                "`crossing_tolerance` must be finite and >= 0".to_owned(),
            ));
        }
        if self.trail_length == 0 {
            return Err(LensError::InvalidConfig(
                "`trail_length` must be >= 1".to_owned(),
            ));
        }
        let marker = self.marker_placement.min_gap_ratio;
        if !marker.is_finite() || marker < 0.0 {
            return Err(LensError::InvalidConfig(
                "marker `min_gap_ratio` must be finite and >= 0".to_owned(),
            ));
        }
        Ok(self)
    }

    pub fn to_json_pretty(self) -> LensResult<String> {
        serde_json::to_string_pretty(&self)
            .map_err(|e| LensError::InvalidConfig(format!("failed to serialize config: {e}")))
    }

    pub fn from_json_str(input: &str) -> LensResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| LensError::InvalidConfig(format!("failed to parse config: {e}")))?;
        config.validate()
    }
}

fn default_base_tick_period_ms() -> u64 {
    100
}

fn default_initial_speed_factor() -> f64 {
    1.0
}

fn default_crossing_tolerance() -> f64 {
    1e-9
}

fn default_trail_length() -> usize {
    200
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::LensConfig;
    use crate::core::CrossingDirection;

    #[test]
    fn empty_json_yields_defaults() {
        let config = LensConfig::from_json_str("{}").expect("config");
        assert_eq!(config, LensConfig::default());
        assert_eq!(config.base_tick_period(), Duration::from_millis(100));
        assert_eq!(
            config.signal_directions.d_min,
            CrossingDirection::Falling
        );
    }

    #[test]
    fn zero_trail_is_rejected() {
        let err = LensConfig::from_json_str(r#"{"trail_length": 0}"#).expect_err("must fail");
        assert!(err.to_string().contains("trail_length"));
    }

    #[test]
    fn json_round_trip_keeps_overrides() {
        let config = LensConfig::default()
            .with_base_tick_period_ms(40)
            .with_trail_length(12);
        let json = config.to_json_pretty().expect("serialize");
        assert_eq!(LensConfig::from_json_str(&json).expect("parse"), config);
    }
}

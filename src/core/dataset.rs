use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::types::{BODY_COUNT, BodyTriple, DatasetInvariant, SignalName, Vec3};
use crate::error::{LensError, LensResult};

/// Raw artifact document as emitted by the offline generator.
///
/// Nothing here is trusted; [`ScenarioDataset::from_artifact`] is the only way
/// to obtain a dataset downstream code may rely on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetArtifact {
    pub scenario: String,
    pub masses: Vec<f64>,
    pub time: Vec<f64>,
    pub positions: Vec<Vec<Vec3>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub velocities: Option<Vec<Vec<Vec3>>>,
    pub scalars: IndexMap<String, Vec<f64>>,
    pub ejection_time: f64,
    #[serde(default)]
    pub first_crossing_times: IndexMap<String, Option<f64>>,
    pub thresholds: IndexMap<String, f64>,
    #[serde(default, alias = "isPlaceholder")]
    pub placeholder: bool,
}

impl DatasetArtifact {
    pub fn from_json_str(input: &str) -> LensResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| LensError::Load(format!("failed to parse dataset artifact: {e}")))
    }
}

/// Validated, immutable scenario bundle.
///
/// Every per-sample sequence shares the length of `time`, `time` is strictly
/// increasing, and `ejection_time` lies inside `[time[0], time[N-1]]` and is
/// strictly positive.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioDataset {
    name: String,
    masses: [f64; BODY_COUNT],
    time: Vec<f64>,
    positions: Vec<BodyTriple>,
    velocities: Option<Vec<BodyTriple>>,
    scalars: IndexMap<SignalName, Vec<f64>>,
    ejection_time: f64,
    thresholds: IndexMap<SignalName, f64>,
    precomputed_crossings: IndexMap<SignalName, f64>,
    placeholder: bool,
}

impl ScenarioDataset {
    /// Parses and validates a JSON artifact.
    ///
    /// Parse failures surface as [`LensError::Load`]; invariant violations as
    /// [`LensError::MalformedDataset`].
    pub fn from_json_str(input: &str) -> LensResult<Self> {
        Self::from_artifact(DatasetArtifact::from_json_str(input)?)
    }

    /// Validates every dataset invariant. All-or-nothing.
    pub fn from_artifact(artifact: DatasetArtifact) -> LensResult<Self> {
        let sample_count = validate_time(&artifact.time)?;
        let masses = validate_masses(&artifact.masses)?;
        let positions = validate_body_samples(&artifact.positions, sample_count, "positions")?;
        let velocities = artifact
            .velocities
            .as_ref()
            .map(|samples| validate_body_samples(samples, sample_count, "velocities"))
            .transpose()?;

        let mut scalars = IndexMap::with_capacity(SignalName::ALL.len());
        for signal in SignalName::ALL {
            let values = artifact.scalars.get(signal.as_str()).ok_or_else(|| {
                LensError::malformed(
                    DatasetInvariant::MissingSignal,
                    format!("scalars.{signal} is missing"),
                )
            })?;
            if values.len() != sample_count {
                return Err(LensError::malformed(
                    DatasetInvariant::LengthMismatch,
                    format!(
                        "scalars.{signal} has {} samples, time has {sample_count}",
                        values.len()
                    ),
                ));
            }
            if let Some(index) = values.iter().position(|value| !value.is_finite()) {
                return Err(LensError::malformed(
                    DatasetInvariant::NonFiniteValue,
                    format!("scalars.{signal}[{index}] must be finite"),
                ));
            }
            scalars.insert(signal, values.clone());
        }

        let mut thresholds = IndexMap::with_capacity(SignalName::THRESHOLDED.len());
        for signal in SignalName::THRESHOLDED {
            let threshold = *artifact.thresholds.get(signal.as_str()).ok_or_else(|| {
                LensError::malformed(
                    DatasetInvariant::MissingThreshold,
                    format!("thresholds.{signal} is missing"),
                )
            })?;
            if !threshold.is_finite() {
                return Err(LensError::malformed(
                    DatasetInvariant::NonFiniteValue,
                    format!("thresholds.{signal} must be finite"),
                ));
            }
            thresholds.insert(signal, threshold);
        }

        let ejection_time = validate_ejection_time(artifact.ejection_time, &artifact.time)?;

        let mut precomputed_crossings = IndexMap::new();
        for signal in SignalName::THRESHOLDED {
            match artifact.first_crossing_times.get(signal.as_str()) {
                Some(Some(time)) if time.is_finite() => {
                    precomputed_crossings.insert(signal, *time);
                }
                Some(Some(_)) => {
                    return Err(LensError::malformed(
                        DatasetInvariant::NonFiniteValue,
                        format!("firstCrossingTimes.{signal} must be finite"),
                    ));
                }
                Some(None) | None => {
                    trace!(signal = %signal, "no precomputed crossing time");
                }
            }
        }

        debug!(
            scenario = %artifact.scenario,
            sample_count,
            ejection_time,
            placeholder = artifact.placeholder,
            has_velocities = velocities.is_some(),
            "validated scenario dataset"
        );

        Ok(Self {
            name: artifact.scenario,
            masses,
            time: artifact.time,
            positions,
            velocities,
            scalars,
            ejection_time,
            thresholds,
            precomputed_crossings,
            placeholder: artifact.placeholder,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn masses(&self) -> [f64; BODY_COUNT] {
        self.masses
    }

    #[must_use]
    pub fn time(&self) -> &[f64] {
        &self.time
    }

    /// Number of samples. Always >= 1.
    #[must_use]
    pub fn len(&self) -> usize {
        self.time.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    #[must_use]
    pub fn last_index(&self) -> usize {
        self.time.len() - 1
    }

    #[must_use]
    pub fn time_at(&self, index: usize) -> Option<f64> {
        self.time.get(index).copied()
    }

    #[must_use]
    pub fn positions(&self) -> &[BodyTriple] {
        &self.positions
    }

    #[must_use]
    pub fn velocities(&self) -> Option<&[BodyTriple]> {
        self.velocities.as_deref()
    }

    /// Samples of `signal`, aligned index-for-index with [`Self::time`].
    #[must_use]
    pub fn signal(&self, signal: SignalName) -> &[f64] {
        self.scalars
            .get(&signal)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Threshold for `signal`; `None` for the unthresholded `I`.
    #[must_use]
    pub fn threshold(&self, signal: SignalName) -> Option<f64> {
        self.thresholds.get(&signal).copied()
    }

    #[must_use]
    pub fn ejection_time(&self) -> f64 {
        self.ejection_time
    }

    /// First-crossing time shipped inside the artifact, if any.
    #[must_use]
    pub fn precomputed_crossing(&self, signal: SignalName) -> Option<f64> {
        self.precomputed_crossings.get(&signal).copied()
    }

    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.placeholder
    }

    /// First sample index whose time is >= `time`, clamped to the last index.
    #[must_use]
    pub fn index_at_or_after(&self, time: f64) -> usize {
        self.time
            .partition_point(|sample| *sample < time)
            .min(self.last_index())
    }
}

fn validate_time(time: &[f64]) -> LensResult<usize> {
    if time.is_empty() {
        return Err(LensError::malformed(
            DatasetInvariant::EmptyTime,
            "time must contain at least one sample",
        ));
    }
    if let Some(index) = time.iter().position(|value| !value.is_finite()) {
        return Err(LensError::malformed(
            DatasetInvariant::NonFiniteValue,
            format!("time[{index}] must be finite"),
        ));
    }
    if let Some(index) = time.windows(2).position(|pair| pair[1] <= pair[0]) {
        return Err(LensError::malformed(
            DatasetInvariant::NonIncreasingTime,
            format!(
                "time[{}]={} does not exceed time[{index}]={}",
                index + 1,
                time[index + 1],
                time[index]
            ),
        ));
    }
    Ok(time.len())
}

fn validate_masses(masses: &[f64]) -> LensResult<[f64; BODY_COUNT]> {
    let masses: [f64; BODY_COUNT] = masses.try_into().map_err(|_| {
        LensError::malformed(
            DatasetInvariant::InvalidMasses,
            format!("expected {BODY_COUNT} masses, got {}", masses.len()),
        )
    })?;
    if masses.iter().any(|mass| !mass.is_finite() || *mass <= 0.0) {
        return Err(LensError::malformed(
            DatasetInvariant::InvalidMasses,
            "masses must be finite and > 0",
        ));
    }
    Ok(masses)
}

fn validate_body_samples(
    samples: &[Vec<Vec3>],
    sample_count: usize,
    field: &str,
) -> LensResult<Vec<BodyTriple>> {
    if samples.len() != sample_count {
        return Err(LensError::malformed(
            DatasetInvariant::LengthMismatch,
            format!(
                "{field} has {} samples, time has {sample_count}",
                samples.len()
            ),
        ));
    }

    let mut triples = Vec::with_capacity(samples.len());
    for (index, sample) in samples.iter().enumerate() {
        let triple: BodyTriple = sample.as_slice().try_into().map_err(|_| {
            LensError::malformed(
                DatasetInvariant::LengthMismatch,
                format!(
                    "{field}[{index}] has {} bodies, expected {BODY_COUNT}",
                    sample.len()
                ),
            )
        })?;
        if triple.iter().any(|body| !body.is_finite()) {
            return Err(LensError::malformed(
                DatasetInvariant::NonFiniteValue,
                format!("{field}[{index}] must be finite"),
            ));
        }
        triples.push(triple);
    }
    Ok(triples)
}

fn validate_ejection_time(ejection_time: f64, time: &[f64]) -> LensResult<f64> {
    if !ejection_time.is_finite() {
        return Err(LensError::malformed(
            DatasetInvariant::NonFiniteValue,
            "ejectionTime must be finite",
        ));
    }
    if ejection_time <= 0.0 {
        return Err(LensError::malformed(
            DatasetInvariant::NonPositiveEjectionTime,
            format!("ejectionTime must be > 0, got {ejection_time}"),
        ));
    }
    let (first, last) = (time[0], time[time.len() - 1]);
    if !(first..=last).contains(&ejection_time) {
        return Err(LensError::malformed(
            DatasetInvariant::EjectionTimeOutOfRange,
            format!("ejectionTime {ejection_time} outside [{first}, {last}]"),
        ));
    }
    Ok(ejection_time)
}

#[cfg(test)]
mod tests {
    use super::{DatasetArtifact, ScenarioDataset};
    use crate::core::types::{DatasetInvariant, SignalName};

    fn artifact() -> DatasetArtifact {
        let json = r#"{
            "scenario": "unit",
            "masses": [1.0, 1.0, 0.5],
            "time": [0.0, 1.0, 2.0],
            "positions": [
                [[0,0,0],[1,0,0],[0,1,0]],
                [[0,0,0],[1.5,0,0],[0,1,0]],
                [[0,0,0],[3,0,0],[0,1,0]]
            ],
            "scalars": {
                "I": [1, 2, 3], "dIdt": [0, 1, 2], "Z": [0, 0, 1],
                "Dmin": [1.0, 0.5, 0.2], "Vmax": [0.1, 0.2, 0.9]
            },
            "ejectionTime": 2.0,
            "firstCrossingTimes": {"Z": 2.0, "dIdt": null},
            "thresholds": {"Z": 1.0, "dIdt": 1.0, "Dmin": 0.5, "Vmax": 0.5}
        }"#;
        DatasetArtifact::from_json_str(json).expect("artifact")
    }

    #[test]
    fn optional_fields_default_when_absent() {
        let dataset = ScenarioDataset::from_artifact(artifact()).expect("dataset");
        assert!(!dataset.is_placeholder());
        assert!(dataset.velocities().is_none());
        assert_eq!(dataset.precomputed_crossing(SignalName::Z), Some(2.0));
        assert_eq!(dataset.precomputed_crossing(SignalName::DIdt), None);
        assert_eq!(dataset.precomputed_crossing(SignalName::Vmax), None);
        assert_eq!(dataset.threshold(SignalName::I), None);
    }

    #[test]
    fn body_count_mismatch_is_length_violation() {
        let mut raw = artifact();
        raw.positions[1].pop();
        let err = ScenarioDataset::from_artifact(raw).expect_err("two bodies must fail");
        assert_eq!(
            err.dataset_invariant(),
            Some(DatasetInvariant::LengthMismatch)
        );
    }

    #[test]
    fn index_at_or_after_clamps_to_last_sample() {
        let dataset = ScenarioDataset::from_artifact(artifact()).expect("dataset");
        assert_eq!(dataset.index_at_or_after(-1.0), 0);
        assert_eq!(dataset.index_at_or_after(0.5), 1);
        assert_eq!(dataset.index_at_or_after(1.0), 1);
        assert_eq!(dataset.index_at_or_after(9.0), 2);
    }
}

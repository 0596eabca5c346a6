use thiserror::Error;

use crate::core::DatasetInvariant;

pub type LensResult<T> = Result<T, LensError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LensError {
    /// A loaded artifact violates a dataset invariant.
    #[error("malformed dataset ({invariant}): {detail}")]
    MalformedDataset {
        invariant: DatasetInvariant,
        detail: String,
    },

    /// Transport or parse failure while fetching an artifact.
    #[error("failed to load scenario: {0}")]
    Load(String),

    #[error("unknown scenario id `{0}`")]
    UnknownScenario(String),

    /// Out-of-domain cursor control input. Valid UI controls never produce it.
    #[error("invalid control input: {0}")]
    InvalidControlInput(String),

    #[error("invalid analysis input: {0}")]
    InvalidAnalysisInput(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("invalid observer: {0}")]
    InvalidObserver(String),
}

impl LensError {
    pub(crate) fn malformed(invariant: DatasetInvariant, detail: impl Into<String>) -> Self {
        Self::MalformedDataset {
            invariant,
            detail: detail.into(),
        }
    }

    /// Returns the violated invariant for dataset errors.
    #[must_use]
    pub fn dataset_invariant(&self) -> Option<DatasetInvariant> {
        match self {
            Self::MalformedDataset { invariant, .. } => Some(*invariant),
            _ => None,
        }
    }
}

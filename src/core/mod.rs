pub mod analysis;
pub mod catalog;
pub mod crossing;
pub mod dataset;
pub mod types;

pub use analysis::{AnalysisOptions, CrossingCheck, ScenarioAnalysis, SignalAnalysis, analyze};
pub use catalog::{ScenarioCatalog, ScenarioEntry};
pub use crossing::{Crossing, LeadTime, first_crossing, lead_time};
pub use dataset::{DatasetArtifact, ScenarioDataset};
pub use types::{
    BODY_COUNT, BodyTriple, CrossingDirection, DatasetInvariant, SignalDirections, SignalName,
    Vec3,
};

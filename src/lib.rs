//! ejection-lens: lead-time analysis and synchronized playback for
//! precomputed three-body ejection scenarios.
//!
//! The crate validates scenario datasets, derives per-signal threshold
//! crossings and lead times, and owns the shared time cursor that keeps the
//! spatial view and the diagnostics chart in step. Drawing stays with the
//! host behind the `render::Renderer` contract.

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod playback;
pub mod render;
pub mod telemetry;

pub use api::{LensConfig, ScenarioSession};
pub use error::{LensError, LensResult};

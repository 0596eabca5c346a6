//! Host-facing session facade.
//!
//! `ScenarioSession` is split across files by concern: loading, playback,
//! observers and frame presentation each add an `impl` block.

mod frame_presenter;
mod lens_config;
mod load_controller;
mod observer_dispatch;
mod observer_registry;
mod playback_controller;
mod scenario_fetch;
mod session;

pub use lens_config::LensConfig;
pub use scenario_fetch::{DatasetFetcher, LoadOutcome, LoadStatus, LoadTicket, fetch_scenario};
pub use session::{LoadedScenario, ScenarioSession};

mod frame;
mod null_renderer;

pub use frame::{BodyView, SignalChartFrame, SignalReadout, SpatialFrame, ViewFrame};
pub use null_renderer::NullRenderer;

use crate::error::LensResult;

/// Contract implemented by any view backend.
///
/// Backends receive a fully materialized `ViewFrame` so drawing code stays
/// isolated from dataset and cursor logic.
pub trait Renderer {
    fn render(&mut self, frame: &ViewFrame) -> LensResult<()>;
}

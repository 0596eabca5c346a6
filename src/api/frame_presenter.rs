use tracing::trace;

use crate::error::{LensError, LensResult};
use crate::render::{Renderer, SignalChartFrame, SpatialFrame, ViewFrame};

use super::ScenarioSession;

impl ScenarioSession {
    /// Materializes both view inputs for the current cursor index.
    pub fn view_frame(&self) -> LensResult<ViewFrame> {
        let active = self.active.as_ref().ok_or_else(|| {
            LensError::InvalidControlInput("no scenario is loaded".to_owned())
        })?;
        let index = active.cursor.index();
        let spatial = SpatialFrame::build(&active.dataset, index, self.config.trail_length)?;
        let chart =
            SignalChartFrame::build(&active.dataset, &active.analysis, &active.markers, index)?;
        Ok(ViewFrame { spatial, chart })
    }

    /// Builds the current frame and hands it to `renderer`.
    pub fn present<R: Renderer>(&self, renderer: &mut R) -> LensResult<()> {
        let frame = self.view_frame()?;
        trace!(index = frame.spatial.index, "presenting frame");
        renderer.render(&frame)
    }
}

use crate::error::LensResult;
use crate::render::{Renderer, ViewFrame};

/// Headless renderer used by tests and non-graphical hosts.
///
/// It still validates frame content so tests catch diverged frames before a
/// real backend is attached.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames_rendered: usize,
    pub last_frame: Option<ViewFrame>,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &ViewFrame) -> LensResult<()> {
        frame.validate()?;
        self.frames_rendered += 1;
        self.last_frame = Some(frame.clone());
        Ok(())
    }
}

use crate::extensions::{CursorContext, CursorEvent};

use super::ScenarioSession;

impl ScenarioSession {
    pub(super) fn cursor_context(&self) -> Option<CursorContext> {
        let active = self.active.as_ref()?;
        let index = active.cursor.index();
        Some(CursorContext {
            index,
            time: active.dataset.time()[index],
            sample_count: active.dataset.len(),
            state: active.cursor.state(),
            speed_factor: active.cursor.speed_factor(),
        })
    }

    pub(super) fn emit_event(&mut self, event: CursorEvent) {
        let context = self.cursor_context();
        for observer in &mut self.observers {
            observer.on_event(&event, context);
        }
    }
}

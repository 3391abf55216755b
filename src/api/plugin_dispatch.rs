use crate::extensions::TimelineContext;

use super::{TimelineEngine, TimelineEvent};

impl TimelineEngine {
    pub(super) fn plugin_context(&self) -> TimelineContext {
        TimelineContext {
            track_width: self.grid.track_width(),
            year: self.year,
            deals_len: self.store.len(),
            drag_state: self.interaction.state(),
        }
    }

    pub(super) fn emit_plugin_event(&mut self, event: TimelineEvent) {
        if self.plugins.is_empty() {
            return;
        }
        let context = self.plugin_context();
        for plugin in &mut self.plugins {
            plugin.on_event(event, context);
        }
    }
}

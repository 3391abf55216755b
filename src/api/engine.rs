use tracing::debug;

use crate::core::{DealStore, MonthGrid};
use crate::error::TimelineResult;
use crate::extensions::TimelinePlugin;
use crate::interaction::{DragInteraction, DragState};

use super::TimelineEvent;

/// Main orchestration facade consumed by host applications.
///
/// `TimelineEngine` owns the deal store, the month grid and the gesture
/// state. Hosts feed it pointer events and read snapshots back.
pub struct TimelineEngine {
    pub(super) store: DealStore,
    pub(super) grid: MonthGrid,
    pub(super) year: i32,
    pub(super) interaction: DragInteraction,
    pub(super) plugins: Vec<Box<dyn TimelinePlugin>>,
}

impl TimelineEngine {
    #[must_use]
    pub fn grid(&self) -> MonthGrid {
        self.grid
    }

    #[must_use]
    pub fn track_width(&self) -> f64 {
        self.grid.track_width()
    }

    #[must_use]
    pub fn year(&self) -> i32 {
        self.year
    }

    #[must_use]
    pub fn store(&self) -> &DealStore {
        &self.store
    }

    #[must_use]
    pub fn drag_state(&self) -> DragState {
        self.interaction.state()
    }

    /// Applies a new track width after a host layout change.
    ///
    /// On error the previous grid stays active. An in-flight gesture keeps
    /// its last preview until the next pointer move.
    pub fn set_track_width(&mut self, track_width: f64) -> TimelineResult<()> {
        let grid = MonthGrid::new(track_width)?;
        if grid == self.grid {
            return Ok(());
        }
        debug!(track_width, "timeline track resized");
        self.grid = grid;
        self.emit_plugin_event(TimelineEvent::TrackResized { track_width });
        Ok(())
    }

    #[must_use]
    pub fn into_store(self) -> DealStore {
        self.store
    }
}

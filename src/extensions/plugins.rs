use serde::{Deserialize, Serialize};

use crate::core::{DealId, MonthRange};
use crate::interaction::{DragMode, DragState};

/// Read-only state snapshot passed to plugin hooks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimelineContext {
    pub track_width: f64,
    pub year: i32,
    pub deals_len: usize,
    pub drag_state: DragState,
}

/// Event stream exposed to plugins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TimelineEvent {
    DragStarted {
        deal_id: DealId,
        mode: DragMode,
    },
    /// Emitted only when the previewed month pair changes.
    DragPreviewed {
        deal_id: DealId,
        preview: MonthRange,
    },
    RangeCommitted {
        deal_id: DealId,
        range: MonthRange,
    },
    DragCancelled {
        deal_id: DealId,
    },
    /// Gesture ended without a commit because its deal was removed or edited
    /// mid-drag, or the release could not be stored.
    GestureDiscarded {
        deal_id: DealId,
    },
    DealEdited {
        deal_id: DealId,
    },
    DealsChanged {
        deals_len: usize,
    },
    TrackResized {
        track_width: f64,
    },
}

/// Extension hook interface for bounded custom logic.
///
/// Plugins observe events and read engine context without mutating the
/// deal store directly.
pub trait TimelinePlugin {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: TimelineEvent, context: TimelineContext);
}

use serde::{Deserialize, Serialize};

use crate::core::{DealId, MonthGrid, MonthRange};
use crate::error::TimelineResult;

/// Which part of a deal bar the pointer grabbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragMode {
    /// Bar body: shift the whole window, duration preserved.
    Move,
    /// Left handle: move the start month, never past the end.
    ResizeStart,
    /// Right handle: move the end month, never before the start.
    ResizeEnd,
}

/// In-flight gesture on one deal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragSession {
    pub deal_id: DealId,
    pub mode: DragMode,
    /// Range at pointer-down.
    pub origin: MonthRange,
    /// Latest proposed range; what the host renders until release.
    pub preview: MonthRange,
    /// Total horizontal displacement since pointer-down, in pixels.
    pub dx: f64,
}

impl DragSession {
    #[must_use]
    pub fn is_changed(&self) -> bool {
        self.preview != self.origin
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragSession),
}

impl DragState {
    #[must_use]
    pub fn session(&self) -> Option<&DragSession> {
        match self {
            Self::Idle => None,
            Self::Dragging(session) => Some(session),
        }
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging(_))
    }
}

/// Derives the proposed range for a drag displacement.
///
/// The grabbed edge is projected to pixels, displaced by `dx` and snapped
/// back to a month through the grid, then the per-mode clamp is applied.
pub fn propose_range(
    origin: MonthRange,
    mode: DragMode,
    dx: f64,
    grid: MonthGrid,
) -> TimelineResult<MonthRange> {
    let snap = |month: u8| grid.pixel_to_month(grid.month_to_pixel_offset(month) + dx);
    let proposed = match mode {
        DragMode::Move => {
            let target = snap(origin.start_month())?;
            origin.shifted(i32::from(target) - i32::from(origin.start_month()))
        }
        DragMode::ResizeStart => origin.with_start(snap(origin.start_month())?),
        DragMode::ResizeEnd => origin.with_end(snap(origin.end_month())?),
    };
    Ok(proposed)
}

/// Pointer gesture state machine: `Idle -> Dragging -> Idle`.
///
/// Holds no deal data; the engine feeds it origin ranges and applies the
/// session it hands back on release.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DragInteraction {
    state: DragState,
}

impl DragInteraction {
    #[must_use]
    pub fn state(&self) -> DragState {
        self.state
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.state.is_dragging()
    }

    /// Enters `Dragging`. Returns `false` when a gesture is already active.
    pub fn begin(&mut self, deal_id: DealId, mode: DragMode, origin: MonthRange) -> bool {
        if self.state.is_dragging() {
            return false;
        }
        self.state = DragState::Dragging(DragSession {
            deal_id,
            mode,
            origin,
            preview: origin,
            dx: 0.0,
        });
        true
    }

    /// Re-derives the preview for the new total displacement.
    ///
    /// Returns the session when the preview month pair changed, `None` when
    /// idle or when the move stayed within the same cells.
    pub fn update(&mut self, dx: f64, grid: MonthGrid) -> TimelineResult<Option<DragSession>> {
        let DragState::Dragging(session) = &mut self.state else {
            return Ok(None);
        };
        let proposed = propose_range(session.origin, session.mode, dx, grid)?;
        session.dx = dx;
        if proposed == session.preview {
            return Ok(None);
        }
        session.preview = proposed;
        Ok(Some(*session))
    }

    /// Leaves `Dragging`, handing back the session to commit.
    pub fn finish(&mut self) -> Option<DragSession> {
        match std::mem::take(&mut self.state) {
            DragState::Idle => None,
            DragState::Dragging(session) => Some(session),
        }
    }

    /// Leaves `Dragging` without a commit.
    pub fn cancel(&mut self) -> Option<DragSession> {
        self.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> MonthGrid {
        MonthGrid::new(1200.0).expect("valid grid")
    }

    fn range(start: i32, end: i32) -> MonthRange {
        MonthRange::new(start, end).expect("valid range")
    }

    #[test]
    fn resize_start_cannot_cross_end() {
        let proposed = propose_range(range(3, 5), DragMode::ResizeStart, 300.0, grid())
            .expect("propose");
        assert_eq!(proposed, range(5, 5));
    }

    #[test]
    fn resize_end_cannot_fall_below_start() {
        let proposed = propose_range(range(3, 5), DragMode::ResizeEnd, -500.0, grid())
            .expect("propose");
        assert_eq!(proposed, range(3, 3));
    }

    #[test]
    fn move_keeps_window_on_track() {
        let proposed =
            propose_range(range(0, 2), DragMode::Move, 1000.0, grid()).expect("propose");
        assert_eq!(proposed, range(9, 11));
        let proposed =
            propose_range(range(4, 6), DragMode::Move, -900.0, grid()).expect("propose");
        assert_eq!(proposed, range(0, 2));
    }

    #[test]
    fn update_is_noop_when_idle() {
        let mut interaction = DragInteraction::default();
        assert_eq!(interaction.update(120.0, grid()).expect("update"), None);
        assert_eq!(interaction.finish(), None);
    }

    #[test]
    fn second_begin_is_ignored() {
        let mut interaction = DragInteraction::default();
        assert!(interaction.begin(DealId(1), DragMode::Move, range(0, 1)));
        assert!(!interaction.begin(DealId(2), DragMode::ResizeEnd, range(4, 5)));
        let session = interaction.finish().expect("session");
        assert_eq!(session.deal_id, DealId(1));
        assert!(!interaction.is_dragging());
    }
}

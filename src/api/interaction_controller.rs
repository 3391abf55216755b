use tracing::{debug, trace, warn};

use crate::core::{DealId, MonthRange};
use crate::error::TimelineResult;
use crate::interaction::DragMode;
use crate::persistence::SaveRequest;

use super::validation::validate_pointer_dx;
use super::{TimelineEngine, TimelineEvent};

impl TimelineEngine {
    /// Starts a gesture on a deal bar.
    ///
    /// Returns `Ok(false)` when another gesture is already active; that
    /// pointer-down is ignored.
    pub fn pointer_down(&mut self, deal_id: DealId, mode: DragMode) -> TimelineResult<bool> {
        let origin = self.store.range(deal_id)?;
        if !self.interaction.begin(deal_id, mode, origin) {
            debug!(
                deal_id = deal_id.get(),
                "ignoring pointer down while another drag is active"
            );
            return Ok(false);
        }
        debug!(deal_id = deal_id.get(), ?mode, "drag started");
        self.emit_plugin_event(TimelineEvent::DragStarted { deal_id, mode });
        Ok(true)
    }

    /// Updates the preview for the total displacement `dx` since pointer-down.
    ///
    /// Never commits. Returns the new preview when the month pair changed.
    pub fn pointer_move(&mut self, dx: f64) -> TimelineResult<Option<MonthRange>> {
        let dx = validate_pointer_dx(dx)?;
        let Some(session) = self.interaction.update(dx, self.grid)? else {
            return Ok(None);
        };
        trace!(
            deal_id = session.deal_id.get(),
            dx,
            start = session.preview.start_month(),
            end = session.preview.end_month(),
            "drag preview"
        );
        self.emit_plugin_event(TimelineEvent::DragPreviewed {
            deal_id: session.deal_id,
            preview: session.preview,
        });
        Ok(Some(session.preview))
    }

    /// Ends the gesture and commits the preview exactly once.
    ///
    /// Returns the save request for the persistence shim, or `None` when no
    /// gesture was active or the commit failed. A failed commit is a
    /// discarded gesture: the store is left untouched.
    pub fn pointer_up(&mut self) -> Option<SaveRequest> {
        let session = self.interaction.finish()?;
        match self.store.commit_range(session.deal_id, session.preview) {
            Ok(()) => {
                debug!(
                    deal_id = session.deal_id.get(),
                    start = session.preview.start_month(),
                    end = session.preview.end_month(),
                    "drag committed"
                );
                self.emit_plugin_event(TimelineEvent::RangeCommitted {
                    deal_id: session.deal_id,
                    range: session.preview,
                });
                Some(SaveRequest {
                    deal_id: session.deal_id,
                    range: session.preview,
                })
            }
            Err(err) => {
                warn!(
                    deal_id = session.deal_id.get(),
                    error = %err,
                    "discarding drag gesture"
                );
                self.emit_plugin_event(TimelineEvent::GestureDiscarded {
                    deal_id: session.deal_id,
                });
                None
            }
        }
    }

    /// Aborts the gesture (e.g. focus loss) without committing.
    ///
    /// Returns `true` when a gesture was active.
    pub fn cancel_drag(&mut self) -> bool {
        let Some(session) = self.interaction.cancel() else {
            return false;
        };
        debug!(deal_id = session.deal_id.get(), "drag cancelled");
        self.emit_plugin_event(TimelineEvent::DragCancelled {
            deal_id: session.deal_id,
        });
        true
    }

    /// Ends the gesture on `deal_id`, if there is one, without committing.
    ///
    /// Used when the dragged deal changes under the pointer: its origin no
    /// longer matches the store, so the preview must not be written back.
    pub(super) fn discard_drag_on(&mut self, deal_id: DealId, reason: &'static str) {
        let targeted = self
            .interaction
            .state()
            .session()
            .is_some_and(|session| session.deal_id == deal_id);
        if !targeted || self.interaction.cancel().is_none() {
            return;
        }
        warn!(deal_id = deal_id.get(), reason, "discarding drag gesture");
        self.emit_plugin_event(TimelineEvent::GestureDiscarded { deal_id });
    }

    /// Range the host should draw for a deal: the preview while it is being
    /// dragged, the stored range otherwise.
    pub fn displayed_range(&self, deal_id: DealId) -> TimelineResult<MonthRange> {
        let stored = self.store.range(deal_id)?;
        Ok(self
            .interaction
            .state()
            .session()
            .filter(|session| session.deal_id == deal_id)
            .map_or(stored, |session| session.preview))
    }
}

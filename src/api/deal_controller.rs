use tracing::debug;

use crate::core::{Deal, DealEdit, DealId, DealStore, MonthRange, RangePolicy};
use crate::error::TimelineResult;

use super::{TimelineEngine, TimelineEvent};

impl TimelineEngine {
    pub fn deal(&self, deal_id: DealId) -> TimelineResult<&Deal> {
        self.store.deal(deal_id)
    }

    pub fn deals(&self) -> impl Iterator<Item = &Deal> {
        self.store.deals()
    }

    pub fn range(&self, deal_id: DealId) -> TimelineResult<MonthRange> {
        self.store.range(deal_id)
    }

    #[must_use]
    pub fn range_policy(&self) -> RangePolicy {
        self.store.range_policy()
    }

    pub fn set_range_policy(&mut self, policy: RangePolicy) {
        self.store.set_range_policy(policy);
    }

    /// Explicit range edit, resolved by the range policy.
    ///
    /// A gesture in flight on the same deal is discarded once the edit is
    /// stored, so releasing the pointer cannot overwrite it.
    pub fn set_range(
        &mut self,
        deal_id: DealId,
        proposed_start: i32,
        proposed_end: i32,
    ) -> TimelineResult<MonthRange> {
        let range = self
            .store
            .set_range(deal_id, proposed_start, proposed_end)?;
        self.discard_drag_on(deal_id, "range edited during drag");
        self.emit_plugin_event(TimelineEvent::RangeCommitted { deal_id, range });
        Ok(range)
    }

    pub fn edit_deal(&mut self, deal_id: DealId, edit: &DealEdit) -> TimelineResult<()> {
        if edit.is_empty() {
            self.store.deal(deal_id)?;
            return Ok(());
        }
        self.store.edit(deal_id, edit)?;
        debug!(deal_id = deal_id.get(), "deal edited");
        self.emit_plugin_event(TimelineEvent::DealEdited { deal_id });
        Ok(())
    }

    pub fn create_deal(&mut self, deal: Deal) -> TimelineResult<DealId> {
        let deal_id = self.store.create(deal)?;
        self.emit_deals_changed();
        Ok(deal_id)
    }

    /// Removes a deal. A gesture in flight on it is discarded immediately,
    /// so a later deal that reuses the id is never touched by the release.
    pub fn remove_deal(&mut self, deal_id: DealId) -> TimelineResult<Deal> {
        let removed = self.store.remove(deal_id)?;
        self.discard_drag_on(deal_id, "deal removed during drag");
        self.emit_deals_changed();
        Ok(removed)
    }

    /// Replaces every deal, e.g. after a reload from the persistence shim.
    ///
    /// Any active gesture is cancelled first.
    pub fn replace_deals(&mut self, deals: Vec<Deal>) -> TimelineResult<()> {
        let policy = self.store.range_policy();
        let store = DealStore::from_deals(deals)?.with_range_policy(policy);
        self.cancel_drag();
        self.store = store;
        debug!(deals = self.store.len(), "deals replaced");
        self.emit_deals_changed();
        Ok(())
    }

    fn emit_deals_changed(&mut self) {
        let deals_len = self.store.len();
        self.emit_plugin_event(TimelineEvent::DealsChanged { deals_len });
    }
}

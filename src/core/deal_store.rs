use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::types::{Deal, DealEdit, DealId, MonthRange};
use crate::error::{TimelineError, TimelineResult};

const SEED_FIXTURE_JSON: &str = include_str!("fixtures/timeline_deals.json");

/// How `DealStore::set_range` treats proposals outside `0 <= start <= end <= 11`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangePolicy {
    /// Clamp the offending bound and commit.
    #[default]
    Clamp,
    /// Fail with `InvalidRange` and leave the store unchanged.
    Reject,
}

/// Authoritative in-memory deal collection keyed by id.
///
/// Iteration follows insertion order, which is also the row order of the
/// timeline.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DealStore {
    deals: IndexMap<DealId, Deal>,
    range_policy: RangePolicy,
}

impl DealStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_range_policy(mut self, policy: RangePolicy) -> Self {
        self.range_policy = policy;
        self
    }

    /// Builds a store from deals, rejecting duplicate ids and invalid fields.
    pub fn from_deals(deals: impl IntoIterator<Item = Deal>) -> TimelineResult<Self> {
        let mut store = Self::new();
        for deal in deals {
            store.insert(deal)?;
        }
        Ok(store)
    }

    /// Parses a JSON array of deals.
    pub fn from_fixture_json(input: &str) -> TimelineResult<Self> {
        let deals: Vec<Deal> = serde_json::from_str(input).map_err(|e| {
            TimelineError::InvalidData(format!("failed to parse deal fixture: {e}"))
        })?;
        let store = Self::from_deals(deals)?;
        debug!(count = store.len(), "loaded deal fixture");
        Ok(store)
    }

    /// Store preloaded with the bundled sample timeline.
    pub fn seeded() -> TimelineResult<Self> {
        Self::from_fixture_json(SEED_FIXTURE_JSON)
    }

    #[must_use]
    pub fn range_policy(&self) -> RangePolicy {
        self.range_policy
    }

    pub fn set_range_policy(&mut self, policy: RangePolicy) {
        self.range_policy = policy;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.deals.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.deals.is_empty()
    }

    #[must_use]
    pub fn contains(&self, deal_id: DealId) -> bool {
        self.deals.contains_key(&deal_id)
    }

    pub fn deal(&self, deal_id: DealId) -> TimelineResult<&Deal> {
        self.deals
            .get(&deal_id)
            .ok_or(TimelineError::DealNotFound { deal_id })
    }

    pub fn deals(&self) -> impl Iterator<Item = &Deal> {
        self.deals.values()
    }

    pub fn range(&self, deal_id: DealId) -> TimelineResult<MonthRange> {
        self.deal(deal_id).map(|deal| deal.range)
    }

    /// Commits a proposed month pair for a deal.
    ///
    /// The resolved range is written with a single assignment, so no reader
    /// can observe one bound updated without the other.
    pub fn set_range(
        &mut self,
        deal_id: DealId,
        proposed_start: i32,
        proposed_end: i32,
    ) -> TimelineResult<MonthRange> {
        let policy = self.range_policy;
        let deal = self
            .deals
            .get_mut(&deal_id)
            .ok_or(TimelineError::DealNotFound { deal_id })?;
        let range = match policy {
            RangePolicy::Clamp => MonthRange::clamped(proposed_start, proposed_end),
            RangePolicy::Reject => MonthRange::new(proposed_start, proposed_end)?,
        };
        deal.range = range;
        trace!(
            deal_id = deal_id.get(),
            start = range.start_month(),
            end = range.end_month(),
            "set deal range"
        );
        Ok(range)
    }

    /// Writes an already-valid range.
    pub fn commit_range(&mut self, deal_id: DealId, range: MonthRange) -> TimelineResult<()> {
        let deal = self
            .deals
            .get_mut(&deal_id)
            .ok_or(TimelineError::DealNotFound { deal_id })?;
        deal.range = range;
        Ok(())
    }

    /// Adds a deal with a caller-chosen id.
    pub fn insert(&mut self, deal: Deal) -> TimelineResult<()> {
        deal.validate()?;
        if self.deals.contains_key(&deal.id) {
            return Err(TimelineError::InvalidData(format!(
                "deal with id `{}` already exists",
                deal.id
            )));
        }
        self.deals.insert(deal.id, deal);
        Ok(())
    }

    /// Adds a deal under the next free id (`max + 1`, starting at 1).
    pub fn create(&mut self, mut deal: Deal) -> TimelineResult<DealId> {
        deal.id = self.next_id();
        let id = deal.id;
        self.insert(deal)?;
        debug!(deal_id = id.get(), "created deal");
        Ok(id)
    }

    /// Applies an explicit edit to the non-range fields of a deal.
    pub fn edit(&mut self, deal_id: DealId, edit: &DealEdit) -> TimelineResult<&Deal> {
        let deal = self
            .deals
            .get_mut(&deal_id)
            .ok_or(TimelineError::DealNotFound { deal_id })?;
        *deal = edit.applied_to(deal)?;
        Ok(&*deal)
    }

    /// Removes a deal, keeping the relative order of the others.
    pub fn remove(&mut self, deal_id: DealId) -> TimelineResult<Deal> {
        let removed = self
            .deals
            .shift_remove(&deal_id)
            .ok_or(TimelineError::DealNotFound { deal_id })?;
        debug!(deal_id = deal_id.get(), "removed deal");
        Ok(removed)
    }

    #[must_use]
    pub fn next_id(&self) -> DealId {
        DealId(self.deals.keys().map(|id| id.get()).max().unwrap_or(0) + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_store_loads_bundled_fixture() {
        let store = DealStore::seeded().expect("bundled fixture must parse");
        assert_eq!(store.len(), 8);
        let canva = store.deal(DealId(1)).expect("deal 1");
        assert_eq!(canva.name, "Canva Enterprise Deal");
        assert_eq!(canva.range, MonthRange::new(0, 2).expect("range"));
        let slack = store.range(DealId(7)).expect("deal 7");
        assert_eq!((slack.start_month(), slack.end_month()), (6, 11));
    }

    #[test]
    fn next_id_starts_at_one() {
        assert_eq!(DealStore::new().next_id(), DealId(1));
    }
}

use tracing::debug;

use crate::core::{DealStore, MonthGrid};
use crate::error::TimelineResult;
use crate::interaction::DragInteraction;

use super::validation::validate_engine_config;
use super::{TimelineEngine, TimelineEngineConfig};

impl TimelineEngine {
    /// Creates an engine over an explicitly owned deal store.
    ///
    /// The config's range policy replaces the store's.
    pub fn new(config: TimelineEngineConfig, mut store: DealStore) -> TimelineResult<Self> {
        let config = validate_engine_config(config)?;
        let grid = MonthGrid::new(config.track_width)?;
        store.set_range_policy(config.range_policy);
        debug!(
            track_width = config.track_width,
            year = config.year,
            deals = store.len(),
            "timeline engine initialized"
        );
        Ok(Self {
            store,
            grid,
            year: config.year,
            interaction: DragInteraction::default(),
            plugins: Vec::new(),
        })
    }

    /// Creates an engine over the bundled sample timeline.
    pub fn seeded(config: TimelineEngineConfig) -> TimelineResult<Self> {
        Self::new(config, DealStore::seeded()?)
    }
}

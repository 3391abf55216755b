//! Simulated persistence for committed timeline changes.
//!
//! There is no real I/O: the service keeps its own copy of the deals behind
//! an async mutex and answers every call after a fixed artificial delay.

pub mod deal_service;

use serde::{Deserialize, Serialize};

use crate::core::{DealId, MonthRange};

pub use deal_service::{DEFAULT_SAVE_DELAY, DealService, DealServiceConfig, FaultPlan};

/// Range commit handed from the engine to the persistence layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveRequest {
    pub deal_id: DealId,
    pub range: MonthRange,
}

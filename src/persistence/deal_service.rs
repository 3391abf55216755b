use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, trace, warn};

use crate::core::{Deal, DealEdit, DealId, DealStore, MonthRange};
use crate::error::{TimelineError, TimelineResult};

use super::SaveRequest;

pub const DEFAULT_SAVE_DELAY: Duration = Duration::from_millis(250);

/// Deterministic failure injection for saves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaultPlan {
    fail_every: u32,
}

impl FaultPlan {
    /// Rejects every `n`-th save attempt (counted across the service).
    pub fn every(n: u32) -> TimelineResult<Self> {
        if n == 0 {
            return Err(TimelineError::InvalidData(
                "fault plan interval must be >= 1".to_owned(),
            ));
        }
        Ok(Self { fail_every: n })
    }

    #[must_use]
    pub fn fail_every(self) -> u32 {
        self.fail_every
    }

    fn rejects(self, attempt: u32) -> bool {
        attempt % self.fail_every == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DealServiceConfig {
    pub delay: Duration,
    pub fault_plan: Option<FaultPlan>,
}

impl Default for DealServiceConfig {
    fn default() -> Self {
        Self {
            delay: DEFAULT_SAVE_DELAY,
            fault_plan: None,
        }
    }
}

impl DealServiceConfig {
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    #[must_use]
    pub fn with_fault_plan(mut self, plan: FaultPlan) -> Self {
        self.fault_plan = Some(plan);
        self
    }
}

/// In-memory mock deal service.
///
/// Cloning is cheap and clones share the same deals, so a clone can be moved
/// into a spawned task for fire-and-forget saves.
#[derive(Debug, Clone)]
pub struct DealService {
    store: Arc<Mutex<DealStore>>,
    config: DealServiceConfig,
    save_attempts: Arc<AtomicU32>,
}

impl DealService {
    #[must_use]
    pub fn new(store: DealStore, config: DealServiceConfig) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            config,
            save_attempts: Arc::new(AtomicU32::new(0)),
        }
    }

    /// Service preloaded with the bundled sample timeline.
    pub fn seeded(config: DealServiceConfig) -> TimelineResult<Self> {
        Ok(Self::new(DealStore::seeded()?, config))
    }

    #[must_use]
    pub fn config(&self) -> DealServiceConfig {
        self.config
    }

    /// Number of save attempts seen so far, rejected ones included.
    #[must_use]
    pub fn save_attempts(&self) -> u32 {
        self.save_attempts.load(Ordering::Relaxed)
    }

    async fn delay(&self) {
        tokio::time::sleep(self.config.delay).await;
    }

    pub async fn get_all(&self) -> Vec<Deal> {
        self.delay().await;
        let store = self.store.lock().await;
        store.deals().cloned().collect()
    }

    pub async fn get_by_id(&self, deal_id: DealId) -> TimelineResult<Deal> {
        self.delay().await;
        let store = self.store.lock().await;
        store.deal(deal_id).cloned()
    }

    /// Stores a new deal under the next free id and returns the stored copy.
    pub async fn create(&self, deal: Deal) -> TimelineResult<Deal> {
        self.delay().await;
        let mut store = self.store.lock().await;
        let id = store.create(deal)?;
        store.deal(id).cloned()
    }

    pub async fn update(&self, deal_id: DealId, edit: DealEdit) -> TimelineResult<Deal> {
        self.delay().await;
        let mut store = self.store.lock().await;
        store.edit(deal_id, &edit).cloned()
    }

    pub async fn delete(&self, deal_id: DealId) -> TimelineResult<()> {
        self.delay().await;
        let mut store = self.store.lock().await;
        store.remove(deal_id).map(|_| ())
    }

    /// Persists a committed range and echoes it back after the fixed delay.
    pub async fn save_range(&self, deal_id: DealId, range: MonthRange) -> TimelineResult<MonthRange> {
        self.delay().await;
        let attempt = self.save_attempts.fetch_add(1, Ordering::Relaxed) + 1;
        if self
            .config
            .fault_plan
            .is_some_and(|plan| plan.rejects(attempt))
        {
            warn!(deal_id = deal_id.get(), attempt, "simulated save rejected");
            return Err(TimelineError::PersistenceRejected { deal_id, attempt });
        }
        let mut store = self.store.lock().await;
        store.commit_range(deal_id, range)?;
        trace!(
            deal_id = deal_id.get(),
            start = range.start_month(),
            end = range.end_month(),
            attempt,
            "saved deal range"
        );
        Ok(range)
    }

    pub async fn save(&self, request: SaveRequest) -> TimelineResult<MonthRange> {
        self.save_range(request.deal_id, request.range).await
    }

    /// Retries rejected saves, up to `max_attempts` tries in total.
    ///
    /// Only `PersistenceRejected` is retried; a missing deal fails at once.
    pub async fn save_with_retry(
        &self,
        request: SaveRequest,
        max_attempts: u32,
    ) -> TimelineResult<MonthRange> {
        let max_attempts = max_attempts.max(1);
        let mut tries = 0;
        loop {
            tries += 1;
            match self.save(request).await {
                Err(TimelineError::PersistenceRejected { .. }) if tries < max_attempts => {
                    debug!(deal_id = request.deal_id.get(), tries, "retrying rejected save");
                }
                result => return result,
            }
        }
    }

    /// Fire-and-forget save on the current tokio runtime.
    ///
    /// Must be called from within a runtime context.
    pub fn spawn_save(&self, request: SaveRequest) -> JoinHandle<TimelineResult<MonthRange>> {
        let service = self.clone();
        tokio::spawn(async move { service.save(request).await })
    }
}

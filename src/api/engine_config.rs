use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::RangePolicy;
use crate::error::{TimelineError, TimelineResult};
use crate::persistence::DealServiceConfig;

/// Public engine bootstrap configuration.
///
/// This type is serializable so host applications can persist/load timeline
/// setup without inventing their own ad-hoc format.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimelineEngineConfig {
    /// Width of the 12-month track in pixels.
    pub track_width: f64,
    /// Calendar year shown in month headers and period labels.
    #[serde(default = "default_year")]
    pub year: i32,
    #[serde(default)]
    pub range_policy: RangePolicy,
    /// Artificial latency of the persistence shim.
    #[serde(default = "default_save_delay_ms")]
    pub save_delay_ms: u64,
}

impl TimelineEngineConfig {
    /// Creates a config with default year, clamp policy and save delay.
    #[must_use]
    pub fn new(track_width: f64) -> Self {
        Self {
            track_width,
            year: default_year(),
            range_policy: RangePolicy::default(),
            save_delay_ms: default_save_delay_ms(),
        }
    }

    #[must_use]
    pub fn with_year(mut self, year: i32) -> Self {
        self.year = year;
        self
    }

    #[must_use]
    pub fn with_range_policy(mut self, policy: RangePolicy) -> Self {
        self.range_policy = policy;
        self
    }

    #[must_use]
    pub fn with_save_delay_ms(mut self, delay_ms: u64) -> Self {
        self.save_delay_ms = delay_ms;
        self
    }

    /// Persistence shim settings derived from this config.
    #[must_use]
    pub fn service_config(self) -> DealServiceConfig {
        DealServiceConfig::default().with_delay(Duration::from_millis(self.save_delay_ms))
    }

    pub fn to_json_pretty(self) -> TimelineResult<String> {
        serde_json::to_string_pretty(&self).map_err(|e| {
            TimelineError::InvalidData(format!("failed to serialize engine config: {e}"))
        })
    }

    pub fn from_json_str(input: &str) -> TimelineResult<Self> {
        serde_json::from_str(input).map_err(|e| {
            TimelineError::InvalidData(format!("failed to parse engine config: {e}"))
        })
    }
}

fn default_year() -> i32 {
    2024
}

fn default_save_delay_ms() -> u64 {
    250
}

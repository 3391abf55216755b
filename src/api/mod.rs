mod deal_controller;
mod engine;
mod engine_config;
mod engine_init;
mod interaction_controller;
mod json_contract;
mod plugin_dispatch;
mod plugin_registry;
mod snapshot_controller;
mod validation;

pub use crate::extensions::{TimelineContext, TimelineEvent, TimelinePlugin};
pub use engine::TimelineEngine;
pub use engine_config::TimelineEngineConfig;
pub use json_contract::{TIMELINE_SNAPSHOT_JSON_SCHEMA_V1, TimelineSnapshotJsonContractV1};
pub use snapshot_controller::{DealBar, MonthHeader, TimelineSnapshot};

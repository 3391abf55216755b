use serde::{Deserialize, Serialize};

use crate::error::{TimelineError, TimelineResult};

use super::TimelineSnapshot;

pub const TIMELINE_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineSnapshotJsonContractV1 {
    pub schema_version: u32,
    pub snapshot: TimelineSnapshot,
}

/// Every snapshot shape the loader understands. A versioned payload is
/// recognized by its `schema_version` field.
#[derive(Deserialize)]
#[serde(untagged)]
enum SnapshotPayload {
    Versioned(TimelineSnapshotJsonContractV1),
    Bare(TimelineSnapshot),
}

impl SnapshotPayload {
    fn into_snapshot(self) -> TimelineResult<TimelineSnapshot> {
        match self {
            Self::Bare(snapshot) => Ok(snapshot),
            Self::Versioned(payload) => {
                if payload.schema_version != TIMELINE_SNAPSHOT_JSON_SCHEMA_V1 {
                    return Err(TimelineError::InvalidData(format!(
                        "unsupported snapshot schema version: {}",
                        payload.schema_version
                    )));
                }
                Ok(payload.snapshot)
            }
        }
    }
}

impl TimelineSnapshot {
    pub fn to_json_contract_v1_pretty(&self) -> TimelineResult<String> {
        let payload = TimelineSnapshotJsonContractV1 {
            schema_version: TIMELINE_SNAPSHOT_JSON_SCHEMA_V1,
            snapshot: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            TimelineError::InvalidData(format!("failed to serialize snapshot contract v1: {e}"))
        })
    }

    /// Accepts either a bare snapshot or a versioned contract payload.
    pub fn from_json_compat_str(input: &str) -> TimelineResult<Self> {
        serde_json::from_str::<SnapshotPayload>(input)
            .map_err(|e| {
                TimelineError::InvalidData(format!("failed to parse snapshot json payload: {e}"))
            })?
            .into_snapshot()
    }
}

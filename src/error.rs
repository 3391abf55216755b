use thiserror::Error;

use crate::core::DealId;

pub type TimelineResult<T> = Result<T, TimelineError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TimelineError {
    #[error("invalid track dimension: width={track_width}")]
    InvalidDimension { track_width: f64 },

    #[error("deal not found: id={deal_id}")]
    DealNotFound { deal_id: DealId },

    #[error("month range out of bounds: start={start}, end={end}")]
    InvalidRange { start: i32, end: i32 },

    #[error("persistence rejected save for deal {deal_id} (attempt {attempt})")]
    PersistenceRejected { deal_id: DealId, attempt: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),
}

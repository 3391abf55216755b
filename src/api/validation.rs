use crate::core::MonthGrid;
use crate::core::primitives::validate_year;
use crate::error::{TimelineError, TimelineResult};

use super::TimelineEngineConfig;

pub(super) fn validate_engine_config(
    config: TimelineEngineConfig,
) -> TimelineResult<TimelineEngineConfig> {
    MonthGrid::new(config.track_width)?;
    validate_year(config.year)?;
    if config.save_delay_ms > 60_000 {
        return Err(TimelineError::InvalidData(
            "save delay must be <= 60000 ms".to_owned(),
        ));
    }
    Ok(config)
}

pub(super) fn validate_pointer_dx(dx: f64) -> TimelineResult<f64> {
    if !dx.is_finite() {
        return Err(TimelineError::InvalidData(
            "pointer displacement must be finite".to_owned(),
        ));
    }
    Ok(dx)
}

pub(super) fn validate_plugin_id(plugin_id: &str) -> TimelineResult<()> {
    if plugin_id.trim().is_empty() {
        return Err(TimelineError::InvalidData(
            "plugin id must not be empty".to_owned(),
        ));
    }
    Ok(())
}

use serde::{Deserialize, Serialize};

use crate::core::types::{LAST_MONTH, MONTHS_PER_TRACK, MonthRange};
use crate::error::{TimelineError, TimelineResult};

/// Maps horizontal pixel offsets on a fixed-width track to month cells.
///
/// The track is split into `MONTHS_PER_TRACK` equal cells. Offsets snap to
/// the nearest cell boundary with round-half-away-from-zero, so an offset
/// exactly halfway between two boundaries lands on the later month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthGrid {
    track_width: f64,
}

impl MonthGrid {
    pub fn new(track_width: f64) -> TimelineResult<Self> {
        if !track_width.is_finite() || track_width <= 0.0 {
            return Err(TimelineError::InvalidDimension { track_width });
        }
        Ok(Self { track_width })
    }

    #[must_use]
    pub fn track_width(self) -> f64 {
        self.track_width
    }

    #[must_use]
    pub fn cell_width(self) -> f64 {
        self.track_width / f64::from(MONTHS_PER_TRACK)
    }

    /// Snaps a pixel offset to a month index in `0..=LAST_MONTH`.
    ///
    /// Negative offsets clamp to January, offsets past the track to December.
    /// Only NaN and infinite offsets are rejected, with `InvalidData`.
    pub fn pixel_to_month(self, pixel_offset: f64) -> TimelineResult<u8> {
        if !pixel_offset.is_finite() {
            return Err(TimelineError::InvalidData(
                "pixel offset must be finite".to_owned(),
            ));
        }
        let cells = (pixel_offset / self.cell_width()).round();
        // Clamped to 0..=11 before the cast.
        Ok(cells.clamp(0.0, f64::from(LAST_MONTH)) as u8)
    }

    /// Left edge of the month cell, in pixels from the track origin.
    #[must_use]
    pub fn month_to_pixel_offset(self, month: u8) -> f64 {
        f64::from(month.min(LAST_MONTH)) * self.cell_width()
    }

    #[must_use]
    pub fn bar_left_px(self, range: MonthRange) -> f64 {
        self.month_to_pixel_offset(range.start_month())
    }

    #[must_use]
    pub fn bar_width_px(self, range: MonthRange) -> f64 {
        f64::from(range.duration_months()) * self.cell_width()
    }

    /// Resolution-independent bar position as a fraction of the track.
    #[must_use]
    pub fn bar_left_ratio(range: MonthRange) -> f64 {
        f64::from(range.start_month()) / f64::from(MONTHS_PER_TRACK)
    }

    #[must_use]
    pub fn bar_width_ratio(range: MonthRange) -> f64 {
        f64::from(range.duration_months()) / f64::from(MONTHS_PER_TRACK)
    }
}

/// Free-function form of [`MonthGrid::pixel_to_month`].
pub fn pixel_to_month(pixel_offset: f64, track_width: f64) -> TimelineResult<u8> {
    MonthGrid::new(track_width)?.pixel_to_month(pixel_offset)
}

/// Free-function form of [`MonthGrid::month_to_pixel_offset`].
pub fn month_to_pixel_offset(month: u8, track_width: f64) -> TimelineResult<f64> {
    Ok(MonthGrid::new(track_width)?.month_to_pixel_offset(month))
}

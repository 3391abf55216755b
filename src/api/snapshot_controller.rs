use serde::{Deserialize, Serialize};

use crate::core::primitives::{format_currency, month_short_label, period_label};
use crate::core::{DealId, DealStatus, MONTHS_PER_TRACK, MonthGrid, MonthRange};
use crate::error::{TimelineError, TimelineResult};

use super::TimelineEngine;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthHeader {
    pub index: u8,
    pub label: String,
    pub year: i32,
    pub left_px: f64,
}

/// Layout of one deal row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DealBar {
    pub deal_id: DealId,
    pub name: String,
    pub company: String,
    pub color: String,
    pub status: DealStatus,
    /// Range to draw: the drag preview for the dragged bar, else the stored range.
    pub range: MonthRange,
    pub left_px: f64,
    pub width_px: f64,
    pub left_ratio: f64,
    pub width_ratio: f64,
    pub period_label: String,
    pub value_label: String,
    pub dragging: bool,
    /// `true` while the drawn range differs from the stored one.
    pub previewing: bool,
}

/// Read-only view derived from the engine for one render cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineSnapshot {
    pub year: i32,
    pub track_width: f64,
    pub cell_width: f64,
    pub months: Vec<MonthHeader>,
    pub bars: Vec<DealBar>,
}

impl TimelineSnapshot {
    #[must_use]
    pub fn bar(&self, deal_id: DealId) -> Option<&DealBar> {
        self.bars.iter().find(|bar| bar.deal_id == deal_id)
    }
}

impl TimelineEngine {
    /// Builds the layout the host draws from.
    #[must_use]
    pub fn snapshot(&self) -> TimelineSnapshot {
        let grid = self.grid;
        let drag = self.interaction.state();
        let session = drag.session();

        let months = (0..MONTHS_PER_TRACK)
            .map(|index| MonthHeader {
                index,
                label: month_short_label(index).to_owned(),
                year: self.year,
                left_px: grid.month_to_pixel_offset(index),
            })
            .collect();

        let bars = self
            .store
            .deals()
            .map(|deal| {
                let dragged = session.filter(|session| session.deal_id == deal.id);
                let range = dragged.map_or(deal.range, |session| session.preview);
                DealBar {
                    deal_id: deal.id,
                    name: deal.name.clone(),
                    company: deal.company.clone(),
                    color: deal.color.clone(),
                    status: deal.status,
                    range,
                    left_px: grid.bar_left_px(range),
                    width_px: grid.bar_width_px(range),
                    left_ratio: MonthGrid::bar_left_ratio(range),
                    width_ratio: MonthGrid::bar_width_ratio(range),
                    period_label: period_label(range, self.year),
                    value_label: format_currency(deal.value),
                    dragging: dragged.is_some(),
                    previewing: range != deal.range,
                }
            })
            .collect();

        TimelineSnapshot {
            year: self.year,
            track_width: grid.track_width(),
            cell_width: grid.cell_width(),
            months,
            bars,
        }
    }

    /// Serializes the snapshot as pretty JSON for fixture-based regression checks.
    pub fn snapshot_json_pretty(&self) -> TimelineResult<String> {
        serde_json::to_string_pretty(&self.snapshot()).map_err(|e| {
            TimelineError::InvalidData(format!("failed to serialize snapshot: {e}"))
        })
    }
}

pub mod deal_store;
pub mod month_grid;
pub mod primitives;
pub mod types;

pub use deal_store::{DealStore, RangePolicy};
pub use month_grid::{MonthGrid, month_to_pixel_offset, pixel_to_month};
pub use primitives::{format_currency, month_short_label, period_label};
pub use types::{
    Deal, DealEdit, DealId, DealStatus, LAST_MONTH, MONTHS_PER_TRACK, MonthRange, Priority,
};

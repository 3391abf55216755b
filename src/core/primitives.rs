use chrono::{Month, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::core::types::{LAST_MONTH, MonthRange};
use crate::error::{TimelineError, TimelineResult};

/// Calendar month for a zero-based month index.
#[must_use]
pub fn calendar_month(month: u8) -> Month {
    // `Month` is one-based; the index is clamped into range first.
    Month::try_from(month.min(LAST_MONTH) + 1).unwrap_or(Month::December)
}

/// Three-letter English label ("Jan".."Dec").
#[must_use]
pub fn month_short_label(month: u8) -> &'static str {
    let name = calendar_month(month).name();
    &name[..3]
}

/// Human label for a deal period, e.g. `Jan - Mar 2024`.
#[must_use]
pub fn period_label(range: MonthRange, year: i32) -> String {
    format!(
        "{} - {} {year}",
        month_short_label(range.start_month()),
        month_short_label(range.end_month())
    )
}

pub fn validate_year(year: i32) -> TimelineResult<i32> {
    if NaiveDate::from_ymd_opt(year, 1, 1).is_none() {
        return Err(TimelineError::InvalidData(format!(
            "timeline year {year} is outside the supported calendar"
        )));
    }
    Ok(year)
}

/// Whole-dollar currency label with thousands separators, e.g. `$45,000`.
#[must_use]
pub fn format_currency(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let digits = rounded.abs().trunc().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

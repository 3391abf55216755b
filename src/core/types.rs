use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{TimelineError, TimelineResult};

/// Number of month cells on one timeline track.
pub const MONTHS_PER_TRACK: u8 = 12;
/// Highest valid month index (December).
pub const LAST_MONTH: u8 = MONTHS_PER_TRACK - 1;

/// Stable deal identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DealId(pub u32);

impl DealId {
    #[must_use]
    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for DealId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for DealId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

/// Inclusive month span of a deal on the track.
///
/// Fields are private: every constructor either validates or clamps, so a
/// `MonthRange` always satisfies `start_month <= end_month <= LAST_MONTH`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawMonthRange", into = "RawMonthRange")]
pub struct MonthRange {
    start_month: u8,
    end_month: u8,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMonthRange {
    start_month: i32,
    end_month: i32,
}

impl TryFrom<RawMonthRange> for MonthRange {
    type Error = TimelineError;

    fn try_from(raw: RawMonthRange) -> TimelineResult<Self> {
        Self::new(raw.start_month, raw.end_month)
    }
}

impl From<MonthRange> for RawMonthRange {
    fn from(range: MonthRange) -> Self {
        Self {
            start_month: i32::from(range.start_month),
            end_month: i32::from(range.end_month),
        }
    }
}

impl MonthRange {
    /// Builds a range, rejecting out-of-bounds or inverted input.
    pub fn new(start_month: i32, end_month: i32) -> TimelineResult<Self> {
        let last = i32::from(LAST_MONTH);
        if !(0..=last).contains(&start_month)
            || !(0..=last).contains(&end_month)
            || start_month > end_month
        {
            return Err(TimelineError::InvalidRange {
                start: start_month,
                end: end_month,
            });
        }
        Ok(Self {
            start_month: clamp_month(start_month),
            end_month: clamp_month(end_month),
        })
    }

    /// Builds a range from arbitrary input by clamping instead of rejecting.
    ///
    /// Both bounds are clamped into `[0, LAST_MONTH]`. When start still
    /// exceeds end, start is pulled down to end.
    #[must_use]
    pub fn clamped(start_month: i32, end_month: i32) -> Self {
        let end_month = clamp_month(end_month);
        let start_month = clamp_month(start_month).min(end_month);
        Self {
            start_month,
            end_month,
        }
    }

    /// Single-month range.
    #[must_use]
    pub fn single(month: u8) -> Self {
        let month = month.min(LAST_MONTH);
        Self {
            start_month: month,
            end_month: month,
        }
    }

    #[must_use]
    pub fn start_month(self) -> u8 {
        self.start_month
    }

    #[must_use]
    pub fn end_month(self) -> u8 {
        self.end_month
    }

    /// Inclusive duration in months; always at least 1.
    #[must_use]
    pub fn duration_months(self) -> u8 {
        self.end_month - self.start_month + 1
    }

    #[must_use]
    pub fn contains(self, month: u8) -> bool {
        (self.start_month..=self.end_month).contains(&month)
    }

    /// Shifts both bounds by `delta` months, preserving duration.
    ///
    /// The delta is clamped so the shifted window stays on the track.
    #[must_use]
    pub fn shifted(self, delta: i32) -> Self {
        let min_delta = -i32::from(self.start_month);
        let max_delta = i32::from(LAST_MONTH - self.end_month);
        let delta = delta.clamp(min_delta, max_delta);
        Self {
            start_month: clamp_month(i32::from(self.start_month) + delta),
            end_month: clamp_month(i32::from(self.end_month) + delta),
        }
    }

    /// Moves the start bound, never letting it cross the end bound.
    #[must_use]
    pub fn with_start(self, month: u8) -> Self {
        Self {
            start_month: month.min(self.end_month),
            end_month: self.end_month,
        }
    }

    /// Moves the end bound, never letting it fall below the start bound.
    #[must_use]
    pub fn with_end(self, month: u8) -> Self {
        Self {
            start_month: self.start_month,
            end_month: month.clamp(self.start_month, LAST_MONTH),
        }
    }
}

fn clamp_month(month: i32) -> u8 {
    // Clamped into 0..=11 first, so the narrowing cast is lossless.
    month.clamp(0, i32::from(LAST_MONTH)) as u8
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// Pipeline stage of a deal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DealStatus {
    Connected,
    MeetingBooked,
    MeetingDone,
    Qualified,
    Proposal,
    Negotiation,
    Locked,
    Closed,
}

impl DealStatus {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Connected => "Connected",
            Self::MeetingBooked => "Meeting Booked",
            Self::MeetingDone => "Meeting Done",
            Self::Qualified => "Qualified",
            Self::Proposal => "Proposal",
            Self::Negotiation => "Negotiation",
            Self::Locked => "Locked",
            Self::Closed => "Closed",
        }
    }
}

/// A deal placed on the timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deal {
    pub id: DealId,
    pub name: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub value: Decimal,
    #[serde(default = "default_priority")]
    pub priority: Priority,
    #[serde(default = "default_status")]
    pub status: DealStatus,
    #[serde(flatten)]
    pub range: MonthRange,
    /// Host-defined color token for the bar.
    #[serde(default)]
    pub color: String,
}

fn default_priority() -> Priority {
    Priority::Medium
}

fn default_status() -> DealStatus {
    DealStatus::Connected
}

impl Deal {
    #[must_use]
    pub fn new(id: DealId, name: impl Into<String>, range: MonthRange) -> Self {
        Self {
            id,
            name: name.into(),
            company: String::new(),
            value: Decimal::ZERO,
            priority: default_priority(),
            status: default_status(),
            range,
            color: String::new(),
        }
    }

    #[must_use]
    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = company.into();
        self
    }

    #[must_use]
    pub fn with_value(mut self, value: Decimal) -> Self {
        self.value = value;
        self
    }

    #[must_use]
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: DealStatus) -> Self {
        self.status = status;
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub(crate) fn validate(&self) -> TimelineResult<()> {
        if self.name.trim().is_empty() {
            return Err(TimelineError::InvalidData(format!(
                "deal {} name must not be empty",
                self.id
            )));
        }
        validate_deal_value(self.value)
    }
}

/// Explicit edit action on the non-range fields of a deal.
///
/// `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DealEdit {
    pub name: Option<String>,
    pub company: Option<String>,
    pub value: Option<Decimal>,
    pub priority: Option<Priority>,
    pub status: Option<DealStatus>,
    pub color: Option<String>,
}

impl DealEdit {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.company.is_none()
            && self.value.is_none()
            && self.priority.is_none()
            && self.status.is_none()
            && self.color.is_none()
    }

    /// Returns the edited copy of `deal` after validating the new values.
    pub(crate) fn applied_to(&self, deal: &Deal) -> TimelineResult<Deal> {
        let mut edited = deal.clone();
        if let Some(name) = &self.name {
            edited.name = name.clone();
        }
        if let Some(company) = &self.company {
            edited.company = company.clone();
        }
        if let Some(value) = self.value {
            edited.value = value;
        }
        if let Some(priority) = self.priority {
            edited.priority = priority;
        }
        if let Some(status) = self.status {
            edited.status = status;
        }
        if let Some(color) = &self.color {
            edited.color = color.clone();
        }
        edited.validate()?;
        Ok(edited)
    }
}

fn validate_deal_value(value: Decimal) -> TimelineResult<()> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(TimelineError::InvalidData(
            "deal value must be >= 0".to_owned(),
        ));
    }
    Ok(())
}

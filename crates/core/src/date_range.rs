//! Half-open calendar date ranges.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

/// A `[start, end)` range of calendar days.
///
/// `start` is inclusive, `end` is exclusive. A missing `end` means the range is
/// open-ended and covers every day from `start` onward.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    start: NaiveDate,
    end: Option<NaiveDate>,
}

impl ValueObject for DateRange {}

impl DateRange {
    /// Build a range, rejecting empty ones (`end <= start`).
    pub fn new(start: NaiveDate, end: Option<NaiveDate>) -> DomainResult<Self> {
        if let Some(end) = end {
            if end <= start {
                return Err(DomainError::validation(format!(
                    "date_end ({end}) must be after date_start ({start})"
                )));
            }
        }
        Ok(Self { start, end })
    }

    pub fn open_ended(start: NaiveDate) -> Self {
        Self { start, end: None }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> Option<NaiveDate> {
        self.end
    }

    pub fn is_open_ended(&self) -> bool {
        self.end.is_none()
    }

    /// `start <= date && (end is absent || date < end)`.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && self.end.is_none_or(|end| date < end)
    }

    /// True if the two ranges share at least one day.
    pub fn overlaps(&self, other: &DateRange) -> bool {
        let self_before_other_ends = other.end.is_none_or(|end| self.start < end);
        let other_before_self_ends = self.end.is_none_or(|end| other.start < end);
        self_before_other_ends && other_before_self_ends
    }
}

impl core::fmt::Display for DateRange {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.end {
            Some(end) => write!(f, "[{}, {})", self.start, end),
            None => write!(f, "[{}, ..)", self.start),
        }
    }
}

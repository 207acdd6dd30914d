//! Inclusive calendar-date ranges.
use core::fmt;

use chrono::{NaiveDate, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::entry::DATE_FORMAT;

/// An inclusive `[start, end]` interval of calendar dates.
///
/// A range with `start > end` is valid and selects nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// A range covering a single day.
    pub fn day(date: NaiveDate) -> Self {
        Self::new(date, date)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn is_inverted(&self) -> bool {
        self.start > self.end
    }

    /// Smallest range covering both `self` and `date`.
    pub fn extend(self, date: NaiveDate) -> Self {
        Self {
            start: self.start.min(date),
            end: self.end.max(date),
        }
    }

    /// Restrict both ends to `bounds`, keeping their relative order.
    ///
    /// The date picker never offers dates outside the observed data.
    pub fn clamp_to(self, bounds: DateRange) -> Self {
        Self {
            start: self.start.clamp(bounds.start, bounds.end),
            end: self.end.clamp(bounds.start, bounds.end),
        }
    }

    /// Number of calendar days covered, zero when inverted.
    pub fn days(&self) -> i64 {
        if self.is_inverted() {
            return 0;
        }
        (self.end - self.start).num_days() + 1
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} → {}",
            self.start.format(DATE_FORMAT),
            self.end.format(DATE_FORMAT)
        )
    }
}

/// Move `date` by `days`, saturating at the calendar limits.
pub fn shift_date(date: NaiveDate, days: i64) -> NaiveDate {
    date.checked_add_signed(TimeDelta::days(days))
        .unwrap_or(if days < 0 {
            NaiveDate::MIN
        } else {
            NaiveDate::MAX
        })
}

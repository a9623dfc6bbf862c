//! Calendar constraints: a sparse bundle of optional field values.
//!
//! [`DateParts`] is the constraint reading of a calendar field set: a
//! `None` field is unconstrained, which is a different absence than the
//! zero contribution of a [`Span`](crate::Span) field. Strict construction
//! against a calendar lives in [`Calendar::compose`]; this module carries
//! the calendar-free range check and the loose offset-application check.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::arith;
use crate::calendar::Calendar;
use crate::span::Span;

/// A sparse set of calendar field constraints. `None` means unconstrained.
///
/// Weekday values are coded 1 = Sunday through 7 = Saturday, matching
/// [`Field::Weekday`](crate::Field::Weekday) extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DateParts {
    pub year: Option<i32>,
    pub quarter: Option<u32>,
    pub month: Option<u32>,
    pub week_of_year: Option<u32>,
    pub weekday: Option<u32>,
    pub day: Option<u32>,
    pub hour: Option<u32>,
    pub minute: Option<u32>,
    pub second: Option<u32>,
}

impl DateParts {
    /// An empty, fully unconstrained field set.
    pub fn new() -> DateParts {
        DateParts::default()
    }

    /// Constrain the year.
    pub fn year(mut self, year: i32) -> DateParts {
        self.year = Some(year);
        self
    }

    /// Constrain the quarter (1 through 4).
    pub fn quarter(mut self, quarter: u32) -> DateParts {
        self.quarter = Some(quarter);
        self
    }

    /// Constrain the month (1 through 12).
    pub fn month(mut self, month: u32) -> DateParts {
        self.month = Some(month);
        self
    }

    /// Constrain the week of the year.
    pub fn week_of_year(mut self, week: u32) -> DateParts {
        self.week_of_year = Some(week);
        self
    }

    /// Constrain the day of the week (1 = Sunday through 7 = Saturday).
    pub fn weekday(mut self, weekday: u32) -> DateParts {
        self.weekday = Some(weekday);
        self
    }

    /// Constrain the day of the month (1 through 31).
    pub fn day(mut self, day: u32) -> DateParts {
        self.day = Some(day);
        self
    }

    /// Constrain the hour (0 through 23).
    pub fn hour(mut self, hour: u32) -> DateParts {
        self.hour = Some(hour);
        self
    }

    /// Constrain the minute (0 through 59).
    pub fn minute(mut self, minute: u32) -> DateParts {
        self.minute = Some(minute);
        self
    }

    /// Constrain the second (0 through 59).
    pub fn second(mut self, second: u32) -> DateParts {
        self.second = Some(second);
        self
    }

    // ── Validation ──────────────────────────────────────────────────────────

    /// Whether every present field lies within its legal range.
    ///
    /// Absent fields are vacuously valid. Year and week-of-year carry no
    /// range restriction; day accepts 1 through 31 regardless of month, so
    /// a range-valid set can still fail [`Calendar::compose`].
    ///
    /// # Examples
    ///
    /// ```
    /// use almanac::DateParts;
    ///
    /// assert!(DateParts::new().month(12).day(31).is_valid());
    /// assert!(!DateParts::new().hour(25).is_valid());
    /// ```
    pub fn is_valid(&self) -> bool {
        fn within(value: Option<u32>, lo: u32, hi: u32) -> bool {
            value.map_or(true, |v| (lo..=hi).contains(&v))
        }
        within(self.month, 1, 12)
            && within(self.day, 1, 31)
            && within(self.hour, 0, 23)
            && within(self.minute, 0, 59)
            && within(self.second, 0, 59)
            && within(self.weekday, 1, 7)
            && within(self.quarter, 1, 4)
    }

    /// Whether the field set is range-valid and applies cleanly as an
    /// offset under `cal`.
    ///
    /// This is an offset-application check against a fixed base (the Unix
    /// epoch), not a construction test: a set that cannot name an absolute
    /// date can still pass. Strict construction is [`Calendar::compose`].
    pub fn is_valid_for(&self, cal: &Calendar) -> bool {
        self.is_valid()
            && arith::checked_add(cal, DateTime::<Utc>::UNIX_EPOCH, &self.as_span()).is_ok()
    }

    /// Reinterpret the constraints as an offset.
    ///
    /// Each unit maps onto its span field, with `quarter` counted as three
    /// months, `week_of_year` as weeks, and `weekday` as days. Absent
    /// fields contribute zero.
    pub fn as_span(&self) -> Span {
        fn v(field: Option<u32>) -> i64 {
            field.map_or(0, i64::from)
        }
        Span {
            years: self.year.map_or(0, i64::from),
            months: v(self.month) + 3 * v(self.quarter),
            weeks: v(self.week_of_year),
            days: v(self.day) + v(self.weekday),
            hours: v(self.hour),
            minutes: v(self.minute),
            seconds: v(self.second),
        }
    }

    /// Whether every present field agrees with a fully populated
    /// extraction.
    pub(crate) fn matches(&self, full: &DateParts) -> bool {
        fn agrees<T: PartialEq>(want: &Option<T>, got: &Option<T>) -> bool {
            want.is_none() || want == got
        }
        agrees(&self.year, &full.year)
            && agrees(&self.quarter, &full.quarter)
            && agrees(&self.month, &full.month)
            && agrees(&self.week_of_year, &full.week_of_year)
            && agrees(&self.weekday, &full.weekday)
            && agrees(&self.day, &full.day)
            && agrees(&self.hour, &full.hour)
            && agrees(&self.minute, &full.minute)
            && agrees(&self.second, &full.second)
    }
}

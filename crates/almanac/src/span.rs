//! Calendar offsets: a sparse bundle of signed unit counts.
//!
//! A [`Span`] is the offset reading of a calendar field set: a field left
//! at zero contributes nothing when the span is applied. Combination and
//! scaling run through an anchor instant so the result reflects calendar
//! normalization (clamped month ends, leap days), never plain field sums.
//! The constraint reading of a field set lives in
//! [`DateParts`](crate::DateParts).

use std::ops::Neg;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::arith;
use crate::calendar::Calendar;
use crate::error::Result;

/// A signed calendar offset across the supported units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Span {
    pub years: i64,
    pub months: i64,
    pub weeks: i64,
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl Span {
    /// The empty offset.
    pub const ZERO: Span = Span {
        years: 0,
        months: 0,
        weeks: 0,
        days: 0,
        hours: 0,
        minutes: 0,
        seconds: 0,
    };

    /// A span of whole years.
    pub fn years(n: i64) -> Span {
        Span { years: n, ..Span::ZERO }
    }

    /// A span of whole months.
    pub fn months(n: i64) -> Span {
        Span { months: n, ..Span::ZERO }
    }

    /// A span of whole weeks.
    pub fn weeks(n: i64) -> Span {
        Span { weeks: n, ..Span::ZERO }
    }

    /// A span of whole days.
    pub fn days(n: i64) -> Span {
        Span { days: n, ..Span::ZERO }
    }

    /// A span of whole hours.
    pub fn hours(n: i64) -> Span {
        Span { hours: n, ..Span::ZERO }
    }

    /// A span of whole minutes.
    pub fn minutes(n: i64) -> Span {
        Span { minutes: n, ..Span::ZERO }
    }

    /// A span of whole seconds.
    pub fn seconds(n: i64) -> Span {
        Span { seconds: n, ..Span::ZERO }
    }

    /// This span with `n` added to its years field.
    pub fn and_years(mut self, n: i64) -> Span {
        self.years += n;
        self
    }

    /// This span with `n` added to its months field.
    pub fn and_months(mut self, n: i64) -> Span {
        self.months += n;
        self
    }

    /// This span with `n` added to its weeks field.
    pub fn and_weeks(mut self, n: i64) -> Span {
        self.weeks += n;
        self
    }

    /// This span with `n` added to its days field.
    pub fn and_days(mut self, n: i64) -> Span {
        self.days += n;
        self
    }

    /// This span with `n` added to its hours field.
    pub fn and_hours(mut self, n: i64) -> Span {
        self.hours += n;
        self
    }

    /// This span with `n` added to its minutes field.
    pub fn and_minutes(mut self, n: i64) -> Span {
        self.minutes += n;
        self
    }

    /// This span with `n` added to its seconds field.
    pub fn and_seconds(mut self, n: i64) -> Span {
        self.seconds += n;
        self
    }

    /// Whether every field is zero.
    pub fn is_zero(&self) -> bool {
        *self == Span::ZERO
    }

    /// Every field multiplied by `factor`, with no calendar normalization.
    fn scaled_fields(&self, factor: i64) -> Span {
        Span {
            years: self.years * factor,
            months: self.months * factor,
            weeks: self.weeks * factor,
            days: self.days * factor,
            hours: self.hours * factor,
            minutes: self.minutes * factor,
            seconds: self.seconds * factor,
        }
    }

    // ── Calendar-normalized combination ─────────────────────────────────────

    /// Combine two spans through calendar semantics.
    ///
    /// `self` is applied to `anchor`, `other` to the intermediate instant,
    /// and the result is the full field difference from `anchor` to the
    /// final instant. Month and year steps are therefore normalized by the
    /// calendar rather than summed: one month applied twice from
    /// January 31 is not the same offset as two months applied once.
    ///
    /// # Errors
    ///
    /// Propagates the failures of [`arith::checked_add`].
    ///
    /// # Examples
    ///
    /// ```
    /// use almanac::{Calendar, Span};
    ///
    /// let cal = Calendar::utc();
    /// let anchor = cal.ymd(2024, 5, 1).unwrap();
    /// let total = Span::days(1).combine(&Span::days(1), anchor, &cal).unwrap();
    /// assert_eq!(total, Span::days(2));
    /// ```
    pub fn combine(&self, other: &Span, anchor: DateTime<Utc>, cal: &Calendar) -> Result<Span> {
        let mid = arith::checked_add(cal, anchor, self)?;
        let end = arith::checked_add(cal, mid, other)?;
        Ok(arith::between(cal, anchor, end))
    }

    /// Combine with the negation of `other`; see [`Span::combine`].
    ///
    /// # Errors
    ///
    /// Propagates the failures of [`arith::checked_add`].
    pub fn subtracting(&self, other: &Span, anchor: DateTime<Utc>, cal: &Calendar) -> Result<Span> {
        self.combine(&-*other, anchor, cal)
    }

    /// Every field multiplied by `factor`, then normalized through the
    /// calendar the same way [`Span::combine`] is.
    ///
    /// # Errors
    ///
    /// Propagates the failures of [`arith::checked_add`].
    pub fn scaled(&self, factor: i64, anchor: DateTime<Utc>, cal: &Calendar) -> Result<Span> {
        let end = arith::checked_add(cal, anchor, &self.scaled_fields(factor))?;
        Ok(arith::between(cal, anchor, end))
    }
}

impl Neg for Span {
    type Output = Span;

    /// Field-wise negation. Needs no calendar: no normalization happens
    /// until the span is applied.
    fn neg(self) -> Span {
        self.scaled_fields(-1)
    }
}

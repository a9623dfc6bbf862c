//! Weekend-aware stepping: business-day walks and weekday occurrences.
//!
//! Weekend membership comes from the injected [`Calendar`]. The stepping
//! loops require a weekend set that leaves at least one workday per week;
//! a calendar configured with all seven days as weekend will not
//! terminate.

use chrono::{DateTime, Datelike, Duration, NaiveTime, Utc, Weekday};

use crate::arith;
use crate::calendar::Calendar;
use crate::error::Result;
use crate::span::Span;

// ── Business days ───────────────────────────────────────────────────────────

/// The next strictly future day that is not a weekend day, wall-clock
/// time preserved.
///
/// # Errors
///
/// Propagates the failures of [`arith::checked_add`], typically a DST gap
/// swallowing the wall-clock time on a candidate day.
///
/// # Examples
///
/// ```
/// use almanac::{workdays, Calendar};
///
/// let cal = Calendar::utc();
/// let friday = cal.ymd(2024, 5, 17).unwrap();
/// let next = workdays::next_business_day(&cal, friday).unwrap();
/// assert_eq!(cal.format(next, "%Y-%m-%d"), "2024-05-20"); // Monday
/// ```
pub fn next_business_day(cal: &Calendar, instant: DateTime<Utc>) -> Result<DateTime<Utc>> {
    let mut cursor = step(cal, instant, 1)?;
    while cal.is_weekend(cursor) {
        cursor = step(cal, cursor, 1)?;
    }
    Ok(cursor)
}

/// `instant` unchanged when it falls on a workday, otherwise rolled
/// forward to the next workday.
///
/// # Errors
///
/// Propagates the failures of [`arith::checked_add`].
pub fn following(cal: &Calendar, instant: DateTime<Utc>) -> Result<DateTime<Utc>> {
    roll(cal, instant, 1)
}

/// `instant` unchanged when it falls on a workday, otherwise rolled back
/// to the previous workday.
///
/// # Errors
///
/// Propagates the failures of [`arith::checked_add`].
pub fn preceding(cal: &Calendar, instant: DateTime<Utc>) -> Result<DateTime<Utc>> {
    roll(cal, instant, -1)
}

fn roll(cal: &Calendar, instant: DateTime<Utc>, direction: i64) -> Result<DateTime<Utc>> {
    let mut cursor = instant;
    while cal.is_weekend(cursor) {
        cursor = step(cal, cursor, direction)?;
    }
    Ok(cursor)
}

/// Step `n` business days from `instant`. Negative `n` steps backward;
/// zero returns the input unchanged.
///
/// Each single-day step preserves wall-clock time, and only non-weekend
/// landings count against `n`.
///
/// # Errors
///
/// Propagates the failures of [`arith::checked_add`].
///
/// # Examples
///
/// ```
/// use almanac::{workdays, Calendar};
///
/// let cal = Calendar::utc();
/// let monday = cal.ymd(2024, 5, 20).unwrap();
/// let back = workdays::add_business_days(&cal, monday, -1).unwrap();
/// assert_eq!(cal.format(back, "%Y-%m-%d"), "2024-05-17"); // Friday
/// ```
pub fn add_business_days(cal: &Calendar, instant: DateTime<Utc>, n: i64) -> Result<DateTime<Utc>> {
    let direction = n.signum();
    let mut remaining = n.abs();
    let mut cursor = instant;
    while remaining > 0 {
        cursor = step(cal, cursor, direction)?;
        if !cal.is_weekend(cursor) {
            remaining -= 1;
        }
    }
    Ok(cursor)
}

// ── Weekday occurrences ─────────────────────────────────────────────────────

/// The nearest strictly future occurrence of `weekday`, at local
/// midnight.
///
/// An instant already on the requested weekday yields the occurrence a
/// full week ahead.
///
/// # Errors
///
/// [`AlmanacError::AmbiguousLocalTime`](crate::AlmanacError::AmbiguousLocalTime)
/// when midnight of the target day sits in a DST gap.
///
/// # Examples
///
/// ```
/// use almanac::{workdays, Calendar};
/// use chrono::Weekday;
///
/// let cal = Calendar::utc();
/// let wednesday = cal.ymd_hms(2024, 5, 15, 13, 45, 10).unwrap();
/// let friday = workdays::next_occurrence(&cal, wednesday, Weekday::Fri).unwrap();
/// assert_eq!(cal.format(friday, "%Y-%m-%d %H:%M:%S"), "2024-05-17 00:00:00");
/// ```
pub fn next_occurrence(
    cal: &Calendar,
    instant: DateTime<Utc>,
    weekday: Weekday,
) -> Result<DateTime<Utc>> {
    let local = cal.local(instant);
    let ahead = (i64::from(weekday.num_days_from_monday())
        - i64::from(local.weekday().num_days_from_monday())
        + 7)
        % 7;
    let ahead = if ahead == 0 { 7 } else { ahead };
    let date = local.date_naive() + Duration::days(ahead);
    cal.resolve(date.and_time(NaiveTime::MIN))
}

/// The nearest strictly past occurrence of `weekday`, at local midnight.
///
/// The mirror of [`next_occurrence`]: an instant already on the requested
/// weekday yields the occurrence a full week back.
///
/// # Errors
///
/// Same failure modes as [`next_occurrence`].
pub fn previous_occurrence(
    cal: &Calendar,
    instant: DateTime<Utc>,
    weekday: Weekday,
) -> Result<DateTime<Utc>> {
    let local = cal.local(instant);
    let back = (i64::from(local.weekday().num_days_from_monday())
        - i64::from(weekday.num_days_from_monday())
        + 7)
        % 7;
    let back = if back == 0 { 7 } else { back };
    let date = local.date_naive() - Duration::days(back);
    cal.resolve(date.and_time(NaiveTime::MIN))
}

fn step(cal: &Calendar, instant: DateTime<Utc>, direction: i64) -> Result<DateTime<Utc>> {
    arith::checked_add(cal, instant, &Span::days(direction))
}

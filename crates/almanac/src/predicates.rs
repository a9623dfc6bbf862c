//! Yes/no calendar checks against an explicit anchor.
//!
//! Nothing here reads the system clock: "today" is the day containing the
//! caller-supplied `now`. Consecutive checks that each capture their own
//! anchor can disagree across a period boundary, so callers capture `now`
//! once and reuse it when that matters.

use chrono::{DateTime, Utc};

use crate::calendar::{Calendar, Period};

/// Whether `instant` is strictly after `other`.
pub fn is_after(instant: DateTime<Utc>, other: DateTime<Utc>) -> bool {
    instant > other
}

/// Whether `instant` is strictly before `other`.
pub fn is_before(instant: DateTime<Utc>, other: DateTime<Utc>) -> bool {
    instant < other
}

/// Whether two instants share a civil day in the calendar's zone.
pub fn is_same_day(cal: &Calendar, a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
    cal.is_same(a, b, Period::Day)
}

/// Whether `instant` falls on the day containing `now`.
pub fn is_today(cal: &Calendar, instant: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    cal.is_same(instant, now, Period::Day)
}

/// Whether `instant` falls on the day after the one containing `now`.
pub fn is_tomorrow(cal: &Calendar, instant: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    match cal.local(now).date_naive().succ_opt() {
        Some(next) => cal.local(instant).date_naive() == next,
        None => false,
    }
}

/// Whether `instant` falls on the day before the one containing `now`.
pub fn is_yesterday(cal: &Calendar, instant: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    match cal.local(now).date_naive().pred_opt() {
        Some(prev) => cal.local(instant).date_naive() == prev,
        None => false,
    }
}

/// Whether `instant` falls in the week containing `now`, honoring the
/// calendar's week start.
pub fn is_this_week(cal: &Calendar, instant: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    cal.is_same(instant, now, Period::Week)
}

/// Whether `instant` falls in the month containing `now`.
pub fn is_this_month(cal: &Calendar, instant: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    cal.is_same(instant, now, Period::Month)
}

/// Whether `instant` falls in the year containing `now`.
pub fn is_this_year(cal: &Calendar, instant: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    cal.is_same(instant, now, Period::Year)
}

/// Whether `instant` lands on one of the calendar's weekend days.
pub fn is_weekend(cal: &Calendar, instant: DateTime<Utc>) -> bool {
    cal.is_weekend(instant)
}

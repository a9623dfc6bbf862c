//! Natural-language relative time: "2 hours ago", "in 3 days", "just
//! now".

use chrono::{DateTime, Utc};

use crate::arith;
use crate::calendar::{Calendar, Period};
use crate::predicates;
use crate::span::Span;

/// Seconds magnitude at or below which [`phrase`] collapses to
/// "just now" / "now".
const NEAR_SECONDS: i64 = 10;

/// Describe `date` relative to `reference` using the largest nonzero
/// calendar unit.
///
/// The unit comes from the facade's multi-field difference, scanned in
/// the order years, months, weeks, days, hours, minutes, seconds; the
/// remainder beneath the chosen unit rounds the value half-up, so ninety
/// seconds reads "2 minutes ago" rather than "1 minute ago", and a value
/// that rounds all the way to the next unit's radix is carried upward,
/// so fifty-nine and a half minutes reads "1 hour ago" rather than
/// "60 minutes ago". Differences of ten seconds or less, including
/// identical instants, read "just now" in the past direction and "now"
/// in the future direction.
///
/// # Examples
///
/// ```
/// use almanac::{relative, Calendar};
///
/// let cal = Calendar::utc();
/// let reference = cal.ymd_hms(2024, 5, 15, 12, 0, 0).unwrap();
/// let earlier = cal.ymd_hms(2024, 5, 15, 10, 0, 0).unwrap();
/// let later = cal.ymd_hms(2024, 5, 18, 12, 0, 0).unwrap();
/// assert_eq!(relative::phrase(&cal, earlier, reference), "2 hours ago");
/// assert_eq!(relative::phrase(&cal, later, reference), "in 3 days");
/// ```
pub fn phrase(cal: &Calendar, date: DateTime<Utc>, reference: DateTime<Utc>) -> String {
    let past = date <= reference;
    let (a, b) = if past { (date, reference) } else { (reference, date) };
    let diff = arith::between(cal, a, b);

    let (value, unit) = pick_unit(&diff);
    if unit == "second" && value <= NEAR_SECONDS {
        return if past { "just now" } else { "now" }.to_string();
    }
    let noun = if value == 1 { unit.to_string() } else { format!("{unit}s") };
    if past {
        format!("{value} {noun} ago")
    } else {
        format!("in {value} {noun}")
    }
}

/// Describe `date` against `now` with the conversational special cases.
///
/// The checks run in a fixed order: same civil day and under a minute
/// apart reads "now"; any other same-day difference falls through to
/// [`phrase`]; the previous civil day reads "yesterday" and the next
/// "tomorrow" regardless of the hour gap; everything else falls through
/// to [`phrase`].
///
/// # Examples
///
/// ```
/// use almanac::{relative, Calendar};
///
/// let cal = Calendar::utc();
/// let now = cal.ymd_hms(2024, 5, 15, 12, 0, 0).unwrap();
/// let late_yesterday = cal.ymd_hms(2024, 5, 14, 23, 0, 0).unwrap();
/// assert_eq!(relative::describe(&cal, late_yesterday, now), "yesterday");
/// ```
pub fn describe(cal: &Calendar, date: DateTime<Utc>, now: DateTime<Utc>) -> String {
    if cal.is_same(date, now, Period::Day) {
        if (now - date).num_seconds().abs() < 60 {
            return "now".to_string();
        }
        return phrase(cal, date, now);
    }
    if predicates::is_yesterday(cal, date, now) {
        return "yesterday".to_string();
    }
    if predicates::is_tomorrow(cal, date, now) {
        return "tomorrow".to_string();
    }
    phrase(cal, date, now)
}

/// The first nonzero unit of the decomposition, its value rounded
/// half-up by the remainder below it and promoted when the rounding
/// reaches the next unit's radix.
fn pick_unit(diff: &Span) -> (i64, &'static str) {
    let time_seconds = diff.hours * 3_600 + diff.minutes * 60 + diff.seconds;
    let day_seconds = diff.days * 86_400 + time_seconds;
    let sub_month_days = diff.weeks * 7 + diff.days;

    let (value, unit) = if diff.years > 0 {
        (diff.years + i64::from(diff.months >= 6), "year")
    } else if diff.months > 0 {
        (diff.months + i64::from(sub_month_days >= 15), "month")
    } else if diff.weeks > 0 {
        (round_half_up(diff.weeks * 604_800 + day_seconds, 604_800), "week")
    } else if diff.days > 0 {
        (round_half_up(day_seconds, 86_400), "day")
    } else if diff.hours > 0 {
        (round_half_up(time_seconds, 3_600), "hour")
    } else if diff.minutes > 0 {
        (round_half_up(diff.minutes * 60 + diff.seconds, 60), "minute")
    } else {
        (diff.seconds, "second")
    };
    promote(value, unit)
}

/// Carry a rounded value that reached the next unit's radix into that
/// unit. The decomposition bounds each field below its radix, so the
/// rounded value can only ever reach it exactly.
fn promote(value: i64, unit: &'static str) -> (i64, &'static str) {
    match (value, unit) {
        (12, "month") => (1, "year"),
        (7, "day") => (1, "week"),
        (24, "hour") => (1, "day"),
        (60, "minute") => (1, "hour"),
        _ => (value, unit),
    }
}

/// Integer round-half-up of `numerator / denominator`.
fn round_half_up(numerator: i64, denominator: i64) -> i64 {
    (numerator + denominator / 2) / denominator
}

//! The calendar arithmetic facade: span application and multi-field
//! differences.
//!
//! Date-level units (years, months, weeks, days) move the civil date in
//! the calendar's zone with wall-clock time preserved across DST
//! transitions; hour, minute, and second units are absolute seconds.
//! Month steps clamp to the end of the target month, so January 31 plus
//! one month is the last day of February.

use chrono::{DateTime, Datelike, Days, Duration, Months, NaiveDate, NaiveDateTime, Utc};

use crate::calendar::Calendar;
use crate::error::{AlmanacError, Result};
use crate::span::Span;

// ── Span application ────────────────────────────────────────────────────────

/// Apply a span to an instant under the calendar.
///
/// Year and month fields move the civil date first (clamping to month
/// ends), then weeks and days, keeping the original wall-clock time; the
/// shifted wall-clock is re-anchored in the calendar's zone before the
/// sub-day fields are added as absolute seconds.
///
/// # Arguments
///
/// * `cal` — The calendar whose zone interprets the civil date
/// * `instant` — The UTC instant to shift
/// * `span` — The offset to apply; zero fields contribute nothing
///
/// # Returns
///
/// The shifted UTC instant. Day-level movement lands on the same wall
/// clock even across a DST transition, so the absolute distance moved can
/// differ from 24 hours per day.
///
/// # Errors
///
/// Returns [`AlmanacError::Unrepresentable`] if the shifted instant falls
/// outside the representable range, or [`AlmanacError::AmbiguousLocalTime`]
/// if re-anchoring the shifted wall-clock hits a DST gap or fold.
///
/// # Examples
///
/// ```
/// use almanac::{arith, Calendar, Span};
///
/// let cal = Calendar::utc();
/// let d = cal.ymd_hms(2024, 1, 31, 12, 0, 0).unwrap();
/// let shifted = arith::checked_add(&cal, d, &Span::months(1)).unwrap();
/// assert_eq!(cal.format(shifted, "%Y-%m-%d %H:%M"), "2024-02-29 12:00");
/// ```
pub fn checked_add(cal: &Calendar, instant: DateTime<Utc>, span: &Span) -> Result<DateTime<Utc>> {
    let (months, days, seconds) = totals(span).ok_or(AlmanacError::Unrepresentable)?;

    let shifted = if months != 0 || days != 0 {
        let local = cal.local(instant);
        let date =
            shift_date(local.date_naive(), months, days).ok_or(AlmanacError::Unrepresentable)?;
        cal.resolve(date.and_time(local.time()))?
    } else {
        instant
    };

    let step = Duration::try_seconds(seconds).ok_or(AlmanacError::Unrepresentable)?;
    shifted
        .checked_add_signed(step)
        .ok_or(AlmanacError::Unrepresentable)
}

/// Apply the negation of a span; see [`checked_add`].
///
/// # Errors
///
/// Same failure modes as [`checked_add`].
pub fn checked_sub(cal: &Calendar, instant: DateTime<Utc>, span: &Span) -> Result<DateTime<Utc>> {
    checked_add(cal, instant, &-*span)
}

/// Apply a span to an instant, aborting on failure.
///
/// The fallible form is [`checked_add`]; this wrapper serves call sites
/// that treat arithmetic failure as fatal.
///
/// # Panics
///
/// Panics when the calendar cannot represent the result.
pub fn add(cal: &Calendar, instant: DateTime<Utc>, span: &Span) -> DateTime<Utc> {
    match checked_add(cal, instant, span) {
        Ok(shifted) => shifted,
        Err(err) => panic!("span addition failed: {err}"),
    }
}

/// Apply the negation of a span, aborting on failure; see [`add`].
///
/// # Panics
///
/// Panics when the calendar cannot represent the result.
pub fn sub(cal: &Calendar, instant: DateTime<Utc>, span: &Span) -> DateTime<Utc> {
    match checked_sub(cal, instant, span) {
        Ok(shifted) => shifted,
        Err(err) => panic!("span subtraction failed: {err}"),
    }
}

/// Total whole months, whole days, and absolute seconds of a span.
fn totals(span: &Span) -> Option<(i64, i64, i64)> {
    let months = span.years.checked_mul(12)?.checked_add(span.months)?;
    let days = span.weeks.checked_mul(7)?.checked_add(span.days)?;
    let seconds = span
        .hours
        .checked_mul(3_600)?
        .checked_add(span.minutes.checked_mul(60)?)?
        .checked_add(span.seconds)?;
    Some((months, days, seconds))
}

/// Move a civil date by whole months (clamping to month ends), then days.
fn shift_date(date: NaiveDate, months: i64, days: i64) -> Option<NaiveDate> {
    let month_count = u32::try_from(months.unsigned_abs()).ok()?;
    let date = if months >= 0 {
        date.checked_add_months(Months::new(month_count))?
    } else {
        date.checked_sub_months(Months::new(month_count))?
    };
    if days >= 0 {
        date.checked_add_days(Days::new(days.unsigned_abs()))
    } else {
        date.checked_sub_days(Days::new(days.unsigned_abs()))
    }
}

// ── Differences ─────────────────────────────────────────────────────────────

/// The multi-field difference from `from` to `to`.
///
/// The decomposition walks the fixed unit order years, months, weeks,
/// days, hours, minutes, seconds: first the largest whole-month count
/// whose clamped step does not overshoot `to`, then the remainder split
/// into the units below a month. The computation runs on wall-clock time
/// in the calendar's zone, mirroring [`checked_add`]. A pair whose local
/// wall clocks read equal or reversed, which happens inside a fall-back
/// fold, is decomposed from the absolute gap instead.
///
/// # Returns
///
/// A [`Span`] whose fields all carry the sign of the direction, with
/// `between(cal, a, b) == -between(cal, b, a)`. Infallible: any pair of
/// representable instants has a decomposition.
///
/// # Examples
///
/// ```
/// use almanac::{arith, Calendar, Span};
///
/// let cal = Calendar::utc();
/// let from = cal.ymd(2024, 2, 29).unwrap();
/// let to = cal.ymd(2025, 3, 1).unwrap();
/// assert_eq!(arith::between(&cal, from, to), Span::years(1).and_days(1));
/// ```
pub fn between(cal: &Calendar, from: DateTime<Utc>, to: DateTime<Utc>) -> Span {
    if from == to {
        return Span::ZERO;
    }
    let negate = to < from;
    let (a, b) = if negate { (to, from) } else { (from, to) };
    let (la, lb) = (cal.local(a).naive_local(), cal.local(b).naive_local());

    // A fall-back fold can repeat or reverse the local clock even though
    // `b` sits after `a`; the month walk has no meaning there.
    let span = if la >= lb {
        decompose(0, (b - a).num_seconds())
    } else {
        let mut months =
            i64::from(lb.year() - la.year()) * 12 + i64::from(lb.month()) - i64::from(la.month());
        let mut anchor = add_months_clamped(la, months);
        if anchor > lb {
            months -= 1;
            anchor = add_months_clamped(la, months);
        }
        decompose(months, (lb - anchor).num_seconds())
    };
    if negate {
        -span
    } else {
        span
    }
}

/// Split a whole-month count and a non-negative second remainder into
/// span fields.
fn decompose(months: i64, seconds: i64) -> Span {
    let (day_count, time) = (seconds / 86_400, seconds % 86_400);
    Span {
        years: months / 12,
        months: months % 12,
        weeks: day_count / 7,
        days: day_count % 7,
        hours: time / 3_600,
        minutes: (time % 3_600) / 60,
        seconds: time % 60,
    }
}

/// `naive` moved forward by whole months, clamped to the target month's
/// end, wall-clock time preserved. Callers pass a non-negative count
/// within the span of representable dates.
fn add_months_clamped(naive: NaiveDateTime, months: i64) -> NaiveDateTime {
    let date = u32::try_from(months)
        .ok()
        .and_then(|m| naive.date().checked_add_months(Months::new(m)))
        .unwrap_or_else(|| naive.date());
    date.and_time(naive.time())
}

//! Period boundaries: the first and last instants of a day, week, month,
//! or year, plus month-edge days.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc};

use crate::arith;
use crate::calendar::{month_length, Calendar, Period};
use crate::error::{AlmanacError, Result};
use crate::span::Span;

/// The first instant of the period containing `instant`.
///
/// Week starts honor the calendar's configured week start day.
///
/// # Errors
///
/// [`AlmanacError::AmbiguousLocalTime`] when the period's opening
/// midnight does not exist in the calendar's zone (a DST gap at
/// midnight).
///
/// # Examples
///
/// ```
/// use almanac::{boundary, Calendar, Period};
///
/// let cal = Calendar::utc();
/// let d = cal.ymd_hms(2024, 5, 15, 13, 45, 10).unwrap();
/// let start = boundary::start_of(&cal, d, Period::Week).unwrap();
/// assert_eq!(cal.format(start, "%Y-%m-%d %H:%M:%S"), "2024-05-13 00:00:00");
/// ```
pub fn start_of(cal: &Calendar, instant: DateTime<Utc>, period: Period) -> Result<DateTime<Utc>> {
    let local = cal.local(instant);
    let date = match period {
        Period::Day => local.date_naive(),
        Period::Week => cal.week_anchor(local.date_naive()),
        Period::Month => NaiveDate::from_ymd_opt(local.year(), local.month(), 1)
            .ok_or(AlmanacError::Unrepresentable)?,
        Period::Year => {
            NaiveDate::from_ymd_opt(local.year(), 1, 1).ok_or(AlmanacError::Unrepresentable)?
        }
    };
    cal.resolve(date.and_time(NaiveTime::MIN))
}

/// The last instant of the period containing `instant`: one second before
/// the next period opens.
///
/// # Errors
///
/// Same failure modes as [`start_of`].
pub fn end_of(cal: &Calendar, instant: DateTime<Utc>, period: Period) -> Result<DateTime<Utc>> {
    let start = start_of(cal, instant, period)?;
    let next = arith::checked_add(cal, start, &one(period))?;
    next.checked_sub_signed(Duration::seconds(1))
        .ok_or(AlmanacError::Unrepresentable)
}

fn one(period: Period) -> Span {
    match period {
        Period::Day => Span::days(1),
        Period::Week => Span::weeks(1),
        Period::Month => Span::months(1),
        Period::Year => Span::years(1),
    }
}

/// Day one of the month containing `instant`, wall-clock time preserved.
///
/// # Errors
///
/// [`AlmanacError::AmbiguousLocalTime`] when the wall-clock time is
/// skipped or repeated on the target day.
pub fn first_day_of_month(cal: &Calendar, instant: DateTime<Utc>) -> Result<DateTime<Utc>> {
    let local = cal.local(instant);
    let date = NaiveDate::from_ymd_opt(local.year(), local.month(), 1)
        .ok_or(AlmanacError::Unrepresentable)?;
    cal.resolve(date.and_time(local.time()))
}

/// The final day of the month containing `instant`, wall-clock time
/// preserved.
///
/// # Errors
///
/// Same failure modes as [`first_day_of_month`].
pub fn last_day_of_month(cal: &Calendar, instant: DateTime<Utc>) -> Result<DateTime<Utc>> {
    let local = cal.local(instant);
    let last = month_length(local.year(), local.month());
    let date = NaiveDate::from_ymd_opt(local.year(), local.month(), last)
        .ok_or(AlmanacError::Unrepresentable)?;
    cal.resolve(date.and_time(local.time()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::WeekStart;

    fn utc() -> Calendar {
        Calendar::utc()
    }

    #[test]
    fn test_day_boundaries_bracket_the_civil_day() {
        let cal = utc();
        let d = cal.ymd_hms(2024, 5, 15, 13, 45, 10).unwrap();
        let start = start_of(&cal, d, Period::Day).unwrap();
        let end = end_of(&cal, d, Period::Day).unwrap();
        assert_eq!(cal.format(start, "%H:%M:%S"), "00:00:00");
        assert_eq!(cal.format(end, "%Y-%m-%d %H:%M:%S"), "2024-05-15 23:59:59");
        assert_eq!(end - start, Duration::seconds(86_399));
    }

    #[test]
    fn test_week_boundaries_honor_the_week_start() {
        let cal = utc();
        let wednesday = cal.ymd(2024, 5, 15).unwrap();

        let monday_start = start_of(&cal, wednesday, Period::Week).unwrap();
        assert_eq!(cal.format(monday_start, "%Y-%m-%d"), "2024-05-13");

        let sunday_cal = utc().with_week_start(WeekStart::Sunday);
        let sunday_start = start_of(&sunday_cal, wednesday, Period::Week).unwrap();
        assert_eq!(sunday_cal.format(sunday_start, "%Y-%m-%d"), "2024-05-12");

        let end = end_of(&sunday_cal, wednesday, Period::Week).unwrap();
        assert_eq!(sunday_cal.format(end, "%Y-%m-%d %H:%M:%S"), "2024-05-18 23:59:59");
    }

    #[test]
    fn test_month_end_lands_on_leap_day_in_february() {
        let cal = utc();
        let feb = cal.ymd(2024, 2, 10).unwrap();
        let end = end_of(&cal, feb, Period::Month).unwrap();
        assert_eq!(cal.format(end, "%Y-%m-%d %H:%M:%S"), "2024-02-29 23:59:59");

        let plain_feb = cal.ymd(2025, 2, 10).unwrap();
        let plain_end = end_of(&cal, plain_feb, Period::Month).unwrap();
        assert_eq!(cal.format(plain_end, "%Y-%m-%d"), "2025-02-28");
    }

    #[test]
    fn test_year_boundaries_bracket_the_civil_year() {
        let cal = utc();
        let d = cal.ymd(2024, 5, 15).unwrap();
        let start = start_of(&cal, d, Period::Year).unwrap();
        let end = end_of(&cal, d, Period::Year).unwrap();
        assert_eq!(cal.format(start, "%Y-%m-%d %H:%M:%S"), "2024-01-01 00:00:00");
        assert_eq!(cal.format(end, "%Y-%m-%d %H:%M:%S"), "2024-12-31 23:59:59");
    }

    #[test]
    fn test_boundaries_follow_the_calendar_zone() {
        let nyc = Calendar::new(chrono_tz::America::New_York);
        // 01:30 UTC on May 16 is the evening of May 15 in New York.
        let d = utc().ymd_hms(2024, 5, 16, 1, 30, 0).unwrap();
        let start = start_of(&nyc, d, Period::Day).unwrap();
        assert_eq!(nyc.format(start, "%Y-%m-%d %H:%M"), "2024-05-15 00:00");
        assert_eq!(utc().format(start, "%Y-%m-%d %H:%M"), "2024-05-15 04:00");
    }

    #[test]
    fn test_start_of_day_fails_when_midnight_is_skipped() {
        let sao_paulo = Calendar::new(chrono_tz::America::Sao_Paulo);
        let late = utc().ymd_hms(2018, 11, 4, 12, 0, 0).unwrap();
        assert_eq!(
            start_of(&sao_paulo, late, Period::Day),
            Err(AlmanacError::AmbiguousLocalTime)
        );
    }

    #[test]
    fn test_month_edge_days_preserve_wall_clock() {
        let cal = utc();
        let d = cal.ymd_hms(2024, 5, 15, 13, 45, 10).unwrap();
        let first = first_day_of_month(&cal, d).unwrap();
        let last = last_day_of_month(&cal, d).unwrap();
        assert_eq!(cal.format(first, "%Y-%m-%d %H:%M:%S"), "2024-05-01 13:45:10");
        assert_eq!(cal.format(last, "%Y-%m-%d %H:%M:%S"), "2024-05-31 13:45:10");
    }

    #[test]
    fn test_last_day_of_february_tracks_leap_years() {
        let cal = utc();
        let leap = last_day_of_month(&cal, cal.ymd(2024, 2, 1).unwrap()).unwrap();
        let plain = last_day_of_month(&cal, cal.ymd(2025, 2, 1).unwrap()).unwrap();
        assert_eq!(cal.format(leap, "%Y-%m-%d"), "2024-02-29");
        assert_eq!(cal.format(plain, "%Y-%m-%d"), "2025-02-28");
    }
}

//! The injected calendar service: time zone, week conventions, field
//! extraction, and checked construction.
//!
//! Every calendar-aware function in this crate takes a [`Calendar`] rather
//! than consulting process-wide state, so callers pin the zone, week start,
//! and weekend set and get deterministic results anywhere. A [`Calendar`]
//! is `Copy` and cheap to pass by reference.

use chrono::{
    DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike, Utc,
    Weekday,
};
use chrono_tz::Tz;
use serde::Serialize;

use crate::error::{AlmanacError, Result};
use crate::parts::DateParts;

// ── Week and field vocabulary ───────────────────────────────────────────────

/// Which day begins a week, for week boundaries, week equality, and
/// week-of-year numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum WeekStart {
    /// ISO 8601 convention.
    #[default]
    Monday,
    /// US/Canada convention.
    Sunday,
}

/// A calendar granularity used by boundary and same-period operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Period {
    Day,
    Week,
    Month,
    Year,
}

/// A single extractable calendar field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Field {
    Year,
    /// Quarter of the year, 1 through 4.
    Quarter,
    Month,
    /// Week number within the year. ISO numbering for Monday weeks,
    /// anchored at January 1 for Sunday weeks.
    WeekOfYear,
    /// Day of the week, coded 1 = Sunday through 7 = Saturday.
    Weekday,
    Day,
    Hour,
    Minute,
    Second,
}

// ── Calendar ────────────────────────────────────────────────────────────────

/// Calendar context: an IANA time zone plus week conventions.
///
/// The default calendar is UTC with Monday week starts and a
/// Saturday/Sunday weekend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Calendar {
    tz: Tz,
    week_start: WeekStart,
    /// Weekend membership indexed by days-from-Monday.
    weekend: [bool; 7],
}

impl Default for Calendar {
    fn default() -> Self {
        Self::utc()
    }
}

impl Calendar {
    /// A UTC calendar with Monday week starts and a Saturday/Sunday
    /// weekend.
    pub fn utc() -> Self {
        Self::new(chrono_tz::UTC)
    }

    /// A calendar in the given zone, with Monday week starts and a
    /// Saturday/Sunday weekend.
    pub fn new(tz: Tz) -> Self {
        Calendar {
            tz,
            week_start: WeekStart::Monday,
            weekend: weekend_mask(&[Weekday::Sat, Weekday::Sun]),
        }
    }

    /// Replace the week start day.
    pub fn with_week_start(mut self, week_start: WeekStart) -> Self {
        self.week_start = week_start;
        self
    }

    /// Replace the weekend set.
    ///
    /// Weekend-skipping loops elsewhere in this crate require at least one
    /// workday per week; an all-weekend calendar is not defended against.
    pub fn with_weekend(mut self, days: &[Weekday]) -> Self {
        self.weekend = weekend_mask(days);
        self
    }

    /// The zone this calendar interprets instants in.
    pub fn timezone(&self) -> Tz {
        self.tz
    }

    /// The configured week start day.
    pub fn week_start(&self) -> WeekStart {
        self.week_start
    }

    // ── Zone plumbing ───────────────────────────────────────────────────────

    /// The instant expressed in this calendar's zone.
    pub fn local(&self, instant: DateTime<Utc>) -> DateTime<Tz> {
        instant.with_timezone(&self.tz)
    }

    /// Interpret a civil datetime in this calendar's zone as a UTC instant.
    ///
    /// Fails when the zone's DST rules make the wall-clock time skipped or
    /// ambiguous.
    pub(crate) fn resolve(&self, naive: NaiveDateTime) -> Result<DateTime<Utc>> {
        self.tz
            .from_local_datetime(&naive)
            .single()
            .map(|dt| dt.with_timezone(&Utc))
            .ok_or(AlmanacError::AmbiguousLocalTime)
    }

    // ── Week conventions ────────────────────────────────────────────────────

    /// How many days `weekday` sits past this calendar's week start.
    pub(crate) fn days_from_week_start(&self, weekday: Weekday) -> i64 {
        match self.week_start {
            WeekStart::Monday => i64::from(weekday.num_days_from_monday()),
            WeekStart::Sunday => i64::from(weekday.num_days_from_sunday()),
        }
    }

    /// The civil date this calendar's week containing `date` begins on.
    pub(crate) fn week_anchor(&self, date: NaiveDate) -> NaiveDate {
        date - Duration::days(self.days_from_week_start(date.weekday()))
    }

    /// Whether the instant falls on one of this calendar's weekend days.
    pub fn is_weekend(&self, instant: DateTime<Utc>) -> bool {
        self.weekend[self.local(instant).weekday().num_days_from_monday() as usize]
    }

    /// The day of the week the instant falls on in this calendar's zone.
    pub fn weekday(&self, instant: DateTime<Utc>) -> Weekday {
        self.local(instant).weekday()
    }

    // ── Comparison ──────────────────────────────────────────────────────────

    /// Whether two instants fall within the same calendar period.
    ///
    /// Week equality honors the configured week start: a Saturday and the
    /// following Sunday share a week under [`WeekStart::Monday`] but not
    /// under [`WeekStart::Sunday`].
    pub fn is_same(&self, a: DateTime<Utc>, b: DateTime<Utc>, period: Period) -> bool {
        let (la, lb) = (self.local(a), self.local(b));
        match period {
            Period::Day => la.date_naive() == lb.date_naive(),
            Period::Week => self.week_anchor(la.date_naive()) == self.week_anchor(lb.date_naive()),
            Period::Month => (la.year(), la.month()) == (lb.year(), lb.month()),
            Period::Year => la.year() == lb.year(),
        }
    }

    // ── Field extraction ────────────────────────────────────────────────────

    /// Extract one calendar field from the instant, interpreted in this
    /// calendar's zone.
    ///
    /// # Examples
    ///
    /// ```
    /// use almanac::{Calendar, Field};
    ///
    /// let cal = Calendar::utc();
    /// let d = cal.ymd_hms(2024, 5, 15, 13, 45, 10).unwrap();
    /// assert_eq!(cal.field(d, Field::Quarter), 2);
    /// assert_eq!(cal.field(d, Field::Weekday), 4); // Wednesday
    /// ```
    pub fn field(&self, instant: DateTime<Utc>, field: Field) -> i32 {
        let local = self.local(instant);
        match field {
            Field::Year => local.year(),
            Field::Quarter => ((local.month() - 1) / 3 + 1) as i32,
            Field::Month => local.month() as i32,
            Field::WeekOfYear => self.week_of_year(local.date_naive()) as i32,
            Field::Weekday => (local.weekday().num_days_from_sunday() + 1) as i32,
            Field::Day => local.day() as i32,
            Field::Hour => local.hour() as i32,
            Field::Minute => local.minute() as i32,
            Field::Second => local.second() as i32,
        }
    }

    /// Extract every field of the instant into a fully populated
    /// [`DateParts`].
    pub fn parts(&self, instant: DateTime<Utc>) -> DateParts {
        let local = self.local(instant);
        DateParts::new()
            .year(local.year())
            .quarter((local.month() - 1) / 3 + 1)
            .month(local.month())
            .week_of_year(self.week_of_year(local.date_naive()))
            .weekday(local.weekday().num_days_from_sunday() + 1)
            .day(local.day())
            .hour(local.hour())
            .minute(local.minute())
            .second(local.second())
    }

    /// Week number of the year for a civil date.
    fn week_of_year(&self, date: NaiveDate) -> u32 {
        match self.week_start {
            WeekStart::Monday => date.iso_week().week(),
            // Week 1 contains January 1; a new week begins every Sunday.
            WeekStart::Sunday => {
                let jan1 = NaiveDate::from_ymd_opt(date.year(), 1, 1).unwrap_or(date);
                let offset = jan1.weekday().num_days_from_sunday();
                (date.ordinal0() + offset) / 7 + 1
            }
        }
    }

    // ── Construction ────────────────────────────────────────────────────────

    /// Construct an instant from a set of field constraints.
    ///
    /// Absent year, month, day, hour, minute, and second fields default to
    /// the Unix epoch values (1970, 1, 1, 0, 0, 0). After construction,
    /// every field present in `parts` is re-extracted from the result and
    /// compared against the input, so an impossible date such as February 30
    /// is rejected rather than rolled into March. Constraint-only fields
    /// (weekday, quarter, week of year) are verified the same way, never
    /// solved for.
    ///
    /// # Returns
    ///
    /// The UTC instant whose extraction under this calendar reproduces
    /// every present field of `parts`.
    ///
    /// # Errors
    ///
    /// Returns [`AlmanacError::OutOfRange`] if a present field fails its
    /// range check, [`AlmanacError::Rollover`] if the constructed instant
    /// does not reproduce the input fields, or
    /// [`AlmanacError::AmbiguousLocalTime`] if the zone's DST rules skip
    /// or repeat the requested wall-clock time.
    ///
    /// # Examples
    ///
    /// ```
    /// use almanac::{Calendar, DateParts};
    ///
    /// let cal = Calendar::utc();
    /// assert!(cal.compose(&DateParts::new().year(2024).month(2).day(29)).is_ok());
    /// assert!(cal.compose(&DateParts::new().year(2025).month(2).day(29)).is_err());
    /// ```
    pub fn compose(&self, parts: &DateParts) -> Result<DateTime<Utc>> {
        if !parts.is_valid() {
            return Err(AlmanacError::OutOfRange);
        }
        let date = NaiveDate::from_ymd_opt(
            parts.year.unwrap_or(1970),
            parts.month.unwrap_or(1),
            parts.day.unwrap_or(1),
        )
        .ok_or(AlmanacError::Rollover)?;
        let time = NaiveTime::from_hms_opt(
            parts.hour.unwrap_or(0),
            parts.minute.unwrap_or(0),
            parts.second.unwrap_or(0),
        )
        .ok_or(AlmanacError::OutOfRange)?;
        let instant = self.resolve(date.and_time(time))?;

        // Round-trip check: an instant that does not reproduce the requested
        // fields was rolled over or breaks a constraint field.
        if !parts.matches(&self.parts(instant)) {
            return Err(AlmanacError::Rollover);
        }
        Ok(instant)
    }

    /// The instant at local midnight on the given civil date.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Calendar::compose`].
    pub fn ymd(&self, year: i32, month: u32, day: u32) -> Result<DateTime<Utc>> {
        self.compose(&DateParts::new().year(year).month(month).day(day))
    }

    /// An instant from a civil date and wall-clock time.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Calendar::compose`].
    pub fn ymd_hms(
        &self,
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> Result<DateTime<Utc>> {
        self.compose(
            &DateParts::new()
                .year(year)
                .month(month)
                .day(day)
                .hour(hour)
                .minute(minute)
                .second(second),
        )
    }

    // ── Formatting ──────────────────────────────────────────────────────────

    /// Render the instant in this calendar's zone with a chrono strftime
    /// pattern.
    ///
    /// The pattern is forwarded untouched; see [`chrono::format::strftime`]
    /// for the token reference.
    pub fn format(&self, instant: DateTime<Utc>, pattern: &str) -> String {
        self.local(instant).format(pattern).to_string()
    }
}

// ── Free helpers ────────────────────────────────────────────────────────────

/// Parse an RFC 3339 datetime string into a UTC instant.
///
/// # Errors
///
/// [`AlmanacError::Unparseable`] when the string is not valid RFC 3339.
///
/// # Examples
///
/// ```
/// use almanac::{parse_rfc3339, Calendar};
///
/// let d = parse_rfc3339("2024-05-15T13:45:10-04:00").unwrap();
/// assert_eq!(Calendar::utc().format(d, "%H:%M"), "17:45");
/// ```
pub fn parse_rfc3339(s: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| AlmanacError::Unparseable)
}

/// Number of days in the given month.
pub(crate) fn month_length(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if NaiveDate::from_ymd_opt(year, 2, 29).is_some() {
                29
            } else {
                28
            }
        }
        // Unreachable for the 1-12 months chrono hands us.
        _ => 30,
    }
}

fn weekend_mask(days: &[Weekday]) -> [bool; 7] {
    let mut mask = [false; 7];
    for day in days {
        mask[day.num_days_from_monday() as usize] = true;
    }
    mask
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn utc() -> Calendar {
        Calendar::utc()
    }

    // ── field extraction tests ──────────────────────────────────────────────

    #[test]
    fn test_extracts_each_field() {
        let cal = utc();
        let d = cal.ymd_hms(2024, 5, 15, 13, 45, 10).unwrap();
        assert_eq!(cal.field(d, Field::Year), 2024);
        assert_eq!(cal.field(d, Field::Quarter), 2);
        assert_eq!(cal.field(d, Field::Month), 5);
        assert_eq!(cal.field(d, Field::WeekOfYear), 20);
        assert_eq!(cal.field(d, Field::Weekday), 4); // Wednesday
        assert_eq!(cal.field(d, Field::Day), 15);
        assert_eq!(cal.field(d, Field::Hour), 13);
        assert_eq!(cal.field(d, Field::Minute), 45);
        assert_eq!(cal.field(d, Field::Second), 10);
    }

    #[test]
    fn test_weekday_codes_run_sunday_one_through_saturday_seven() {
        let cal = utc();
        let sunday = cal.ymd(2024, 5, 19).unwrap();
        let saturday = cal.ymd(2024, 5, 18).unwrap();
        assert_eq!(cal.field(sunday, Field::Weekday), 1);
        assert_eq!(cal.field(saturday, Field::Weekday), 7);
    }

    #[test]
    fn test_fields_follow_the_calendar_zone() {
        let nyc = Calendar::new(chrono_tz::America::New_York);
        // 2024-05-16 01:30 UTC is still May 15 in New York.
        let d = utc().ymd_hms(2024, 5, 16, 1, 30, 0).unwrap();
        assert_eq!(nyc.field(d, Field::Day), 15);
        assert_eq!(nyc.field(d, Field::Hour), 21);
    }

    #[test]
    fn test_week_of_year_iso_vs_sunday_anchored() {
        let iso = utc();
        let sunday = utc().with_week_start(WeekStart::Sunday);

        // 2021-01-01 was a Friday.
        let jan1 = iso.ymd(2021, 1, 1).unwrap();
        assert_eq!(iso.field(jan1, Field::WeekOfYear), 53); // ISO week of 2020
        assert_eq!(sunday.field(jan1, Field::WeekOfYear), 1);

        // The following Sunday opens week 2 under the Sunday convention.
        let jan3 = iso.ymd(2021, 1, 3).unwrap();
        assert_eq!(sunday.field(jan3, Field::WeekOfYear), 2);
    }

    // ── same-period tests ───────────────────────────────────────────────────

    #[test]
    fn test_same_week_depends_on_week_start() {
        let iso = utc();
        let sunday_start = utc().with_week_start(WeekStart::Sunday);
        let saturday = iso.ymd(2024, 5, 18).unwrap();
        let next_sunday = iso.ymd(2024, 5, 19).unwrap();
        assert!(iso.is_same(saturday, next_sunday, Period::Week));
        assert!(!sunday_start.is_same(saturday, next_sunday, Period::Week));
    }

    #[test]
    fn test_same_week_spans_the_year_boundary() {
        let cal = utc();
        // 2024-12-30 (Monday) through 2025-01-05 share an ISO week.
        let a = cal.ymd(2024, 12, 30).unwrap();
        let b = cal.ymd(2025, 1, 3).unwrap();
        assert!(cal.is_same(a, b, Period::Week));
        assert!(!cal.is_same(a, b, Period::Year));
    }

    #[test]
    fn test_same_day_depends_on_zone() {
        let nyc = Calendar::new(chrono_tz::America::New_York);
        let a = utc().ymd_hms(2024, 5, 16, 1, 0, 0).unwrap();
        let b = utc().ymd_hms(2024, 5, 16, 23, 0, 0).unwrap();
        assert!(utc().is_same(a, b, Period::Day));
        assert!(!nyc.is_same(a, b, Period::Day)); // May 15 vs May 16 local
    }

    // ── weekend tests ───────────────────────────────────────────────────────

    #[test]
    fn test_default_weekend_is_saturday_sunday() {
        let cal = utc();
        assert!(cal.is_weekend(cal.ymd(2024, 5, 18).unwrap()));
        assert!(cal.is_weekend(cal.ymd(2024, 5, 19).unwrap()));
        assert!(!cal.is_weekend(cal.ymd(2024, 5, 17).unwrap()));
    }

    #[test]
    fn test_weekend_set_is_configurable() {
        let cal = utc().with_weekend(&[Weekday::Fri, Weekday::Sat]);
        assert!(cal.is_weekend(cal.ymd(2024, 5, 17).unwrap()));
        assert!(!cal.is_weekend(cal.ymd(2024, 5, 19).unwrap()));
    }

    // ── construction tests ──────────────────────────────────────────────────

    #[test]
    fn test_compose_defaults_to_the_epoch() {
        let cal = utc();
        let d = cal.compose(&DateParts::new()).unwrap();
        assert_eq!(cal.format(d, "%Y-%m-%d %H:%M:%S"), "1970-01-01 00:00:00");
    }

    #[test]
    fn test_compose_accepts_leap_day_and_rejects_its_neighbor() {
        let cal = utc();
        assert!(cal.compose(&DateParts::new().year(2024).month(2).day(29)).is_ok());
        assert_eq!(
            cal.compose(&DateParts::new().year(2025).month(2).day(29)),
            Err(AlmanacError::Rollover)
        );
    }

    #[test]
    fn test_compose_never_rolls_impossible_days_forward() {
        let cal = utc();
        // Feb 30 and Apr 31 pass the pure range check but do not exist.
        assert_eq!(
            cal.compose(&DateParts::new().year(2024).month(2).day(30)),
            Err(AlmanacError::Rollover)
        );
        assert_eq!(
            cal.compose(&DateParts::new().year(2024).month(4).day(31)),
            Err(AlmanacError::Rollover)
        );
    }

    #[test]
    fn test_compose_rejects_out_of_range_fields() {
        let cal = utc();
        assert_eq!(
            cal.compose(&DateParts::new().month(13)),
            Err(AlmanacError::OutOfRange)
        );
        assert_eq!(
            cal.compose(&DateParts::new().hour(25)),
            Err(AlmanacError::OutOfRange)
        );
    }

    #[test]
    fn test_compose_verifies_constraint_fields_instead_of_solving() {
        let cal = utc();
        // 2024-05-15 is a Wednesday (code 4).
        let ok = DateParts::new().year(2024).month(5).day(15).weekday(4);
        assert!(cal.compose(&ok).is_ok());

        let contradiction = DateParts::new().year(2024).month(5).day(15).weekday(2);
        assert_eq!(cal.compose(&contradiction), Err(AlmanacError::Rollover));

        let wrong_quarter = DateParts::new().year(2024).month(5).day(15).quarter(3);
        assert_eq!(cal.compose(&wrong_quarter), Err(AlmanacError::Rollover));
    }

    #[test]
    fn test_compose_fails_inside_a_dst_gap() {
        // Brazil's 2018 DST jump skipped midnight of November 4.
        let sao_paulo = Calendar::new(chrono_tz::America::Sao_Paulo);
        assert_eq!(
            sao_paulo.ymd(2018, 11, 4),
            Err(AlmanacError::AmbiguousLocalTime)
        );
        assert!(sao_paulo.ymd(2018, 11, 5).is_ok());
    }

    #[test]
    fn test_ymd_hms_lands_on_the_requested_wall_clock() {
        let berlin = Calendar::new(chrono_tz::Europe::Berlin);
        let d = berlin.ymd_hms(2024, 5, 15, 13, 45, 10).unwrap();
        assert_eq!(berlin.format(d, "%Y-%m-%d %H:%M:%S"), "2024-05-15 13:45:10");
        assert_eq!(utc().field(d, Field::Hour), 11); // CEST is UTC+2
    }

    // ── parsing tests ───────────────────────────────────────────────────────

    #[test]
    fn test_parses_rfc3339_with_offset() {
        let d = parse_rfc3339("2024-05-15T13:45:10-04:00").unwrap();
        assert_eq!(utc().format(d, "%Y-%m-%dT%H:%M:%S"), "2024-05-15T17:45:10");
    }

    #[test]
    fn test_rejects_garbage_datetime_strings() {
        assert_eq!(parse_rfc3339("not a date"), Err(AlmanacError::Unparseable));
        assert_eq!(parse_rfc3339("2024-13-01T00:00:00Z"), Err(AlmanacError::Unparseable));
    }

    #[test]
    fn test_month_lengths_track_leap_years() {
        assert_eq!(month_length(2024, 2), 29);
        assert_eq!(month_length(2025, 2), 28);
        assert_eq!(month_length(1900, 2), 28);
        assert_eq!(month_length(2000, 2), 29);
        assert_eq!(month_length(2024, 4), 30);
        assert_eq!(month_length(2024, 12), 31);
    }

    proptest! {
        #[test]
        fn test_compose_then_extract_round_trips(
            year in 1970i32..2100,
            month in 1u32..=12,
            day in 1u32..=28,
            hour in 0u32..=23,
            minute in 0u32..=59,
            second in 0u32..=59,
        ) {
            let cal = Calendar::utc();
            let parts = DateParts::new()
                .year(year)
                .month(month)
                .day(day)
                .hour(hour)
                .minute(minute)
                .second(second);
            let instant = cal.compose(&parts).unwrap();
            let roundtrip = cal.parts(instant);
            prop_assert_eq!(roundtrip.year, Some(year));
            prop_assert_eq!(roundtrip.month, Some(month));
            prop_assert_eq!(roundtrip.day, Some(day));
            prop_assert_eq!(roundtrip.hour, Some(hour));
            prop_assert_eq!(roundtrip.minute, Some(minute));
            prop_assert_eq!(roundtrip.second, Some(second));
        }
    }
}

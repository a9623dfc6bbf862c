//! Compact rendering of raw elapsed seconds.

/// Seconds per minute.
pub const MINUTE: f64 = 60.0;
/// Seconds per hour.
pub const HOUR: f64 = 3_600.0;
/// Seconds per day.
pub const DAY: f64 = 86_400.0;
/// Seconds per week.
pub const WEEK: f64 = 604_800.0;

/// Render an elapsed-seconds value in its natural bucket.
///
/// Buckets are half-open on the lower bound: exactly sixty seconds is
/// "1m" and exactly one hour is "1.0h". Seconds and minutes render with
/// no decimal places; hours, days, and weeks keep one.
///
/// # Examples
///
/// ```
/// use almanac::elapsed::format_duration;
///
/// assert_eq!(format_duration(42.0), "42s");
/// assert_eq!(format_duration(90.0), "2m");
/// assert_eq!(format_duration(5_400.0), "1.5h");
/// assert_eq!(format_duration(1_000_000.0), "1.7w");
/// ```
pub fn format_duration(seconds: f64) -> String {
    if seconds < MINUTE {
        format!("{seconds:.0}s")
    } else if seconds < HOUR {
        format!("{:.0}m", seconds / MINUTE)
    } else if seconds < DAY {
        format!("{:.1}h", seconds / HOUR)
    } else if seconds < WEEK {
        format!("{:.1}d", seconds / DAY)
    } else {
        format!("{:.1}w", seconds / WEEK)
    }
}

//! # almanac
//!
//! Calendar-aware date conveniences over chrono.
//!
//! Almanac wraps the calendar arithmetic that is easy to get wrong when
//! done by hand: month-clamped span application, multi-field differences,
//! period boundaries, weekend and business-day navigation, relative-time
//! phrasing, and checked construction from sparse field sets.
//!
//! Every calendar-aware function takes an explicit [`Calendar`] (an IANA
//! zone plus week conventions) and, wherever "now" matters, an explicit
//! anchor instant. No function reads the system clock, so results are
//! reproducible and tests can pin both the zone and the moment.
//!
//! ## Modules
//!
//! - [`calendar`] — Zone, week conventions, field extraction, and checked construction
//! - [`span`] — Offset field sets and their calendar-normalized combination
//! - [`parts`] — Constraint field sets and their validation
//! - [`arith`] — Span application (checked and aborting) and multi-field differences
//! - [`boundary`] — First and last instants of day, week, month, year
//! - [`predicates`] — Today/tomorrow/weekend/same-period checks against an explicit anchor
//! - [`workdays`] — Business-day stepping and weekday occurrences
//! - [`relative`] — "2 hours ago" / "in 3 days" / "yesterday" phrasing
//! - [`elapsed`] — Compact duration strings from raw seconds
//! - [`util`] — Bounds-checked sequence access
//! - [`error`] — Error types

pub mod arith;
pub mod boundary;
pub mod calendar;
pub mod elapsed;
pub mod error;
pub mod parts;
pub mod predicates;
pub mod relative;
pub mod span;
pub mod util;
pub mod workdays;

pub use arith::{add, between, checked_add, checked_sub, sub};
pub use boundary::{end_of, first_day_of_month, last_day_of_month, start_of};
pub use calendar::{parse_rfc3339, Calendar, Field, Period, WeekStart};
pub use elapsed::format_duration;
pub use error::AlmanacError;
pub use parts::DateParts;
pub use predicates::{
    is_after, is_before, is_same_day, is_this_month, is_this_week, is_this_year, is_today,
    is_tomorrow, is_weekend, is_yesterday,
};
pub use relative::{describe, phrase};
pub use span::Span;
pub use util::element_at;
pub use workdays::{
    add_business_days, following, next_business_day, next_occurrence, preceding,
    previous_occurrence,
};

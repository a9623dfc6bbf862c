//! Error types for almanac operations.

use thiserror::Error;

/// Failures surfaced by calendar construction and arithmetic.
///
/// Variants carry no payload: a caller that needs to know which field was
/// at fault re-checks the fields itself.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlmanacError {
    #[error("Calendar field out of range")]
    OutOfRange,

    #[error("Field set does not survive round-trip construction")]
    Rollover,

    #[error("No representable instant for this operation")]
    Unrepresentable,

    #[error("Ambiguous or nonexistent local time")]
    AmbiguousLocalTime,

    #[error("Invalid RFC 3339 datetime")]
    Unparseable,
}

pub type Result<T> = std::result::Result<T, AlmanacError>;

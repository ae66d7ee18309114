use crate::consts::{MAX_YEAR, MIN_YEAR};
use crate::types::CalendarDate;

/// Error type for all fallible operations in this crate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Jalali year, month or day outside its valid range.
    #[error("Invalid Jalali date {year}/{month:02}/{day:02}")]
    InvalidCalendarDate { year: i32, month: i32, day: i32 },

    /// Gregorian month or day outside its valid range.
    #[error("Invalid Gregorian date {year}-{month:02}-{day:02}")]
    InvalidGregorianDate { year: i32, month: i32, day: i32 },

    /// String that cannot be read as a date, or a time field out of range.
    #[error("Invalid date string: {0}")]
    InvalidParseInput(String),

    /// Jalali year not covered by the break-point table.
    #[error("Jalali year {0} is outside the supported range {min}..={max}", min = MIN_YEAR, max = MAX_YEAR)]
    OutOfRange(i32),

    /// Unknown name for a calendar unit.
    #[error("Invalid unit: {0}")]
    InvalidUnit(String),

    /// Start date is after end date.
    #[error("Invalid date range: start ({start}) is after end ({end})")]
    InvalidRange { start: CalendarDate, end: CalendarDate },

    /// Wall-clock arithmetic left the range the time library can represent.
    #[error("Date arithmetic overflowed the representable range")]
    Overflow,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

//! Jalali (Solar Hijri) calendar dates and times.
//!
//! The crate converts between the Jalali and proleptic Gregorian calendars
//! through Julian Day Numbers, decides leap years from the historical
//! break-point table, and wraps a `chrono` instant in [`Jalali`], a value
//! whose calendar getters, setters and arithmetic work in Jalali terms.
//!
//! ```
//! use jalali_moment::{CalendarDate, to_gregorian, to_jalali};
//!
//! let nowruz = CalendarDate::new(1399, 1, 1);
//! assert_eq!(to_gregorian(nowruz)?, CalendarDate::new(2020, 3, 20));
//! assert_eq!(to_jalali(CalendarDate::new(2020, 2, 23))?, CalendarDate::new(1398, 12, 4));
//! # Ok::<(), jalali_moment::Error>(())
//! ```
//!
//! Supported Jalali years are [`MIN_YEAR`]`..=`[`MAX_YEAR`]. Anything outside
//! fails with [`Error::OutOfRange`] rather than producing a wrong date.

mod consts;
mod error;
mod moment;
mod prelude;
mod range;
mod types;

pub mod config;
pub mod convert;
pub mod format;
pub mod julian;
pub mod leap;
pub mod locale;

#[cfg(test)]
mod test_utils;

pub use consts::*;
pub use convert::{jalali_to_julian, julian_to_jalali, month_length, to_gregorian, to_jalali};
pub use error::{Error, Result};
pub use format::DateTimeFields;
pub use leap::is_leap;
pub use moment::Jalali;
pub use range::DateRange;
pub use types::{Calendar, CalendarDate, JulianDay, Meridiem, Unit, is_valid_jalali};

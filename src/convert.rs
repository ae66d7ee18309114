//! Jalali <-> Julian Day Number conversion, and through it Jalali <-> Gregorian.

use crate::consts::{
    BAHMAN, ESFAND, ESFAND_DAYS, ESFAND_DAYS_LEAP, FIRST_HALF_DAYS, FIRST_HALF_LAST_OFFSET,
    FIRST_HALF_MONTH_DAYS, GREGORIAN_YEAR_OFFSET, MAX_YEAR, MIN_YEAR, MONTHS_IN_YEAR,
    SECOND_HALF_DAYS, SECOND_HALF_MONTH_DAYS, SHAHRIVAR,
};
use crate::julian::{gregorian_to_julian, julian_to_gregorian};
use crate::leap::{is_leap, march_equinox_offset};
use crate::types::{CalendarDate, JulianDay};
use crate::{Error, Result};
use tracing::debug;

/// Carries a month outside `1..=12` into the year.
///
/// # Errors
/// Returns `Error::Overflow` if the carried year does not fit an `i32`.
pub fn normalize_month(year: i32, month: i32) -> Result<(i32, i32)> {
    let month0 = month.checked_sub(1).ok_or(Error::Overflow)?;
    let year = year
        .checked_add(month0.div_euclid(MONTHS_IN_YEAR))
        .ok_or(Error::Overflow)?;
    Ok((year, month0.rem_euclid(MONTHS_IN_YEAR) + 1))
}

/// Days in a Jalali month: 31 for the first six, 30 for the next five, and
/// 29 or 30 for Esfand. Months outside `1..=12` are carried into the year
/// first.
///
/// # Errors
/// Returns `Error::OutOfRange` if the (carried) year is outside the break table.
pub fn month_length(year: i32, month: i32) -> Result<i32> {
    let (year, month) = normalize_month(year, month)?;
    if month < ESFAND {
        return Ok(days_in_month(month, false));
    }
    Ok(days_in_month(month, is_leap(year)?))
}

/// Days in a month `1..=12` of a year whose leap status is known
pub const fn days_in_month(month: i32, leap: bool) -> i32 {
    if month <= SHAHRIVAR {
        FIRST_HALF_MONTH_DAYS
    } else if month <= BAHMAN {
        SECOND_HALF_MONTH_DAYS
    } else if leap {
        ESFAND_DAYS_LEAP
    } else {
        ESFAND_DAYS
    }
}

/// Days in a Jalali year, 365 or 366.
///
/// # Errors
/// Returns `Error::OutOfRange` for years outside the break table.
pub fn year_length(year: i32) -> Result<i32> {
    Ok(if is_leap(year)? { 366 } else { 365 })
}

/// Julian Day Number of a Jalali date.
///
/// The month is carried into the year when outside `1..=12`; the day is
/// added as an offset, so day `0` is the last day of the previous month.
///
/// # Errors
/// Returns `Error::OutOfRange` if the carried year is outside the break table
/// and `Error::Overflow` if the day offset leaves the Julian day range.
pub fn jalali_to_julian(year: i32, month: i32, day: i32) -> Result<JulianDay> {
    let (year, month) = normalize_month(year, month)?;
    let new_year = march_equinox_offset(year)?;
    let farvardin_first = gregorian_to_julian(new_year.gregorian_year, 3, new_year.march_day)?;

    let month_offset = (month - 1) * FIRST_HALF_MONTH_DAYS - month.div_euclid(7) * (month - 7);
    day.checked_sub(1)
        .and_then(|day| day.checked_add(month_offset))
        .and_then(|day_of_year| farvardin_first.checked_add_days(day_of_year))
        .ok_or(Error::Overflow)
}

/// Jalali date of a Julian Day Number.
///
/// # Errors
/// Returns `Error::OutOfRange` if the day falls outside Jalali years
/// `MIN_YEAR..=MAX_YEAR`.
pub fn julian_to_jalali(julian: JulianDay) -> Result<CalendarDate> {
    let gregorian = julian_to_gregorian(julian);
    let estimate = gregorian.year - GREGORIAN_YEAR_OFFSET;
    if estimate < MIN_YEAR {
        debug!(%julian, estimate, "julian day before the first supported year");
        return Err(Error::OutOfRange(estimate));
    }
    // early Gregorian months of the year after MAX_YEAR still belong to MAX_YEAR
    let mut year = estimate.min(MAX_YEAR);

    let new_year = march_equinox_offset(year)?;
    let farvardin_first = gregorian_to_julian(new_year.gregorian_year, 3, new_year.march_day)?;
    let mut offset = i32::try_from(julian.days_since(farvardin_first)).map_err(|_| Error::Overflow)?;

    if offset >= 0 {
        if offset >= year_length(year)? {
            debug!(%julian, year, "julian day after the last supported year");
            return Err(Error::OutOfRange(year + 1));
        }
        if offset <= FIRST_HALF_LAST_OFFSET {
            return Ok(half_year_date(year, 1, offset, FIRST_HALF_MONTH_DAYS));
        }
        offset -= FIRST_HALF_DAYS;
    } else {
        // 1 Farvardin not reached yet: the day sits in the second half of the previous year
        if year - 1 < MIN_YEAR {
            debug!(%julian, "julian day before the first supported year");
            return Err(Error::OutOfRange(year - 1));
        }
        year -= 1;
        offset += SECOND_HALF_DAYS;
        if new_year.years_since_leap == 1 {
            offset += 1;
        }
    }

    Ok(half_year_date(year, 7, offset, SECOND_HALF_MONTH_DAYS))
}

const fn half_year_date(year: i32, first_month: i32, offset: i32, month_days: i32) -> CalendarDate {
    CalendarDate::new(
        year,
        first_month + offset.div_euclid(month_days),
        offset.rem_euclid(month_days) + 1,
    )
}

/// Converts a Gregorian date to its Jalali date.
///
/// The Gregorian triple is not validated: out-of-range months and days carry.
///
/// # Errors
/// Returns `Error::OutOfRange` if the result falls outside the supported years
/// and `Error::Overflow` if it is past the Julian day range altogether.
pub fn to_jalali(gregorian: CalendarDate) -> Result<CalendarDate> {
    julian_to_jalali(gregorian_to_julian(gregorian.year, gregorian.month, gregorian.day)?)
}

/// Converts a Jalali date to its Gregorian date.
///
/// The Jalali triple is not validated: out-of-range months and days carry.
///
/// # Errors
/// Returns `Error::OutOfRange` if the carried year is outside the break table
/// and `Error::Overflow` if the carried day leaves the Julian day range.
pub fn to_gregorian(jalali: CalendarDate) -> Result<CalendarDate> {
    Ok(julian_to_gregorian(jalali_to_julian(jalali.year, jalali.month, jalali.day)?))
}

//! Leap-year rules driven by the break-point table.
//!
//! Between two consecutive break points the calendar follows a 33 year
//! cycle with a leap year every fourth year, but each interval starts its
//! own cycle and the last few years of an interval borrow the phase of the
//! next one. The intervals are historical, so no closed formula replaces
//! the table.

use crate::consts::{
    BREAKS, CYCLE_LEAP_DAYS, CYCLE_YEARS, GREGORIAN_YEAR_OFFSET, LEAP_INTERVAL, MAX_YEAR, MIN_YEAR,
};
use crate::{Error, Result};
use tracing::trace;

/// Leap days counted before the first break point.
const INITIAL_LEAP_DAYS: i32 = -14;
/// Day of March holding 1 Farvardin before any leap correction.
const BASE_MARCH_DAY: i32 = 20;

/// The break interval `[start, start + jump)` that holds a year
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    pub start: i32,
    pub jump:  i32,
}

/// Where 1 Farvardin of a Jalali year lands in the Gregorian calendar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewYear {
    /// Gregorian year that holds 1 Farvardin
    pub gregorian_year:   i32,
    /// Day of March that holds 1 Farvardin
    pub march_day:        i32,
    /// Years since the last leap year, `0` when the year itself is leap
    pub years_since_leap: i32,
}

const fn check_year(year: i32) -> Result<()> {
    if year < MIN_YEAR || year > MAX_YEAR {
        return Err(Error::OutOfRange(year));
    }
    Ok(())
}

/// Finds the break interval that holds `year`.
///
/// # Errors
/// Returns `Error::OutOfRange` if the year is before the first break point or
/// at or after the last one.
pub fn locate(year: i32) -> Result<Interval> {
    check_year(year)?;
    let interval = BREAKS
        .windows(2)
        .find(|pair| year < pair[1])
        .map(|pair| Interval {
            start: pair[0],
            jump:  pair[1] - pair[0],
        })
        .ok_or(Error::OutOfRange(year))?;
    trace!(year, start = interval.start, jump = interval.jump, "located break interval");
    Ok(interval)
}

/// Years since the last leap year, in `0..=4`; `0` means `year` is leap.
///
/// # Errors
/// Returns `Error::OutOfRange` for years outside the break table.
pub fn years_since_leap(year: i32) -> Result<i32> {
    Ok(years_since_leap_in(year, locate(year)?))
}

fn years_since_leap_in(year: i32, interval: Interval) -> i32 {
    let Interval { start, jump } = interval;
    let mut n = year - start;
    // the tail of an interval already follows the next interval's phase
    if jump - n < 6 {
        n = n - jump + (jump + 4).div_euclid(CYCLE_YEARS) * CYCLE_YEARS;
    }

    let position = (n + 1).rem_euclid(CYCLE_YEARS) - 1;
    if position == -1 {
        LEAP_INTERVAL
    } else {
        position.rem_euclid(LEAP_INTERVAL)
    }
}

/// Whether the Jalali year has 366 days.
///
/// # Errors
/// Returns `Error::OutOfRange` for years outside the break table.
pub fn is_leap(year: i32) -> Result<bool> {
    Ok(years_since_leap(year)? == 0)
}

const fn leap_days_in(jump: i32) -> i32 {
    jump.div_euclid(CYCLE_YEARS) * CYCLE_LEAP_DAYS
        + jump.rem_euclid(CYCLE_YEARS).div_euclid(LEAP_INTERVAL)
}

/// Locates 1 Farvardin of `year` in March of the matching Gregorian year.
///
/// # Errors
/// Returns `Error::OutOfRange` for years outside the break table.
pub fn march_equinox_offset(year: i32) -> Result<NewYear> {
    let interval = locate(year)?;
    let gregorian_year = year + GREGORIAN_YEAR_OFFSET;

    let completed: i32 = BREAKS
        .windows(2)
        .take_while(|pair| pair[1] <= year)
        .map(|pair| leap_days_in(pair[1] - pair[0]))
        .sum();

    let n = year - interval.start;
    let mut jalali_leap_days = INITIAL_LEAP_DAYS
        + completed
        + n.div_euclid(CYCLE_YEARS) * CYCLE_LEAP_DAYS
        + (n.rem_euclid(CYCLE_YEARS) + 3).div_euclid(LEAP_INTERVAL);
    if interval.jump.rem_euclid(CYCLE_YEARS) == LEAP_INTERVAL && interval.jump - n == LEAP_INTERVAL {
        jalali_leap_days += 1;
    }

    let gregorian_leap_days = gregorian_year.div_euclid(4)
        - ((gregorian_year.div_euclid(100) + 1) * 3).div_euclid(4)
        - 150;

    Ok(NewYear {
        gregorian_year,
        march_day: BASE_MARCH_DAY + jalali_leap_days - gregorian_leap_days,
        years_since_leap: years_since_leap_in(year, interval),
    })
}

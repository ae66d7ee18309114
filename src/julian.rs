//! Proleptic Gregorian calendar to Julian Day Number and back.
//!
//! Every division here is floor division. All divisors are positive, so
//! `div_euclid`/`rem_euclid` round toward negative infinity. Intermediate
//! values are `i64`, wide enough for any `i32` input.

use crate::types::{CalendarDate, JulianDay};
use crate::{Error, Result};
use chrono::{Datelike, NaiveDate};
use tracing::debug;

/// Shifts the year start to March so the leap day is the last day of the year.
const MARCH: i64 = 3;
/// Years added to keep the intermediate counts positive.
const YEAR_BIAS: i64 = 100_100;
/// Days in a four year Julian cycle.
const DAYS_IN_4_YEARS: i64 = 1461;
/// Days in a 400 year Gregorian cycle.
const DAYS_IN_400_YEARS: i64 = 146_097;
/// Julian Day Number of 31 December 1 BCE, day zero of `num_days_from_ce`.
const CE_EPOCH: i32 = 1_721_425;

/// Julian Day Number of a proleptic Gregorian date.
///
/// `month` may fall outside `1..=12` and `day` outside the month's length;
/// both carry into the following fields.
///
/// # Errors
/// Returns `Error::Overflow` if the day number does not fit an `i32`.
pub fn gregorian_to_julian(year: i32, month: i32, day: i32) -> Result<JulianDay> {
    let (year, month, day) = (i64::from(year), i64::from(month), i64::from(day));
    let year_carry = (month - MARCH).div_euclid(12);
    let march_month = (month - MARCH).rem_euclid(12);
    let shifted_year = year + year_carry + YEAR_BIAS;

    let julian = (shifted_year * DAYS_IN_4_YEARS).div_euclid(4)
        + (153 * march_month + 2).div_euclid(5)
        + day
        - 34_840_408
        - (shifted_year.div_euclid(100) * 3).div_euclid(4)
        + 752;

    i32::try_from(julian).map(JulianDay::new).map_err(|_| {
        debug!(year, month, day, "Gregorian date past the Julian day range");
        Error::Overflow
    })
}

/// Proleptic Gregorian date of a Julian Day Number.
// every i32 day number lands in a year of a few million, so the narrowing is exact
#[allow(clippy::cast_possible_truncation)]
pub const fn julian_to_gregorian(julian: JulianDay) -> CalendarDate {
    let julian = julian.get() as i64;
    let mut j = 4 * julian + 139_361_631;
    j += ((4 * julian + 183_187_720).div_euclid(DAYS_IN_400_YEARS) * 3).div_euclid(4) * 4 - 3908;

    let i = j.rem_euclid(DAYS_IN_4_YEARS).div_euclid(4) * 5 + 308;

    let day = i.rem_euclid(153).div_euclid(5) + 1;
    let month = i.div_euclid(153).rem_euclid(12) + 1;
    // January and February belong to the March-based year that started before them
    let year = j.div_euclid(DAYS_IN_4_YEARS) - YEAR_BIAS + (14 - month).div_euclid(12);

    CalendarDate::new(year as i32, month as i32, day as i32)
}

/// Day of week, Sunday = 0 .. Saturday = 6
pub const fn weekday(julian: JulianDay) -> u32 {
    // JDN 0 was a Monday
    (julian.get().rem_euclid(7) + 1).rem_euclid(7).unsigned_abs()
}

/// Julian Day Number of a chrono date
pub fn from_naive_date(date: NaiveDate) -> JulianDay {
    JulianDay::new(date.num_days_from_ce() + CE_EPOCH)
}

/// Chrono date of a Julian Day Number; `None` outside chrono's range
pub fn to_naive_date(julian: JulianDay) -> Option<NaiveDate> {
    NaiveDate::from_num_days_from_ce_opt(julian.get().checked_sub(CE_EPOCH)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jdn(year: i32, month: i32, day: i32) -> JulianDay {
        gregorian_to_julian(year, month, day).unwrap()
    }

    #[test]
    fn test_known_julian_days() {
        struct TestCase {
            date:   (i32, i32, i32),
            julian: i32,
        }

        let cases = [
            TestCase {
                date:   (2000, 1, 1),
                julian: 2_451_545,
            },
            TestCase {
                date:   (1970, 1, 1),
                julian: 2_440_588,
            },
            TestCase {
                date:   (2020, 2, 23),
                julian: 2_458_903,
            },
            TestCase {
                date:   (1582, 10, 15),
                julian: 2_299_161,
            },
        ];

        for case in &cases {
            let (y, m, d) = case.date;
            assert_eq!(jdn(y, m, d).get(), case.julian, "{y}-{m}-{d}");
            assert_eq!(
                julian_to_gregorian(JulianDay::new(case.julian)),
                CalendarDate::new(y, m, d)
            );
        }
    }

    #[test]
    fn test_round_trip_across_leap_boundaries() {
        for year in [-1, 0, 1, 4, 100, 400, 1900, 2000, 2100] {
            for (month, day) in [(1, 1), (2, 28), (2, 29), (3, 1), (12, 31)] {
                if month == 2 && day == 29 {
                    let leap = (year % 4 == 0 && year % 100 != 0) || year % 400 == 0;
                    if !leap {
                        continue;
                    }
                }
                let julian = jdn(year, month, day);
                assert_eq!(
                    julian_to_gregorian(julian),
                    CalendarDate::new(year, month, day),
                    "{year}-{month}-{day}"
                );
            }
        }
    }

    #[test]
    fn test_out_of_range_month_carries() {
        assert_eq!(jdn(2020, 13, 1), jdn(2021, 1, 1));
        assert_eq!(jdn(2020, 0, 1), jdn(2019, 12, 1));
        assert_eq!(jdn(2020, -11, 1), jdn(2019, 1, 1));
    }

    #[test]
    fn test_out_of_range_day_carries() {
        assert_eq!(jdn(2020, 3, 32), jdn(2020, 4, 1));
        assert_eq!(jdn(2020, 3, 0), jdn(2020, 2, 29));
        assert_eq!(jdn(2021, 3, 0), jdn(2021, 2, 28));
    }

    #[test]
    fn test_consecutive_days_are_consecutive_numbers() {
        let start = jdn(1999, 12, 25);
        for offset in 0..30 {
            let date = julian_to_gregorian(JulianDay::new(start.get() + offset));
            assert_eq!(jdn(date.year, date.month, date.day).get(), start.get() + offset);
        }
        assert_eq!(julian_to_gregorian(JulianDay::new(start.get() + 7)), CalendarDate::new(2000, 1, 1));
    }

    #[test]
    fn test_weekday() {
        // 2020-02-23 was a Sunday, 2020-04-25 a Saturday
        assert_eq!(weekday(jdn(2020, 2, 23)), 0);
        assert_eq!(weekday(jdn(2020, 4, 25)), 6);
        assert_eq!(weekday(jdn(1970, 1, 1)), 4);
    }

    #[test]
    fn test_naive_date_bridge() {
        let date = NaiveDate::from_ymd_opt(2020, 2, 23).unwrap();
        assert_eq!(from_naive_date(date), jdn(2020, 2, 23));
        assert_eq!(to_naive_date(jdn(2020, 2, 23)), Some(date));

        let early = NaiveDate::from_ymd_opt(560, 3, 20).unwrap();
        assert_eq!(from_naive_date(early), jdn(560, 3, 20));
        assert_eq!(to_naive_date(JulianDay::new(i32::MIN)), None);
    }

    #[test]
    fn test_extreme_inputs_do_not_overflow() {
        assert!(matches!(gregorian_to_julian(10_000_000, 1, 1), Err(Error::Overflow)));
        assert!(matches!(gregorian_to_julian(2020, 1, i32::MAX), Err(Error::Overflow)));
        assert!(matches!(gregorian_to_julian(i32::MIN, i32::MIN, i32::MIN), Err(Error::Overflow)));
        assert_eq!(jdn(2_000_000, 1, 1).get(), 732_206_060);

        // the inverse is total over i32 and stays an inverse near both ends
        for julian in [i32::MAX, i32::MAX - 400, i32::MIN, i32::MIN + 400, 0, -1] {
            let date = julian_to_gregorian(JulianDay::new(julian));
            assert_eq!(jdn(date.year, date.month, date.day).get(), julian, "{julian}");
        }
        assert_eq!(weekday(JulianDay::new(i32::MAX)), weekday(JulianDay::new(i32::MAX - 7)));
    }
}

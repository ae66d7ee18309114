use std::{cmp::Ordering, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::consts::RANGE_SEPARATOR;
use crate::convert::{jalali_to_julian, julian_to_jalali};
use crate::julian::weekday;
use crate::types::{CalendarDate, JulianDay, is_valid_jalali};
use crate::{Error, Result, prelude::*};

/// Days a week start lies behind each weekday, indexed Sunday = 0
const DAYS_SINCE_SATURDAY: [i32; 7] = [1, 2, 3, 4, 5, 6, 0];

/// An inclusive range of Jalali dates.
/// The start date must be less than or equal to the end date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display(fmt = "{}{}{}", start, RANGE_SEPARATOR, end)]
pub struct DateRange {
    start: CalendarDate,
    end:   CalendarDate,
}

impl DateRange {
    /// Creates a new date range with validation.
    ///
    /// # Errors
    /// Returns `Error::InvalidCalendarDate` if either end is not a valid
    /// Jalali date and `Error::InvalidRange` if start > end.
    pub fn new(start: CalendarDate, end: CalendarDate) -> Result<Self> {
        for date in [start, end] {
            if !is_valid_jalali(date.year, date.month, date.day) {
                return Err(Error::InvalidCalendarDate {
                    year:  date.year,
                    month: date.month,
                    day:   date.day,
                });
            }
        }
        if start > end {
            return Err(Error::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// The Saturday to Friday week holding `date`.
    ///
    /// # Errors
    /// Returns `Error::InvalidCalendarDate` for an invalid date and
    /// `Error::OutOfRange` if the week reaches outside the supported years.
    pub fn week_of(date: CalendarDate) -> Result<Self> {
        let date = CalendarDate::jalali(date.year, date.month, date.day)?;
        let julian = jalali_to_julian(date.year, date.month, date.day)?;
        let back = DAYS_SINCE_SATURDAY[weekday(julian) as usize];
        let saturday = julian.checked_add_days(-back).ok_or(Error::Overflow)?;
        let friday = saturday.checked_add_days(6).ok_or(Error::Overflow)?;

        Ok(Self {
            start: julian_to_jalali(saturday)?,
            end:   julian_to_jalali(friday)?,
        })
    }

    /// Returns the start date of the range
    pub const fn start(&self) -> CalendarDate {
        self.start
    }

    /// Returns the end date of the range
    pub const fn end(&self) -> CalendarDate {
        self.end
    }

    /// Returns both start and end dates as a tuple
    pub const fn dates(&self) -> (CalendarDate, CalendarDate) {
        (self.start, self.end)
    }

    /// Checks if the range contains a given date
    pub fn contains(&self, date: &CalendarDate) -> bool {
        self.start <= *date && *date <= self.end
    }

    /// Checks if this range overlaps with another range
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Checks if this range is completely contained within another range
    pub fn is_within(&self, other: &Self) -> bool {
        other.start <= self.start && self.end <= other.end
    }

    /// Julian Day Numbers of the first and last day
    fn julian_bounds(&self) -> Result<(JulianDay, JulianDay)> {
        Ok((
            jalali_to_julian(self.start.year, self.start.month, self.start.day)?,
            jalali_to_julian(self.end.year, self.end.month, self.end.day)?,
        ))
    }

    /// Number of days in the range, both ends included.
    ///
    /// # Errors
    /// Never fails for a range built by [`DateRange::new`] or [`DateRange::week_of`].
    pub fn days(&self) -> Result<i32> {
        let (first, last) = self.julian_bounds()?;
        i32::try_from(last.days_since(first) + 1).map_err(|_| Error::Overflow)
    }

    /// Every date in the range, in order.
    ///
    /// # Errors
    /// Never fails for a range built by [`DateRange::new`] or [`DateRange::week_of`].
    pub fn all_dates(&self) -> Result<Vec<CalendarDate>> {
        let (first, last) = self.julian_bounds()?;
        (first.get()..=last.get())
            .map(|julian| julian_to_jalali(JulianDay::new(julian)))
            .collect()
    }
}

impl FromStr for DateRange {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();

        // leftmost match, so a negative end year after the separator survives
        let (start_str, end_str) = trimmed
            .split_once(RANGE_SEPARATOR)
            .ok_or_else(|| Error::InvalidParseInput(s.to_owned()))?;
        if end_str.trim_start_matches('-').contains(RANGE_SEPARATOR) {
            return Err(Error::InvalidParseInput(s.to_owned()));
        }

        let start = start_str.trim().parse::<CalendarDate>()?;
        let end = end_str.trim().parse::<CalendarDate>()?;

        Self::new(start, end)
    }
}

impl PartialOrd for DateRange {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DateRange {
    fn cmp(&self, other: &Self) -> Ordering {
        // Compare start dates first, then end dates
        match self.start.cmp(&other.start) {
            Ordering::Equal => self.end.cmp(&other.end),
            ord => ord,
        }
    }
}

impl Serialize for DateRange {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for DateRange {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

use crate::consts::{DATE_SEPARATOR, MAX_YEAR, MIN_DAY, MIN_YEAR, MONTHS_IN_YEAR};
use crate::convert::month_length;
use crate::prelude::*;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A plain (year, month, day) triple in either calendar.
///
/// Values produced by the conversion functions are always valid for their
/// calendar. Values built with [`CalendarDate::new`] are not checked, which
/// lets arithmetic pass months and days past their bounds and have them
/// carried by the conversion engine.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize,
)]
#[display(fmt = "{:04}/{:02}/{:02}", year, month, day)]
pub struct CalendarDate {
    pub year:  i32,
    pub month: i32,
    pub day:   i32,
}

impl CalendarDate {
    /// Creates a triple without validation
    pub const fn new(year: i32, month: i32, day: i32) -> Self {
        Self { year, month, day }
    }

    /// Creates a Jalali date, validating year, month and day.
    ///
    /// # Errors
    /// Returns `Error::InvalidCalendarDate` if the year is outside
    /// `MIN_YEAR..=MAX_YEAR`, the month outside `1..=12`, or the day exceeds
    /// the month's length.
    pub fn jalali(year: i32, month: i32, day: i32) -> Result<Self> {
        if is_valid_jalali(year, month, day) {
            Ok(Self::new(year, month, day))
        } else {
            Err(Error::InvalidCalendarDate { year, month, day })
        }
    }

    /// Creates a proleptic Gregorian date, validating month and day.
    ///
    /// # Errors
    /// Returns `Error::InvalidGregorianDate` for an impossible date.
    pub fn gregorian(year: i32, month: i32, day: i32) -> Result<Self> {
        let valid = (1..=MONTHS_IN_YEAR).contains(&month)
            && day >= MIN_DAY
            && day <= gregorian_month_length(year, month);
        if valid {
            Ok(Self::new(year, month, day))
        } else {
            Err(Error::InvalidGregorianDate { year, month, day })
        }
    }
}

/// Checks a Jalali (year, month, day) triple
pub fn is_valid_jalali(year: i32, month: i32, day: i32) -> bool {
    (MIN_YEAR..=MAX_YEAR).contains(&year)
        && (1..=MONTHS_IN_YEAR).contains(&month)
        && day >= MIN_DAY
        && month_length(year, month).is_ok_and(|length| day <= length)
}

pub(crate) const fn is_gregorian_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

pub(crate) const fn gregorian_month_length(year: i32, month: i32) -> i32 {
    match month {
        2 if is_gregorian_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// Parses `YYYY/MM/DD` (or `YYYY-MM-DD`) as a validated Jalali date
impl FromStr for CalendarDate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let separator = if trimmed.contains(DATE_SEPARATOR) {
            DATE_SEPARATOR
        } else {
            '-'
        };
        let parts: Vec<&str> = trimmed.split(separator).map(str::trim).collect();
        if parts.len() != 3 {
            return Err(Error::InvalidParseInput(s.to_owned()));
        }

        let parse = |p: &str| {
            p.parse::<i32>()
                .map_err(|_| Error::InvalidParseInput(s.to_owned()))
        };
        Self::jalali(parse(parts[0])?, parse(parts[1])?, parse(parts[2])?)
    }
}

/// Continuous day count shared by both calendars
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    From,
    Into,
    Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct JulianDay(i32);

impl JulianDay {
    #[inline]
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    #[inline]
    pub const fn get(self) -> i32 {
        self.0
    }

    /// The day `days` after this one (negative moves backwards); `None` on overflow
    #[inline]
    pub const fn checked_add_days(self, days: i32) -> Option<Self> {
        match self.0.checked_add(days) {
            Some(value) => Some(Self(value)),
            None => None,
        }
    }

    /// Days from `other` to `self`
    #[inline]
    pub const fn days_since(self, other: Self) -> i64 {
        self.0 as i64 - other.0 as i64
    }
}

/// Calendar unit accepted by `add`, `start_of` and `end_of`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Unit {
    #[display(fmt = "year")]
    Year,
    #[display(fmt = "month")]
    Month,
    #[display(fmt = "week")]
    Week,
    #[display(fmt = "day")]
    Day,
}

impl FromStr for Unit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "year" | "years" => Ok(Self::Year),
            "month" | "months" => Ok(Self::Month),
            "week" | "weeks" => Ok(Self::Week),
            "day" | "days" => Ok(Self::Day),
            _ => Err(Error::InvalidUnit(s.to_owned())),
        }
    }
}

/// Calendar used to read or render a date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display)]
pub enum Calendar {
    #[default]
    #[display(fmt = "jalali")]
    Jalali,
    #[display(fmt = "gregorian")]
    Gregorian,
}

/// Half of a 12-hour clock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Meridiem {
    #[display(fmt = "am")]
    Am,
    #[display(fmt = "pm")]
    Pm,
}

impl Meridiem {
    /// Meridiem of a 24-hour clock value
    pub const fn from_hour(hour: u32) -> Self {
        if hour >= 12 { Self::Pm } else { Self::Am }
    }

    pub const fn lower(self) -> &'static str {
        match self {
            Self::Am => "am",
            Self::Pm => "pm",
        }
    }

    pub const fn upper(self) -> &'static str {
        match self {
            Self::Am => "AM",
            Self::Pm => "PM",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calendar_date_display() {
        assert_eq!(CalendarDate::new(1398, 12, 4).to_string(), "1398/12/04");
        assert_eq!(CalendarDate::new(99, 1, 1).to_string(), "0099/01/01");
    }

    #[test]
    fn test_calendar_date_ordering() {
        let a = CalendarDate::new(1398, 12, 29);
        let b = CalendarDate::new(1399, 1, 1);
        let c = CalendarDate::new(1399, 1, 2);
        assert!(a < b);
        assert!(b < c);
        assert_eq!(b, b);
    }

    #[test]
    fn test_jalali_validation_cases() {
        struct TestCase {
            date:        (i32, i32, i32),
            valid:       bool,
            description: &'static str,
        }

        let cases = [
            TestCase {
                date:        (1398, 12, 4),
                valid:       true,
                description: "ordinary date",
            },
            TestCase {
                date:        (1398, 12, 30),
                valid:       false,
                description: "Esfand 30 in a common year",
            },
            TestCase {
                date:        (1399, 12, 30),
                valid:       true,
                description: "Esfand 30 in a leap year",
            },
            TestCase {
                date:        (1399, 7, 31),
                valid:       false,
                description: "Mehr has 30 days",
            },
            TestCase {
                date:        (1399, 6, 31),
                valid:       true,
                description: "Shahrivar has 31 days",
            },
            TestCase {
                date:        (1399, 13, 1),
                valid:       false,
                description: "month 13",
            },
            TestCase {
                date:        (1399, 0, 1),
                valid:       false,
                description: "month 0",
            },
            TestCase {
                date:        (1399, 1, 0),
                valid:       false,
                description: "day 0",
            },
            TestCase {
                date:        (-62, 1, 1),
                valid:       false,
                description: "before the first break",
            },
            TestCase {
                date:        (-61, 1, 1),
                valid:       true,
                description: "first supported year",
            },
            TestCase {
                date:        (3177, 1, 1),
                valid:       true,
                description: "last supported year",
            },
            TestCase {
                date:        (3178, 1, 1),
                valid:       false,
                description: "after the last break",
            },
        ];

        for case in &cases {
            let (y, m, d) = case.date;
            let result = CalendarDate::jalali(y, m, d);
            assert_eq!(result.is_ok(), case.valid, "{}", case.description);
            if !case.valid {
                assert!(matches!(result, Err(Error::InvalidCalendarDate { .. })));
            }
        }
    }

    #[test]
    fn test_gregorian_validation() {
        assert!(CalendarDate::gregorian(2020, 2, 29).is_ok());
        assert!(CalendarDate::gregorian(2021, 2, 29).is_err());
        assert!(CalendarDate::gregorian(1900, 2, 29).is_err());
        assert!(CalendarDate::gregorian(2000, 2, 29).is_ok());
        assert!(matches!(
            CalendarDate::gregorian(2020, 4, 31),
            Err(Error::InvalidGregorianDate { .. })
        ));
    }

    #[test]
    fn test_calendar_date_from_str() {
        let date: CalendarDate = "1398/12/04".parse().unwrap();
        assert_eq!(date, CalendarDate::new(1398, 12, 4));

        let date: CalendarDate = " 1399-02-06 ".parse().unwrap();
        assert_eq!(date, CalendarDate::new(1399, 2, 6));

        assert!(matches!(
            "1398/12".parse::<CalendarDate>(),
            Err(Error::InvalidParseInput(_))
        ));
        assert!(matches!(
            "1398/XX/04".parse::<CalendarDate>(),
            Err(Error::InvalidParseInput(_))
        ));
        assert!(matches!(
            "1398/12/30".parse::<CalendarDate>(),
            Err(Error::InvalidCalendarDate { .. })
        ));
    }

    #[test]
    fn test_calendar_date_serde() {
        let date = CalendarDate::new(1399, 2, 11);
        let json = serde_json::to_string(&date).unwrap();
        assert_eq!(json, r#"{"year":1399,"month":2,"day":11}"#);
        let parsed: CalendarDate = serde_json::from_str(&json).unwrap();
        assert_eq!(date, parsed);
    }

    #[test]
    fn test_julian_day_conversions() {
        let day = JulianDay::from(2_458_903);
        assert_eq!(day.get(), 2_458_903);
        let week_later = day.checked_add_days(7).unwrap();
        assert_eq!(i32::from(week_later), 2_458_910);
        assert_eq!(week_later.days_since(day), 7);
        assert_eq!(JulianDay::new(i32::MAX).checked_add_days(1), None);
        assert_eq!(JulianDay::new(i32::MIN).checked_add_days(-1), None);
        assert_eq!(
            JulianDay::new(i32::MAX).days_since(JulianDay::new(i32::MIN)),
            i64::from(u32::MAX)
        );
        assert_eq!(day.to_string(), "2458903");
        assert_eq!(serde_json::to_string(&day).unwrap(), "2458903");
    }

    #[test]
    fn test_unit_from_str() {
        assert_eq!("year".parse::<Unit>().unwrap(), Unit::Year);
        assert_eq!("Months".parse::<Unit>().unwrap(), Unit::Month);
        assert_eq!("week".parse::<Unit>().unwrap(), Unit::Week);
        assert_eq!(" day ".parse::<Unit>().unwrap(), Unit::Day);
        assert!(matches!("hour".parse::<Unit>(), Err(Error::InvalidUnit(_))));
        assert_eq!(Unit::Week.to_string(), "week");
    }

    #[test]
    fn test_meridiem_from_hour() {
        assert_eq!(Meridiem::from_hour(0), Meridiem::Am);
        assert_eq!(Meridiem::from_hour(11), Meridiem::Am);
        assert_eq!(Meridiem::from_hour(12), Meridiem::Pm);
        assert_eq!(Meridiem::from_hour(23), Meridiem::Pm);
        assert_eq!(Meridiem::Pm.upper(), "PM");
        assert_eq!(Meridiem::Am.to_string(), "am");
    }
}

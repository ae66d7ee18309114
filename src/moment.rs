//! One instant read and changed through the Jalali calendar.
//!
//! A [`Jalali`] owns a single `chrono` instant. Calendar fields are the
//! Jalali reading of the instant's local date; writing them converts the
//! requested Jalali date back to a Gregorian day and rebuilds the instant at
//! the same local time of day. Clock fields come straight from the zone's
//! wall clock.

use crate::config;
use crate::consts::{DEFAULT_FORMAT, DEFAULT_GREGORIAN_FORMAT, FARVARDIN, MIN_DAY, MS_PER_DAY};
use crate::convert::{days_in_month, jalali_to_julian, julian_to_jalali, month_length, normalize_month};
use crate::format::{self, DateTimeFields};
use crate::julian::{from_naive_date, gregorian_to_julian, julian_to_gregorian, to_naive_date, weekday};
use crate::leap::is_leap;
use crate::locale;
use crate::range::DateRange;
use crate::types::{Calendar, CalendarDate, JulianDay, Unit};
use crate::{Error, Result};
use chrono::{
    DateTime, Local, LocalResult, NaiveDateTime, Offset, TimeDelta, TimeZone, Timelike, Utc,
};
use std::cmp::Ordering;
use std::fmt;

/// Day of week index of Saturday, the first day of a Jalali week
const SATURDAY: u32 = 6;

/// Jalali reading of the current instant, refreshed on every change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Reading {
    date: CalendarDate,
    leap: bool,
}

impl Reading {
    fn of<Tz: TimeZone>(instant: &DateTime<Tz>) -> Result<Self> {
        let date = julian_to_jalali(from_naive_date(instant.date_naive()))?;
        Ok(Self {
            date,
            leap: is_leap(date.year)?,
        })
    }
}

/// Maps a local wall-clock time to an instant in `tz`.
///
/// An ambiguous time takes the earlier instant. A time skipped by a forward
/// transition keeps the offset in force before it, landing past the gap.
fn resolve_local<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> DateTime<Tz> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(instant) | LocalResult::Ambiguous(instant, _) => instant,
        LocalResult::None => {
            let offset = naive
                .checked_sub_signed(TimeDelta::days(1))
                .and_then(|before| tz.offset_from_local_datetime(&before).earliest())
                .map_or(0, |offset| offset.fix().local_minus_utc());
            let utc = naive
                .checked_sub_signed(TimeDelta::seconds(i64::from(offset)))
                .unwrap_or(naive);
            tz.from_utc_datetime(&utc)
        },
    }
}

fn local_midnight(julian: JulianDay) -> Result<NaiveDateTime> {
    to_naive_date(julian)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .ok_or(Error::Overflow)
}

/// An instant with Jalali calendar getters, setters and arithmetic.
///
/// Setters and arithmetic change the value in place and return it again so
/// calls chain with `?`:
///
/// ```
/// use chrono::FixedOffset;
/// use jalali_moment::{Jalali, Unit};
///
/// let tehran = FixedOffset::east_opt(12_600).unwrap();
/// let mut date = Jalali::parse_in("1398/12/04", tehran)?;
/// date.add(2, Unit::Month)?.add(1, Unit::Week)?;
/// assert_eq!(date.to_string(), "1399/02/11 00:00:00");
/// # Ok::<(), jalali_moment::Error>(())
/// ```
///
/// A failed change leaves the value as it was.
#[derive(Debug, Clone)]
pub struct Jalali<Tz: TimeZone = Local> {
    instant: DateTime<Tz>,
    reading: Reading,
}

impl Jalali<Local> {
    /// The current instant in the host's local zone.
    ///
    /// # Errors
    /// Returns `Error::OutOfRange` if the host clock is outside the supported years.
    pub fn now() -> Result<Self> {
        config::check_host_time_zone();
        Self::now_in(Local)
    }

    /// Wraps a host local instant after running the host time-zone check.
    ///
    /// # Errors
    /// Returns `Error::OutOfRange` if the instant is outside the supported years.
    pub fn from_local(instant: DateTime<Local>) -> Result<Self> {
        config::check_host_time_zone();
        Self::from_datetime(instant)
    }

    /// The instant `millis` milliseconds after the Unix epoch, in the host's local zone.
    ///
    /// # Errors
    /// Returns `Error::OutOfRange` if the instant is outside the supported years.
    pub fn timestamp(millis: i64) -> Result<Self> {
        config::check_host_time_zone();
        Self::timestamp_in(millis, Local)
    }

    /// Reads a Jalali date-time string as host local time. See [`format::parse`].
    ///
    /// # Errors
    /// Returns `Error::InvalidParseInput` for unreadable text or time fields and
    /// `Error::InvalidCalendarDate` for an impossible Jalali date.
    pub fn parse(input: &str) -> Result<Self> {
        config::check_host_time_zone();
        Self::parse_in(input, Local)
    }

    /// Reads a Gregorian date-time string as host local time.
    ///
    /// # Errors
    /// Returns `Error::InvalidParseInput` for unreadable text or time fields,
    /// `Error::InvalidGregorianDate` for an impossible date, and
    /// `Error::OutOfRange` if the date has no supported Jalali reading.
    pub fn from_gregorian_str(input: &str) -> Result<Self> {
        config::check_host_time_zone();
        Self::from_gregorian_str_in(input, Local)
    }
}

impl<Tz: TimeZone> Jalali<Tz> {
    /// Wraps a `chrono` instant, dropping precision below a millisecond.
    ///
    /// The zone comes with the instant, so the host time-zone check is not
    /// run, also for `Local`. Use [`Jalali::from_local`] to run it.
    ///
    /// # Errors
    /// Returns `Error::OutOfRange` if the instant is outside the supported years.
    pub fn from_datetime(instant: DateTime<Tz>) -> Result<Self> {
        let tz = instant.timezone();
        Self::timestamp_in(instant.timestamp_millis(), tz)
    }

    /// The current instant in `tz`.
    ///
    /// # Errors
    /// Returns `Error::OutOfRange` if the clock is outside the supported years.
    pub fn now_in(tz: Tz) -> Result<Self> {
        Self::from_datetime(Utc::now().with_timezone(&tz))
    }

    /// The instant `millis` milliseconds after the Unix epoch, in `tz`.
    ///
    /// # Errors
    /// Returns `Error::Overflow` if `chrono` cannot represent the instant and
    /// `Error::OutOfRange` if it is outside the supported years.
    pub fn timestamp_in(millis: i64, tz: Tz) -> Result<Self> {
        let instant = tz.timestamp_millis_opt(millis).single().ok_or(Error::Overflow)?;
        Ok(Self {
            reading: Reading::of(&instant)?,
            instant,
        })
    }

    /// Reads a Jalali date-time string as local time in `tz`.
    ///
    /// # Errors
    /// Same as [`Jalali::parse`].
    pub fn parse_in(input: &str, tz: Tz) -> Result<Self> {
        let fields = format::parse(input)?;
        let date = CalendarDate::jalali(fields.year, fields.month, fields.day)?;
        let julian = jalali_to_julian(date.year, date.month, date.day)?;
        Self::from_local_fields(julian, &fields, &tz)
    }

    /// Reads a Gregorian date-time string as local time in `tz`.
    ///
    /// # Errors
    /// Same as [`Jalali::from_gregorian_str`].
    pub fn from_gregorian_str_in(input: &str, tz: Tz) -> Result<Self> {
        let fields = format::parse(input)?;
        let date = CalendarDate::gregorian(fields.year, fields.month, fields.day)?;
        let julian = gregorian_to_julian(date.year, date.month, date.day)?;
        Self::from_local_fields(julian, &fields, &tz)
    }

    fn from_local_fields(julian: JulianDay, fields: &DateTimeFields, tz: &Tz) -> Result<Self> {
        let naive = to_naive_date(julian)
            .and_then(|date| {
                date.and_hms_milli_opt(fields.hour, fields.minute, fields.second, fields.millisecond)
            })
            .ok_or(Error::Overflow)?;
        let instant = resolve_local(tz, naive);
        Ok(Self {
            reading: Reading::of(&instant)?,
            instant,
        })
    }

    // --- getters ---

    /// Jalali year
    pub const fn year(&self) -> i32 {
        self.reading.date.year
    }

    /// Jalali month, 1 for Farvardin
    pub const fn month(&self) -> i32 {
        self.reading.date.month
    }

    /// Jalali month, 0 for Farvardin
    pub const fn month0(&self) -> i32 {
        self.reading.date.month - 1
    }

    /// Jalali day of month
    pub const fn day(&self) -> i32 {
        self.reading.date.day
    }

    /// Jalali (year, month, day)
    pub const fn date(&self) -> CalendarDate {
        self.reading.date
    }

    /// Gregorian (year, month, day) of the local date
    pub fn gregorian_date(&self) -> CalendarDate {
        julian_to_gregorian(self.julian_day())
    }

    /// Julian Day Number of the local date
    pub fn julian_day(&self) -> JulianDay {
        from_naive_date(self.instant.date_naive())
    }

    pub fn hours(&self) -> u32 {
        self.instant.hour()
    }

    pub fn minutes(&self) -> u32 {
        self.instant.minute()
    }

    pub fn seconds(&self) -> u32 {
        self.instant.second()
    }

    pub fn milliseconds(&self) -> u32 {
        self.instant.nanosecond() / 1_000_000
    }

    /// Day of week, Sunday = 0 .. Saturday = 6
    pub fn weekday(&self) -> u32 {
        weekday(self.julian_day())
    }

    /// Milliseconds since the Unix epoch
    pub fn value_of(&self) -> i64 {
        self.instant.timestamp_millis()
    }

    /// The underlying `chrono` instant
    pub const fn datetime(&self) -> &DateTime<Tz> {
        &self.instant
    }

    /// Whether the Jalali year has 366 days
    pub const fn is_leap_year(&self) -> bool {
        self.reading.leap
    }

    /// Days in the current Jalali month
    pub const fn month_length(&self) -> i32 {
        days_in_month(self.reading.date.month, self.reading.leap)
    }

    /// Persian name of the current month
    pub fn month_name(&self) -> &'static str {
        locale::month_name(self.month()).unwrap_or_default()
    }

    /// Persian name of the current weekday
    pub fn weekday_name(&self) -> &'static str {
        locale::weekday_name(self.weekday()).unwrap_or_default()
    }

    /// The Saturday to Friday week holding this date.
    ///
    /// # Errors
    /// Returns `Error::OutOfRange` if the week runs past the supported years.
    pub fn week(&self) -> Result<DateRange> {
        DateRange::week_of(self.date())
    }

    /// Milliseconds from `other` to `self`
    pub fn diff<Tz2: TimeZone>(&self, other: &Jalali<Tz2>) -> i64 {
        self.value_of() - other.value_of()
    }

    // --- setters ---

    fn commit_local(&mut self, naive: NaiveDateTime) -> Result<&mut Self> {
        let instant = resolve_local(&self.instant.timezone(), naive);
        self.reading = Reading::of(&instant)?;
        self.instant = instant;
        Ok(self)
    }

    fn shift_local(&mut self, base: NaiveDateTime, delta: Option<TimeDelta>) -> Result<&mut Self> {
        let naive = delta
            .and_then(|delta| base.checked_add_signed(delta))
            .ok_or(Error::Overflow)?;
        self.commit_local(naive)
    }

    /// Moves to a Jalali date, keeping the local time of day. Month and day
    /// may be out of range and carry.
    fn set_jalali(&mut self, year: i32, month: i32, day: i32) -> Result<&mut Self> {
        let julian = jalali_to_julian(year, month, day)?;
        let date = to_naive_date(julian).ok_or(Error::Overflow)?;
        self.commit_local(date.and_time(self.instant.time()))
    }

    fn add_days(&mut self, days: i64) -> Result<&mut Self> {
        let naive = self.instant.naive_local();
        self.shift_local(naive, TimeDelta::try_days(days))
    }

    /// Sets the Jalali year. The day is clamped to the month's length in
    /// the new year, so 1399/12/30 becomes 1400/12/29.
    ///
    /// # Errors
    /// Returns `Error::OutOfRange` for a year outside the break table.
    pub fn set_year(&mut self, year: i32) -> Result<&mut Self> {
        let month = self.month();
        let day = self.day().min(month_length(year, month)?);
        self.set_jalali(year, month, day)
    }

    /// Sets the zero-based Jalali month. Values outside `0..=11` carry whole
    /// years, and the day is clamped to the target month's length.
    ///
    /// # Errors
    /// Returns `Error::OutOfRange` if the carried year is outside the break table.
    pub fn set_month0(&mut self, month0: i32) -> Result<&mut Self> {
        let month = month0.checked_add(1).ok_or(Error::Overflow)?;
        let (year, month) = normalize_month(self.year(), month)?;
        let day = self.day().min(month_length(year, month)?);
        self.set_jalali(year, month, day)
    }

    /// Sets the one-based Jalali month, as [`Jalali::set_month0`].
    ///
    /// # Errors
    /// Returns `Error::OutOfRange` if the carried year is outside the break table.
    pub fn set_month(&mut self, month: i32) -> Result<&mut Self> {
        self.set_month0(month.checked_sub(1).ok_or(Error::Overflow)?)
    }

    /// Sets the Jalali day of month; values past the month carry.
    ///
    /// # Errors
    /// Returns `Error::OutOfRange` if the result leaves the supported years.
    pub fn set_day(&mut self, day: i32) -> Result<&mut Self> {
        self.set_jalali(self.year(), self.month(), day)
    }

    /// Sets the hour; values outside `0..=23` carry into the date.
    ///
    /// # Errors
    /// Returns `Error::OutOfRange` if the result leaves the supported years.
    pub fn set_hours(&mut self, hours: i64) -> Result<&mut Self> {
        let base = self.instant.naive_local().with_hour(0).ok_or(Error::Overflow)?;
        self.shift_local(base, TimeDelta::try_hours(hours))
    }

    /// Sets the minute; values outside `0..=59` carry.
    ///
    /// # Errors
    /// Returns `Error::OutOfRange` if the result leaves the supported years.
    pub fn set_minutes(&mut self, minutes: i64) -> Result<&mut Self> {
        let base = self.instant.naive_local().with_minute(0).ok_or(Error::Overflow)?;
        self.shift_local(base, TimeDelta::try_minutes(minutes))
    }

    /// Sets the second; values outside `0..=59` carry.
    ///
    /// # Errors
    /// Returns `Error::OutOfRange` if the result leaves the supported years.
    pub fn set_seconds(&mut self, seconds: i64) -> Result<&mut Self> {
        let base = self.instant.naive_local().with_second(0).ok_or(Error::Overflow)?;
        self.shift_local(base, TimeDelta::try_seconds(seconds))
    }

    /// Sets the millisecond; values outside `0..=999` carry, so `-1` is the
    /// last millisecond of the previous second.
    ///
    /// # Errors
    /// Returns `Error::OutOfRange` if the result leaves the supported years.
    pub fn set_milliseconds(&mut self, milliseconds: i64) -> Result<&mut Self> {
        let base = self.instant.naive_local().with_nanosecond(0).ok_or(Error::Overflow)?;
        self.shift_local(base, TimeDelta::try_milliseconds(milliseconds))
    }

    /// Drops the millisecond field.
    ///
    /// # Errors
    /// Never fails for a value inside the supported years.
    pub fn truncate_millis(&mut self) -> Result<&mut Self> {
        self.set_milliseconds(0)
    }

    // --- arithmetic ---

    /// Adds `value` units. Years and months go through [`Jalali::set_year`]
    /// and [`Jalali::set_month0`] and clamp the day; weeks and days move the
    /// local date and keep the time of day.
    ///
    /// # Errors
    /// Returns `Error::OutOfRange` if the result leaves the supported years.
    pub fn add(&mut self, value: i32, unit: Unit) -> Result<&mut Self> {
        match unit {
            Unit::Year => self.set_year(self.year().checked_add(value).ok_or(Error::Overflow)?),
            Unit::Month => self.set_month0(self.month0().checked_add(value).ok_or(Error::Overflow)?),
            Unit::Week => self.add_days(i64::from(value) * 7),
            Unit::Day => self.add_days(i64::from(value)),
        }
    }

    /// Julian Day Number of the first day of the current unit
    fn unit_start(&self, unit: Unit) -> Result<JulianDay> {
        match unit {
            Unit::Year => jalali_to_julian(self.year(), FARVARDIN, MIN_DAY),
            Unit::Month => jalali_to_julian(self.year(), self.month(), MIN_DAY),
            Unit::Week => {
                let weekday = self.weekday();
                let back = if weekday == SATURDAY { 0 } else { weekday + 1 };
                self.julian_day()
                    .checked_add_days(-back.cast_signed())
                    .ok_or(Error::Overflow)
            },
            Unit::Day => Ok(self.julian_day()),
        }
    }

    const fn unit_days(&self, unit: Unit) -> i32 {
        match unit {
            Unit::Year if self.reading.leap => 366,
            Unit::Year => 365,
            Unit::Month => self.month_length(),
            Unit::Week => 7,
            Unit::Day => 1,
        }
    }

    /// Moves to the first instant of the current unit: 1 Farvardin, the
    /// first of the month, the last Saturday, or midnight.
    ///
    /// # Errors
    /// Returns `Error::OutOfRange` if the start lies before the supported years.
    pub fn start_of(&mut self, unit: Unit) -> Result<&mut Self> {
        let start = local_midnight(self.unit_start(unit)?)?;
        self.commit_local(start)
    }

    /// Moves to the last millisecond of the current unit, one millisecond
    /// before the local midnight that starts the next one.
    ///
    /// # Errors
    /// Returns `Error::OutOfRange` if the end lies past the supported years.
    pub fn end_of(&mut self, unit: Unit) -> Result<&mut Self> {
        let next = self
            .unit_start(unit)?
            .checked_add_days(self.unit_days(unit))
            .ok_or(Error::Overflow)?;
        let end = local_midnight(next)?
            .checked_sub_signed(TimeDelta::milliseconds(1))
            .ok_or(Error::Overflow)?;
        self.commit_local(end)
    }

    /// Day of the Jalali year, 1 for 1 Farvardin.
    ///
    /// Measured in elapsed milliseconds between local midnights, rounded to
    /// whole days, so a shorter or longer day from a transition still counts once.
    ///
    /// # Errors
    /// Returns `Error::OutOfRange` only if the year start cannot be represented.
    pub fn day_of_year(&self) -> Result<i32> {
        let mut midnight = self.clone();
        let start_of_day = midnight.start_of(Unit::Day)?.value_of();
        let start_of_year = midnight.start_of(Unit::Year)?.value_of();
        let days = (start_of_day - start_of_year + MS_PER_DAY / 2).div_euclid(MS_PER_DAY);
        i32::try_from(days + 1).map_err(|_| Error::Overflow)
    }

    /// Moves to a day of the current Jalali year; values past the year carry.
    ///
    /// # Errors
    /// Returns `Error::OutOfRange` if the result leaves the supported years.
    pub fn set_day_of_year(&mut self, day_of_year: i32) -> Result<&mut Self> {
        let delta = day_of_year
            .checked_sub(self.day_of_year()?)
            .ok_or(Error::Overflow)?;
        self.add(delta, Unit::Day)
    }

    // --- formatting ---

    /// Calendar and clock fields as read in `calendar`
    pub fn fields(&self, calendar: Calendar) -> DateTimeFields {
        let date = match calendar {
            Calendar::Jalali => self.date(),
            Calendar::Gregorian => self.gregorian_date(),
        };
        DateTimeFields {
            year:        date.year,
            month:       date.month,
            day:         date.day,
            hour:        self.hours(),
            minute:      self.minutes(),
            second:      self.seconds(),
            millisecond: self.milliseconds(),
        }
    }

    /// Renders the Jalali date through `pattern`. See [`format::format`].
    pub fn format(&self, pattern: &str) -> String {
        self.format_in(pattern, Calendar::Jalali)
    }

    /// Renders the date in `calendar` through `pattern`.
    pub fn format_in(&self, pattern: &str, calendar: Calendar) -> String {
        format::format(pattern, &self.fields(calendar))
    }

    /// Gregorian date and time as `YYYY-MM-DD HH:mm:ss`
    pub fn gregorian(&self) -> String {
        self.format_in(DEFAULT_GREGORIAN_FORMAT, Calendar::Gregorian)
    }
}

/// Jalali date and time as `YYYY/MM/DD HH:mm:ss`
impl<Tz: TimeZone> fmt::Display for Jalali<Tz> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(DEFAULT_FORMAT))
    }
}

/// Same as [`Jalali::from_datetime`]; no host time-zone check.
impl<Tz: TimeZone> TryFrom<DateTime<Tz>> for Jalali<Tz> {
    type Error = Error;

    fn try_from(instant: DateTime<Tz>) -> Result<Self> {
        Self::from_datetime(instant)
    }
}

impl<Tz: TimeZone> From<Jalali<Tz>> for i64 {
    fn from(value: Jalali<Tz>) -> Self {
        value.value_of()
    }
}

impl<Tz: TimeZone, Tz2: TimeZone> PartialEq<Jalali<Tz2>> for Jalali<Tz> {
    fn eq(&self, other: &Jalali<Tz2>) -> bool {
        self.instant == other.instant
    }
}

impl<Tz: TimeZone> Eq for Jalali<Tz> {}

impl<Tz: TimeZone> PartialOrd for Jalali<Tz> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<Tz: TimeZone> Ord for Jalali<Tz> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.instant.cmp(&other.instant)
    }
}

impl<Tz: TimeZone> serde::Serialize for Jalali<Tz> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_i64(self.value_of())
    }
}

impl<'de> serde::Deserialize<'de> for Jalali<Local> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let millis = i64::deserialize(deserializer)?;
        Self::timestamp(millis).map_err(serde::de::Error::custom)
    }
}

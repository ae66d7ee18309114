//! Shared test helpers.

use crate::moment::Jalali;
use crate::range::DateRange;
use crate::types::CalendarDate;
use chrono::{FixedOffset, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, TimeZone};

/// Iran Standard Time, +03:30 with no daylight saving
pub fn tehran() -> FixedOffset {
    FixedOffset::east_opt(12_600).expect("valid offset")
}

/// Unchecked date triple
pub const fn date(year: i32, month: i32, day: i32) -> CalendarDate {
    CalendarDate::new(year, month, day)
}

/// Validated range from two (year, month, day) triples
pub fn range(start: (i32, i32, i32), end: (i32, i32, i32)) -> DateRange {
    DateRange::new(date(start.0, start.1, start.2), date(end.0, end.1, end.2))
        .expect("failed to construct test range")
}

/// Parses a Jalali date-time in Tehran time
pub fn jalali(input: &str) -> Jalali<FixedOffset> {
    Jalali::parse_in(input, tehran()).expect("failed to parse test date")
}

/// Tehran with the 2020 daylight saving rule: +03:30, and +04:30 for UTC
/// 2020-03-20 20:30 up to 2020-09-20 19:30. Local midnight of 1399/01/02
/// is skipped and 23:00 to 24:00 on 1399/06/30 happens twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TehranDst;

const STANDARD_SECONDS: i32 = 12_600;
const DAYLIGHT_SECONDS: i32 = 16_200;

fn daylight_bounds() -> (NaiveDateTime, NaiveDateTime) {
    let utc = |month, day, hour, minute| {
        NaiveDate::from_ymd_opt(2020, month, day)
            .and_then(|date| date.and_hms_opt(hour, minute, 0))
            .expect("valid transition")
    };
    (utc(3, 20, 20, 30), utc(9, 20, 19, 30))
}

fn offset(seconds: i32) -> FixedOffset {
    FixedOffset::east_opt(seconds).expect("valid offset")
}

impl TimeZone for TehranDst {
    type Offset = FixedOffset;

    fn from_offset(_offset: &FixedOffset) -> Self {
        Self
    }

    fn offset_from_local_date(&self, local: &NaiveDate) -> LocalResult<FixedOffset> {
        self.offset_from_local_datetime(&local.and_time(NaiveTime::MIN))
    }

    fn offset_from_local_datetime(&self, local: &NaiveDateTime) -> LocalResult<FixedOffset> {
        let (start, end) = daylight_bounds();
        let as_standard = *local - TimeDelta::seconds(STANDARD_SECONDS.into());
        let as_daylight = *local - TimeDelta::seconds(DAYLIGHT_SECONDS.into());
        let standard = as_standard < start || as_standard >= end;
        let daylight = start <= as_daylight && as_daylight < end;
        match (standard, daylight) {
            (true, true) => LocalResult::Ambiguous(offset(DAYLIGHT_SECONDS), offset(STANDARD_SECONDS)),
            (true, false) => LocalResult::Single(offset(STANDARD_SECONDS)),
            (false, true) => LocalResult::Single(offset(DAYLIGHT_SECONDS)),
            (false, false) => LocalResult::None,
        }
    }

    fn offset_from_utc_date(&self, utc: &NaiveDate) -> FixedOffset {
        self.offset_from_utc_datetime(&utc.and_time(NaiveTime::MIN))
    }

    fn offset_from_utc_datetime(&self, utc: &NaiveDateTime) -> FixedOffset {
        let (start, end) = daylight_bounds();
        if start <= *utc && *utc < end {
            offset(DAYLIGHT_SECONDS)
        } else {
            offset(STANDARD_SECONDS)
        }
    }
}

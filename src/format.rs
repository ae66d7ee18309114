//! Token based rendering and free-text parsing of date-time fields.
//!
//! Rendering replaces the first occurrence of each token, left to right, in
//! a fixed order: `YYYY MM DD HH mm ss SSS`, then `a A hh` when the pattern
//! holds `hh`. A substituted value is not protected from later tokens, so a
//! pattern whose literal text spells a later token (an `a` in a word next to
//! `hh`, say) gets that text replaced instead.

use crate::locale::normalize_digits;
use crate::types::Meridiem;
use crate::{Error, Result};
use tracing::debug;

/// Widest digit group each field takes: year, month, day, hour, minute,
/// second, millisecond.
const FIELD_WIDTHS: [usize; 7] = [4, 2, 2, 2, 2, 2, 3];

/// Calendar and wall-clock fields of one instant, in either calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateTimeFields {
    pub year:        i32,
    /// 1-based month
    pub month:       i32,
    pub day:         i32,
    pub hour:        u32,
    pub minute:      u32,
    pub second:      u32,
    pub millisecond: u32,
}

fn zero_pad(value: impl std::fmt::Display, width: usize) -> String {
    format!("{value:0>width$}")
}

/// Renders `fields` through `pattern`.
pub fn format(pattern: &str, fields: &DateTimeFields) -> String {
    let mut value = pattern.to_owned();
    let mut replace = |token: &str, with: &str| {
        if pattern.contains(token) {
            value = value.replacen(token, with, 1);
        }
    };

    replace("YYYY", &fields.year.to_string());
    replace("MM", &zero_pad(fields.month, 2));
    replace("DD", &zero_pad(fields.day, 2));
    replace("HH", &zero_pad(fields.hour, 2));
    replace("mm", &zero_pad(fields.minute, 2));
    replace("ss", &zero_pad(fields.second, 2));
    replace("SSS", &zero_pad(fields.millisecond, 3));

    if pattern.contains("hh") {
        // meridiem comes from the 24-hour value before it is folded to 1..=12
        let meridiem = Meridiem::from_hour(fields.hour);
        replace("a", meridiem.lower());
        replace("A", meridiem.upper());
        let hour = match fields.hour {
            0 => 12,
            13..=23 => fields.hour - 12,
            hour => hour,
        };
        replace("hh", &zero_pad(hour, 2));
    }

    value
}

/// Splits the digits of `value` into field groups.
///
/// Each field takes up to its width from the current run of digits; what is
/// left of a run carries into the next field, so `13981204` reads as
/// `1398`, `12`, `04`.
fn digit_groups(value: &str) -> Vec<&str> {
    let mut groups = Vec::with_capacity(FIELD_WIDTHS.len());
    let mut widths = FIELD_WIDTHS.iter();
    for run in value.split(|c: char| !c.is_ascii_digit()).filter(|run| !run.is_empty()) {
        let mut rest = run;
        while !rest.is_empty() {
            let Some(&width) = widths.next() else {
                return groups;
            };
            let (group, tail) = rest.split_at(width.min(rest.len()));
            groups.push(group);
            rest = tail;
        }
    }
    groups
}

fn meridiem_of(value: &str) -> Option<Meridiem> {
    if value.contains("pm") || value.contains("PM") {
        Some(Meridiem::Pm)
    } else if value.contains("am") || value.contains("AM") {
        Some(Meridiem::Am)
    } else {
        None
    }
}

/// Reads date-time fields from free text.
///
/// Persian and Arabic-Indic digits are accepted. Fields missing at the end
/// read as zero. A literal `am`/`pm` (or `AM`/`PM`) anywhere in the text
/// turns the hour into a 12-hour value. The date part is returned as read;
/// validating it against a calendar is the caller's job. Years are unsigned:
/// a `-` right before the year digits is rejected rather than dropped.
///
/// # Errors
/// Returns `Error::InvalidParseInput` if the text holds no digits, the year
/// carries a minus sign, the hour, minute or second is out of range, or a
/// 12-hour value exceeds 12.
pub fn parse(input: &str) -> Result<DateTimeFields> {
    let value = normalize_digits(input);
    let groups = digit_groups(&value);
    if groups.is_empty() {
        debug!(input, "no digits in date string");
        return Err(Error::InvalidParseInput(input.to_owned()));
    }
    if value
        .split(|c: char| c.is_ascii_digit())
        .next()
        .is_some_and(|before_year| before_year.ends_with('-'))
    {
        debug!(input, "signed year");
        return Err(Error::InvalidParseInput(input.to_owned()));
    }

    let invalid = || Error::InvalidParseInput(input.to_owned());
    let field = |index: usize| -> Result<u32> {
        groups
            .get(index)
            .map_or(Ok(0), |group| group.parse::<u32>().map_err(|_| invalid()))
    };
    let millisecond = groups
        .get(6)
        .map_or(Ok(0), |group| format!("{group:0<3}").parse::<u32>().map_err(|_| invalid()))?;

    let mut hour = field(3)?;
    match meridiem_of(&value) {
        Some(_) if hour > 12 => {
            debug!(input, hour, "12-hour value above 12");
            return Err(invalid());
        },
        Some(Meridiem::Pm) if hour < 12 => hour += 12,
        Some(Meridiem::Am) if hour == 12 => hour = 0,
        _ => {},
    }

    let fields = DateTimeFields {
        year: i32::try_from(field(0)?).map_err(|_| invalid())?,
        month: i32::try_from(field(1)?).map_err(|_| invalid())?,
        day: i32::try_from(field(2)?).map_err(|_| invalid())?,
        hour,
        minute: field(4)?,
        second: field(5)?,
        millisecond,
    };

    if fields.hour > 23 || fields.minute > 59 || fields.second > 59 {
        debug!(input, ?fields, "time of day out of range");
        return Err(invalid());
    }
    Ok(fields)
}

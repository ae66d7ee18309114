/// Jalali years at which the leap cycle was recalibrated, ascending.
/// The last entry is an exclusive upper bound.
pub const BREAKS: [i32; 20] = [
    -61, 9, 38, 199, 426, 686, 756, 818, 1111, 1181, 1210, 1635, 2060, 2097, 2192, 2262, 2324,
    2394, 2456, 3178,
];

/// Earliest supported Jalali year (inclusive)
pub const MIN_YEAR: i32 = BREAKS[0];

/// Latest supported Jalali year (inclusive)
pub const MAX_YEAR: i32 = BREAKS[BREAKS.len() - 1] - 1;

/// Number of months in a year
pub const MONTHS_IN_YEAR: i32 = 12;

/// First day of month, used for lower bounds
pub const MIN_DAY: i32 = 1;

/// Month number for Farvardin
pub const FARVARDIN: i32 = 1;
/// Month number for Shahrivar, the last 31-day month
pub const SHAHRIVAR: i32 = 6;
/// Month number for Bahman, the last 30-day month
pub const BAHMAN: i32 = 11;
/// Month number for Esfand
pub const ESFAND: i32 = 12;

/// Days in the first six months
pub const FIRST_HALF_MONTH_DAYS: i32 = 31;
/// Days in months seven through eleven
pub const SECOND_HALF_MONTH_DAYS: i32 = 30;
/// Days in Esfand for a common year
pub const ESFAND_DAYS: i32 = 29;
/// Days in Esfand for a leap year
pub const ESFAND_DAYS_LEAP: i32 = 30;

/// Days from 1 Farvardin to the last day of Shahrivar (zero based)
pub(crate) const FIRST_HALF_LAST_OFFSET: i32 = 185;
/// Days in the first half of the year
pub(crate) const FIRST_HALF_DAYS: i32 = 186;
/// Days from 1 Mehr to the next 1 Farvardin in a common year
pub(crate) const SECOND_HALF_DAYS: i32 = 179;

/// Length of the basic intercalation cycle
pub(crate) const CYCLE_YEARS: i32 = 33;
/// Leap days in a full intercalation cycle
pub(crate) const CYCLE_LEAP_DAYS: i32 = 8;
/// Years between leap years inside a cycle
pub(crate) const LEAP_INTERVAL: i32 = 4;
/// Offset between Jalali and Gregorian year numbers at the March equinox
pub(crate) const GREGORIAN_YEAR_OFFSET: i32 = 621;

/// Milliseconds in a civil day
pub const MS_PER_DAY: i64 = 86_400_000;

/// Pattern used by `Display`
pub const DEFAULT_FORMAT: &str = "YYYY/MM/DD HH:mm:ss";
/// Pattern used by `Jalali::gregorian`
pub const DEFAULT_GREGORIAN_FORMAT: &str = "YYYY-MM-DD HH:mm:ss";

/// Time zone the Jalali calendar is normally observed in
pub const DEFAULT_TIME_ZONE: &str = "Asia/Tehran";

/// Separator between the two dates of a `DateRange` string
pub const RANGE_SEPARATOR: &str = "--";
/// Separator used when printing and reading a bare `CalendarDate`
pub const DATE_SEPARATOR: char = '/';

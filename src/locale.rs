//! Persian names for months and weekdays.

/// Month names, Farvardin first
pub const MONTHS: [&str; 12] = [
    "فروردین",
    "اردیبهشت",
    "خرداد",
    "تیر",
    "مرداد",
    "شهریور",
    "مهر",
    "آبان",
    "آذر",
    "دی",
    "بهمن",
    "اسفند",
];

/// Weekday names indexed Sunday = 0 .. Saturday = 6
pub const WEEKDAYS: [&str; 7] = ["یکشنبه", "دوشنبه", "سه شنبه", "چهارشنبه", "پنجشنبه", "جمعه", "شنبه"];

/// One-letter weekday names indexed Sunday = 0 .. Saturday = 6
pub const WEEKDAYS_SHORT: [&str; 7] = ["ی", "د", "س", "چ", "پ", "ج", "ش"];

/// Extended Arabic-Indic digits used in Persian text, zero first
pub const PERSIAN_DIGITS: [char; 10] = ['۰', '۱', '۲', '۳', '۴', '۵', '۶', '۷', '۸', '۹'];

/// Arabic-Indic digits, zero first
pub const ARABIC_DIGITS: [char; 10] = ['٠', '١', '٢', '٣', '٤', '٥', '٦', '٧', '٨', '٩'];

/// Name of a 1-based month; `None` outside `1..=12`
pub fn month_name(month: i32) -> Option<&'static str> {
    let index = usize::try_from(month.checked_sub(1)?).ok()?;
    MONTHS.get(index).copied()
}

/// Name of a weekday (Sunday = 0); `None` outside `0..=6`
pub fn weekday_name(weekday: u32) -> Option<&'static str> {
    WEEKDAYS.get(usize::try_from(weekday).ok()?).copied()
}

/// One-letter name of a weekday (Sunday = 0); `None` outside `0..=6`
pub fn weekday_short_name(weekday: u32) -> Option<&'static str> {
    WEEKDAYS_SHORT.get(usize::try_from(weekday).ok()?).copied()
}

/// Replaces Persian and Arabic-Indic digits with ASCII digits.
pub fn normalize_digits(value: &str) -> String {
    value
        .chars()
        .map(|c| {
            PERSIAN_DIGITS
                .iter()
                .position(|d| *d == c)
                .or_else(|| ARABIC_DIGITS.iter().position(|d| *d == c))
                .and_then(|digit| char::from_digit(u32::try_from(digit).ok()?, 10))
                .unwrap_or(c)
        })
        .collect()
}

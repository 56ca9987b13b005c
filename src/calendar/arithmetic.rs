//! Calendar math shared by the agenda and week projections.
//!
//! All dates are naive local calendar dates. Weeks run Sunday to Saturday.

use std::sync::OnceLock;

use chrono::{Datelike, Days, NaiveDate};
use regex::Regex;

use super::error::TimeFormatError;

pub const DAY_ABBREVIATIONS: [&str; 7] = ["SUN", "MON", "TUE", "WED", "THU", "FRI", "SAT"];

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// Compiled once. The pattern is a literal, so compilation cannot fail at runtime.
fn time_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(\d{1,2}):(\d{2}) ?([AaPp][Mm])$").expect("valid time regex")
    })
}

/// `YYYY-MM-DD`, zero padded, no timezone conversion.
pub fn format_date_key(date: NaiveDate) -> String {
    date.format(DATE_KEY_FORMAT).to_string()
}

/// Strict inverse of [`format_date_key`]. Rejects anything that is not exactly
/// ten characters of `YYYY-MM-DD`.
pub fn parse_date_key(raw: &str) -> Option<NaiveDate> {
    let bytes = raw.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }
    if !bytes
        .iter()
        .enumerate()
        .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit())
    {
        return None;
    }
    NaiveDate::parse_from_str(raw, DATE_KEY_FORMAT).ok()
}

/// Sunday on or before `date`. `None` only at the very start of chrono's range.
pub fn week_start_of(date: NaiveDate) -> Option<NaiveDate> {
    let offset = date.weekday().num_days_from_sunday();
    date.checked_sub_days(Days::new(u64::from(offset)))
}

/// 1-based week of the month, where week 1 runs from the 1st to the first Saturday.
pub fn week_of_month(date: NaiveDate) -> u32 {
    let first_weekday = date
        .with_day(1)
        .map_or(0, |first| first.weekday().num_days_from_sunday());
    (date.day() + first_weekday).div_ceil(7)
}

/// Minutes since midnight for a 12-hour clock string such as `9:00 PM` or `10:00AM`.
pub fn time_string_to_minutes(time: &str) -> Result<u32, TimeFormatError> {
    let caps = time_pattern()
        .captures(time)
        .ok_or(TimeFormatError::Pattern)?;

    let hour: u32 = caps[1].parse().map_err(|_| TimeFormatError::Pattern)?;
    let minute: u32 = caps[2].parse().map_err(|_| TimeFormatError::Pattern)?;
    if !(1..=12).contains(&hour) {
        return Err(TimeFormatError::HourOutOfRange(hour));
    }
    if minute > 59 {
        return Err(TimeFormatError::MinuteOutOfRange(minute));
    }

    let is_pm = caps[3].eq_ignore_ascii_case("pm");
    let hour24 = match (hour, is_pm) {
        (12, false) => 0,
        (12, true) => 12,
        (h, true) => h + 12,
        (h, false) => h,
    };
    Ok(hour24 * 60 + minute)
}

pub fn day_abbreviation(date: NaiveDate) -> &'static str {
    DAY_ABBREVIATIONS[date.weekday().num_days_from_sunday() as usize]
}

pub fn month_name(date: NaiveDate) -> &'static str {
    MONTH_NAMES[date.month0() as usize]
}

/// Anchor one week later. Stays put at the end of the supported range.
pub fn next_week(anchor: NaiveDate) -> NaiveDate {
    anchor.checked_add_days(Days::new(7)).unwrap_or(anchor)
}

/// Anchor one week earlier. Stays put at the start of the supported range.
pub fn prev_week(anchor: NaiveDate) -> NaiveDate {
    anchor.checked_sub_days(Days::new(7)).unwrap_or(anchor)
}

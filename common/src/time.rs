// Time helpers used for display.
// The contract reports lock-up expirations as unix seconds.

use chrono::{DateTime, Local, TimeZone};

// Seconds timestamps used to determine it using its type
pub type TimestampSeconds = u64;

pub const DISPLAY_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// Render a unix timestamp in the local time zone as `YYYY-MM-DD HH:MM:SS`
pub fn format_timestamp(timestamp: TimestampSeconds) -> String {
    let seconds = i64::try_from(timestamp).unwrap_or(i64::MAX);
    match Local.timestamp_opt(seconds, 0).single() {
        Some(datetime) => format_datetime(&datetime),
        None => timestamp.to_string(),
    }
}

pub fn format_datetime<Tz: TimeZone>(datetime: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    datetime.format(DISPLAY_DATETIME_FORMAT).to_string()
}

pub fn now_formatted() -> String {
    format_datetime(&Local::now())
}

// Insert a comma every three digits: 1234567 -> "1,234,567"
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

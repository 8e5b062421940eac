//! Display formatting for timestamps and byte sizes
//!
//! All functions are pure. The wall-clock variants read the local time once
//! and delegate to the `_at` variants, which take the reference time
//! explicitly and render absolute dates in that reference time's zone.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use std::fmt::Display;

const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 3600;
const SECONDS_PER_DAY: i64 = 86400;

/// Parse a backend timestamp
///
/// Accepts RFC 3339, or a naive `YYYY-MM-DDTHH:MM:SS[.fff]` /
/// `YYYY-MM-DD HH:MM:SS[.fff]` which is taken to be UTC.
pub fn parse_timestamp(timestamp: &str) -> Option<DateTime<Utc>> {
    let trimmed = timestamp.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }
    [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
    ]
    .iter()
    .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
    .map(|naive| naive.and_utc())
}

/// Format a message timestamp relative to the current local time
pub fn format_message_time(timestamp: &str) -> String {
    format_message_time_at(timestamp, Local::now())
}

/// Format a message timestamp relative to `now`
///
/// `just now`, `N minutes ago`, `N hours ago`, then `MM/DD HH:MM`.
pub fn format_message_time_at<Tz>(timestamp: &str, now: DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let Some(time) = parse_timestamp(timestamp) else {
        return String::new();
    };
    let elapsed = elapsed_seconds(&time, &now);

    match intraday(elapsed) {
        Some(text) => text,
        None => time
            .with_timezone(&now.timezone())
            .format("%m/%d %H:%M")
            .to_string(),
    }
}

/// Format a list timestamp relative to the current local time
pub fn format_relative_time(timestamp: &str) -> String {
    format_relative_time_at(timestamp, Local::now())
}

/// Format a list timestamp relative to `now`
///
/// Extends the intraday bands with `yesterday`, days, weeks and months,
/// falling back to `YYYY-MM-DD` after a year.
pub fn format_relative_time_at<Tz>(timestamp: &str, now: DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let Some(time) = parse_timestamp(timestamp) else {
        return String::new();
    };
    let elapsed = elapsed_seconds(&time, &now);
    if let Some(text) = intraday(elapsed) {
        return text;
    }

    let days = elapsed / SECONDS_PER_DAY;
    match days {
        1 => "yesterday".to_string(),
        d if d < 7 => ago(d, "day"),
        d if d < 30 => ago(d / 7, "week"),
        d if d < 365 => ago(d / 30, "month"),
        _ => time
            .with_timezone(&now.timezone())
            .format("%Y-%m-%d")
            .to_string(),
    }
}

/// Format a byte count with base-1024 units
///
/// Two decimals with trailing zeros dropped: `1536` is `1.5 KB`,
/// `1048576` is `1 MB`. Zero is `0 Bytes`.
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut exponent = 0;
    while exponent < UNITS.len() - 1 && bytes >= 1u64 << (10 * (exponent + 1)) {
        exponent += 1;
    }
    let value = bytes as f64 / 1024f64.powi(exponent as i32);

    format!("{} {}", trim_decimals(value), UNITS[exponent])
}

/// Shorten `text` to at most `max_chars` characters, appending `...` when cut
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars).collect();
    format!("{}...", kept.trim_end())
}

fn elapsed_seconds<Tz: TimeZone>(time: &DateTime<Utc>, now: &DateTime<Tz>) -> i64 {
    // Future timestamps (clock skew) count as "just now"
    now.with_timezone(&Utc)
        .signed_duration_since(*time)
        .num_seconds()
        .max(0)
}

fn intraday(elapsed: i64) -> Option<String> {
    if elapsed < SECONDS_PER_MINUTE {
        Some("just now".to_string())
    } else if elapsed < SECONDS_PER_HOUR {
        Some(ago(elapsed / SECONDS_PER_MINUTE, "minute"))
    } else if elapsed < SECONDS_PER_DAY {
        Some(ago(elapsed / SECONDS_PER_HOUR, "hour"))
    } else {
        None
    }
}

fn ago(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", count, unit)
    }
}

fn trim_decimals(value: f64) -> String {
    let fixed = format!("{:.2}", value);
    fixed
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

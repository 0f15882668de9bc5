use chrono::Duration as ChronoDuration;
use regex::Regex;
use std::sync::LazyLock;

static NON_DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\D").unwrap());

/// Relative age used for news items and the "last refreshed" footer.
#[must_use]
pub fn format_time_ago(td: ChronoDuration) -> String {
    let secs = td.num_seconds().max(0);

    const MINUTE: i64 = 60;
    const HOUR: i64 = 60 * MINUTE;
    const DAY: i64 = 24 * HOUR;
    const WEEK: i64 = 7 * DAY;

    let (n, unit) = if secs >= WEEK {
        (secs / WEEK, "week")
    } else if secs >= DAY {
        (secs / DAY, "day")
    } else if secs >= HOUR {
        (secs / HOUR, "hour")
    } else if secs >= MINUTE {
        (secs / MINUTE, "minute")
    } else {
        (secs, "second")
    };

    if n == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{n} {unit}s ago")
    }
}

/// Pulls the numeric minute out of a feed value such as `67'` or `45+`.
/// Runs of digits too long for a `u32` saturate.
#[must_use]
pub fn parse_minute(raw: &str) -> Option<u32> {
    let digits = NON_DIGITS.replace_all(raw, "");
    if digits.is_empty() {
        return None;
    }
    match digits.parse() {
        Ok(minute) => Some(minute),
        Err(_) if digits.bytes().all(|b| b.is_ascii_digit()) => Some(u32::MAX),
        Err(_) => None,
    }
}

#[must_use]
pub fn minute_label(minute: u32) -> String {
    if minute > 90 {
        "90+'".to_string()
    } else {
        format!("{minute}'")
    }
}

/// Normalizes a raw minute string for display. Values without digits are
/// returned untouched.
#[must_use]
pub fn format_match_time(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }
    match parse_minute(raw) {
        Some(minute) => minute_label(minute),
        None => raw.to_string(),
    }
}

#[must_use]
pub fn placeholder_image(height: u32, width: u32, text: &str) -> String {
    format!("/placeholder.svg?height={height}&width={width}&text={text}")
}

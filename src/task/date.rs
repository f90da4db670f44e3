//! Free-text time expressions
//!
//! Accepted forms, tried in order:
//! 1. a weekday on its own (`mon`, `Friday`)
//! 2. a weekday followed by a 4-digit 24h time (`mon 1900`)
//! 3. an absolute timestamp (`2025-03-01 1800`)
//!
//! Weekday forms always resolve to the next occurrence strictly after `now`,
//! so naming today's weekday lands a full week ahead.

use chrono::{Datelike, Duration, Local, NaiveDateTime, NaiveTime, Timelike, Weekday};
use thiserror::Error;

/// Format used in the backing file and for absolute input
pub const SAVE_FORMAT: &str = "%Y-%m-%d %H%M";

/// Format used when showing a timestamp to the user
pub const DISPLAY_FORMAT: &str = "%d %b %Y %H%M";

/// Time expression matched none of the supported forms
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot read '{input}' as a time, use YYYY-MM-DD HHMM, a weekday (mon) or a weekday with time (mon 1900)")]
pub struct DateFormatError {
    pub input: String,
}

/// Time of day used when a weekday is given without a time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayDefault {
    /// 23:59, used for deadlines
    EndOfDay,
    /// 09:00, used for event endpoints
    StartOfDay,
}

impl DayDefault {
    fn time(self) -> NaiveTime {
        match self {
            DayDefault::EndOfDay => NaiveTime::from_hms_opt(23, 59, 0),
            DayDefault::StartOfDay => NaiveTime::from_hms_opt(9, 0, 0),
        }
        .unwrap_or_default()
    }
}

/// Current local wall-clock time, truncated to the minute
pub fn local_now() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(now)
}

/// Parse a time expression into an absolute timestamp
///
/// # Arguments
/// * `text` - The raw expression as typed or stored
/// * `default` - Time of day to use for a bare weekday
/// * `now` - Reference point for weekday resolution
///
/// # Returns
/// The resolved timestamp or a `DateFormatError` carrying `text`
pub fn parse_time_expression(
    text: &str,
    default: DayDefault,
    now: NaiveDateTime,
) -> Result<NaiveDateTime, DateFormatError> {
    let input = text.trim();
    let error = || DateFormatError {
        input: text.to_string(),
    };

    let parts: Vec<&str> = input.split_whitespace().collect();
    if let Some(first) = parts.first()
        && let Some(weekday) = parse_weekday(first)
    {
        return match parts.as_slice() {
            [_] => Ok(next_weekday(now, weekday, default.time())),
            // A weekday with a bad time never falls through to the absolute form
            [_, time] => parse_four_digit_time(time)
                .map(|t| next_weekday(now, weekday, t))
                .ok_or_else(error),
            _ => Err(error()),
        };
    }

    if !has_absolute_shape(input) {
        return Err(error());
    }
    NaiveDateTime::parse_from_str(input, SAVE_FORMAT).map_err(|_| error())
}

/// Render a timestamp for the backing file
pub fn format_for_save(timestamp: &NaiveDateTime) -> String {
    timestamp.format(SAVE_FORMAT).to_string()
}

/// Render a timestamp for display
pub fn format_for_display(timestamp: &NaiveDateTime) -> String {
    timestamp.format(DISPLAY_FORMAT).to_string()
}

/// Full names and 3-letter abbreviations, any case
fn parse_weekday(token: &str) -> Option<Weekday> {
    token.parse::<Weekday>().ok()
}

fn parse_four_digit_time(token: &str) -> Option<NaiveTime> {
    if token.len() != 4 || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let hour: u32 = token[..2].parse().ok()?;
    let minute: u32 = token[2..].parse().ok()?;
    NaiveTime::from_hms_opt(hour, minute, 0)
}

/// Exactly `DDDD-DD-DD DDDD`; chrono alone accepts padding and signs
fn has_absolute_shape(input: &str) -> bool {
    let bytes = input.as_bytes();
    bytes.len() == 15
        && bytes.iter().enumerate().all(|(i, &b)| match i {
            4 | 7 => b == b'-',
            10 => b == b' ',
            _ => b.is_ascii_digit(),
        })
}

fn next_weekday(now: NaiveDateTime, weekday: Weekday, time: NaiveTime) -> NaiveDateTime {
    let today = now.date();
    let current = today.weekday().num_days_from_monday() as i64;
    let target = weekday.num_days_from_monday() as i64;
    let mut days_ahead = (target - current).rem_euclid(7);
    if days_ahead == 0 {
        days_ahead = 7;
    }
    (today + Duration::days(days_ahead)).and_time(time)
}

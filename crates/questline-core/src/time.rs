//! Minute-of-day helpers for `HH:MM` scheduled times.
//!
//! Every scheduled time in the core is a minute-of-day in `0..=1439`.
//! Parsing is tolerant: anything that does not parse cleanly is simply
//! "no time", never an error.

use chrono::Timelike;

/// Minutes in a full day.
pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// Latest minute a task can snap to (23:55).
pub const MAX_SNAP_MINUTE: u16 = MINUTES_PER_DAY - 5;

/// Parse an `HH:MM` string into a minute-of-day.
///
/// Returns `None` for anything malformed (missing colon, non-numeric
/// parts, hour > 23, minute > 59). Extra components after the minute
/// (e.g. seconds) are ignored.
pub fn parse_hhmm(time: &str) -> Option<u16> {
    let mut parts = time.split(':');
    let hour: u16 = parts.next()?.trim().parse().ok()?;
    let minute: u16 = parts.next()?.trim().parse().ok()?;
    if hour > 23 || minute > 59 {
        return None;
    }
    Some(hour * 60 + minute)
}

/// Format a minute-of-day as `HH:MM`, clamping into range first.
pub fn format_hhmm(minute: u16) -> String {
    let clamped = clamp_minute(minute);
    format!("{:02}:{:02}", clamped / 60, clamped % 60)
}

/// Format a minute-of-day for display, 12-hour style (`9:05 AM`).
pub fn format_12h(minute: u16) -> String {
    let clamped = clamp_minute(minute);
    let hour24 = clamped / 60;
    let mins = clamped % 60;
    let hour12 = match hour24 % 12 {
        0 => 12,
        h => h,
    };
    let period = if hour24 >= 12 { "PM" } else { "AM" };
    format!("{}:{:02} {}", hour12, mins, period)
}

/// Clamp a minute into `0..=1439`.
pub fn clamp_minute(minute: u16) -> u16 {
    minute.min(MINUTES_PER_DAY - 1)
}

/// Clamp a signed minute value into `0..=1435` (the snap range).
pub fn clamp_snap_minute(minute: i32) -> u16 {
    minute.clamp(0, MAX_SNAP_MINUTE as i32) as u16
}

/// Minute-of-day of a wall-clock timestamp.
pub fn minute_of<T: Timelike>(now: &T) -> u16 {
    (now.hour() * 60 + now.minute()) as u16
}

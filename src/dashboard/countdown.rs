use chrono::{DateTime, Utc};

/// Shown for absent or elapsed deadlines.
pub const ZERO: &str = "00:00:00";

const MS_PER_SECOND: i64 = 1000;
const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;

/// Format a remaining-millisecond delta as `HH:MM:SS`. Hours do not wrap at 24.
pub fn format_remaining(remaining_ms: i64) -> String {
    if remaining_ms <= 0 {
        return ZERO.to_string();
    }
    let hours = remaining_ms / MS_PER_HOUR;
    let minutes = (remaining_ms % MS_PER_HOUR) / MS_PER_MINUTE;
    let seconds = (remaining_ms % MS_PER_MINUTE) / MS_PER_SECOND;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

/// Countdown from `now` until `deadline`, or [`ZERO`] when there is none.
pub fn until(deadline: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    match deadline {
        Some(deadline) => format_remaining((deadline - now).num_milliseconds()),
        None => ZERO.to_string(),
    }
}

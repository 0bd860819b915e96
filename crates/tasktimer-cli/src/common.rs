//! Shared CLI helpers: duration parsing and human-readable formatting.

use tasktimer_core::{DurationUnit, Task, TaskState};

/// clap value parser for duration units. Accepts full names and the usual
/// one-letter shorthands.
pub fn parse_unit(s: &str) -> Result<DurationUnit, String> {
    match s.to_ascii_lowercase().as_str() {
        "s" | "sec" | "secs" | "second" | "seconds" => Ok(DurationUnit::Seconds),
        "m" | "min" | "mins" | "minute" | "minutes" => Ok(DurationUnit::Minutes),
        "h" | "hr" | "hrs" | "hour" | "hours" => Ok(DurationUnit::Hours),
        "d" | "day" | "days" => Ok(DurationUnit::Days),
        other => Err(format!(
            "unknown unit '{other}' (expected seconds, minutes, hours or days)"
        )),
    }
}

/// Render seconds as the two most significant units: "1d 2h", "5m 30s",
/// "0s" when nothing remains.
pub fn format_remaining(secs: i64) -> String {
    let secs = secs.max(0);
    let (d, rem) = (secs / 86_400, secs % 86_400);
    let (h, rem) = (rem / 3_600, rem % 3_600);
    let (m, s) = (rem / 60, rem % 60);

    let units = [(d, "d"), (h, "h"), (m, "m"), (s, "s")];
    let parts: Vec<String> = units
        .iter()
        .filter(|(value, _)| *value > 0)
        .take(2)
        .map(|(value, suffix)| format!("{value}{suffix}"))
        .collect();

    if parts.is_empty() {
        "0s".to_string()
    } else {
        parts.join(" ")
    }
}

/// One-word status column for task listings.
pub fn state_label(task: &Task, now: chrono::DateTime<chrono::Utc>) -> &'static str {
    if task.notified || task.is_due(now) {
        "due"
    } else {
        match task.state {
            TaskState::Running => "running",
            TaskState::Paused => "paused",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_top_two_units() {
        assert_eq!(format_remaining(0), "0s");
        assert_eq!(format_remaining(-5), "0s");
        assert_eq!(format_remaining(45), "45s");
        assert_eq!(format_remaining(330), "5m 30s");
        assert_eq!(format_remaining(3_600), "1h");
        assert_eq!(format_remaining(93_600), "1d 2h");
        // Third-ranked unit is dropped, not rounded.
        assert_eq!(format_remaining(93_661), "1d 2h");
    }

    #[test]
    fn parses_units_and_shorthands() {
        assert_eq!(parse_unit("days").unwrap(), DurationUnit::Days);
        assert_eq!(parse_unit("H").unwrap(), DurationUnit::Hours);
        assert_eq!(parse_unit("min").unwrap(), DurationUnit::Minutes);
        assert_eq!(parse_unit("s").unwrap(), DurationUnit::Seconds);
        assert!(parse_unit("fortnights").is_err());
    }
}

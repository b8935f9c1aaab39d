//! Human-readable relative timestamps.

use chrono::{DateTime, Utc};

const UNITS: &[(f64, &str)] = &[
    (60.0, "second"),
    (60.0, "minute"),
    (24.0, "hour"),
    (7.0, "day"),
    (4.348, "week"),
    (12.0, "month"),
    (f64::INFINITY, "year"),
];

/// Renders the distance from `then` to `now`, e.g. `5 minutes ago`.
///
/// Anything under one second, including instants in the future, is
/// `just now`.
pub fn format_relative_time(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - then).num_seconds();
    if seconds < 1 {
        return "just now".to_string();
    }

    let mut value = seconds as f64;
    for (step, unit) in UNITS {
        if value < *step {
            let n = value.floor() as i64;
            let plural = if n == 1 { "" } else { "s" };
            return format!("{n} {unit}{plural} ago");
        }
        value /= step;
    }
    "just now".to_string()
}

//! Display helpers for dashboard metrics.

use chrono::{DateTime, Local};

/// Format an integer with thousands separators, e.g. `24567` -> `"24,567"`
pub fn format_number(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }

    out
}

/// Render a timestamp relative to `now`: "just now", "5 mins ago",
/// "2 hours ago", or the plain date once it is more than a day old.
pub fn format_relative_time(timestamp: DateTime<Local>, now: DateTime<Local>) -> String {
    let minutes = (now - timestamp).num_minutes();

    if minutes < 1 {
        return "just now".to_string();
    }
    if minutes == 1 {
        return "1 min ago".to_string();
    }
    if minutes < 60 {
        return format!("{} mins ago", minutes);
    }

    let hours = minutes / 60;
    if hours == 1 {
        return "1 hour ago".to_string();
    }
    if hours < 24 {
        return format!("{} hours ago", hours);
    }

    timestamp.format("%Y-%m-%d").to_string()
}

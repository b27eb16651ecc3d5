//! Human-readable durations for leaderboard and game output.

/// Compact duration such as `1h 5m`, `3m 20s` or `45s`.
///
/// Seconds are dropped once the duration reaches an hour; zero is `0s`.
pub fn format_duration(seconds: u64) -> String {
    if seconds == 0 {
        return "0s".to_string();
    }
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    let mut parts = Vec::new();
    if hours > 0 {
        parts.push(format!("{}h", hours));
    }
    if minutes > 0 {
        parts.push(format!("{}m", minutes));
    }
    if secs > 0 && hours == 0 {
        parts.push(format!("{}s", secs));
    }
    parts.join(" ")
}

/// Clock-style elapsed time, `m:ss`.
pub fn format_clock(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

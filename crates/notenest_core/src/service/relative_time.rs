//! Human-readable creation age labels.

const MINUTE_MS: i64 = 60_000;

/// Formats how long ago a note was created.
///
/// Absent, zero, or future timestamps read as "Created recently".
pub fn format_relative_time(created_at: Option<i64>, now_ms: i64) -> String {
    let Some(created_at) = created_at.filter(|&created_at| created_at != 0) else {
        return "Created recently".to_string();
    };
    let diff = match now_ms.checked_sub(created_at) {
        Some(diff) if diff >= 0 => diff,
        _ => return "Created recently".to_string(),
    };

    let minutes = diff / MINUTE_MS;
    let hours = minutes / 60;

    if minutes < 1 {
        "Created just now".to_string()
    } else if minutes < 60 {
        format!("Created {minutes} minute{} ago", plural(minutes))
    } else {
        format!("Created {hours} hour{} ago", plural(hours))
    }
}

fn plural(count: i64) -> &'static str {
    if count > 1 {
        "s"
    } else {
        ""
    }
}

#[cfg(test)]
mod tests {
    use super::format_relative_time;

    const NOW: i64 = 1_700_000_000_000;

    #[test]
    fn absent_zero_or_future_timestamps_are_recent() {
        assert_eq!(format_relative_time(None, NOW), "Created recently");
        assert_eq!(format_relative_time(Some(NOW + 1), NOW), "Created recently");
        assert_eq!(format_relative_time(Some(0), NOW), "Created recently");
    }

    #[test]
    fn formats_minutes_and_hours_with_plurals() {
        assert_eq!(format_relative_time(Some(NOW - 59_999), NOW), "Created just now");
        assert_eq!(format_relative_time(Some(NOW - 60_000), NOW), "Created 1 minute ago");
        assert_eq!(
            format_relative_time(Some(NOW - 5 * 60_000), NOW),
            "Created 5 minutes ago"
        );
        assert_eq!(
            format_relative_time(Some(NOW - 60 * 60_000), NOW),
            "Created 1 hour ago"
        );
        assert_eq!(
            format_relative_time(Some(NOW - 30 * 60 * 60_000), NOW),
            "Created 30 hours ago"
        );
    }
}

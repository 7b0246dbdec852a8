/// Format seconds as the activity figure shown in profiles and leaderboards,
/// e.g. `3 hours, 05 minutes`.
pub fn format_hours_minutes(total_seconds: i64) -> String {
    let total_seconds = total_seconds.max(0);
    let hours = total_seconds / 3_600;
    let minutes = (total_seconds % 3_600) / 60;

    format!("{} hours, {:02} minutes", hours, minutes)
}

/// Compact variant for embed fields, e.g. `3h, 05m`.
pub fn format_hours_minutes_compact(total_seconds: i64) -> String {
    let total_seconds = total_seconds.max(0);
    let hours = total_seconds / 3_600;
    let minutes = (total_seconds % 3_600) / 60;

    format!("{}h, {:02}m", hours, minutes)
}

/// Format an account age or similar long span, e.g.
/// `3 days, 7 hours, 02 minutes`.
pub fn format_days_hours_minutes(total_seconds: i64) -> String {
    let total_seconds = total_seconds.max(0);
    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3_600;
    let minutes = (total_seconds % 3_600) / 60;

    format!("{} days, {} hours, {:02} minutes", days, hours, minutes)
}

/// Format remaining cooldown time, dropping leading zero units:
/// `9 hours, 59 minutes and 30 seconds` / `05 minutes and 30 seconds` /
/// `30 seconds`.
pub fn format_cooldown_remaining(total_seconds: u64) -> String {
    let hours = total_seconds / 3_600;
    let minutes = (total_seconds % 3_600) / 60;
    let seconds = total_seconds % 60;

    if hours > 0 {
        format!(
            "{} hours, {:02} minutes and {:02} seconds",
            hours, minutes, seconds
        )
    } else if minutes > 0 {
        format!("{:02} minutes and {:02} seconds", minutes, seconds)
    } else {
        format!("{:02} seconds", seconds)
    }
}

/// Break user-controlled text out of mention syntax before echoing it back.
pub fn sanitize_mentions(text: &str) -> String {
    text.replace('@', "@\u{200B}")
}

#[cfg(test)]
mod tests {
    use super::{
        format_cooldown_remaining, format_days_hours_minutes, format_hours_minutes,
        format_hours_minutes_compact, sanitize_mentions,
    };

    #[test]
    fn activity_figures() {
        assert_eq!(format_hours_minutes(0), "0 hours, 00 minutes");
        assert_eq!(format_hours_minutes(3 * 3600 + 5 * 60), "3 hours, 05 minutes");
        assert_eq!(format_hours_minutes_compact(3 * 3600 + 5 * 60), "3h, 05m");
        assert_eq!(format_hours_minutes(-5), "0 hours, 00 minutes");
    }

    #[test]
    fn long_spans_include_days() {
        assert_eq!(
            format_days_hours_minutes(3 * 86_400 + 7 * 3_600 + 120),
            "3 days, 7 hours, 02 minutes"
        );
    }

    #[test]
    fn cooldowns_drop_leading_zero_units() {
        assert_eq!(
            format_cooldown_remaining(9 * 3_600 + 59 * 60 + 30),
            "9 hours, 59 minutes and 30 seconds"
        );
        assert_eq!(format_cooldown_remaining(5 * 60 + 30), "05 minutes and 30 seconds");
        assert_eq!(format_cooldown_remaining(30), "30 seconds");
    }

    #[test]
    fn mentions_are_neutralized() {
        assert_eq!(sanitize_mentions("hi @everyone"), "hi @\u{200B}everyone");
    }
}

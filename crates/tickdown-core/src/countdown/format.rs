//! Remaining-duration display and target-input parsing.
//!
//! The display tiers drop precision as the horizon grows: a countdown weeks
//! away redraws meaningfully once an hour, one under a minute redraws every
//! second. The tier boundaries are part of the UI contract and are covered
//! by tests.

use chrono::{DateTime, Duration, Local, NaiveDateTime, TimeZone, Utc};

/// Shown when no target has been assigned. Distinct from [`DONE`].
pub const NO_TARGET: &str = "0m 0s";

/// Shown once a target has been reached.
pub const DONE: &str = "Done!";

/// Format a remaining duration into its display tier.
///
/// - more than a day left: `"{days}d {hours}h"`
/// - more than an hour: `"{hours}h {minutes}m"`
/// - more than a minute: `"{minutes}m"`
/// - under a minute: `"{seconds}s"`
/// - zero or negative: `"Done!"`
pub fn format_remaining(remaining: Duration) -> String {
    let total_secs = remaining.num_seconds();
    if total_secs <= 0 {
        return DONE.to_string();
    }

    let days = total_secs / 86_400;
    let hours = (total_secs % 86_400) / 3_600;
    let minutes = (total_secs % 3_600) / 60;
    let seconds = total_secs % 60;

    if days > 0 {
        format!("{}d {}h", days, hours)
    } else if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else if minutes > 0 {
        format!("{}m", minutes)
    } else {
        format!("{}s", seconds)
    }
}

/// Parse a user-supplied target string into an absolute instant.
///
/// Accepts RFC 3339 (`2026-08-05T17:30:00Z`) or the `datetime-local` input
/// shape (`2026-08-05T17:30`, optionally with seconds), the latter
/// interpreted in the local zone. Anything unparseable yields `None` --
/// malformed input means "no target set", never a hard failure.
pub fn parse_target(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, fmt) {
            // Ambiguous local times (DST fold) resolve to the earlier instant.
            return Local
                .from_local_datetime(&naive)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc));
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dur(days: i64, hours: i64, minutes: i64, seconds: i64) -> Duration {
        Duration::seconds(days * 86_400 + hours * 3_600 + minutes * 60 + seconds)
    }

    #[test]
    fn days_tier_shows_days_and_hours() {
        assert_eq!(format_remaining(dur(2, 3, 59, 59)), "2d 3h");
        assert_eq!(format_remaining(dur(1, 0, 0, 0)), "1d 0h");
    }

    #[test]
    fn hours_tier_shows_hours_and_minutes() {
        assert_eq!(format_remaining(dur(0, 5, 7, 30)), "5h 7m");
        assert_eq!(format_remaining(dur(0, 1, 0, 0)), "1h 0m");
    }

    #[test]
    fn minutes_tier_drops_seconds() {
        assert_eq!(format_remaining(dur(0, 0, 1, 30)), "1m");
        assert_eq!(format_remaining(dur(0, 0, 59, 59)), "59m");
    }

    #[test]
    fn seconds_tier() {
        assert_eq!(format_remaining(dur(0, 0, 0, 59)), "59s");
        assert_eq!(format_remaining(dur(0, 0, 0, 1)), "1s");
    }

    #[test]
    fn zero_and_negative_are_done() {
        assert_eq!(format_remaining(Duration::zero()), DONE);
        assert_eq!(format_remaining(Duration::seconds(-5)), DONE);
    }

    #[test]
    fn parse_rfc3339() {
        let t = parse_target("2026-08-05T17:30:00Z").unwrap();
        assert_eq!(t.to_rfc3339(), "2026-08-05T17:30:00+00:00");
    }

    #[test]
    fn parse_datetime_local_shape() {
        assert!(parse_target("2026-08-05T17:30").is_some());
        assert!(parse_target("2026-08-05T17:30:15").is_some());
    }

    #[test]
    fn malformed_input_is_no_target() {
        assert!(parse_target("").is_none());
        assert!(parse_target("   ").is_none());
        assert!(parse_target("next tuesday").is_none());
        assert!(parse_target("2026-13-40T99:99").is_none());
    }
}

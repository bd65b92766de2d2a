//! Timestamp rendering for payloads

use chrono::{DateTime, Utc};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// `2024-05-01 13:45:10`
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Relative wording such as `3 hours ago` or `2 days from now`
pub fn humanize(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let delta = now.signed_duration_since(at);
    let seconds = delta.num_seconds();
    let (amount, unit) = largest_unit(seconds.unsigned_abs());
    let plural = if amount == 1 { "" } else { "s" };
    let direction = if seconds < 0 { "from now" } else { "ago" };

    format!("{} {}{} {}", amount, unit, plural, direction)
}

fn largest_unit(seconds: u64) -> (u64, &'static str) {
    const MINUTE: u64 = 60;
    const HOUR: u64 = 60 * MINUTE;
    const DAY: u64 = 24 * HOUR;
    const WEEK: u64 = 7 * DAY;
    const MONTH: u64 = 30 * DAY;
    const YEAR: u64 = 365 * DAY;

    match seconds {
        s if s >= YEAR => (s / YEAR, "year"),
        s if s >= MONTH => (s / MONTH, "month"),
        s if s >= WEEK => (s / WEEK, "week"),
        s if s >= DAY => (s / DAY, "day"),
        s if s >= HOUR => (s / HOUR, "hour"),
        s if s >= MINUTE => (s / MINUTE, "minute"),
        s => (s.max(1), "second"),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_units() {
        let cases = [
            (Duration::zero(), "1 second ago"),
            (Duration::seconds(42), "42 seconds ago"),
            (Duration::minutes(1), "1 minute ago"),
            (Duration::hours(3), "3 hours ago"),
            (Duration::days(2), "2 days ago"),
            (Duration::days(14), "2 weeks ago"),
            (Duration::days(65), "2 months ago"),
            (Duration::days(800), "2 years ago"),
        ];
        for (delta, expected) in cases {
            assert_eq!(humanize(now() - delta, now()), expected);
        }
    }

    #[test]
    fn test_future() {
        assert_eq!(humanize(now() + Duration::minutes(5), now()), "5 minutes from now");
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(now()), "2024-06-01 12:00:00");
    }
}

//! Sleep-style durations in decimal hours.

use std::sync::LazyLock;

use regex::Regex;

use super::numeric::{parse_num, round_to};
use super::present;

static HOURS_MINUTES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(\d+)\s*h\s*(\d+)\s*(?:mins?)?$").expect("duration pattern is valid")
});

static HOURS_ONLY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(\d+)\s*h$").expect("hours pattern is valid"));

/// Parses `"7h 4min"`, `"8h"` or a bare number into hours (`SPECIAL01`).
///
/// Hours plus minutes are rounded to four decimals.
pub fn parse_duration_hours(value: &str) -> Option<f64> {
    let text = present(value)?;

    if let Some(caps) = HOURS_MINUTES.captures(text) {
        let hours: f64 = caps[1].parse().ok()?;
        let minutes: f64 = caps[2].parse().ok()?;
        return Some(round_to(hours + minutes / 60.0, 4));
    }

    if let Some(caps) = HOURS_ONLY.captures(text) {
        return caps[1].parse().ok();
    }

    parse_num(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hours_and_minutes() {
        assert_eq!(parse_duration_hours("7h 4min"), Some(7.0667));
        assert_eq!(parse_duration_hours("6H 30MINS"), Some(6.5));
        assert_eq!(parse_duration_hours("0h 45"), Some(0.75));
        assert_eq!(parse_duration_hours("1h0min"), Some(1.0));
    }

    #[test]
    fn test_hours_only() {
        assert_eq!(parse_duration_hours("8h"), Some(8.0));
        assert_eq!(parse_duration_hours(" 9 h "), Some(9.0));
    }

    #[test]
    fn test_bare_number() {
        assert_eq!(parse_duration_hours("7.25"), Some(7.25));
    }

    #[test]
    fn test_invalid() {
        assert_eq!(parse_duration_hours("garbage"), None);
        assert_eq!(parse_duration_hours("7h 4min 3s"), None);
        assert_eq!(parse_duration_hours("--"), None);
    }
}

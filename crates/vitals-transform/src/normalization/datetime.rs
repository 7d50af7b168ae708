//! Date key parsing into canonical `YYYYMMDD`.
//!
//! Exports write dates in several layouts. Full layouts are tried in a fixed
//! order; failing those, a trailing `Mon D` form is accepted and its year is
//! inferred from [`YearInference`].

use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use regex::Regex;
use vitals_model::YearInference;

use super::present;

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Debug, Clone, Copy)]
enum Layout {
    DateTime(&'static str),
    Date(&'static str),
}

/// Layouts tried in order.
const LAYOUTS: [Layout; 4] = [
    Layout::DateTime("%Y-%m-%d %H:%M:%S"),
    Layout::Date("%Y-%m-%d"),
    Layout::Date("%m/%d/%Y"),
    Layout::DateTime("%Y.%m.%d %I:%M %p"),
];

static MONTH_DAY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|\s)(Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)\s+(\d{1,2})$")
        .expect("month-day pattern is valid")
});

/// Years a `%Y` field may hold; chrono accepts any digit count there.
const FOUR_DIGIT_YEARS: std::ops::RangeInclusive<i32> = 1000..=9999;

impl Layout {
    fn parse(self, text: &str) -> Option<NaiveDate> {
        let date = match self {
            Self::DateTime(fmt) => NaiveDateTime::parse_from_str(text, fmt)
                .ok()
                .map(|dt| dt.date()),
            Self::Date(fmt) => NaiveDate::parse_from_str(text, fmt).ok(),
        }?;
        FOUR_DIGIT_YEARS.contains(&date.year()).then_some(date)
    }
}

fn parse_month_day(text: &str, years: YearInference) -> Option<NaiveDate> {
    let caps = MONTH_DAY.captures(text)?;
    let month = MONTH_ABBREVIATIONS
        .iter()
        .position(|abbr| *abbr == &caps[1])
        .and_then(|idx| u32::try_from(idx + 1).ok())?;
    let day: u32 = caps[2].parse().ok()?;
    NaiveDate::from_ymd_opt(years.year_for_month(month), month, day)
}

/// Parses a date cell into a date.
pub fn parse_naive_date(value: &str, years: YearInference) -> Option<NaiveDate> {
    let text = present(value)?;
    LAYOUTS
        .iter()
        .find_map(|layout| layout.parse(text))
        .or_else(|| parse_month_day(text, years))
}

/// Parses a date cell into canonical `YYYYMMDD`.
pub fn parse_date(value: &str, years: YearInference) -> Option<String> {
    parse_naive_date(value, years).map(|date| date.format("%Y%m%d").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(value: &str) -> Option<String> {
        parse_date(value, YearInference::default())
    }

    #[test]
    fn test_full_layouts() {
        assert_eq!(parse("2025-01-07 00:00:00"), Some("20250107".to_string()));
        assert_eq!(parse("2025-12-15"), Some("20251215".to_string()));
        assert_eq!(parse("12/10/2025"), Some("20251210".to_string()));
        assert_eq!(parse("2026.01.01 11:58 AM"), Some("20260101".to_string()));
        assert_eq!(parse("2026.01.01 11:58 PM"), Some("20260101".to_string()));
    }

    #[test]
    fn test_month_day_year_inference() {
        assert_eq!(parse("Dec 10"), Some("20251210".to_string()));
        assert_eq!(parse("Jan 21"), Some("20260121".to_string()));
        assert_eq!(parse("Wed Dec 3"), Some("20251203".to_string()));
    }

    #[test]
    fn test_month_day_custom_year() {
        let years = YearInference::new(2030);
        assert_eq!(parse_date("Dec 31", years), Some("20301231".to_string()));
        assert_eq!(parse_date("Feb 1", years), Some("20310201".to_string()));
    }

    #[test]
    fn test_invalid() {
        assert_eq!(parse("not a date"), None);
        assert_eq!(parse("Feb 30"), None);
        assert_eq!(parse("2025-13-01"), None);
        assert_eq!(parse("December 10"), None);
        assert_eq!(parse(""), None);
        assert_eq!(parse("--"), None);
    }

    #[test]
    fn test_short_years_are_rejected() {
        assert_eq!(parse("12/10/25"), None);
        assert_eq!(parse("25-01-07"), None);
        assert_eq!(parse("0025-01-07 00:00:00"), None);
    }
}

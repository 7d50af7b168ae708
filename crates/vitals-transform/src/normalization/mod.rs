//! Cell normalization functions.
//!
//! Every function treats absent input, blank text and the export placeholders
//! `nan`, `--` and `- -` as missing and returns `None` for them.

pub mod datetime;
pub mod duration;
pub mod numeric;

pub use datetime::parse_date;
pub use duration::parse_duration_hours;
pub use numeric::{parse_num, parse_rounded, round_to, strip_num};

const MISSING_MARKERS: [&str; 2] = ["--", "- -"];

/// Trimmed cell text, or `None` when the cell counts as missing.
pub fn present(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty()
        || trimmed.eq_ignore_ascii_case("nan")
        || MISSING_MARKERS.contains(&trimmed)
    {
        None
    } else {
        Some(trimmed)
    }
}

/// Text value for `CHAR` and `TIME` columns.
pub fn clean_text(value: &str) -> Option<String> {
    present(value).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_markers() {
        for value in ["", "   ", "nan", "NaN", "--", " - - ", "\t"] {
            assert_eq!(present(value), None, "{value:?}");
        }
        assert_eq!(present(" 72 "), Some("72"));
        assert_eq!(present("-"), Some("-"));
    }

    #[test]
    fn test_clean_text() {
        assert_eq!(clean_text("  07:45 AM "), Some("07:45 AM".to_string()));
        assert_eq!(clean_text(""), None);
    }
}

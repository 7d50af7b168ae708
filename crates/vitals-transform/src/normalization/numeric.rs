//! Numeric cell parsing.

use std::sync::LazyLock;

use regex::Regex;

use super::present;

static EMBEDDED_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-+]?\d+\.?\d*").expect("embedded number pattern is valid"));

/// Strict parse of the whole trimmed cell (`NUM`).
pub fn parse_num(value: &str) -> Option<f64> {
    present(value)?.parse().ok()
}

/// First number embedded in decorated text (`STRIPNUM`).
///
/// `"72 bpm"` gives 72, `"-- 72.5 bpm"` gives 72.5.
pub fn strip_num(value: &str) -> Option<f64> {
    let text = present(value)?;
    EMBEDDED_NUMBER.find(text)?.as_str().parse().ok()
}

/// Rounds to `decimals` places on the exact decimal value of `value`.
///
/// Exact halves go to the even digit, so `2.25` gives `2.2`; `1.45` is
/// stored just below the half and gives `1.4`.
pub fn round_to(value: f64, decimals: usize) -> f64 {
    format!("{value:.decimals$}").parse().unwrap_or(value)
}

/// Strict parse rounded to `decimals` places (`SPECIAL02` uses one).
pub fn parse_rounded(value: &str, decimals: usize) -> Option<f64> {
    parse_num(value).map(|number| round_to(number, decimals))
}

//! Coercion dispatch from [`CoercionRule`] to normalization functions.

use vitals_model::{CellValue, CoercionRule, YearInference};

use crate::normalization::{
    clean_text, parse_date, parse_duration_hours, parse_num, parse_rounded, strip_num,
};

/// Coerces one raw cell according to its column rule.
///
/// Failures of any kind give `None`. `DATEKEY` and `IGNORE` columns never
/// produce values here; the date column goes through [`coerce_date`].
pub fn coerce_cell(raw: Option<&str>, rule: CoercionRule) -> Option<CellValue> {
    let raw = raw?;
    match rule {
        CoercionRule::Num => parse_num(raw).map(CellValue::Number),
        CoercionRule::StripNum => strip_num(raw).map(CellValue::Number),
        CoercionRule::Char | CoercionRule::Time => clean_text(raw).map(CellValue::Text),
        CoercionRule::Special01 => parse_duration_hours(raw).map(CellValue::Number),
        CoercionRule::Special02 => parse_rounded(raw, 1).map(CellValue::Number),
        CoercionRule::DateKey | CoercionRule::Ignore => None,
    }
}

/// Coerces a date-key cell into canonical `YYYYMMDD`.
pub fn coerce_date(raw: Option<&str>, years: YearInference) -> Option<String> {
    parse_date(raw?, years)
}

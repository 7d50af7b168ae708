//! Rules description parsing.
//!
//! Rows are folded in file order by a two-state scan. Before a header row has
//! been seen, `X` rows count the noise rows to skip in each data file; once
//! the header is known, `R` rows can assign rules to its columns.

use std::collections::BTreeMap;

use vitals_model::{CORRECTED_NAME_MARKER, CoercionRule, RuleRow, RuleTag, RulesSpec};

use crate::error::RulesError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    BeforeHeader,
    AfterHeader,
}

/// Everything a rules description yielded, including incomplete parts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RulesScan {
    pub skip_rows: usize,
    pub header_seen: bool,
    pub column_names: Vec<String>,
    pub column_rules: BTreeMap<String, CoercionRule>,
    pub date_key: Option<String>,
}

impl RulesScan {
    /// Completes the scan into a spec usable by the folder processor.
    pub fn into_spec(self) -> Result<RulesSpec, RulesError> {
        if !self.header_seen {
            return Err(RulesError::MissingHeader);
        }
        let Some(date_key) = self.date_key else {
            return Err(RulesError::MissingDateKey);
        };
        Ok(RulesSpec {
            skip_rows: self.skip_rows,
            column_names: self.column_names,
            column_rules: self.column_rules,
            date_key,
        })
    }
}

/// Converts raw rows into tagged rows, dropping rows without a known tag.
pub fn rule_rows(raw: Vec<Vec<String>>) -> Vec<RuleRow> {
    raw.into_iter().filter_map(RuleRow::from_cells).collect()
}

fn header_names(row: &RuleRow) -> Vec<String> {
    row.cells
        .iter()
        .map(|cell| {
            let name = cell.trim();
            let name = if row.tag == RuleTag::CorrectedHeader {
                name.strip_prefix(CORRECTED_NAME_MARKER).unwrap_or(name)
            } else {
                name
            };
            name.to_string()
        })
        .collect()
}

fn apply_rules_row(scan: &mut RulesScan, row: &RuleRow) {
    for (name, cell) in scan.column_names.iter().zip(&row.cells) {
        if name.is_empty() {
            continue;
        }
        let rule = CoercionRule::from_cell(cell).unwrap_or_else(|err| {
            tracing::debug!(column = %name, %err, "unrecognised rule, column ignored");
            CoercionRule::Ignore
        });
        if rule == CoercionRule::DateKey {
            scan.date_key = Some(name.clone());
        }
        scan.column_rules.insert(name.clone(), rule);
    }
}

/// Folds rules rows without requiring a header or date key.
pub fn scan_rules<I>(rows: I) -> RulesScan
where
    I: IntoIterator<Item = RuleRow>,
{
    let mut scan = RulesScan::default();
    let mut state = ScanState::BeforeHeader;
    for row in rows {
        match (row.tag, state) {
            (RuleTag::Extraneous, ScanState::BeforeHeader) => scan.skip_rows += 1,
            (RuleTag::Header | RuleTag::CorrectedHeader, _) => {
                // Rules only apply to the current header.
                scan.column_rules.clear();
                scan.date_key = None;
                scan.column_names = header_names(&row);
                scan.header_seen = true;
                state = ScanState::AfterHeader;
            }
            (RuleTag::Rules, ScanState::AfterHeader) => apply_rules_row(&mut scan, &row),
            (RuleTag::Extraneous, ScanState::AfterHeader)
            | (RuleTag::Rules, ScanState::BeforeHeader)
            | (RuleTag::Sample, _) => {}
        }
    }
    scan
}

/// Parses rules rows into a [`RulesSpec`].
///
/// Fails when no header row or no `DATEKEY` column was found.
pub fn parse_rules<I>(rows: I) -> Result<RulesSpec, RulesError>
where
    I: IntoIterator<Item = RuleRow>,
{
    scan_rules(rows).into_spec()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(tag: RuleTag, cells: &[&str]) -> RuleRow {
        RuleRow::new(tag, cells.iter().map(|cell| (*cell).to_string()).collect())
    }

    #[test]
    fn header_without_date_key() {
        let rows = vec![
            row(RuleTag::Extraneous, &[]),
            row(RuleTag::Header, &["A", "B"]),
            row(RuleTag::Rules, &["NUM", "IGNORE"]),
        ];
        let scan = scan_rules(rows.clone());
        assert_eq!(scan.skip_rows, 1);
        assert_eq!(scan.column_names, vec!["A", "B"]);
        assert_eq!(
            scan.column_rules,
            BTreeMap::from([
                ("A".to_string(), CoercionRule::Num),
                ("B".to_string(), CoercionRule::Ignore),
            ])
        );
        assert_eq!(scan.date_key, None);
        assert_eq!(parse_rules(rows), Err(RulesError::MissingDateKey));
    }

    #[test]
    fn corrected_names_lose_marker() {
        let spec = parse_rules(vec![
            row(RuleTag::CorrectedHeader, &["Date", "_Weight", " BMI "]),
            row(RuleTag::Rules, &["DATEKEY", "STRIPNUM", "NUM"]),
        ])
        .unwrap();
        assert_eq!(spec.column_names, vec!["Date", "Weight", "BMI"]);
        assert_eq!(spec.date_key, "Date");
        assert_eq!(spec.rule_for("Weight"), CoercionRule::StripNum);
    }

    #[test]
    fn raw_header_keeps_marker() {
        let spec = parse_rules(vec![
            row(RuleTag::Header, &["_Day"]),
            row(RuleTag::Rules, &["DATEKEY"]),
        ])
        .unwrap();
        assert_eq!(spec.date_key, "_Day");
    }

    #[test]
    fn extraneous_rows_after_header_are_not_counted() {
        let spec = parse_rules(vec![
            row(RuleTag::Extraneous, &["title"]),
            row(RuleTag::Extraneous, &["subtitle"]),
            row(RuleTag::Header, &["Day"]),
            row(RuleTag::Extraneous, &["footer"]),
            row(RuleTag::Rules, &["DATEKEY"]),
        ])
        .unwrap();
        assert_eq!(spec.skip_rows, 2);
    }

    #[test]
    fn rules_before_header_are_ignored() {
        let scan = scan_rules(vec![
            row(RuleTag::Rules, &["DATEKEY"]),
            row(RuleTag::Header, &["Day"]),
        ]);
        assert!(scan.column_rules.is_empty());
        assert_eq!(scan.into_spec(), Err(RulesError::MissingDateKey));
    }

    #[test]
    fn later_header_discards_earlier_rules() {
        let scan = scan_rules(vec![
            row(RuleTag::Header, &["A", "B"]),
            row(RuleTag::Rules, &["DATEKEY", "NUM"]),
            row(RuleTag::CorrectedHeader, &["Day", "_Val"]),
        ]);
        assert_eq!(scan.column_names, vec!["Day", "Val"]);
        assert!(scan.column_rules.is_empty());
        assert_eq!(scan.into_spec(), Err(RulesError::MissingDateKey));

        let spec = parse_rules(vec![
            row(RuleTag::Header, &["A", "B"]),
            row(RuleTag::Rules, &["DATEKEY", "NUM"]),
            row(RuleTag::CorrectedHeader, &["Day", "_Val"]),
            row(RuleTag::Rules, &["DATEKEY", "NUM"]),
        ])
        .unwrap();
        assert_eq!(spec.date_key, "Day");
        assert_eq!(
            spec.column_rules,
            BTreeMap::from([
                ("Day".to_string(), CoercionRule::DateKey),
                ("Val".to_string(), CoercionRule::Num),
            ])
        );
    }

    #[test]
    fn rules_are_bounded_by_header_width() {
        let spec = parse_rules(vec![
            row(RuleTag::Header, &["Day", "Value"]),
            row(RuleTag::Rules, &["DATEKEY", "NUM", "CHAR", "CHAR"]),
        ])
        .unwrap();
        assert_eq!(spec.column_rules.len(), 2);
    }

    #[test]
    fn blank_and_unknown_rules_become_ignore() {
        let spec = parse_rules(vec![
            row(RuleTag::Header, &["Day", "Blank", "Odd"]),
            row(RuleTag::Rules, &["DATEKEY", "", "PERCENT"]),
        ])
        .unwrap();
        assert_eq!(spec.rule_for("Blank"), CoercionRule::Ignore);
        assert_eq!(spec.rule_for("Odd"), CoercionRule::Ignore);
    }

    #[test]
    fn sample_rows_are_ignored() {
        let spec = parse_rules(vec![
            row(RuleTag::Sample, &["before"]),
            row(RuleTag::Header, &["Day"]),
            row(RuleTag::Sample, &["Dec 10"]),
            row(RuleTag::Rules, &["DATEKEY"]),
        ])
        .unwrap();
        assert_eq!(spec.skip_rows, 0);
        assert_eq!(spec.column_names, vec!["Day"]);
    }

    #[test]
    fn missing_header_fails() {
        let rows = vec![row(RuleTag::Extraneous, &[]), row(RuleTag::Sample, &["x"])];
        assert_eq!(parse_rules(rows), Err(RulesError::MissingHeader));
    }

    #[test]
    fn rule_rows_drop_untagged_rows() {
        let raw = vec![
            vec!["H".to_string(), "Day".to_string()],
            vec!["".to_string(), "note".to_string()],
            vec!["comment".to_string()],
            vec!["R".to_string(), "DATEKEY".to_string()],
        ];
        let rows = rule_rows(raw);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].tag, RuleTag::Rules);
    }
}

//! Rules description types.
//!
//! A rules description is a small table whose first cell on every row is a
//! tag. The tag decides how the remaining cells are interpreted when the
//! rules are folded into a [`RulesSpec`].

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::table::ColumnKind;

/// Prefix marking a corrected column name on a `C` row.
pub const CORRECTED_NAME_MARKER: char = '_';

/// Row tag of a rules description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RuleTag {
    /// Extraneous row in the data file before its header.
    #[serde(rename = "X")]
    Extraneous,
    /// Raw header row.
    #[serde(rename = "H")]
    Header,
    /// Corrected header row; marked names lose their marker.
    #[serde(rename = "C")]
    CorrectedHeader,
    /// Coercion rule per column, by position.
    #[serde(rename = "R")]
    Rules,
    /// Sample row kept for documentation only.
    #[serde(rename = "S")]
    Sample,
}

impl RuleTag {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Extraneous => "X",
            Self::Header => "H",
            Self::CorrectedHeader => "C",
            Self::Rules => "R",
            Self::Sample => "S",
        }
    }
}

impl FromStr for RuleTag {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "X" => Ok(Self::Extraneous),
            "H" => Ok(Self::Header),
            "C" => Ok(Self::CorrectedHeader),
            "R" => Ok(Self::Rules),
            "S" => Ok(Self::Sample),
            _ => Err(ModelError::UnknownTag(s.to_string())),
        }
    }
}

impl fmt::Display for RuleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One tagged row of a rules description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleRow {
    pub tag: RuleTag,
    pub cells: Vec<String>,
}

impl RuleRow {
    pub fn new(tag: RuleTag, cells: Vec<String>) -> Self {
        Self { tag, cells }
    }

    /// Splits a raw row into tag and payload.
    ///
    /// Returns `None` when the first cell is missing or not a known tag.
    pub fn from_cells(mut cells: Vec<String>) -> Option<Self> {
        if cells.is_empty() {
            return None;
        }
        let tag = cells.remove(0).parse::<RuleTag>().ok()?;
        Some(Self { tag, cells })
    }
}

/// How a raw cell becomes an output value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CoercionRule {
    /// Strict float parse of the whole cell.
    Num,
    /// First number embedded anywhere in the cell.
    #[serde(rename = "STRIPNUM")]
    StripNum,
    /// Trimmed text.
    Char,
    /// Trimmed text holding a time of day.
    Time,
    /// Duration such as `7h 4min`, in decimal hours.
    #[serde(rename = "SPECIAL01")]
    Special01,
    /// Float rounded to one decimal.
    #[serde(rename = "SPECIAL02")]
    Special02,
    /// The column holding the row date.
    #[serde(rename = "DATEKEY")]
    DateKey,
    /// Dropped from output.
    Ignore,
}

impl CoercionRule {
    pub const ALL: [Self; 8] = [
        Self::Num,
        Self::StripNum,
        Self::Char,
        Self::Time,
        Self::Special01,
        Self::Special02,
        Self::DateKey,
        Self::Ignore,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Num => "NUM",
            Self::StripNum => "STRIPNUM",
            Self::Char => "CHAR",
            Self::Time => "TIME",
            Self::Special01 => "SPECIAL01",
            Self::Special02 => "SPECIAL02",
            Self::DateKey => "DATEKEY",
            Self::Ignore => "IGNORE",
        }
    }

    /// Output kind of a value column, `None` for rules that emit no column.
    pub const fn output_kind(self) -> Option<ColumnKind> {
        match self {
            Self::Num | Self::StripNum | Self::Special01 | Self::Special02 => {
                Some(ColumnKind::Numeric)
            }
            Self::Char | Self::Time => Some(ColumnKind::Text),
            Self::DateKey | Self::Ignore => None,
        }
    }

    /// Parses a rule cell; blank cells mean [`CoercionRule::Ignore`].
    pub fn from_cell(cell: &str) -> Result<Self, ModelError> {
        if cell.trim().is_empty() {
            return Ok(Self::Ignore);
        }
        cell.parse()
    }
}

impl FromStr for CoercionRule {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|rule| rule.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ModelError::UnknownRule(s.to_string()))
    }
}

impl fmt::Display for CoercionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transformation spec of one source, folded from its rules rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesSpec {
    /// Rows to discard in a data file before its header row.
    pub skip_rows: usize,
    /// Column names applied positionally to the data file.
    pub column_names: Vec<String>,
    /// Rule per column name.
    pub column_rules: BTreeMap<String, CoercionRule>,
    /// Column whose values become the row date.
    pub date_key: String,
}

impl RulesSpec {
    /// Rule for a column; unknown columns are ignored.
    pub fn rule_for(&self, column: &str) -> CoercionRule {
        self.column_rules
            .get(column)
            .copied()
            .unwrap_or(CoercionRule::Ignore)
    }

    /// Value columns in header order as `(position, name, rule)`.
    ///
    /// Skips the date key, ignored columns, blank names and repeated names.
    pub fn value_columns(&self) -> Vec<(usize, &str, CoercionRule)> {
        let mut seen = BTreeSet::new();
        self.column_names
            .iter()
            .enumerate()
            .filter_map(|(idx, name)| {
                if name.is_empty() || *name == self.date_key || !seen.insert(name.as_str()) {
                    return None;
                }
                let rule = self.rule_for(name);
                rule.output_kind().map(|_| (idx, name.as_str(), rule))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec() -> RulesSpec {
        RulesSpec {
            skip_rows: 0,
            column_names: vec!["Day".into(), "Weight".into(), "Note".into(), "BMI".into()],
            column_rules: BTreeMap::from([
                ("Day".to_string(), CoercionRule::DateKey),
                ("Weight".to_string(), CoercionRule::StripNum),
                ("Note".to_string(), CoercionRule::Ignore),
                ("BMI".to_string(), CoercionRule::Num),
            ]),
            date_key: "Day".into(),
        }
    }

    #[test]
    fn parses_tags_case_insensitively() {
        assert_eq!("x".parse::<RuleTag>().unwrap(), RuleTag::Extraneous);
        assert_eq!(" C ".parse::<RuleTag>().unwrap(), RuleTag::CorrectedHeader);
        assert!("Q".parse::<RuleTag>().is_err());
    }

    #[test]
    fn row_from_cells_splits_tag() {
        let row = RuleRow::from_cells(vec!["H".into(), "A".into(), "B".into()]).unwrap();
        assert_eq!(row.tag, RuleTag::Header);
        assert_eq!(row.cells, vec!["A", "B"]);
        assert!(RuleRow::from_cells(vec![]).is_none());
        assert!(RuleRow::from_cells(vec!["".into(), "A".into()]).is_none());
    }

    #[test]
    fn coercion_rule_round_trips_names() {
        for rule in CoercionRule::ALL {
            assert_eq!(rule.as_str().parse::<CoercionRule>().unwrap(), rule);
        }
        assert_eq!("stripnum".parse::<CoercionRule>().unwrap(), CoercionRule::StripNum);
        assert_eq!(CoercionRule::from_cell("  ").unwrap(), CoercionRule::Ignore);
        assert_eq!(
            "FLOAT".parse::<CoercionRule>(),
            Err(ModelError::UnknownRule("FLOAT".into()))
        );
    }

    #[test]
    fn coercion_rule_serializes_as_identifier() {
        let json = serde_json::to_string(&CoercionRule::Special01).unwrap();
        assert_eq!(json, "\"SPECIAL01\"");
        let rule: CoercionRule = serde_json::from_str("\"STRIPNUM\"").unwrap();
        assert_eq!(rule, CoercionRule::StripNum);
    }

    #[test]
    fn value_columns_skip_date_and_ignored() {
        let spec = spec();
        let columns = spec.value_columns();
        assert_eq!(
            columns,
            vec![(1, "Weight", CoercionRule::StripNum), (3, "BMI", CoercionRule::Num)]
        );
        assert_eq!(spec.rule_for("Missing"), CoercionRule::Ignore);
    }
}

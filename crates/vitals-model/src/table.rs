#![deny(unsafe_code)]

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Name of the join key column in every table.
pub const DATE_COLUMN: &str = "date";

/// A non-null output cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum CellValue {
    Number(f64),
    Text(String),
}

impl CellValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Text(text) => text.trim().parse().ok(),
        }
    }
}

/// Storage kind of an output column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnKind {
    Numeric,
    Text,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OutputColumn {
    pub name: String,
    pub kind: ColumnKind,
}

impl OutputColumn {
    pub fn new(name: impl Into<String>, kind: ColumnKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    pub fn numeric(name: impl Into<String>) -> Self {
        Self::new(name, ColumnKind::Numeric)
    }

    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, ColumnKind::Text)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRow {
    /// Canonical `YYYYMMDD` date, `None` when the source date was unparseable.
    pub date: Option<String>,
    pub values: Vec<Option<CellValue>>,
}

impl NormalizedRow {
    pub fn new(date: Option<String>, values: Vec<Option<CellValue>>) -> Self {
        Self { date, values }
    }
}

/// Date-keyed table produced from one source folder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedTable {
    pub source: String,
    pub columns: Vec<OutputColumn>,
    pub rows: Vec<NormalizedRow>,
}

impl NormalizedTable {
    pub fn new(source: impl Into<String>, columns: Vec<OutputColumn>) -> Self {
        Self {
            source: source.into(),
            columns,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: NormalizedRow) -> Result<()> {
        if row.values.len() != self.columns.len() {
            return Err(ModelError::RowWidth {
                expected: self.columns.len(),
                actual: row.values.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column.name == name)
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Value of `column` in row `row`, `None` for nulls and unknown columns.
    pub fn value(&self, row: usize, column: &str) -> Option<&CellValue> {
        let idx = self.column_index(column)?;
        self.rows.get(row)?.values.get(idx)?.as_ref()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsolidatedRow {
    pub date: i64,
    pub values: Vec<Option<CellValue>>,
}

/// Final merged table: `date` first, value columns alphabetical, rows by date.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConsolidatedTable {
    pub columns: Vec<OutputColumn>,
    pub rows: Vec<ConsolidatedRow>,
}

impl ConsolidatedTable {
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Output header, starting with [`DATE_COLUMN`].
    pub fn header(&self) -> Vec<&str> {
        std::iter::once(DATE_COLUMN)
            .chain(self.columns.iter().map(|column| column.name.as_str()))
            .collect()
    }

    pub fn dates(&self) -> Vec<i64> {
        self.rows.iter().map(|row| row.date).collect()
    }

    /// First and last date; rows are kept sorted so these are min and max.
    pub fn date_range(&self) -> Option<(i64, i64)> {
        let first = self.rows.first()?.date;
        let last = self.rows.last()?.date;
        Some((first, last))
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column.name == name)
    }
}

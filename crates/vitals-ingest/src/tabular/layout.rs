//! Positional layout of a data file.
//!
//! Exports often carry title or notice rows above the real header. The rules
//! description says how many to drop; the header row after them is replaced
//! by the configured names, matched by position rather than by text.

use crate::error::{IngestError, Result};

/// Data rows of one file under their configured column names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Data rows (0-based) that had more cells than the header; the extra
    /// cells were dropped.
    pub overlong_rows: Vec<usize>,
}

impl RawTable {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows.get(row)?.get(column).map(String::as_str)
    }
}

/// Applies the rules layout to raw rows.
///
/// Discards `skip_rows` rows, takes the next row as the header, and renames
/// the first `min(column_names.len(), header width)` columns to
/// `column_names`. Trailing columns keep their original names. Data rows are
/// padded or cut to the header width; cut rows are listed in
/// [`RawTable::overlong_rows`].
pub fn apply_layout(
    rows: Vec<Vec<String>>,
    skip_rows: usize,
    column_names: &[String],
) -> Result<RawTable> {
    let mut remaining = rows.into_iter().skip(skip_rows);
    let Some(mut headers) = remaining.next() else {
        return Err(IngestError::MissingHeaderRow { skip_rows });
    };
    for (header, name) in headers.iter_mut().zip(column_names) {
        header.clone_from(name);
    }
    let width = headers.len();
    let mut overlong_rows = Vec::new();
    let rows = remaining
        .enumerate()
        .map(|(idx, mut row)| {
            if row.len() > width {
                overlong_rows.push(idx);
            }
            row.resize(width, String::new());
            row
        })
        .collect();
    Ok(RawTable {
        headers,
        rows,
        overlong_rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(data: &[&[&str]]) -> Vec<Vec<String>> {
        data.iter()
            .map(|row| row.iter().map(|cell| (*cell).to_string()).collect())
            .collect()
    }

    fn names(data: &[&str]) -> Vec<String> {
        data.iter().map(|name| (*name).to_string()).collect()
    }

    #[test]
    fn skips_rows_and_renames_positionally() {
        let raw = rows(&[
            &["Exported by Wyze"],
            &["Date and Time", "Weight(lb)", "BMI"],
            &["2025-01-07 08:00:00", "180.2", "24.1"],
        ]);
        let table = apply_layout(raw, 1, &names(&["Date", "Weight", "BMI"])).unwrap();
        assert_eq!(table.headers, vec!["Date", "Weight", "BMI"]);
        assert_eq!(table.height(), 1);
        assert_eq!(table.cell(0, 1), Some("180.2"));
    }

    #[test]
    fn trailing_columns_keep_original_names() {
        let raw = rows(&[&["d", "v", "extra"], &["2025-01-07", "1", "x"]]);
        let table = apply_layout(raw, 0, &names(&["Date", "Value"])).unwrap();
        assert_eq!(table.headers, vec!["Date", "Value", "extra"]);
        assert_eq!(table.column_index("extra"), Some(2));
    }

    #[test]
    fn extra_configured_names_are_unused() {
        let raw = rows(&[&["d"], &["2025-01-07"]]);
        let table = apply_layout(raw, 0, &names(&["Date", "Value"])).unwrap();
        assert_eq!(table.headers, vec!["Date"]);
        assert_eq!(table.column_index("Value"), None);
    }

    #[test]
    fn short_rows_are_padded() {
        let raw = rows(&[&["a", "b", "c"], &["1"], &["1", "2", "3", "4"]]);
        let table = apply_layout(raw, 0, &[]).unwrap();
        assert_eq!(table.rows[0], vec!["1", "", ""]);
        assert_eq!(table.rows[1], vec!["1", "2", "3"]);
        assert_eq!(table.overlong_rows, vec![1]);
    }

    #[test]
    fn missing_header_row_is_an_error() {
        let raw = rows(&[&["noise"]]);
        let result = apply_layout(raw, 1, &names(&["Date"]));
        assert!(matches!(
            result,
            Err(IngestError::MissingHeaderRow { skip_rows: 1 })
        ));
    }
}

//! Raw row reading with the `csv` crate.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;

use crate::error::{IngestError, Result};

use super::format::TabularFormat;

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

/// Reads every record of `reader` as trimmed cells.
///
/// No row is treated as a header; ragged rows are kept as they are.
/// `origin` only labels errors.
pub fn read_rows_from_reader<R: Read>(
    reader: R,
    format: TabularFormat,
    origin: &Path,
) -> Result<Vec<Vec<String>>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(format.delimiter())
        .from_reader(reader);
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| IngestError::CsvParse {
            path: origin.to_path_buf(),
            message: e.to_string(),
        })?;
        rows.push(record.iter().map(normalize_cell).collect());
    }
    Ok(rows)
}

/// Reads a tabular file into raw rows.
pub fn read_rows(path: &Path, format: TabularFormat) -> Result<Vec<Vec<String>>> {
    let file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;
    read_rows_from_reader(file, format, path)
}

//! CSV output file.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use polars::prelude::{CsvWriter, DataFrame, SerWriter};
use tracing::info;
use vitals_model::ConsolidatedTable;

use crate::error::{OutputError, Result};
use crate::frame::consolidated_frame;

pub const OUTPUT_FILE_PREFIX: &str = "output_";

/// `output_<YYYYMMDD>.csv` for the given run date.
pub fn output_file_name(run_date: NaiveDate) -> String {
    format!("{OUTPUT_FILE_PREFIX}{}.csv", run_date.format("%Y%m%d"))
}

/// Writes a frame as CSV with a header row; nulls become empty cells.
pub fn write_csv(df: &mut DataFrame, path: &Path) -> Result<()> {
    let mut file = File::create(path).map_err(|source| OutputError::CreateFile {
        path: path.to_path_buf(),
        source,
    })?;
    CsvWriter::new(&mut file).include_header(true).finish(df)?;
    Ok(())
}

/// Writes the consolidated table into `output_dir`, creating it if needed.
///
/// Returns the path of the written file.
pub fn write_consolidated(
    table: &ConsolidatedTable,
    output_dir: &Path,
    run_date: NaiveDate,
) -> Result<PathBuf> {
    fs::create_dir_all(output_dir).map_err(|source| OutputError::CreateDir {
        path: output_dir.to_path_buf(),
        source,
    })?;
    let path = output_dir.join(output_file_name(run_date));
    let mut df = consolidated_frame(table)?;
    write_csv(&mut df, &path)?;
    info!(path = %path.display(), rows = df.height(), "wrote consolidated output");
    Ok(path)
}

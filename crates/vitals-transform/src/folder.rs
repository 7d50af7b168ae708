//! Per-folder processing: rules file, data files, one normalized table.
//!
//! Failures are contained at the smallest scope. A bad data file is skipped
//! and its siblings still load; a folder without usable rules or rows is
//! reported as skipped and contributes nothing to the consolidated table.

use thiserror::Error;
use tracing::{debug, info, warn};
use vitals_ingest::{
    RawTable, RulesError, SourceCatalog, SourceFile, apply_layout, data_files, find_rules_file,
    parse_rules, rule_rows,
};
use vitals_model::{
    CellValue, CoercionRule, NormalizedRow, NormalizedTable, OutputColumn, ProcessingOptions,
    RulesSpec,
};

use crate::aggregate::{CALORIES_BURNED_COLUMN, EXERCISES_FOLDER, aggregate_daily_burn};
use crate::coerce::{coerce_cell, coerce_date};
use crate::dedupe::drop_duplicate_rows;

/// Why a folder contributed nothing.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SkipReason {
    #[error("folder could not be listed: {0}")]
    Listing(String),

    #[error("no rules file")]
    MissingRules,

    #[error("rules file unreadable: {0}")]
    UnreadableRules(String),

    #[error(transparent)]
    Rules(#[from] RulesError),

    #[error("no usable rows")]
    NoData,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileStatus {
    Loaded,
    Skipped(String),
}

/// Outcome of one data file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub name: String,
    /// Data rows read from the file, before deduplication.
    pub rows: usize,
    pub status: FileStatus,
}

impl FileReport {
    fn loaded(name: &str, rows: usize) -> Self {
        Self {
            name: name.to_string(),
            rows,
            status: FileStatus::Loaded,
        }
    }

    fn skipped(name: &str, reason: String) -> Self {
        Self {
            name: name.to_string(),
            rows: 0,
            status: FileStatus::Skipped(reason),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.status == FileStatus::Loaded
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FolderOutcome {
    Processed(NormalizedTable),
    Skipped(SkipReason),
}

/// Result of processing one source folder.
#[derive(Debug, Clone, PartialEq)]
pub struct FolderReport {
    pub folder: String,
    pub files: Vec<FileReport>,
    pub outcome: FolderOutcome,
}

impl FolderReport {
    fn skipped(folder: &str, files: Vec<FileReport>, reason: SkipReason) -> Self {
        warn!(folder, %reason, "skipping folder");
        Self {
            folder: folder.to_string(),
            files,
            outcome: FolderOutcome::Skipped(reason),
        }
    }

    pub fn table(&self) -> Option<&NormalizedTable> {
        match &self.outcome {
            FolderOutcome::Processed(table) => Some(table),
            FolderOutcome::Skipped(_) => None,
        }
    }

    pub fn skip_reason(&self) -> Option<&SkipReason> {
        match &self.outcome {
            FolderOutcome::Processed(_) => None,
            FolderOutcome::Skipped(reason) => Some(reason),
        }
    }

    pub fn loaded_files(&self) -> usize {
        self.files.iter().filter(|file| file.is_loaded()).count()
    }
}

/// Column present in at least one data file.
struct ValueColumn<'a> {
    name: &'a str,
    rule: CoercionRule,
}

/// Processes one source folder into a normalized table.
///
/// Never fails: every problem becomes either a skipped file or a skipped
/// folder in the returned report. Output depends only on the catalog
/// contents and `options`.
pub fn process_folder<C>(catalog: &C, folder: &str, options: &ProcessingOptions) -> FolderReport
where
    C: SourceCatalog + ?Sized,
{
    let files = match catalog.files(folder) {
        Ok(files) => files,
        Err(err) => {
            return FolderReport::skipped(folder, Vec::new(), SkipReason::Listing(err.to_string()));
        }
    };

    let Some(rules_file) = find_rules_file(&files) else {
        return FolderReport::skipped(folder, Vec::new(), SkipReason::MissingRules);
    };
    let spec = match load_rules(catalog, folder, rules_file) {
        Ok(spec) => spec,
        Err(reason) => return FolderReport::skipped(folder, Vec::new(), reason),
    };
    debug!(
        folder,
        rules = %rules_file.name,
        skip_rows = spec.skip_rows,
        date_key = %spec.date_key,
        "parsed rules"
    );

    let value_columns: Vec<ValueColumn<'_>> = spec
        .value_columns()
        .into_iter()
        .map(|(_, name, rule)| ValueColumn { name, rule })
        .collect();

    let mut reports = Vec::new();
    let mut loaded: Vec<(Vec<usize>, Vec<NormalizedRow>)> = Vec::new();
    for file in data_files(&files) {
        match load_file(catalog, folder, file, &spec, &value_columns, options) {
            Ok(file_rows) => {
                debug!(folder, file = %file.name, rows = file_rows.rows.len(), "loaded data file");
                reports.push(FileReport::loaded(&file.name, file_rows.rows.len()));
                loaded.push((file_rows.present, file_rows.rows));
            }
            Err(reason) => {
                warn!(folder, file = %file.name, %reason, "skipping data file");
                reports.push(FileReport::skipped(&file.name, reason));
            }
        }
    }

    let mut table = combine(folder, &value_columns, loaded);
    let duplicates = drop_duplicate_rows(&mut table);
    if duplicates > 0 {
        debug!(folder, duplicates, "dropped duplicate rows");
    }

    if folder == EXERCISES_FOLDER {
        let column = output_name(folder, CALORIES_BURNED_COLUMN);
        if let Some(daily) = aggregate_daily_burn(&table, &column, options.basal_burn) {
            debug!(folder, days = daily.height(), "aggregated daily calories");
            table = daily;
        }
    }

    if table.is_empty() {
        return FolderReport::skipped(folder, reports, SkipReason::NoData);
    }

    info!(
        folder,
        rows = table.height(),
        columns = table.columns.len(),
        "processed folder"
    );
    FolderReport {
        folder: folder.to_string(),
        files: reports,
        outcome: FolderOutcome::Processed(table),
    }
}

fn output_name(folder: &str, column: &str) -> String {
    format!("{folder}_{column}")
}

fn load_rules<C>(catalog: &C, folder: &str, rules_file: &SourceFile) -> Result<RulesSpec, SkipReason>
where
    C: SourceCatalog + ?Sized,
{
    let rows = catalog
        .read_rows(folder, rules_file)
        .map_err(|err| SkipReason::UnreadableRules(err.to_string()))?;
    Ok(parse_rules(rule_rows(rows))?)
}

/// Coerced rows of one file, with the positions of the value columns it has.
struct LoadedFile {
    present: Vec<usize>,
    rows: Vec<NormalizedRow>,
}

fn load_file<C>(
    catalog: &C,
    folder: &str,
    file: &SourceFile,
    spec: &RulesSpec,
    value_columns: &[ValueColumn<'_>],
    options: &ProcessingOptions,
) -> Result<LoadedFile, String>
where
    C: SourceCatalog + ?Sized,
{
    let rows = catalog
        .read_rows(folder, file)
        .map_err(|err| err.to_string())?;
    let raw = apply_layout(rows, spec.skip_rows, &spec.column_names).map_err(|err| err.to_string())?;
    if raw.height() == 0 {
        return Err("no data rows".to_string());
    }
    if !raw.overlong_rows.is_empty() {
        warn!(
            folder,
            file = %file.name,
            rows = ?raw.overlong_rows,
            width = raw.headers.len(),
            "cells beyond the header width dropped"
        );
    }
    let Some(date_idx) = raw.column_index(&spec.date_key) else {
        return Err(format!("date column '{}' missing", spec.date_key));
    };

    // (position in value_columns, position in file)
    let columns: Vec<(usize, usize)> = value_columns
        .iter()
        .enumerate()
        .filter_map(|(pos, column)| Some((pos, raw.column_index(column.name)?)))
        .collect();

    let rows = (0..raw.height())
        .map(|row| coerce_row(&raw, row, date_idx, &columns, value_columns, options))
        .collect();
    Ok(LoadedFile {
        present: columns.iter().map(|(pos, _)| *pos).collect(),
        rows,
    })
}

fn coerce_row(
    raw: &RawTable,
    row: usize,
    date_idx: usize,
    columns: &[(usize, usize)],
    value_columns: &[ValueColumn<'_>],
    options: &ProcessingOptions,
) -> NormalizedRow {
    let date = coerce_date(raw.cell(row, date_idx), options.year_inference);
    let values = columns
        .iter()
        .map(|&(pos, idx)| coerce_cell(raw.cell(row, idx), value_columns[pos].rule))
        .collect();
    NormalizedRow::new(date, values)
}

/// Concatenates file tables under the union of their columns.
fn combine(
    folder: &str,
    value_columns: &[ValueColumn<'_>],
    loaded: Vec<(Vec<usize>, Vec<NormalizedRow>)>,
) -> NormalizedTable {
    let mut used = vec![false; value_columns.len()];
    for (present, _) in &loaded {
        for &pos in present {
            used[pos] = true;
        }
    }

    // slot[pos] is the output position of value column `pos`
    let mut slot = vec![None; value_columns.len()];
    let mut columns = Vec::new();
    for (pos, column) in value_columns.iter().enumerate() {
        if !used[pos] {
            continue;
        }
        let Some(kind) = column.rule.output_kind() else {
            continue;
        };
        slot[pos] = Some(columns.len());
        columns.push(OutputColumn::new(output_name(folder, column.name), kind));
    }

    let width = columns.len();
    let mut table = NormalizedTable::new(folder, columns);
    for (present, rows) in loaded {
        for row in rows {
            let mut values: Vec<Option<CellValue>> = vec![None; width];
            for (&pos, value) in present.iter().zip(row.values) {
                if let Some(out) = slot[pos] {
                    values[out] = value;
                }
            }
            table.rows.push(NormalizedRow::new(row.date, values));
        }
    }
    table
}

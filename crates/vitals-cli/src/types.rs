use std::path::PathBuf;

use vitals_transform::{Consolidation, FileStatus, FolderReport};

/// Per-folder line of the run summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderSummary {
    pub folder: String,
    pub processed: bool,
    pub files_loaded: usize,
    pub files_total: usize,
    pub rows: usize,
    pub columns: usize,
    /// Why the folder or some of its files were skipped.
    pub notes: Vec<String>,
}

impl From<&FolderReport> for FolderSummary {
    fn from(report: &FolderReport) -> Self {
        let mut notes: Vec<String> = report
            .skip_reason()
            .map(ToString::to_string)
            .into_iter()
            .collect();
        notes.extend(report.files.iter().filter_map(|file| match &file.status {
            FileStatus::Loaded => None,
            FileStatus::Skipped(reason) => Some(format!("{}: {reason}", file.name)),
        }));
        let (rows, columns) = report
            .table()
            .map_or((0, 0), |table| (table.height(), table.columns.len()));
        Self {
            folder: report.folder.clone(),
            processed: report.table().is_some(),
            files_loaded: report.loaded_files(),
            files_total: report.files.len(),
            rows,
            columns,
            notes,
        }
    }
}

/// Outcome of a `run` invocation.
#[derive(Debug)]
pub struct RunResult {
    pub consolidation: Consolidation,
    /// Written file, `None` on a dry run.
    pub output_file: Option<PathBuf>,
}

impl RunResult {
    pub fn folder_summaries(&self) -> Vec<FolderSummary> {
        self.consolidation
            .reports
            .iter()
            .map(FolderSummary::from)
            .collect()
    }

    pub fn records(&self) -> usize {
        self.consolidation.table.height()
    }

    pub fn date_range(&self) -> Option<(i64, i64)> {
        self.consolidation.table.date_range()
    }
}

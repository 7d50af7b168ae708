//! Error types for source ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while locating or reading source files.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Directory not found or not readable.
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Failed to read directory entries.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Source file not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Parsing Errors ===
    /// Failed to parse delimited text.
    #[error("failed to parse {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// No header row remained after discarding leading rows.
    #[error("no header row after skipping {skip_rows} rows")]
    MissingHeaderRow { skip_rows: usize },
}

/// Reasons a rules description cannot drive a source.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RulesError {
    /// No `H` or `C` row was found.
    #[error("rules have no header row")]
    MissingHeader,

    /// No column carries the `DATEKEY` rule.
    #[error("rules have no DATEKEY column")]
    MissingDateKey,
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

//! Rules-driven transformation of source exports.
//!
//! Turns the raw tables read by `vitals-ingest` into one normalized table per
//! source folder and merges those into the consolidated, date-indexed table.
//!
//! # Overview
//!
//! - **Normalization functions**: numbers, embedded numbers, durations, dates
//! - **Coercion dispatch**: one [`CoercionRule`] per column picks the function
//! - **Folder processing**: rules + data files -> [`NormalizedTable`]
//! - **Consolidation**: outer join on `date`, date filter, ordering
//!
//! # Example
//!
//! ```ignore
//! use vitals_ingest::FsCatalog;
//! use vitals_model::ProcessingOptions;
//! use vitals_transform::consolidate;
//!
//! let catalog = FsCatalog::new("input");
//! let options = ProcessingOptions::new(20250601, 2000.0);
//! let consolidation = consolidate(&catalog, &options)?;
//! println!("{} rows", consolidation.table.height());
//! ```
//!
//! [`CoercionRule`]: vitals_model::CoercionRule
//! [`NormalizedTable`]: vitals_model::NormalizedTable

mod aggregate;
mod coerce;
mod consolidate;
mod dedupe;
mod error;
mod folder;

pub mod normalization;

// Error type
pub use error::{Result, TransformError};

// Cell coercion
pub use coerce::{coerce_cell, coerce_date};

// Folder processing
pub use aggregate::{CALORIES_BURNED_COLUMN, EXERCISES_FOLDER, aggregate_daily_burn};
pub use dedupe::drop_duplicate_rows;
pub use folder::{FileReport, FileStatus, FolderOutcome, FolderReport, SkipReason, process_folder};

// Consolidation
pub use consolidate::{Consolidation, consolidate, finalize, merge_tables, outer_join};

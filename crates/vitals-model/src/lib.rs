//! Shared data model for the vitals consolidation workspace.
//!
//! Rules descriptions, coercion rules, normalized per-source tables and the
//! consolidated output table all live here so that ingestion, transformation
//! and output crates agree on one vocabulary.

pub mod error;
pub mod options;
pub mod rules;
pub mod table;

pub use error::{ModelError, Result};
pub use options::{ProcessingOptions, YearInference};
pub use rules::{CORRECTED_NAME_MARKER, CoercionRule, RuleRow, RuleTag, RulesSpec};
pub use table::{
    CellValue, ColumnKind, ConsolidatedRow, ConsolidatedTable, DATE_COLUMN, NormalizedRow,
    NormalizedTable, OutputColumn,
};

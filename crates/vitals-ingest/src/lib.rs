//! Source ingestion for the vitals consolidator.
//!
//! This crate turns a folder of device exports into raw tables that the
//! transform crate can coerce.
//!
//! # Features
//!
//! - **Rules Parsing**: Fold a row-tagged rules description into a [`RulesSpec`]
//! - **Data Files**: Skip leading noise rows and rename columns positionally
//! - **Discovery**: Find source folders, the rules file and the data files
//! - **Catalogs**: Filesystem and in-memory [`SourceCatalog`] implementations
//!
//! # Example
//!
//! ```ignore
//! use vitals_ingest::{FsCatalog, SourceCatalog, find_rules_file, parse_rules, rule_rows};
//!
//! let catalog = FsCatalog::new("input");
//! for folder in catalog.folders()? {
//!     let files = catalog.files(&folder)?;
//!     let rules = find_rules_file(&files).expect("rules file");
//!     let spec = parse_rules(rule_rows(catalog.read_rows(&folder, rules)?))?;
//! }
//! ```
//!
//! [`RulesSpec`]: vitals_model::RulesSpec

mod catalog;
mod discovery;
mod error;
mod rules;
mod tabular;

// === Error Types ===
pub use error::{IngestError, Result, RulesError};

// === Tabular Reading ===
pub use tabular::{RawTable, TabularFormat, apply_layout, read_rows, read_rows_from_reader};

// === Rules ===
pub use rules::{RulesScan, parse_rules, rule_rows, scan_rules};

// === Discovery ===
pub use discovery::{
    RULES_FILE_STEM, data_files, find_rules_file, list_source_folders, list_tabular_files,
};

// === Catalogs ===
pub use catalog::{FsCatalog, MemoryCatalog, SourceCatalog, SourceFile};

//! Output of the consolidated table.
//!
//! The table is framed as a Polars [`DataFrame`](polars::prelude::DataFrame)
//! with `date` as an integer column and written as CSV to
//! `output_<YYYYMMDD>.csv` in the output directory.

mod error;
mod frame;
mod writer;

pub use error::{OutputError, Result};
pub use frame::consolidated_frame;
pub use writer::{OUTPUT_FILE_PREFIX, output_file_name, write_consolidated, write_csv};

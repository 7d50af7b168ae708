//! Delimited file reading and the positional data-file layout.

mod format;
mod layout;
mod reader;

pub use format::TabularFormat;
pub use layout::{RawTable, apply_layout};
pub use reader::{read_rows, read_rows_from_reader};

//! Library components of the `vitals-merge` command.

pub mod config;
pub mod logging;
pub mod pipeline;
pub mod types;

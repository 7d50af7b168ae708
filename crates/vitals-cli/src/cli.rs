//! CLI argument definitions for `vitals-merge`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use colorchoice_clap::Color;

use vitals_cli::config::DEFAULT_CONFIG_FILE;

#[derive(Parser)]
#[command(
    name = "vitals-merge",
    version,
    about = "Consolidate health-tracking exports into one date-indexed CSV",
    long_about = "Consolidate per-source health-tracking exports into one table.\n\n\
                  Every sub-directory of the input directory holds one source and a\n\
                  rules file describing how to read and clean its exports. Rows are\n\
                  joined on their date and written to output_<YYYYMMDD>.csv."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for warnings only).
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for humans, json for machines).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Consolidate every source folder and write the output file.
    Run(RunArgs),

    /// Show how a source folder's rules file is understood.
    Rules(RulesArgs),
}

#[derive(Parser)]
pub struct RunArgs {
    /// Configuration file with the processing constants.
    #[arg(long = "config", value_name = "PATH", default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Directory holding one sub-directory per source (overrides the config).
    #[arg(long = "input-dir", value_name = "DIR")]
    pub input_dir: Option<PathBuf>,

    /// Directory receiving the output file (overrides the config).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Process and summarise without writing the output file.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Parser)]
pub struct RulesArgs {
    /// Source folder containing a rules.csv or rules.tsv file.
    #[arg(value_name = "FOLDER")]
    pub folder: PathBuf,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

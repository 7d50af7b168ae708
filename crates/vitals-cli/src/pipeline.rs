//! The `run` pipeline: catalog, consolidation, output file.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::{info, info_span};
use vitals_ingest::FsCatalog;
use vitals_model::ProcessingOptions;
use vitals_output::write_consolidated;
use vitals_transform::consolidate;

use crate::types::RunResult;

#[derive(Debug, Clone)]
pub struct RunRequest {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub options: ProcessingOptions,
    /// Names the output file.
    pub run_date: NaiveDate,
    pub dry_run: bool,
}

/// Consolidates every source folder under `input_dir` and writes the result.
pub fn run_pipeline(request: &RunRequest) -> Result<RunResult> {
    let span = info_span!("run", input = %request.input_dir.display());
    let _guard = span.enter();

    let catalog = FsCatalog::new(&request.input_dir);
    let consolidation = consolidate(&catalog, &request.options)
        .with_context(|| format!("consolidate {}", request.input_dir.display()))?;
    info!(
        contributing = consolidation.contributing_folders(),
        folders = consolidation.reports.len(),
        "source folders merged"
    );

    let output_file = if request.dry_run {
        info!("dry run, no output written");
        None
    } else {
        let path = write_consolidated(
            &consolidation.table,
            &request.output_dir,
            request.run_date,
        )
        .with_context(|| format!("write output to {}", request.output_dir.display()))?;
        Some(path)
    };

    Ok(RunResult {
        consolidation,
        output_file,
    })
}

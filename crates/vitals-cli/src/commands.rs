use anyhow::{Context, Result, anyhow};
use chrono::Local;
use comfy_table::Table;
use tracing::info;

use vitals_cli::config::AppConfig;
use vitals_cli::pipeline::{RunRequest, run_pipeline};
use vitals_cli::types::RunResult;
use vitals_ingest::{
    RulesScan, find_rules_file, list_tabular_files, read_rows, rule_rows, scan_rules,
};
use vitals_model::CoercionRule;

use crate::cli::{RulesArgs, RunArgs};
use crate::summary::apply_table_style;

pub fn run_merge(args: &RunArgs) -> Result<RunResult> {
    let config = AppConfig::load(&args.config)?
        .with_overrides(args.input_dir.clone(), args.output_dir.clone());
    info!(
        config = %args.config.display(),
        from_date = config.options.from_date,
        basal_burn = config.options.basal_burn,
        "loaded configuration"
    );
    let request = RunRequest {
        input_dir: config.input_dir,
        output_dir: config.output_dir,
        options: config.options,
        run_date: Local::now().date_naive(),
        dry_run: args.dry_run,
    };
    run_pipeline(&request)
}

pub fn run_rules(args: &RulesArgs) -> Result<()> {
    let files = list_tabular_files(&args.folder)?;
    let rules_file = find_rules_file(&files)
        .ok_or_else(|| anyhow!("no rules file in {}", args.folder.display()))?;
    let path = args.folder.join(&rules_file.name);
    let rows = read_rows(&path, rules_file.format)
        .with_context(|| format!("read {}", path.display()))?;
    let scan = scan_rules(rule_rows(rows));

    println!("Rules: {}", path.display());
    println!("Rows skipped before header: {}", scan.skip_rows);
    println!(
        "Date column: {}",
        scan.date_key.as_deref().unwrap_or("(none)")
    );
    println!("{}", rules_table(&scan));

    if let Err(error) = scan.into_spec() {
        println!("This folder would be skipped: {error}");
    }
    Ok(())
}

fn rules_table(scan: &RulesScan) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["#", "Column", "Rule"]);
    apply_table_style(&mut table);
    for (idx, name) in scan.column_names.iter().enumerate() {
        let rule = scan
            .column_rules
            .get(name)
            .copied()
            .unwrap_or(CoercionRule::Ignore);
        table.add_row(vec![(idx + 1).to_string(), name.clone(), rule.to_string()]);
    }
    table
}

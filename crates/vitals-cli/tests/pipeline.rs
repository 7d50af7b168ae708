//! End-to-end runs over a temporary input tree.

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use tempfile::TempDir;
use vitals_cli::config::AppConfig;
use vitals_cli::pipeline::{RunRequest, run_pipeline};

fn write(path: &Path, contents: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn input_tree(root: &Path) {
    write(
        &root.join("exercises/rules.csv"),
        "H,Date,Activity,Calories Burned\nR,DATEKEY,CHAR,STRIPNUM\n",
    );
    write(
        &root.join("exercises/2025.csv"),
        "Date,Activity,Calories\n\
         2025-06-01 07:00:00,Walk,-300 kcal\n\
         2025-06-01 18:00:00,Run,-150 kcal\n\
         2025-05-30 07:00:00,Walk,-100 kcal\n",
    );
    write(
        &root.join("hrv/rules.tsv"),
        "X\tHRV export\nH\tDay\tHRV\tSource\nR\tDATEKEY\tNUM\tIGNORE\n",
    );
    write(
        &root.join("hrv/hrv.tsv"),
        "HRV export\nDay\tHRV\tSource\n2025-06-01\t48\twatch\n2025-06-03\tnan\twatch\n",
    );
    write(&root.join("notes/readme.csv"), "no rules here\n");
}

fn write_config(dir: &Path, input: &Path, output: &Path) -> std::path::PathBuf {
    let config = serde_json::json!({
        "constants": { "fromdate": 20250601, "basalburn": 2000 },
        "input_dir": input,
        "output_dir": output,
    });
    let path = dir.join("config.json");
    fs::write(&path, config.to_string()).unwrap();
    path
}

fn request(config: AppConfig, dry_run: bool) -> RunRequest {
    RunRequest {
        input_dir: config.input_dir,
        output_dir: config.output_dir,
        options: config.options,
        run_date: NaiveDate::from_ymd_opt(2026, 10, 16).unwrap(),
        dry_run,
    }
}

#[test]
fn run_writes_consolidated_csv() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("input");
    let output = dir.path().join("output");
    input_tree(&input);
    let config = AppConfig::load(&write_config(dir.path(), &input, &output)).unwrap();

    let result = run_pipeline(&request(config, false)).unwrap();
    let path = result.output_file.clone().unwrap();
    assert_eq!(path, output.join("output_20261016.csv"));
    assert_eq!(result.records(), 2);
    assert_eq!(result.date_range(), Some((20250601, 20250603)));

    let summaries = result.folder_summaries();
    assert_eq!(summaries.len(), 3);
    assert!(summaries[0].processed);
    assert!(!summaries[2].processed);
    assert_eq!(summaries[2].notes, vec!["no rules file".to_string()]);

    let mut reader = csv::Reader::from_path(&path).unwrap();
    let header: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
    let records: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
    let dates: Vec<&str> = records.iter().map(|record| &record[0]).collect();
    let rendered = format!("{}\n{}", header.join(","), dates.join("\n"));
    insta::assert_snapshot!(rendered, @r"
    date,exercises_Calories Burned,hrv_HRV
    20250601
    20250603
    ");

    assert_eq!(records[0][1].parse::<f64>().unwrap(), 2450.0);
    assert_eq!(records[0][2].parse::<f64>().unwrap(), 48.0);
    assert_eq!(&records[1][1], "");
    assert_eq!(&records[1][2], "");
}

#[test]
fn dry_run_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("input");
    let output = dir.path().join("output");
    input_tree(&input);
    let config = AppConfig::load(&write_config(dir.path(), &input, &output)).unwrap();

    let result = run_pipeline(&request(config, true)).unwrap();
    assert!(result.output_file.is_none());
    assert_eq!(result.records(), 2);
    assert!(!output.exists());
}

#[test]
fn input_without_sources_fails_without_output() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("input");
    let output = dir.path().join("output");
    write(&input.join("notes/readme.csv"), "no rules here\n");
    let config = AppConfig::load(&write_config(dir.path(), &input, &output)).unwrap();

    let err = run_pipeline(&request(config, false)).unwrap_err();
    assert!(format!("{err:#}").contains("no data to consolidate"));
    assert!(!output.exists());
}

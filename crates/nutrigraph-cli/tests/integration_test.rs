//! Integration tests for nutrigraph-cli crate.
//!
//! These run the subcommands the way the binary does, against files in a
//! temporary directory.

use clap::Parser;
use nutrigraph_cli::{app, Cli, Commands};
use nutrigraph_common::test_utils::{init_test_logging, raw_csv, SurveyRow};
use nutrigraph_common::{NutriGraphError, OBESITY_CLASS, OBESITY_QUESTION};
use nutrigraph_config::Config;
use nutrigraph_data::{read_cleaned, DataSession};
use pretty_assertions::assert_eq;
use std::io::Cursor;
use std::path::Path;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("nutrigraph").chain(args.iter().copied())).unwrap()
}

fn output_text(out: Vec<u8>) -> String {
    String::from_utf8(out).unwrap()
}

fn write_raw(dir: &Path, rows: &[SurveyRow]) -> String {
    let path = dir.join("raw.csv");
    std::fs::write(&path, raw_csv(rows)).unwrap();
    path.to_str().unwrap().to_string()
}

#[test]
fn test_clean_then_dashboard() {
    init_test_logging();
    let dir = tempfile::tempdir().unwrap();
    let raw = write_raw(
        dir.path(),
        &[
            SurveyRow::total(2022, "AL", OBESITY_CLASS, OBESITY_QUESTION, 39.0),
            SurveyRow::total(2022, "CO", OBESITY_CLASS, OBESITY_QUESTION, 25.0).without_value(),
            SurveyRow::total(2022, "TX", OBESITY_CLASS, OBESITY_QUESTION, 35.0),
        ],
    );
    let cleaned = dir.path().join("cleaned.csv");
    let cleaned_arg = cleaned.to_str().unwrap();
    let config = Config::default();

    let cli = parse(&["clean", "--input", &raw, "--output", cleaned_arg]);
    let Commands::Clean(args) = &cli.command else {
        panic!("expected clean");
    };
    let mut out = Vec::new();
    let report = app::clean(&config, args, &mut out).unwrap();
    assert_eq!((report.initial_rows, report.retained_rows), (3, 2));
    let text = output_text(out);
    assert!(text.contains("Initial rows: 3"));
    assert!(text.contains("Rows after dropping missing values: 2 (1 dropped)"));
    assert!(text.ends_with("Data cleaning complete.\n"));
    assert_eq!(read_cleaned(&cleaned).unwrap().len(), 2);

    let cli = parse(&["dashboard", "--input", cleaned_arg]);
    let Commands::Dashboard(args) = &cli.command else {
        panic!("expected dashboard");
    };
    let data = DataSession::new(args.input_path(&config));
    let mut out = Vec::new();
    app::dashboard(&config, args, &data, Cursor::new("view geo\nquit\n"), &mut out).unwrap();
    let text = output_text(out);
    assert!(text.contains("Ranking of states"));
    assert!(text.find("Alabama").unwrap() < text.find("Texas").unwrap());
}

#[test]
fn test_report_without_matching_rows_skips_everything() {
    let dir = tempfile::tempdir().unwrap();
    let raw = write_raw(
        dir.path(),
        &[SurveyRow::total(2022, "AL", "Fruits and Vegetables", "fruit", 40.0)],
    );
    let cleaned = dir.path().join("cleaned.csv");
    let charts = dir.path().join("charts");
    let config = Config::default();

    let cli = parse(&["clean", "--input", &raw, "--output", cleaned.to_str().unwrap()]);
    let Commands::Clean(args) = &cli.command else {
        panic!("expected clean");
    };
    app::clean(&config, args, &mut Vec::new()).unwrap();

    let cli = parse(&[
        "report",
        "--input",
        cleaned.to_str().unwrap(),
        "--output-dir",
        charts.to_str().unwrap(),
    ]);
    let Commands::Report(args) = &cli.command else {
        panic!("expected report");
    };
    let summary = app::report(&config, args, &mut Vec::new()).unwrap();

    assert!(summary.written.is_empty());
    assert_eq!(summary.skipped.len(), 7);
    assert_eq!(std::fs::read_dir(&charts).unwrap().count(), 0);
}

#[test]
fn test_report_missing_input_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.csv");
    let cli = parse(&["report", "--input", missing.to_str().unwrap()]);
    let Commands::Report(args) = &cli.command else {
        panic!("expected report");
    };

    let error = app::report(&Config::default(), args, &mut Vec::new()).unwrap_err();

    assert!(error
        .chain()
        .any(|cause| cause
            .downcast_ref::<NutriGraphError>()
            .is_some_and(NutriGraphError::is_missing_input)));
}

#[test]
fn test_dashboard_with_missing_file_exits_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.csv");
    let cli = parse(&["dashboard", "--input", missing.to_str().unwrap()]);
    let Commands::Dashboard(args) = &cli.command else {
        panic!("expected dashboard");
    };
    let config = Config::default();
    let data = DataSession::new(args.input_path(&config));

    let mut out = Vec::new();
    app::dashboard(&config, args, &data, Cursor::new(""), &mut out).unwrap();

    assert!(output_text(out).contains("not found. Please run data cleaning first."));
}

#[test]
fn test_init_config_writes_loadable_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nutrigraph.toml");
    let path_arg = path.to_str().unwrap();

    let cli = parse(&["--config", path_arg, "init-config"]);
    let Commands::InitConfig(args) = &cli.command else {
        panic!("expected init-config");
    };
    let mut out = Vec::new();
    assert_eq!(app::init_config(&cli, args, &mut out).unwrap(), path);
    assert!(app::init_config(&cli, args, &mut Vec::new()).is_err());

    let cli = parse(&["--config", path_arg, "clean"]);
    assert_eq!(app::load_config(&cli).unwrap(), Config::default());
}

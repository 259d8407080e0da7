//! Subcommand implementations. Each writes its progress lines to `out`.

use crate::cli::{CleanArgs, Cli, DashboardArgs, InitConfigArgs, ReportArgs};
use anyhow::{bail, Context, Result};
use nutrigraph_commands::{Dashboard, DashboardContext};
use nutrigraph_config::{Config, ConfigLoader};
use nutrigraph_data::{clean_file, CleaningReport, DataSession};
use nutrigraph_graphs::{ReportGenerator, ReportSummary};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Loads the configuration named on the command line, applying `-v`/`-q`.
///
/// An explicitly named file must exist; the default file is optional.
pub fn load_config(cli: &Cli) -> Result<Config> {
    let (path, explicit) = cli.config_path();
    let loader = ConfigLoader::new(path);
    let mut config = if explicit {
        loader.load()
    } else {
        loader.load_or_default()
    }
    .with_context(|| format!("Failed to load configuration from {}", path.display()))?;

    if let Some(level) = cli.log_level_override() {
        config.logging.level = level.to_string();
    }
    Ok(config)
}

/// `clean`: raw extract to cleaned table.
pub fn clean(config: &Config, args: &CleanArgs, out: &mut dyn Write) -> Result<CleaningReport> {
    let (input, output) = args.paths(config);

    writeln!(out, "Loading data from {}...", input.display())?;
    let report = clean_file(&input, &output)
        .with_context(|| format!("Failed to clean {}", input.display()))?;

    writeln!(out, "Initial rows: {}", report.initial_rows)?;
    writeln!(
        out,
        "Rows after dropping missing values: {} ({} dropped)",
        report.retained_rows,
        report.dropped_rows()
    )?;
    writeln!(out, "Saving cleaned data to {}...", report.output.display())?;
    writeln!(out, "Data cleaning complete.")?;
    Ok(report)
}

/// `report`: the fixed chart set.
pub fn report(config: &Config, args: &ReportArgs, out: &mut dyn Write) -> Result<ReportSummary> {
    let (input, output_dir) = args.paths(config);
    let summary = ReportGenerator::from_config(config)
        .generate(&input, &output_dir, out)
        .with_context(|| format!("Failed to generate the report from {}", input.display()))?;

    info!(
        written = summary.written.len(),
        skipped = summary.skipped.len(),
        "report finished"
    );
    Ok(summary)
}

/// `dashboard`: interactive session reading commands from `input`.
pub fn dashboard<R: BufRead>(
    config: &Config,
    args: &DashboardArgs,
    data: &DataSession,
    input: R,
    out: &mut dyn Write,
) -> Result<()> {
    let context = DashboardContext::from_config(config, args.charts.clone());
    let Some(mut session) = Dashboard::open(context, data, out)
        .with_context(|| format!("Failed to load {}", data.path().display()))?
    else {
        return Ok(());
    };
    session.run(input, out).context("Dashboard session failed")
}

/// `init-config`: writes the default configuration, refusing to overwrite unless forced.
pub fn init_config(cli: &Cli, args: &InitConfigArgs, out: &mut dyn Write) -> Result<PathBuf> {
    let path = args
        .output
        .clone()
        .unwrap_or_else(|| cli.config_path().0.to_path_buf());
    write_default_config(&path, args.force)?;
    writeln!(out, "Wrote default configuration to {}", path.display())?;
    Ok(path)
}

fn write_default_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "{} already exists; pass --force to overwrite it",
            path.display()
        );
    }
    ConfigLoader::new(path)
        .save(&Config::default())
        .with_context(|| format!("Failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_explicit_config_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        let cli = Cli::try_parse_from([
            "nutrigraph",
            "--config",
            missing.to_str().unwrap(),
            "clean",
        ])
        .unwrap();

        let error = load_config(&cli).unwrap_err();
        assert!(error.to_string().starts_with("Failed to load configuration"));
    }

    #[test]
    fn test_quiet_overrides_level() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nutrigraph.toml");
        std::fs::write(&path, "[logging]\nlevel = \"trace\"\n").unwrap();
        let cli =
            Cli::try_parse_from(["nutrigraph", "-q", "--config", path.to_str().unwrap(), "report"])
                .unwrap();

        assert_eq!(load_config(&cli).unwrap().logging.level, "error");
    }

    #[test]
    fn test_init_config_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("conf").join("nutrigraph.toml");

        write_default_config(&path, false).unwrap();
        assert!(write_default_config(&path, false).is_err());
        write_default_config(&path, true).unwrap();

        let loaded = ConfigLoader::new(&path).load().unwrap();
        assert_eq!(loaded, Config::default());
    }
}

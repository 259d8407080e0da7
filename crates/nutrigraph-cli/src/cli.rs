//! Command line arguments.

use clap::{Args, Parser, Subcommand};
use nutrigraph_config::{Config, DEFAULT_CONFIG_FILE};
use std::path::{Path, PathBuf};

/// Cleaning, charting and exploration of the nutrition, physical activity and obesity survey.
#[derive(Debug, Parser)]
#[command(name = "nutrigraph", version, about)]
pub struct Cli {
    /// Configuration file; `nutrigraph.toml` is used when present.
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log at debug level.
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Log errors only.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Clean the raw survey extract into the analysis table.
    Clean(CleanArgs),
    /// Write the fixed set of report charts.
    Report(ReportArgs),
    /// Explore the cleaned table interactively.
    Dashboard(DashboardArgs),
    /// Write a configuration file with every default spelled out.
    InitConfig(InitConfigArgs),
}

/// Arguments of `clean`.
#[derive(Debug, Args)]
pub struct CleanArgs {
    /// Raw survey extract.
    #[arg(long, value_name = "FILE")]
    pub input: Option<PathBuf>,
    /// Cleaned table to write.
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Arguments of `report`.
#[derive(Debug, Args)]
pub struct ReportArgs {
    /// Cleaned table.
    #[arg(long, value_name = "FILE")]
    pub input: Option<PathBuf>,
    /// Directory receiving the images.
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,
}

/// Arguments of `dashboard`.
#[derive(Debug, Args)]
pub struct DashboardArgs {
    /// Cleaned table.
    #[arg(long, value_name = "FILE")]
    pub input: Option<PathBuf>,
    /// Directory receiving chart images of the chart pages.
    #[arg(long, value_name = "DIR")]
    pub charts: Option<PathBuf>,
}

/// Arguments of `init-config`.
#[derive(Debug, Args)]
pub struct InitConfigArgs {
    /// File to write; defaults to `--config` or `nutrigraph.toml`.
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,
    /// Overwrite an existing file.
    #[arg(long)]
    pub force: bool,
}

impl Cli {
    /// Configuration file to read, and whether the user named it explicitly.
    pub fn config_path(&self) -> (&Path, bool) {
        match &self.config {
            Some(path) => (path, true),
            None => (Path::new(DEFAULT_CONFIG_FILE), false),
        }
    }

    /// Log level forced by `-v`/`-q`.
    pub fn log_level_override(&self) -> Option<&'static str> {
        if self.verbose {
            Some("debug")
        } else if self.quiet {
            Some("error")
        } else {
            None
        }
    }
}

impl CleanArgs {
    /// Input and output paths after applying configuration defaults.
    pub fn paths(&self, config: &Config) -> (PathBuf, PathBuf) {
        (
            self.input.clone().unwrap_or_else(|| config.paths.raw_input.clone()),
            self.output.clone().unwrap_or_else(|| config.paths.cleaned.clone()),
        )
    }
}

impl ReportArgs {
    /// Input file and output directory after applying configuration defaults.
    pub fn paths(&self, config: &Config) -> (PathBuf, PathBuf) {
        (
            self.input.clone().unwrap_or_else(|| config.paths.cleaned.clone()),
            self.output_dir.clone().unwrap_or_else(|| config.paths.output_dir.clone()),
        )
    }
}

impl DashboardArgs {
    /// Cleaned table read by the session.
    pub fn input_path(&self, config: &Config) -> PathBuf {
        self.input.clone().unwrap_or_else(|| config.paths.cleaned.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["nutrigraph", "report", "-v", "--config", "alt.toml"]).unwrap();
        assert_eq!(cli.log_level_override(), Some("debug"));
        assert_eq!(cli.config_path(), (Path::new("alt.toml"), true));
        assert!(matches!(cli.command, Commands::Report(_)));
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(Cli::try_parse_from(["nutrigraph", "-v", "-q", "clean"]).is_err());
    }

    #[test]
    fn test_flags_override_config_paths() {
        let config = Config::default();
        let cli = Cli::try_parse_from(["nutrigraph", "report", "--output-dir", "out"]).unwrap();
        let Commands::Report(args) = &cli.command else {
            panic!("expected report");
        };
        let (input, output) = args.paths(&config);
        assert_eq!(input, config.paths.cleaned);
        assert_eq!(output, PathBuf::from("out"));
        assert_eq!(cli.config_path(), (Path::new(DEFAULT_CONFIG_FILE), false));
    }
}

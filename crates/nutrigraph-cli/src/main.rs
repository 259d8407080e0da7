//! Main entry point for the `nutrigraph` binary.

use anyhow::Context;
use clap::Parser;
use nutrigraph_cli::{app, Cli, Commands};
use nutrigraph_common::{init_logging, LoggingConfig};
use nutrigraph_data::DataSession;
use std::io;
use tracing::{debug, info};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if let Commands::InitConfig(args) = &cli.command {
        init_logging(&LoggingConfig::default()).context("Failed to initialize logging")?;
        app::init_config(&cli, args, &mut out)?;
        return Ok(());
    }

    let config = app::load_config(&cli)?;
    init_logging(&config.logging).context("Failed to initialize logging")?;
    debug!(?config, "configuration loaded");

    match &cli.command {
        Commands::Clean(args) => {
            app::clean(&config, args, &mut out)?;
        }
        Commands::Report(args) => {
            app::report(&config, args, &mut out)?;
        }
        Commands::Dashboard(args) => {
            let data = DataSession::global(&args.input_path(&config));
            app::dashboard(&config, args, data, io::stdin().lock(), &mut out)?;
        }
        Commands::InitConfig(_) => {}
    }

    info!("done");
    Ok(())
}

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use leads_core::config::Config;
use leads_unifier::{app, logging};

#[derive(Parser)]
#[command(
    name = "leads-unifier",
    version,
    about = "Merge and deduplicate contact lists from CSV exports"
)]
struct Cli {
    /// Configuration file (TOML). Defaults to ./leads-unifier.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory scanned for input files.
    #[arg(long)]
    input_dir: Option<PathBuf>,

    /// File-name pattern for inputs, e.g. "*.csv".
    #[arg(long)]
    pattern: Option<String>,

    /// Output CSV path.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Directory for per-run log files.
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Log to the console only.
    #[arg(long)]
    no_log_file: bool,

    /// Also write the run summary as JSON to this path.
    #[arg(long)]
    summary_json: Option<PathBuf>,

    /// Log at debug level regardless of configuration.
    #[arg(long)]
    debug: bool,
}

impl Cli {
    fn apply(&self, config: &mut Config) {
        if let Some(dir) = &self.input_dir {
            config.input.dir = dir.clone();
        }
        if let Some(pattern) = &self.pattern {
            config.input.pattern = pattern.clone();
        }
        if let Some(output) = &self.output {
            config.output.file = output.clone();
        }
        if let Some(dir) = &self.log_dir {
            config.logging.dir = dir.clone();
        }
        if self.no_log_file {
            config.logging.file = false;
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref()).context("failed to load configuration")?;
    cli.apply(&mut config);
    config.validate()?;

    let guard = logging::init(&config.logging, cli.debug)?;
    tracing::info!("starting leads-unifier");
    if let Some(file) = &guard.file {
        tracing::info!(path = %file.display(), "writing log file");
    }

    let options = app::RunOptions {
        summary_json: cli.summary_json,
    };
    if let Err(err) = app::run(&config, &options) {
        tracing::error!(error = ?err, "fatal error");
        return Err(err);
    }
    Ok(())
}

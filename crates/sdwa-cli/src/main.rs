//! # sdwa CLI entry point
//!
//! Parses command-line arguments, initializes logging, loads the optional
//! configuration file, and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use sdwa_cli::analyze::{run_analyze, AnalyzeArgs};
use sdwa_cli::config::CliConfig;
use sdwa_cli::limits::{run_limits, LimitsArgs};
use sdwa_cli::system::{run_system, SystemArgs};
use sdwa_cli::validate::{run_validate, ValidateArgs};

/// SDWA drinking-water violation engine.
///
/// Detects violations in laboratory results, classifies their severity,
/// generates public notices, and assembles the federal violation report.
#[derive(Parser, Debug)]
#[command(name = "sdwa", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output directory for reports and notices.
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyze a laboratory export and produce notices and the federal report.
    Analyze(AnalyzeArgs),

    /// Score a laboratory export and check a regulatory pack.
    Validate(ValidateArgs),

    /// Print the active limit and notification-requirement tables.
    Limits(LimitsArgs),

    /// Resolve a water system record.
    System(SystemArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "sdwa CLI starting");

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{e:#}");
            return ExitCode::from(1);
        }
    };

    let result = match &cli.command {
        Commands::Analyze(args) => run_analyze(args, &config),
        Commands::Validate(args) => run_validate(args, &config),
        Commands::Limits(args) => run_limits(args, &config),
        Commands::System(args) => run_system(args, &config),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

/// Level from `-v` repetition; `SDWA_LOG_FORMAT=json` selects JSON lines.
fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    let json = std::env::var("SDWA_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Config file values, overridden by global flags.
fn load_config(cli: &Cli) -> anyhow::Result<CliConfig> {
    let mut config = match &cli.config {
        Some(path) => CliConfig::load(path)?,
        None => CliConfig::default(),
    };
    if let Some(dir) = &cli.output_dir {
        config.output_dir = Some(dir.clone());
    }
    Ok(config)
}

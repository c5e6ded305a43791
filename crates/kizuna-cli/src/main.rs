//! # kizuna-cli
//!
//! Binary entry point for the Kizuna battle-log formatter.
//!
//! This crate provides:
//! - CLI argument parsing using `clap`
//! - Configuration loading with command-line overrides
//! - Streaming of the input files (or standard input) through one session,
//!   decompressing `.gz` and `.bz2` files on the fly

mod input;

use anyhow::{Context, Result};
use clap::Parser;
use kizuna_core::{KizunaConfig, Session, SessionReport};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Path that selects standard input in the file list.
const STDIN_PATH: &str = "-";

/// Kizuna - formats raw battle logs into a readable report
#[derive(Parser, Debug)]
#[command(name = "kizuna", version, about)]
struct Cli {
    /// Battle log files (plain, .gz or .bz2), read in order as one stream
    /// (standard input if none)
    files: Vec<PathBuf>,

    /// Start in scoring mode (12-field records, summary and resume file)
    #[arg(short, long)]
    event: bool,

    /// Initial counts: 12 comma-separated integers (W,L,D per card and faction)
    #[arg(long, visible_alias = "wld", value_name = "N,...")]
    winlosedraw: Option<String>,

    /// Echo every input line and dump record tokens
    #[arg(short, long)]
    debug: bool,

    /// Year used to compute weekdays of date markers
    #[arg(long)]
    year: Option<i32>,

    /// Where to write the resume directives in scoring mode
    #[arg(long)]
    sidecar: Option<PathBuf>,

    /// Path to configuration file
    #[arg(short, long, default_value = "kizuna.yml")]
    config: PathBuf,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries the report.
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let config = load_config(&cli)?;
    let options = config
        .session_options()
        .context("Configuration validation failed")?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut session = Session::new(options);

    if cli.files.is_empty() {
        debug!("Reading from standard input");
        session
            .process_reader(io::stdin().lock(), &mut out)
            .context("Failed to process standard input")?;
    } else {
        for path in &cli.files {
            process_path(&mut session, path, &mut out)?;
        }
    }

    let report = session.finish(&mut out).context("Failed to finish report")?;
    log_report(&report);
    Ok(())
}

/// Loads the config file (if any) and applies the command-line overrides.
fn load_config(cli: &Cli) -> Result<KizunaConfig> {
    let mut config = if cli.config.exists() {
        KizunaConfig::from_file(&cli.config)
            .with_context(|| format!("Failed to load config from {:?}", cli.config))?
    } else {
        warn!("Config file {:?} not found, using defaults", cli.config);
        KizunaConfig::default()
    };

    if cli.event {
        config.event = true;
    }
    if cli.debug {
        config.debug = true;
    }
    if let Some(seed) = &cli.winlosedraw {
        config.winlosedraw = Some(seed.clone());
    }
    if let Some(year) = cli.year {
        config.reference_year = Some(year);
    }
    if let Some(path) = &cli.sidecar {
        config.sidecar_path = path.to_string_lossy().to_string();
        config.write_sidecar = true;
    }

    let warnings = config
        .validate()
        .context("Configuration validation failed")?;
    for warning in &warnings {
        eprintln!("{warning}");
    }

    Ok(config)
}

fn process_path<W: Write>(session: &mut Session, path: &Path, out: &mut W) -> Result<()> {
    if path.as_os_str() == STDIN_PATH {
        debug!("Reading from standard input");
        return session
            .process_reader(io::stdin().lock(), out)
            .context("Failed to process standard input");
    }

    let reader = input::open_log(path).with_context(|| format!("Failed to open {:?}", path))?;
    session
        .process_reader(reader, out)
        .with_context(|| format!("Failed to process {:?}", path))
}

fn log_report(report: &SessionReport) {
    match &report.resume {
        Some(state) => info!(
            records = report.records,
            counts = %state.seed(),
            "Report complete"
        ),
        None => debug!(records = report.records, "Report complete"),
    }
}

//! RaceTo21 at the terminal.
//!
//! Everyone shares one keyboard; prompts go to stdout and logs to stderr.

mod console;

use anyhow::Context;
use clap::Parser;
use console::ConsoleTable;
use race_to_21_core::{GameEngine, GameError, GameRng, GameSettings, StandardDeck, Table};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "race_to_21")]
#[command(about = "RaceTo21: bet, draw, and get to 21 without going over")]
struct Cli {
    /// JSON file with match settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Cash each player starts with
    #[arg(long)]
    starting_cash: Option<u32>,

    /// Shuffle seed, for a reproducible match
    #[arg(long)]
    seed: Option<u64>,

    /// Log filter (overrides RUST_LOG), e.g. `debug` or `race_to_21_core=trace`
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_deref());

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            debug!(error = ?err, "match failed");
            eprintln!("error: {err:#}");
            let internal = err.downcast_ref::<GameError>().is_some_and(GameError::is_internal);
            ExitCode::from(if internal { 2 } else { 1 })
        }
    }
}

fn init_tracing(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn")),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

fn load_settings(cli: &Cli) -> anyhow::Result<GameSettings> {
    let mut settings = match &cli.config {
        Some(path) => read_settings(path)?,
        None => GameSettings::default(),
    };
    if let Some(cash) = cli.starting_cash {
        settings.starting_cash = cash;
    }
    Ok(settings)
}

fn read_settings(path: &Path) -> anyhow::Result<GameSettings> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let settings = load_settings(cli)?;
    let rng = match cli.seed {
        Some(seed) => GameRng::new(seed),
        None => GameRng::from_entropy(),
    };

    let table = ConsoleTable::new(io::stdin().lock(), io::stdout());
    let mut engine = GameEngine::new(table, StandardDeck::new(), settings, rng).context("invalid match settings")?;
    info!(settings = ?engine.settings(), seed = ?cli.seed, "match starting");

    engine.table_mut().write_message("Setting Up Table...")?;
    engine.run().context("match aborted")?;
    Ok(())
}

//! Turn loop entry point for the Cauldron brewing agent.
//!
//! Reads one turn at a time from stdin, asks the engine for a decision, and
//! writes exactly one command line to stdout. Logs go to stderr so they never
//! mix with the protocol.
//!
//! # Architecture
//!
//! ```text
//! stdin --> TurnReader --> Brewer (DecisionSource) --> write_command --> stdout
//! ```
//!
//! The process ends when stdin closes. Malformed input is fatal.

mod config;
mod error;
mod flavor;
mod protocol;
mod turn;

use anyhow::Context;
use cauldron_engine::Brewer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::{LogFormat, RunnerConfig};
use crate::flavor::Flavor;
use crate::protocol::TurnReader;

/// Application entry point.
///
/// Loads configuration from the environment, initializes logging, builds
/// the engine, then plays turns until stdin closes.
///
/// # Errors
///
/// Returns an error if configuration is invalid, the input breaks the
/// protocol, or stdout can no longer be written.
fn main() -> anyhow::Result<()> {
    let config = RunnerConfig::from_env().context("loading runner configuration")?;
    init_logging(config.log_format);

    info!("cauldron-runner starting");
    let engine_config = config
        .load_engine_config()
        .context("loading engine configuration")?;
    info!(
        config_file = ?config.engine_config,
        max_depth = engine_config.search.max_depth,
        max_results = engine_config.search.max_results,
        deadline_ms = engine_config.search.deadline_ms,
        learning = engine_config.learning.enabled,
        flavor = config.flavor,
        "configuration loaded"
    );

    let mut brewer = Brewer::new(engine_config);
    let mut flavor = config.flavor.then(|| Flavor::new(config.flavor_seed));

    let stdin = std::io::stdin();
    let mut reader = TurnReader::new(stdin.lock());
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let turns = turn::play(&mut brewer, &mut reader, &mut out, flavor.as_mut())
        .context("turn loop aborted")?;
    info!(turns, "cauldron-runner finished");
    Ok(())
}

/// Initialize structured logging on stderr.
fn init_logging(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true);
    match format {
        LogFormat::Pretty => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

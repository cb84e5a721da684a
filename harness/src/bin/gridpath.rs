//! `gridpath`: run one world, or compare strategies over a world collection.
//!
//! Configuration comes from `GRIDPATH_*` environment variables (a `.env` file
//! is read first). Logging goes to stderr and is filtered by `RUST_LOG`; the
//! JSON result goes to stdout.

use std::io::Write;

use dotenv::dotenv;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use gridpath_harness::config::RunConfig;
use gridpath_harness::runner::{execute, RunError};

fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("gridpath=info"));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    init_logging();

    let config = RunConfig::from_env().map_err(RunError::from)?;
    tracing::debug!(?config, "configuration resolved");

    let output = execute(&config).inspect_err(|e| tracing::error!(error = %e, "run failed"))?;
    let bytes = output.to_json_bytes()?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(&bytes)?;
    stdout.write_all(b"\n")?;
    Ok(())
}

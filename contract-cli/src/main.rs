//! Binary crate for the `forecast-contract` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Log setup
//! - Human-friendly and JSON report output

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cmd = cli::Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if cmd.verbose { "debug" } else { "warn" }));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let success = cmd.run().await?;
    if !success {
        std::process::exit(1);
    }
    Ok(())
}

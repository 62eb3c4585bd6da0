//! geobench CLI
//!
//! Loads one synthetic dataset into PostGIS and MongoDB and times the same
//! radius and polygon lookups against both.

mod bench;
mod cli;
mod config;
mod output;
mod progress;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use config::AppConfig;
use output::OutputWriter;

fn main() -> Result<()> {
    // Logs go to stderr so stdout carries only the benchmark text
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    Cli::parse();

    let config = AppConfig::default();
    let output = OutputWriter::new();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(bench::execute(&config, &output))
}

mod api_client;
mod cities;
mod cli;
mod config;
mod errors;
mod models;
mod orchestrator;
mod report;
mod session;
mod validation;

#[cfg(test)]
mod test_support;

use anyhow::Result;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout carries only command output
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}=warn", env!("CARGO_PKG_NAME")))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    debug!("jobsphere v{}", env!("CARGO_PKG_VERSION"));

    cli::run(cli).await
}

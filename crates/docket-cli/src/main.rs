//! Docket CLI - case and task tracking for small legal practices.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod output;

use commands::Cli;
use docket_core::config::Config;

/// Initialize tracing with optional file logging.
///
/// Log lines go to stderr so command output on stdout (exports, `--json`)
/// stays machine-readable.
fn init_tracing(default_filter: &str, log_file: Option<&std::path::Path>) -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    if let Some(path) = log_file {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;

        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::sync::Mutex::new(file))
                    .with_ansi(false),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.data_dir())?.with_webhook_override(cli.webhook_url.clone());

    let filter = if cli.verbose {
        "docket=debug,docket_core=debug,docket_db=debug".to_string()
    } else {
        config.log_filter.clone()
    };
    init_tracing(&filter, cli.log_file.as_deref())?;

    cli.execute(config).await
}

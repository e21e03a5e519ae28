//! CLI command definitions and handlers.

use anyhow::Result;
use clap::{Parser, Subcommand};
use docket_core::config::Config;
use std::path::PathBuf;

pub mod case;
pub mod data;
pub mod report;
pub mod session;
pub mod task;
pub mod webhook;

/// Docket - case and task tracking for small legal practices
#[derive(Parser)]
#[command(name = "docket")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Directory holding the case snapshot and settings
    #[arg(long, global = true, env = "DOCKET_HOME")]
    pub data_dir: Option<PathBuf>,

    /// Webhook URL that overrides the stored one for this run
    #[arg(long, global = true, env = "DOCKET_WEBHOOK_URL", hide_env_values = true)]
    pub webhook_url: Option<String>,

    /// Also write logs to this file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage cases
    #[command(subcommand)]
    Case(case::CaseCommands),

    /// Manage tasks
    #[command(subcommand)]
    Task(task::TaskCommands),

    /// Show the overview dashboard
    Dashboard(report::ReportArgs),

    /// Show case and task reports
    Report(report::ReportArgs),

    /// Export or import all data
    #[command(subcommand)]
    Data(data::DataCommands),

    /// Configure the automation webhook
    #[command(subcommand)]
    Webhook(webhook::WebhookCommands),
}

impl Cli {
    /// Data directory from the flag / env var, or the platform default.
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| {
            dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("docket")
        })
    }

    pub async fn execute(self, config: Config) -> Result<()> {
        let replacing = matches!(self.command, Commands::Data(data::DataCommands::Import { .. }));
        let mut session = session::Session::open(&config, replacing)?;

        let result = match self.command {
            Commands::Case(cmd) => case::execute(cmd, &mut session.store),
            Commands::Task(cmd) => task::execute(cmd, &mut session.store),
            Commands::Dashboard(args) => report::dashboard(args, &session.store),
            Commands::Report(args) => report::report(args, &session.store),
            Commands::Data(cmd) => data::execute(cmd, &mut session.store),
            Commands::Webhook(cmd) => webhook::execute(cmd, &session.store, &config).await,
        };

        // Flush pending webhook deliveries even when the command failed.
        session.finish().await;
        result
    }
}

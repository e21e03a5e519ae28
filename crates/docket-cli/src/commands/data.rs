//! Export and import of the whole case collection.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Subcommand;
use colored::Colorize;
use dialoguer::Confirm;
use docket_core::store::export_file_name;
use docket_core::CaseStore;

#[derive(Subcommand)]
pub enum DataCommands {
    /// Write every case and task to a JSON file
    Export {
        /// Output file, or "-" for stdout (default: case-tracker-export-<date>.json)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Replace all data with the contents of an export file
    Import {
        /// Export file to read
        file: PathBuf,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

pub fn execute(cmd: DataCommands, store: &mut CaseStore) -> Result<()> {
    match cmd {
        DataCommands::Export { output } => {
            let json = store.export_data()?;
            let path = output
                .unwrap_or_else(|| PathBuf::from(export_file_name(Local::now().date_naive())));

            if path.as_os_str() == "-" {
                println!("{}", json);
                return Ok(());
            }

            std::fs::write(&path, json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!(
                "{} Exported {} case(s) to {}",
                "✓".green().bold(),
                store.cases().len(),
                path.display().to_string().cyan()
            );
        }

        DataCommands::Import { file, yes } => {
            let raw = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;

            if let Some(problem) = store.last_error() {
                println!(
                    "{} Existing data could not be read and will be replaced: {}",
                    "!".yellow().bold(),
                    problem.dimmed()
                );
            }

            if !yes && !store.cases().is_empty() {
                let confirmed = Confirm::new()
                    .with_prompt(format!(
                        "Replace all {} existing case(s) with {}?",
                        store.cases().len(),
                        file.display()
                    ))
                    .default(false)
                    .interact()
                    .context("Failed to read confirmation")?;
                if !confirmed {
                    println!("{}", "Cancelled.".dimmed());
                    return Ok(());
                }
            }

            match store.import_data(&raw) {
                Ok(count) => println!(
                    "{} Imported {} case(s) from {}",
                    "✓".green().bold(),
                    count,
                    file.display().to_string().cyan()
                ),
                Err(e) => {
                    let message = store
                        .last_error()
                        .map(str::to_string)
                        .unwrap_or_else(|| e.to_string());
                    anyhow::bail!(message);
                }
            }
        }
    }

    Ok(())
}

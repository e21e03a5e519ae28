//! Case management commands.

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Args, Subcommand};
use colored::Colorize;
use dialoguer::{Confirm, Input};
use docket_core::case::model::{CaseDraft, CasePatch, CaseStatus};
use docket_core::case::{self, CaseFilter};
use docket_core::CaseStore;

use crate::output;

#[derive(Subcommand)]
pub enum CaseCommands {
    /// Open a new case (prompts for anything not given as a flag)
    New(NewCaseArgs),

    /// List cases, most recently opened first
    List(ListCaseArgs),

    /// Show a case with its tasks
    Show {
        /// Case ID or unique ID prefix
        case_id: String,
    },

    /// Edit case fields
    Edit(EditCaseArgs),

    /// Change the status of a case
    Status {
        /// Case ID or unique ID prefix
        case_id: String,

        /// New status (new, pending, in_progress, awaiting_response,
        /// awaiting_hearing, closed, won, lost, settled)
        status: CaseStatus,
    },

    /// Delete a case and all of its tasks
    Delete {
        /// Case ID or unique ID prefix
        case_id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Args)]
pub struct NewCaseArgs {
    /// Internal case number
    #[arg(long)]
    pub number: Option<String>,

    /// Court-assigned case number
    #[arg(long)]
    pub court_number: Option<String>,

    /// Client name
    #[arg(long)]
    pub client: Option<String>,

    /// Opposing party
    #[arg(long)]
    pub opponent: Option<String>,

    /// Matter description
    #[arg(short, long)]
    pub description: Option<String>,

    /// Open date (YYYY-MM-DD), defaults to today
    #[arg(long)]
    pub opened: Option<String>,

    /// Initial status
    #[arg(long, default_value = "new")]
    pub status: CaseStatus,

    /// Next hearing date (YYYY-MM-DD)
    #[arg(long)]
    pub hearing: Option<String>,
}

#[derive(Args)]
pub struct ListCaseArgs {
    /// Search case numbers, client, description and opponent
    #[arg(short, long)]
    pub search: Option<String>,

    /// Only show cases in this status
    #[arg(long)]
    pub status: Option<CaseStatus>,
}

#[derive(Args)]
pub struct EditCaseArgs {
    /// Case ID or unique ID prefix
    pub case_id: String,

    #[arg(long)]
    pub number: Option<String>,

    #[arg(long)]
    pub court_number: Option<String>,

    #[arg(long)]
    pub client: Option<String>,

    #[arg(long)]
    pub opponent: Option<String>,

    #[arg(short, long)]
    pub description: Option<String>,

    /// Open date (YYYY-MM-DD)
    #[arg(long)]
    pub opened: Option<String>,

    #[arg(long)]
    pub status: Option<CaseStatus>,

    /// Next hearing date (YYYY-MM-DD); pass "" to clear it
    #[arg(long)]
    pub hearing: Option<String>,
}

pub fn execute(cmd: CaseCommands, store: &mut CaseStore) -> Result<()> {
    let today = Local::now().date_naive();

    match cmd {
        CaseCommands::New(args) => {
            let draft = CaseDraft {
                case_number: prompt_if_missing(args.number, "Case number")?,
                court_case_number: prompt_if_missing(args.court_number, "Court case number")?,
                client_name: prompt_if_missing(args.client, "Client name")?,
                opponent: prompt_if_missing(args.opponent, "Opponent")?,
                description: prompt_if_missing(args.description, "Description")?,
                open_date: args.opened.unwrap_or_else(|| today.format("%Y-%m-%d").to_string()),
                status: args.status,
                next_hearing_date: args.hearing,
            };

            let case = store.add_case(draft)?;
            println!(
                "{} Opened case: {} for {} ({})",
                "✓".green().bold(),
                case.case_number.cyan(),
                case.client_name,
                output::short_id(&case.id).dimmed()
            );
        }

        CaseCommands::List(args) => {
            let filter = CaseFilter {
                query: args.search,
                status: args.status,
            };
            let cases = case::list_cases(store.cases(), &filter);
            output::print_cases_table(&cases);
        }

        CaseCommands::Show { case_id } => {
            let case = resolve_case(store, &case_id)?;
            output::print_case(case, today);
        }

        CaseCommands::Edit(args) => {
            let id = resolve_case(store, &args.case_id)?.id.clone();
            let patch = CasePatch {
                case_number: args.number,
                court_case_number: args.court_number,
                description: args.description,
                client_name: args.client,
                open_date: args.opened,
                opponent: args.opponent,
                status: args.status,
                next_hearing_date: args.hearing,
            };
            if patch.is_empty() {
                println!("{}", "Nothing to change.".dimmed());
                return Ok(());
            }

            if let Some(case) = store.update_case(&id, &patch)? {
                println!(
                    "{} Updated case: {}",
                    "✓".green().bold(),
                    case.case_number.cyan()
                );
            }
        }

        CaseCommands::Status { case_id, status } => {
            let id = resolve_case(store, &case_id)?.id.clone();
            if let Some(case) = store.update_case(&id, &CasePatch::status(status))? {
                println!(
                    "{} Case {} is now {}",
                    "✓".green().bold(),
                    case.case_number.cyan(),
                    output::status_colored(case.status)
                );
            }
        }

        CaseCommands::Delete { case_id, yes } => {
            let case = resolve_case(store, &case_id)?;
            let (id, number, tasks) = (case.id.clone(), case.case_number.clone(), case.tasks.len());

            if !yes {
                let confirmed = Confirm::new()
                    .with_prompt(format!(
                        "Delete case {} and its {} task(s)? This cannot be undone",
                        number, tasks
                    ))
                    .default(false)
                    .interact()
                    .context("Failed to read confirmation")?;
                if !confirmed {
                    println!("{}", "Cancelled.".dimmed());
                    return Ok(());
                }
            }

            if store.delete_case(&id)?.is_some() {
                println!("{} Deleted case: {}", "✓".green().bold(), number.cyan());
            }
        }
    }

    Ok(())
}

/// Resolve a case by id or id prefix, failing with a readable message.
pub fn resolve_case<'a>(
    store: &'a CaseStore,
    id_or_prefix: &str,
) -> Result<&'a docket_core::case::model::Case> {
    case::find_case(store.cases(), id_or_prefix)
        .ok_or_else(|| anyhow::anyhow!("Case not found: {}", id_or_prefix))
}

fn prompt_if_missing(value: Option<String>, prompt: &str) -> Result<String> {
    match value {
        Some(v) => Ok(v),
        None => Input::new()
            .with_prompt(prompt)
            .interact_text()
            .with_context(|| format!("Failed to read {}", prompt.to_lowercase())),
    }
}

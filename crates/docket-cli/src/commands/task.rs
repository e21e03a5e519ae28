//! Task management commands.

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Args, Subcommand};
use colored::Colorize;
use dialoguer::Confirm;
use docket_core::task::model::{TaskDraft, TaskPatch};
use docket_core::task::{self, Completion, TaskFilter, TaskSort};
use docket_core::CaseStore;

use super::case::resolve_case;
use crate::output;

#[derive(Subcommand)]
pub enum TaskCommands {
    /// Add a task to a case
    Add(AddTaskArgs),

    /// List tasks across all cases
    List(ListTaskArgs),

    /// Edit a task
    Edit(EditTaskArgs),

    /// Mark a task completed, or reopen it
    Toggle(TaskRef),

    /// Delete a task
    Delete {
        #[command(flatten)]
        task: TaskRef,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Args)]
pub struct TaskRef {
    /// Case ID or unique ID prefix
    pub case_id: String,

    /// Task ID or unique ID prefix within the case
    pub task_id: String,
}

#[derive(Args)]
pub struct AddTaskArgs {
    /// Case ID or unique ID prefix
    pub case_id: String,

    /// Task title
    pub title: String,

    /// Task description
    #[arg(short, long)]
    pub description: Option<String>,

    /// Due date (YYYY-MM-DD)
    #[arg(long)]
    pub due: Option<String>,
}

#[derive(Args)]
pub struct ListTaskArgs {
    /// Only show tasks of this case
    #[arg(long)]
    pub case: Option<String>,

    /// Search title, description, client and case number
    #[arg(short, long)]
    pub search: Option<String>,

    /// all, completed or incomplete
    #[arg(short, long, default_value = "all")]
    pub filter: Completion,

    /// due, created, case or title
    #[arg(long, default_value = "due")]
    pub sort: TaskSort,

    /// Group by due date (overdue, today, tomorrow, this week, later)
    #[arg(short, long)]
    pub group: bool,
}

#[derive(Args)]
pub struct EditTaskArgs {
    #[command(flatten)]
    pub task: TaskRef,

    #[arg(long)]
    pub title: Option<String>,

    /// New description; pass "" to clear it
    #[arg(short, long)]
    pub description: Option<String>,

    /// New due date (YYYY-MM-DD); pass "" to clear it
    #[arg(long)]
    pub due: Option<String>,
}

pub fn execute(cmd: TaskCommands, store: &mut CaseStore) -> Result<()> {
    let today = Local::now().date_naive();

    match cmd {
        TaskCommands::Add(args) => {
            let case_id = resolve_case(store, &args.case_id)?.id.clone();
            let draft = TaskDraft {
                title: args.title,
                description: args.description,
                due_date: args.due,
            };

            if let Some(task) = store.add_task(&case_id, draft)? {
                println!(
                    "{} Created task: {} ({})",
                    "✓".green().bold(),
                    task.title.cyan(),
                    output::short_id(&task.id).dimmed()
                );
            }
        }

        TaskCommands::List(args) => {
            let filter = TaskFilter {
                query: args.search,
                completion: args.filter,
            };

            let scope = match args.case.as_deref() {
                Some(prefix) => std::slice::from_ref(resolve_case(store, prefix)?),
                None => store.cases(),
            };
            let tasks = task::list_tasks(scope, &filter, args.sort);

            if args.group {
                output::print_task_groups(&task::group_by_due(&tasks, today), today);
            } else {
                output::print_tasks_table(&tasks, today);
            }
        }

        TaskCommands::Edit(args) => {
            let (case_id, task_id) = resolve_task(store, &args.task)?;
            let patch = TaskPatch {
                title: args.title,
                description: args.description,
                due_date: args.due,
            };
            if patch.is_empty() {
                println!("{}", "Nothing to change.".dimmed());
                return Ok(());
            }

            if let Some(task) = store.update_task(&case_id, &task_id, &patch)? {
                println!("{} Updated task: {}", "✓".green().bold(), task.title.cyan());
            }
        }

        TaskCommands::Toggle(task_ref) => {
            let (case_id, task_id) = resolve_task(store, &task_ref)?;
            if let Some(completed) = store.toggle_task_completion(&case_id, &task_id)? {
                let state = if completed {
                    "completed".green()
                } else {
                    "reopened".yellow()
                };
                println!(
                    "{} Task {} {}",
                    "✓".green().bold(),
                    output::short_id(&task_id).dimmed(),
                    state
                );
            }
        }

        TaskCommands::Delete { task, yes } => {
            let (case_id, task_id) = resolve_task(store, &task)?;

            if !yes {
                let confirmed = Confirm::new()
                    .with_prompt("Delete this task?")
                    .default(false)
                    .interact()
                    .context("Failed to read confirmation")?;
                if !confirmed {
                    println!("{}", "Cancelled.".dimmed());
                    return Ok(());
                }
            }

            if let Some(removed) = store.delete_task(&case_id, &task_id)? {
                println!("{} Deleted task: {}", "✓".green().bold(), removed.title.cyan());
            }
        }
    }

    Ok(())
}

/// Resolve full case and task ids from possibly abbreviated ones.
fn resolve_task(store: &CaseStore, task_ref: &TaskRef) -> Result<(String, String)> {
    let case = resolve_case(store, &task_ref.case_id)?;
    let task = task::find_task(case, &task_ref.task_id)
        .ok_or_else(|| anyhow::anyhow!("Task not found: {}", task_ref.task_id))?;
    Ok((case.id.clone(), task.id.clone()))
}

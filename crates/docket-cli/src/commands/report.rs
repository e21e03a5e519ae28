//! Dashboard and report commands.

use anyhow::Result;
use chrono::Local;
use clap::Args;
use docket_core::{report, CaseStore};

use crate::output;

#[derive(Args)]
pub struct ReportArgs {
    /// Print the aggregates as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn dashboard(args: ReportArgs, store: &CaseStore) -> Result<()> {
    let dash = report::dashboard(store.cases(), Local::now().date_naive());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&dash)?);
    } else {
        output::print_dashboard(&dash);
    }

    Ok(())
}

pub fn report(args: ReportArgs, store: &CaseStore) -> Result<()> {
    let report = report::report(store.cases(), Local::now().date_naive());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        output::print_report(&report);
    }

    Ok(())
}

//! Report and dashboard models.

use chrono::NaiveDate;
use serde::Serialize;

use crate::case::model::{Case, CaseStatus};

/// Number of cases in one status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusCount {
    pub status: CaseStatus,
    pub count: usize,
}

/// Task completion across a set of cases.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TaskStats {
    pub total: usize,
    pub completed: usize,
}

impl TaskStats {
    pub fn pending(&self) -> usize {
        self.total - self.completed
    }

    /// Completed over total; zero when there are no tasks.
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.completed as f64 / self.total as f64
        }
    }

    /// Completion rate as a whole percentage, rounded half away from zero.
    pub fn completion_percent(&self) -> u32 {
        (self.ratio() * 100.0).round() as u32
    }
}

/// Compact view of a case for dashboard lists.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseSummary {
    pub id: String,
    pub case_number: String,
    pub client_name: String,
    pub status: CaseStatus,
    pub open_date: NaiveDate,
    pub next_hearing_date: Option<NaiveDate>,
}

impl From<&Case> for CaseSummary {
    fn from(case: &Case) -> Self {
        Self {
            id: case.id.clone(),
            case_number: case.case_number.clone(),
            client_name: case.client_name.clone(),
            status: case.status,
            open_date: case.open_date,
            next_hearing_date: case.next_hearing_date,
        }
    }
}

/// Home screen overview.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub total_cases: usize,
    /// Cases whose status is not concluded.
    pub active_cases: usize,
    pub tasks: TaskStats,
    pub status_counts: Vec<StatusCount>,
    /// Soonest first, at most [`DASHBOARD_LIST_LIMIT`](super::DASHBOARD_LIST_LIMIT).
    pub upcoming_hearings: Vec<CaseSummary>,
    /// Newest open date first.
    pub recent_cases: Vec<CaseSummary>,
}

/// Cases opened in one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthCount {
    pub year: i32,
    pub month: u32,
    /// Short label such as `Jun 2024`.
    pub label: String,
    pub count: usize,
}

/// A labelled slice of a chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Slice {
    pub label: &'static str,
    pub count: usize,
}

/// Aggregates shown on the reports screen.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub status_distribution: Vec<StatusCount>,
    /// Won, lost, settled and closed cases; empty slices omitted.
    pub outcomes: Vec<StatusCount>,
    /// Oldest month first, every month present.
    pub monthly_intake: Vec<MonthCount>,
    /// Completed and pending tasks; empty slices omitted.
    pub task_completion: Vec<Slice>,
}

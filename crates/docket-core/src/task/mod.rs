//! Task listing: ordering, filtering and due-date grouping.

pub mod model;

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

use crate::case::model::Case;
use crate::error::DocketError;
use model::Task;

/// A task together with the case that owns it.
#[derive(Debug, Clone, Copy)]
pub struct CaseTask<'a> {
    pub case: &'a Case,
    pub task: &'a Task,
}

/// Flatten every case's tasks into one list, preserving collection order.
pub fn all_tasks(cases: &[Case]) -> Vec<CaseTask<'_>> {
    cases
        .iter()
        .flat_map(|case| case.tasks.iter().map(move |task| CaseTask { case, task }))
        .collect()
}

/// Resolve a task of `case` by full id or by an unambiguous id prefix.
pub fn find_task<'a>(case: &'a Case, id_or_prefix: &str) -> Option<&'a Task> {
    if let Some(exact) = case.task(id_or_prefix) {
        return Some(exact);
    }
    let mut candidates = case.tasks.iter().filter(|t| t.id.starts_with(id_or_prefix));
    match (candidates.next(), candidates.next()) {
        (Some(only), None) if !id_or_prefix.is_empty() => Some(only),
        _ => None,
    }
}

/// Default per-case ordering: incomplete first, then by due date (dated
/// tasks first), then by creation time.
pub fn compare_tasks(a: &Task, b: &Task) -> Ordering {
    a.completed
        .cmp(&b.completed)
        .then_with(|| compare_due(a, b))
        .then_with(|| a.created_at.cmp(&b.created_at))
}

/// Sort a case's tasks with [`compare_tasks`].
pub fn sorted_tasks(tasks: &[Task]) -> Vec<&Task> {
    let mut sorted: Vec<&Task> = tasks.iter().collect();
    sorted.sort_by(|a, b| compare_tasks(a, b));
    sorted
}

fn compare_due(a: &Task, b: &Task) -> Ordering {
    match (a.due_date, b.due_date) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Orderings offered by the all-tasks list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskSort {
    /// Dated tasks first by due date, undated by creation time.
    #[default]
    DueDate,
    CreatedAt,
    /// By the owning case's client name.
    Case,
    Title,
}

impl TaskSort {
    pub fn compare(&self, a: &CaseTask<'_>, b: &CaseTask<'_>) -> Ordering {
        match self {
            Self::DueDate => compare_due(a.task, b.task)
                .then_with(|| a.task.created_at.cmp(&b.task.created_at)),
            Self::CreatedAt => a.task.created_at.cmp(&b.task.created_at),
            Self::Case => compare_text(&a.case.client_name, &b.case.client_name),
            Self::Title => compare_text(&a.task.title, &b.task.title),
        }
    }
}

impl FromStr for TaskSort {
    type Err = DocketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "due" | "due_date" => Ok(Self::DueDate),
            "created" | "created_at" => Ok(Self::CreatedAt),
            "case" => Ok(Self::Case),
            "title" => Ok(Self::Title),
            other => Err(DocketError::validation(format!(
                "Invalid sort '{other}'. Valid sorts: due, created, case, title"
            ))),
        }
    }
}

fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b))
}

/// Completion filter for task lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Completion {
    #[default]
    All,
    Completed,
    Incomplete,
}

impl Completion {
    pub fn matches(&self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Completed => task.completed,
            Self::Incomplete => !task.completed,
        }
    }
}

impl FromStr for Completion {
    type Err = DocketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "completed" | "done" => Ok(Self::Completed),
            "incomplete" | "open" => Ok(Self::Incomplete),
            other => Err(DocketError::validation(format!(
                "Invalid filter '{other}'. Valid filters: all, completed, incomplete"
            ))),
        }
    }
}

/// Search and completion criteria for the all-tasks list.
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    pub query: Option<String>,
    pub completion: Completion,
}

impl TaskFilter {
    /// Case-insensitive match on title, description, client name and case number.
    pub fn matches(&self, item: &CaseTask<'_>) -> bool {
        if !self.completion.matches(item.task) {
            return false;
        }
        let Some(query) = self.query.as_deref().map(str::trim).filter(|q| !q.is_empty()) else {
            return true;
        };
        let needle = query.to_lowercase();
        let hit = |text: &str| text.to_lowercase().contains(&needle);

        hit(&item.task.title)
            || item.task.description.as_deref().is_some_and(hit)
            || hit(&item.case.client_name)
            || hit(&item.case.case_number)
    }
}

/// Filter then sort the flattened task list.
pub fn list_tasks<'a>(cases: &'a [Case], filter: &TaskFilter, sort: TaskSort) -> Vec<CaseTask<'a>> {
    let mut tasks: Vec<CaseTask<'a>> = all_tasks(cases)
        .into_iter()
        .filter(|item| filter.matches(item))
        .collect();
    tasks.sort_by(|a, b| sort.compare(a, b));
    tasks
}

/// Due-date group a task is displayed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DueBucket {
    Overdue,
    Today,
    Tomorrow,
    ThisWeek,
    Later,
    NoDueDate,
}

impl DueBucket {
    /// Every bucket in display order.
    pub const ALL: [DueBucket; 6] = [
        Self::Overdue,
        Self::Today,
        Self::Tomorrow,
        Self::ThisWeek,
        Self::Later,
        Self::NoDueDate,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Overdue => "Overdue",
            Self::Today => "Today",
            Self::Tomorrow => "Tomorrow",
            Self::ThisWeek => "This Week",
            Self::Later => "Later",
            Self::NoDueDate => "No Due Date",
        }
    }
}

impl fmt::Display for DueBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Last day of the week containing `today`.
///
/// Weeks end on Sunday. On a Sunday the boundary is the following Sunday,
/// so "this week" never collapses to nothing.
pub fn end_of_week(today: NaiveDate) -> NaiveDate {
    let days_from_sunday = today.weekday().num_days_from_sunday() as i64;
    today + Duration::days(7 - days_from_sunday)
}

/// Classify a task by calendar day relative to `today`.
///
/// Only incomplete tasks can be overdue; a completed task with a past due
/// date lands in [`DueBucket::Later`].
pub fn classify_due(task: &Task, today: NaiveDate) -> DueBucket {
    let Some(due) = task.due_date else {
        return DueBucket::NoDueDate;
    };

    let tomorrow = today + Duration::days(1);

    if due < today && !task.completed {
        DueBucket::Overdue
    } else if due == today {
        DueBucket::Today
    } else if due == tomorrow {
        DueBucket::Tomorrow
    } else if due > tomorrow && due <= end_of_week(today) {
        DueBucket::ThisWeek
    } else {
        DueBucket::Later
    }
}

/// Tasks grouped by due bucket, in bucket display order. Empty buckets are kept.
pub fn group_by_due<'a>(
    tasks: &[CaseTask<'a>],
    today: NaiveDate,
) -> Vec<(DueBucket, Vec<CaseTask<'a>>)> {
    let mut groups: Vec<(DueBucket, Vec<CaseTask<'a>>)> =
        DueBucket::ALL.iter().map(|b| (*b, Vec::new())).collect();

    for item in tasks {
        let bucket = classify_due(item.task, today);
        if let Some((_, group)) = groups.iter_mut().find(|(b, _)| *b == bucket) {
            group.push(*item);
        }
    }

    groups
}

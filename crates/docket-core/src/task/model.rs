//! Task domain models.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::dates::{self, option_calendar_date};
use crate::error::{DocketError, DocketResult};

/// A to-do item belonging to exactly one case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub case_id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        default,
        with = "option_calendar_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Build a new, incomplete task for `case_id`.
    pub fn from_draft(case_id: &str, draft: TaskDraft, now: DateTime<Utc>) -> DocketResult<Self> {
        let title = required_title(&draft.title)?;
        let due_date = dates::parse_optional_form_date("dueDate", draft.due_date.as_deref())?;

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            case_id: case_id.to_string(),
            title,
            description: non_blank(draft.description),
            due_date,
            completed: false,
            created_at: now,
        })
    }

    /// Return a copy of this task with `patch` applied.
    pub fn merged(&self, patch: &TaskPatch) -> DocketResult<Self> {
        let mut next = self.clone();

        if let Some(title) = &patch.title {
            next.title = required_title(title)?;
        }
        if let Some(description) = &patch.description {
            next.description = non_blank(Some(description.clone()));
        }
        if let Some(due) = &patch.due_date {
            // A blank value clears the due date.
            next.due_date = dates::parse_optional_form_date("dueDate", Some(due))?;
        }

        Ok(next)
    }
}

fn required_title(title: &str) -> DocketResult<String> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(DocketError::validation("title is required"));
    }
    Ok(trimmed.to_string())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Form input for creating a task. The due date is a `YYYY-MM-DD` string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraft {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
}

impl TaskDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn due(mut self, date: impl Into<String>) -> Self {
        self.due_date = Some(date.into());
        self
    }
}

/// Partial update for a task. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<String>,
}

impl TaskPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.due_date.is_none()
    }
}

//! Case domain models.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::dates::{self, calendar_date, option_calendar_date};
use crate::error::{DocketError, DocketResult};
use crate::task::model::Task;

/// A client matter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Case {
    pub id: String,
    pub case_number: String,
    pub court_case_number: String,
    pub description: String,
    pub client_name: String,
    #[serde(with = "calendar_date")]
    pub open_date: NaiveDate,
    pub opponent: String,
    pub status: CaseStatus,
    #[serde(
        default,
        with = "option_calendar_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub next_hearing_date: Option<NaiveDate>,
    #[serde(default)]
    pub tasks: Vec<Task>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Case {
    /// Build a new case from validated form input.
    ///
    /// Both timestamps are set to `now` and the task list starts empty.
    pub fn from_draft(draft: CaseDraft, now: DateTime<Utc>) -> DocketResult<Self> {
        draft.validate()?;
        let open_date = dates::parse_form_date("openDate", &draft.open_date)?;
        let next_hearing_date =
            dates::parse_optional_form_date("nextHearingDate", draft.next_hearing_date.as_deref())?;

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            case_number: draft.case_number.trim().to_string(),
            court_case_number: draft.court_case_number.trim().to_string(),
            description: draft.description.trim().to_string(),
            client_name: draft.client_name.trim().to_string(),
            open_date,
            opponent: draft.opponent.trim().to_string(),
            status: draft.status,
            next_hearing_date,
            tasks: Vec::new(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Return a copy of this case with `patch` applied and `updated_at` set to `now`.
    ///
    /// Fails without side effects when a patched date does not parse or a
    /// required text field would become blank.
    pub fn merged(&self, patch: &CasePatch, now: DateTime<Utc>) -> DocketResult<Self> {
        let mut next = self.clone();

        if let Some(v) = &patch.case_number {
            next.case_number = required("caseNumber", v)?;
        }
        if let Some(v) = &patch.court_case_number {
            next.court_case_number = required("courtCaseNumber", v)?;
        }
        if let Some(v) = &patch.description {
            next.description = required("description", v)?;
        }
        if let Some(v) = &patch.client_name {
            next.client_name = required("clientName", v)?;
        }
        if let Some(v) = &patch.open_date {
            next.open_date = dates::parse_form_date("openDate", v)?;
        }
        if let Some(v) = &patch.opponent {
            next.opponent = required("opponent", v)?;
        }
        if let Some(status) = patch.status {
            next.status = status;
        }
        if let Some(v) = &patch.next_hearing_date {
            // A blank value clears the hearing date.
            next.next_hearing_date = dates::parse_optional_form_date("nextHearingDate", Some(v))?;
        }

        next.updated_at = now;
        Ok(next)
    }

    /// Number of completed tasks.
    pub fn completed_tasks(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }

    /// Find a task by id.
    pub fn task(&self, task_id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == task_id)
    }
}

fn required(field: &str, value: &str) -> DocketResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DocketError::validation(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

/// Lifecycle label of a case. Any status may follow any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseStatus {
    New,
    Pending,
    InProgress,
    AwaitingResponse,
    AwaitingHearing,
    Closed,
    Won,
    Lost,
    Settled,
}

impl CaseStatus {
    /// Every status in declaration order.
    pub const ALL: [CaseStatus; 9] = [
        Self::New,
        Self::Pending,
        Self::InProgress,
        Self::AwaitingResponse,
        Self::AwaitingHearing,
        Self::Closed,
        Self::Won,
        Self::Lost,
        Self::Settled,
    ];

    /// Convert to the stored string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::AwaitingResponse => "awaiting_response",
            Self::AwaitingHearing => "awaiting_hearing",
            Self::Closed => "closed",
            Self::Won => "won",
            Self::Lost => "lost",
            Self::Settled => "settled",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::New => "New",
            Self::Pending => "Pending",
            Self::InProgress => "In Progress",
            Self::AwaitingResponse => "Awaiting Response",
            Self::AwaitingHearing => "Awaiting Hearing",
            Self::Closed => "Closed",
            Self::Won => "Won",
            Self::Lost => "Lost",
            Self::Settled => "Settled",
        }
    }

    /// Whether the matter has concluded (closed, won, lost or settled).
    pub fn is_concluded(&self) -> bool {
        matches!(self, Self::Closed | Self::Won | Self::Lost | Self::Settled)
    }
}

impl fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CaseStatus {
    type Err = DocketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace([' ', '-'], "_");
        Self::ALL
            .iter()
            .copied()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| {
                let valid: Vec<&str> = Self::ALL.iter().map(|s| s.as_str()).collect();
                DocketError::validation(format!(
                    "Invalid status '{}'. Valid statuses: {}",
                    s,
                    valid.join(", ")
                ))
            })
    }
}

/// Form input for creating a case. Dates are `YYYY-MM-DD` strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseDraft {
    pub case_number: String,
    pub court_case_number: String,
    pub description: String,
    pub client_name: String,
    pub open_date: String,
    pub opponent: String,
    pub status: CaseStatus,
    #[serde(default)]
    pub next_hearing_date: Option<String>,
}

impl CaseDraft {
    /// Check that every required text field is present.
    pub fn validate(&self) -> DocketResult<()> {
        required("caseNumber", &self.case_number)?;
        required("courtCaseNumber", &self.court_case_number)?;
        required("description", &self.description)?;
        required("clientName", &self.client_name)?;
        required("openDate", &self.open_date)?;
        required("opponent", &self.opponent)?;
        Ok(())
    }
}

/// Partial update for a case. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CasePatch {
    pub case_number: Option<String>,
    pub court_case_number: Option<String>,
    pub description: Option<String>,
    pub client_name: Option<String>,
    pub open_date: Option<String>,
    pub opponent: Option<String>,
    pub status: Option<CaseStatus>,
    pub next_hearing_date: Option<String>,
}

impl CasePatch {
    /// Patch that only changes the status.
    pub fn status(status: CaseStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// Whether the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.case_number.is_none()
            && self.court_case_number.is_none()
            && self.description.is_none()
            && self.client_name.is_none()
            && self.open_date.is_none()
            && self.opponent.is_none()
            && self.status.is_none()
            && self.next_hearing_date.is_none()
    }
}

//! Domain events emitted by store mutations.
//!
//! The store publishes one event per notifying mutation on a broadcast
//! channel. Subscribers (the webhook dispatcher, tests) receive them without
//! the store ever waiting on delivery.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::case::model::Case;
use crate::task::model::Task;

/// Message sent with the manual webhook test.
pub const TEST_WEBHOOK_MESSAGE: &str = "This is a test from Docket";

/// Event payload, serialized exactly as the webhook body.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum CaseEvent {
    CaseCreated {
        case_id: String,
        case_number: String,
        client_name: String,
        timestamp: DateTime<Utc>,
    },
    CaseUpdated {
        case_id: String,
        case_number: String,
        client_name: String,
        timestamp: DateTime<Utc>,
    },
    CaseDeleted {
        case_id: String,
        case_number: String,
        client_name: String,
        timestamp: DateTime<Utc>,
    },
    TaskCreated {
        case_id: String,
        case_number: String,
        task_id: String,
        task_title: String,
        timestamp: DateTime<Utc>,
    },
    TaskCompleted {
        case_id: String,
        case_number: String,
        task_id: String,
        task_title: String,
        timestamp: DateTime<Utc>,
    },
    TaskReopened {
        case_id: String,
        case_number: String,
        task_id: String,
        task_title: String,
        timestamp: DateTime<Utc>,
    },
    TestWebhook {
        message: String,
        timestamp: DateTime<Utc>,
    },
}

impl CaseEvent {
    pub fn case_created(case: &Case, at: DateTime<Utc>) -> Self {
        Self::CaseCreated {
            case_id: case.id.clone(),
            case_number: case.case_number.clone(),
            client_name: case.client_name.clone(),
            timestamp: at,
        }
    }

    pub fn case_updated(case: &Case, at: DateTime<Utc>) -> Self {
        Self::CaseUpdated {
            case_id: case.id.clone(),
            case_number: case.case_number.clone(),
            client_name: case.client_name.clone(),
            timestamp: at,
        }
    }

    pub fn case_deleted(case: &Case, at: DateTime<Utc>) -> Self {
        Self::CaseDeleted {
            case_id: case.id.clone(),
            case_number: case.case_number.clone(),
            client_name: case.client_name.clone(),
            timestamp: at,
        }
    }

    pub fn task_created(case: &Case, task: &Task, at: DateTime<Utc>) -> Self {
        Self::TaskCreated {
            case_id: case.id.clone(),
            case_number: case.case_number.clone(),
            task_id: task.id.clone(),
            task_title: task.title.clone(),
            timestamp: at,
        }
    }

    /// `task_completed` or `task_reopened`, depending on the task's new state.
    pub fn task_toggled(case: &Case, task: &Task, at: DateTime<Utc>) -> Self {
        let case_id = case.id.clone();
        let case_number = case.case_number.clone();
        let task_id = task.id.clone();
        let task_title = task.title.clone();
        if task.completed {
            Self::TaskCompleted {
                case_id,
                case_number,
                task_id,
                task_title,
                timestamp: at,
            }
        } else {
            Self::TaskReopened {
                case_id,
                case_number,
                task_id,
                task_title,
                timestamp: at,
            }
        }
    }

    pub fn test_webhook(at: DateTime<Utc>) -> Self {
        Self::TestWebhook {
            message: TEST_WEBHOOK_MESSAGE.to_string(),
            timestamp: at,
        }
    }

    /// Wire name of the event.
    pub fn action(&self) -> &'static str {
        match self {
            Self::CaseCreated { .. } => "case_created",
            Self::CaseUpdated { .. } => "case_updated",
            Self::CaseDeleted { .. } => "case_deleted",
            Self::TaskCreated { .. } => "task_created",
            Self::TaskCompleted { .. } => "task_completed",
            Self::TaskReopened { .. } => "task_reopened",
            Self::TestWebhook { .. } => "test_webhook",
        }
    }

    /// Case the event refers to, if any.
    pub fn case_id(&self) -> Option<&str> {
        match self {
            Self::CaseCreated { case_id, .. }
            | Self::CaseUpdated { case_id, .. }
            | Self::CaseDeleted { case_id, .. }
            | Self::TaskCreated { case_id, .. }
            | Self::TaskCompleted { case_id, .. }
            | Self::TaskReopened { case_id, .. } => Some(case_id),
            Self::TestWebhook { .. } => None,
        }
    }
}

/// Type alias for the event sender.
pub type EventSender = broadcast::Sender<CaseEvent>;

/// Type alias for the event receiver.
pub type EventReceiver = broadcast::Receiver<CaseEvent>;

/// Create a new event channel with default capacity.
pub fn create_event_channel() -> EventSender {
    let (tx, _rx) = broadcast::channel(100);
    tx
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 10, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_case_event_body() {
        let event = CaseEvent::CaseCreated {
            case_id: "c1".to_string(),
            case_number: "2024-017".to_string(),
            client_name: "Dana Levi".to_string(),
            timestamp: at(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["action"], "case_created");
        assert_eq!(json["caseId"], "c1");
        assert_eq!(json["caseNumber"], "2024-017");
        assert_eq!(json["clientName"], "Dana Levi");
        assert_eq!(json["timestamp"], "2024-06-10T12:00:00Z");
        assert_eq!(event.action(), "case_created");
    }

    #[test]
    fn test_task_event_body() {
        let event = CaseEvent::TaskReopened {
            case_id: "c1".to_string(),
            case_number: "2024-017".to_string(),
            task_id: "t1".to_string(),
            task_title: "File motion".to_string(),
            timestamp: at(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["action"], "task_reopened");
        assert_eq!(json["taskId"], "t1");
        assert_eq!(json["taskTitle"], "File motion");
        assert!(json.get("clientName").is_none());
    }

    #[test]
    fn test_test_webhook_body() {
        let json = serde_json::to_value(CaseEvent::test_webhook(at())).unwrap();
        assert_eq!(json["action"], "test_webhook");
        assert_eq!(json["message"], TEST_WEBHOOK_MESSAGE);
        assert!(json.get("caseId").is_none());
    }
}

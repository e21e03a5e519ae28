//! The case store: sole owner of the case/task collection.
//!
//! A `CaseStore` is constructed once per session with [`CaseStore::load`].
//! Every mutation builds the next collection, persists it, and only then
//! replaces the in-memory state, so a failed write leaves the store as it
//! was. Notifying mutations publish a [`CaseEvent`] after the commit.

use std::collections::HashSet;

use chrono::{NaiveDate, Utc};
use docket_db::{settings, snapshot, DbError, DbPool};
use tracing::{debug, info, warn};

use crate::case::model::{Case, CaseDraft, CasePatch};
use crate::error::{DocketError, DocketResult};
use crate::event::{create_event_channel, CaseEvent, EventReceiver, EventSender};
use crate::task::model::{Task, TaskDraft, TaskPatch};

/// File name offered for an export taken on `date`.
pub fn export_file_name(date: NaiveDate) -> String {
    format!("case-tracker-export-{}.json", date.format("%Y-%m-%d"))
}

pub struct CaseStore {
    pool: DbPool,
    cases: Vec<Case>,
    events: EventSender,
    last_error: Option<String>,
}

impl CaseStore {
    /// Load the persisted collection from `pool`.
    pub fn load(pool: DbPool, events: EventSender) -> DocketResult<Self> {
        let cases: Vec<Case> = snapshot::load_cases(&pool)?;
        info!(cases = cases.len(), "Case store loaded");
        Ok(Self {
            pool,
            cases,
            events,
            last_error: None,
        })
    }

    /// Load for a command that replaces the whole collection.
    ///
    /// An unreadable snapshot is logged and treated as empty, so an import
    /// can recover from it. The stored snapshot is only overwritten once a
    /// replacement commits. Storage failures other than corruption still fail.
    pub fn load_for_replace(pool: DbPool, events: EventSender) -> DocketResult<Self> {
        match snapshot::load_cases::<Case>(&pool) {
            Ok(cases) => {
                info!(cases = cases.len(), "Case store loaded");
                Ok(Self {
                    pool,
                    cases,
                    events,
                    last_error: None,
                })
            }
            Err(e @ DbError::Corrupt { .. }) => {
                warn!(error = %e, "Stored snapshot is unreadable, starting empty for replacement");
                Ok(Self {
                    pool,
                    cases: Vec::new(),
                    events,
                    last_error: Some(e.to_string()),
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Store over an empty in-memory backend with its own event channel.
    pub fn in_memory() -> Self {
        Self {
            pool: docket_db::in_memory(),
            cases: Vec::new(),
            events: create_event_channel(),
            last_error: None,
        }
    }

    /// Subscribe to events published after this call.
    pub fn subscribe(&self) -> EventReceiver {
        self.events.subscribe()
    }

    /// Backend the store persists to.
    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    /// All cases in insertion order.
    pub fn cases(&self) -> &[Case] {
        &self.cases
    }

    /// Look up a case by id.
    pub fn get_case(&self, id: &str) -> Option<&Case> {
        self.cases.iter().find(|c| c.id == id)
    }

    /// Message recorded by the last failed import or an unreadable snapshot,
    /// cleared by a successful import.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Create a case from form input and append it to the collection.
    pub fn add_case(&mut self, draft: CaseDraft) -> DocketResult<Case> {
        let now = Utc::now();
        let case = Case::from_draft(draft, now)?;

        let mut next = self.cases.clone();
        next.push(case.clone());
        self.commit(next)?;

        info!(case_id = %case.id, case_number = %case.case_number, "Case created");
        self.emit(CaseEvent::case_created(&case, now));
        Ok(case)
    }

    /// Apply a partial update. Returns `None` when no case has this id.
    pub fn update_case(&mut self, id: &str, patch: &CasePatch) -> DocketResult<Option<Case>> {
        let Some(index) = self.position(id) else {
            debug!(case_id = %id, "update_case: case not found");
            return Ok(None);
        };

        let now = Utc::now();
        let updated = self.cases[index].merged(patch, now)?;

        let mut next = self.cases.clone();
        next[index] = updated.clone();
        self.commit(next)?;

        info!(case_id = %id, status = %updated.status, "Case updated");
        self.emit(CaseEvent::case_updated(&updated, now));
        Ok(Some(updated))
    }

    /// Remove a case together with all of its tasks. Returns the removed case.
    pub fn delete_case(&mut self, id: &str) -> DocketResult<Option<Case>> {
        let Some(index) = self.position(id) else {
            debug!(case_id = %id, "delete_case: case not found");
            return Ok(None);
        };

        let mut next = self.cases.clone();
        let removed = next.remove(index);
        self.commit(next)?;

        info!(case_id = %id, tasks = removed.tasks.len(), "Case deleted");
        self.emit(CaseEvent::case_deleted(&removed, Utc::now()));
        Ok(Some(removed))
    }

    /// Append a task to a case. Returns `None` when the case does not exist.
    pub fn add_task(&mut self, case_id: &str, draft: TaskDraft) -> DocketResult<Option<Task>> {
        let Some(index) = self.position(case_id) else {
            debug!(case_id = %case_id, "add_task: case not found");
            return Ok(None);
        };

        let now = Utc::now();
        let task = Task::from_draft(case_id, draft, now)?;

        let mut next = self.cases.clone();
        next[index].tasks.push(task.clone());
        next[index].updated_at = now;
        self.commit(next)?;

        info!(case_id = %case_id, task_id = %task.id, "Task created");
        self.emit(CaseEvent::task_created(&self.cases[index], &task, now));
        Ok(Some(task))
    }

    /// Apply a partial update to a task. Returns `None` when case or task is missing.
    pub fn update_task(
        &mut self,
        case_id: &str,
        task_id: &str,
        patch: &TaskPatch,
    ) -> DocketResult<Option<Task>> {
        let Some((ci, ti)) = self.task_position(case_id, task_id) else {
            debug!(case_id = %case_id, task_id = %task_id, "update_task: not found");
            return Ok(None);
        };

        let updated = self.cases[ci].tasks[ti].merged(patch)?;

        let mut next = self.cases.clone();
        next[ci].tasks[ti] = updated.clone();
        next[ci].updated_at = Utc::now();
        self.commit(next)?;

        info!(case_id = %case_id, task_id = %task_id, "Task updated");
        Ok(Some(updated))
    }

    /// Flip a task's completed flag. Returns the new state, or `None` when not found.
    pub fn toggle_task_completion(
        &mut self,
        case_id: &str,
        task_id: &str,
    ) -> DocketResult<Option<bool>> {
        let Some((ci, ti)) = self.task_position(case_id, task_id) else {
            debug!(case_id = %case_id, task_id = %task_id, "toggle_task_completion: not found");
            return Ok(None);
        };

        let now = Utc::now();
        let mut next = self.cases.clone();
        let completed = !next[ci].tasks[ti].completed;
        next[ci].tasks[ti].completed = completed;
        next[ci].updated_at = now;
        self.commit(next)?;

        info!(case_id = %case_id, task_id = %task_id, completed, "Task toggled");
        let case = &self.cases[ci];
        self.emit(CaseEvent::task_toggled(case, &case.tasks[ti], now));
        Ok(Some(completed))
    }

    /// Remove a task from its case. Returns the removed task.
    pub fn delete_task(&mut self, case_id: &str, task_id: &str) -> DocketResult<Option<Task>> {
        let Some((ci, ti)) = self.task_position(case_id, task_id) else {
            debug!(case_id = %case_id, task_id = %task_id, "delete_task: not found");
            return Ok(None);
        };

        let mut next = self.cases.clone();
        let removed = next[ci].tasks.remove(ti);
        next[ci].updated_at = Utc::now();
        self.commit(next)?;

        info!(case_id = %case_id, task_id = %task_id, "Task deleted");
        Ok(Some(removed))
    }

    /// Pretty-printed JSON array of every case with its tasks.
    pub fn export_data(&self) -> DocketResult<String> {
        Ok(serde_json::to_string_pretty(&self.cases)?)
    }

    /// Replace the whole collection with a previously exported snapshot.
    ///
    /// Returns the number of imported cases. On failure nothing changes
    /// except the recorded [`last_error`](Self::last_error).
    pub fn import_data(&mut self, raw: &str) -> DocketResult<usize> {
        match parse_import(raw) {
            Ok(cases) => {
                let count = cases.len();
                self.commit(cases)?;
                self.last_error = None;
                info!(cases = count, "Data imported");
                Ok(count)
            }
            Err(e) => {
                warn!(error = %e, "Import rejected");
                self.last_error = Some(format!("Failed to import data. {e}"));
                Err(e)
            }
        }
    }

    /// Persist the webhook endpoint. An empty URL clears it.
    pub fn set_webhook_url(&self, url: &str) -> DocketResult<()> {
        settings::set_webhook_url(&self.pool, url)?;
        info!(configured = !url.trim().is_empty(), "Webhook URL saved");
        Ok(())
    }

    /// The configured webhook endpoint, if any.
    pub fn webhook_url(&self) -> DocketResult<Option<String>> {
        Ok(settings::get_webhook_url(&self.pool)?)
    }

    fn position(&self, case_id: &str) -> Option<usize> {
        self.cases.iter().position(|c| c.id == case_id)
    }

    fn task_position(&self, case_id: &str, task_id: &str) -> Option<(usize, usize)> {
        let ci = self.position(case_id)?;
        let ti = self.cases[ci].tasks.iter().position(|t| t.id == task_id)?;
        Some((ci, ti))
    }

    fn commit(&mut self, next: Vec<Case>) -> DocketResult<()> {
        snapshot::save_cases(&self.pool, &next)?;
        self.cases = next;
        Ok(())
    }

    fn emit(&self, event: CaseEvent) {
        let action = event.action();
        if self.events.send(event).is_err() {
            debug!(action, "No event subscribers");
        }
    }
}

/// Parse and validate an import document without touching any state.
fn parse_import(raw: &str) -> DocketResult<Vec<Case>> {
    let value: serde_json::Value = serde_json::from_str(raw)
        .map_err(|e| DocketError::import_format(format!("not valid JSON: {e}")))?;

    if !value.is_array() {
        return Err(DocketError::import_format("Imported data is not an array"));
    }

    let cases: Vec<Case> = serde_json::from_value(value)
        .map_err(|e| DocketError::import_format(format!("unexpected case shape: {e}")))?;

    let mut seen = HashSet::new();
    for case in &cases {
        if !seen.insert(case.id.as_str()) {
            return Err(DocketError::import_format(format!("duplicate case id '{}'", case.id)));
        }
        let mut task_ids = HashSet::new();
        for task in &case.tasks {
            if task.case_id != case.id {
                return Err(DocketError::import_format(format!(
                    "task '{}' references case '{}' but belongs to case '{}'",
                    task.id, task.case_id, case.id
                )));
            }
            if !task_ids.insert(task.id.as_str()) {
                return Err(DocketError::import_format(format!(
                    "duplicate task id '{}' in case '{}'",
                    task.id, case.id
                )));
            }
            if task.title.trim().is_empty() {
                return Err(DocketError::import_format(format!(
                    "task '{}' in case '{}' has no title",
                    task.id, case.id
                )));
            }
        }
    }

    Ok(cases)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::case::model::CaseStatus;
    use tokio::sync::broadcast::error::TryRecvError;

    fn draft(number: &str, status: CaseStatus) -> CaseDraft {
        CaseDraft {
            case_number: number.to_string(),
            court_case_number: format!("CC-{number}"),
            description: "Contract dispute".to_string(),
            client_name: "Dana Levi".to_string(),
            open_date: "2024-06-03".to_string(),
            opponent: "Harbor Properties Ltd".to_string(),
            status,
            next_hearing_date: None,
        }
    }

    fn drain(rx: &mut EventReceiver) -> Vec<&'static str> {
        let mut actions = Vec::new();
        loop {
            match rx.try_recv() {
                Ok(event) => actions.push(event.action()),
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
                Err(TryRecvError::Lagged(_)) => continue,
            }
        }
        actions
    }

    #[test]
    fn test_add_case() {
        let mut store = CaseStore::in_memory();
        let mut rx = store.subscribe();

        let a = store.add_case(draft("1", CaseStatus::New)).unwrap();
        let b = store.add_case(draft("2", CaseStatus::New)).unwrap();

        assert_ne!(a.id, b.id);
        assert!(a.tasks.is_empty());
        assert_eq!(a.created_at, a.updated_at);
        assert_eq!(store.cases().len(), 2);
        assert_eq!(store.get_case(&a.id), Some(&a));
        assert_eq!(drain(&mut rx), vec!["case_created", "case_created"]);
    }

    #[test]
    fn test_add_case_invalid_leaves_store_untouched() {
        let mut store = CaseStore::in_memory();
        let mut bad = draft("1", CaseStatus::New);
        bad.open_date = "yesterday".to_string();
        assert!(store.add_case(bad).is_err());
        assert!(store.cases().is_empty());
    }

    #[test]
    fn test_update_case() {
        let mut store = CaseStore::in_memory();
        let case = store.add_case(draft("1", CaseStatus::New)).unwrap();
        let mut rx = store.subscribe();

        let patch = CasePatch {
            status: Some(CaseStatus::AwaitingHearing),
            next_hearing_date: Some("2024-07-01".to_string()),
            ..CasePatch::default()
        };
        let updated = store.update_case(&case.id, &patch).unwrap().unwrap();

        assert_eq!(updated.status, CaseStatus::AwaitingHearing);
        assert_eq!(updated.next_hearing_date, NaiveDate::from_ymd_opt(2024, 7, 1));
        assert!(updated.updated_at >= case.updated_at);
        assert_eq!(updated.created_at, case.created_at);
        assert_eq!(drain(&mut rx), vec!["case_updated"]);
    }

    #[test]
    fn test_missing_ids_are_silent_noops() {
        let mut store = CaseStore::in_memory();
        let case = store.add_case(draft("1", CaseStatus::New)).unwrap();
        let mut rx = store.subscribe();

        assert!(store.update_case("nope", &CasePatch::status(CaseStatus::Won)).unwrap().is_none());
        assert!(store.delete_case("nope").unwrap().is_none());
        assert!(store.add_task("nope", TaskDraft::new("x")).unwrap().is_none());
        assert!(store.update_task(&case.id, "nope", &TaskPatch::default()).unwrap().is_none());
        assert!(store.toggle_task_completion(&case.id, "nope").unwrap().is_none());
        assert!(store.delete_task("nope", "nope").unwrap().is_none());

        assert_eq!(store.cases(), &[case]);
        assert!(drain(&mut rx).is_empty());
    }

    #[test]
    fn test_delete_case_cascades() {
        let mut store = CaseStore::in_memory();
        let keep = store.add_case(draft("1", CaseStatus::New)).unwrap();
        let gone = store.add_case(draft("2", CaseStatus::New)).unwrap();
        store.add_task(&gone.id, TaskDraft::new("Draft reply")).unwrap();
        store.add_task(&gone.id, TaskDraft::new("Serve papers")).unwrap();
        store.add_task(&keep.id, TaskDraft::new("Call client")).unwrap();
        let mut rx = store.subscribe();

        let removed = store.delete_case(&gone.id).unwrap().unwrap();
        assert_eq!(removed.tasks.len(), 2);
        assert!(store.get_case(&gone.id).is_none());
        assert!(store
            .cases()
            .iter()
            .flat_map(|c| c.tasks.iter())
            .all(|t| t.case_id != gone.id));
        assert_eq!(store.get_case(&keep.id).unwrap().tasks.len(), 1);
        assert_eq!(drain(&mut rx), vec!["case_deleted"]);
    }

    #[test]
    fn test_task_lifecycle() {
        let mut store = CaseStore::in_memory();
        let case = store.add_case(draft("1", CaseStatus::New)).unwrap();
        let mut rx = store.subscribe();

        let task = store
            .add_task(&case.id, TaskDraft::new("File motion").due("2024-06-14"))
            .unwrap()
            .unwrap();
        assert_eq!(task.case_id, case.id);
        assert!(!task.completed);
        let after_add = store.get_case(&case.id).unwrap().updated_at;
        assert!(after_add >= case.updated_at);

        let patch = TaskPatch {
            title: Some("File amended motion".to_string()),
            ..TaskPatch::default()
        };
        let updated = store.update_task(&case.id, &task.id, &patch).unwrap().unwrap();
        assert_eq!(updated.title, "File amended motion");
        assert_eq!(updated.due_date, task.due_date);

        let removed = store.delete_task(&case.id, &task.id).unwrap().unwrap();
        assert_eq!(removed.id, task.id);
        assert!(store.get_case(&case.id).unwrap().tasks.is_empty());

        // Only creation notifies; edits and deletes of tasks are silent.
        assert_eq!(drain(&mut rx), vec!["task_created"]);
    }

    #[test]
    fn test_toggle_is_involution() {
        let mut store = CaseStore::in_memory();
        let case = store.add_case(draft("1", CaseStatus::New)).unwrap();
        let task = store.add_task(&case.id, TaskDraft::new("Sign")).unwrap().unwrap();
        let mut rx = store.subscribe();

        assert_eq!(store.toggle_task_completion(&case.id, &task.id).unwrap(), Some(true));
        assert_eq!(store.toggle_task_completion(&case.id, &task.id).unwrap(), Some(false));

        let current = store.get_case(&case.id).unwrap().task(&task.id).unwrap();
        assert_eq!(current.completed, task.completed);
        assert_eq!(drain(&mut rx), vec!["task_completed", "task_reopened"]);
    }

    #[test]
    fn test_export_import_roundtrip() {
        let mut store = CaseStore::in_memory();
        let case = store.add_case(draft("1", CaseStatus::Pending)).unwrap();
        store.add_task(&case.id, TaskDraft::new("Collect exhibits").due("2024-06-20")).unwrap();
        store.add_task(&case.id, TaskDraft::new("Brief witness")).unwrap();
        store.add_case(draft("2", CaseStatus::Won)).unwrap();

        let exported = store.export_data().unwrap();

        let mut other = CaseStore::in_memory();
        let count = other.import_data(&exported).unwrap();
        assert_eq!(count, 2);
        assert_eq!(other.cases(), store.cases());
        assert!(other.last_error().is_none());
    }

    #[test]
    fn test_import_non_array_rejected() {
        let mut store = CaseStore::in_memory();
        let case = store.add_case(draft("1", CaseStatus::New)).unwrap();

        let err = store.import_data("{}").unwrap_err();
        assert!(matches!(err, DocketError::ImportFormat(_)));
        assert_eq!(store.cases(), &[case]);
        assert!(store.last_error().unwrap().contains("not an array"));
    }

    #[test]
    fn test_import_invalid_json_rejected() {
        let mut store = CaseStore::in_memory();
        let err = store.import_data("[{").unwrap_err();
        assert!(matches!(err, DocketError::ImportFormat(_)));
        assert!(store.last_error().is_some());
    }

    #[test]
    fn test_import_rejects_mismatched_task_owner() {
        let mut store = CaseStore::in_memory();
        let case = store.add_case(draft("1", CaseStatus::New)).unwrap();
        store.add_task(&case.id, TaskDraft::new("Task")).unwrap();

        let exported = store.export_data().unwrap();
        let owner = format!("\"caseId\": \"{}\"", case.id);
        let tampered = exported.replacen(&owner, "\"caseId\": \"other\"", 1);

        let mut fresh = CaseStore::in_memory();
        assert!(fresh.import_data(&tampered).is_err());
        assert!(fresh.cases().is_empty());
    }

    fn import_with_tasks(tasks: &str) -> String {
        format!(
            r#"[{{
              "id": "c-1",
              "caseNumber": "17",
              "courtCaseNumber": "TA-55123-06-24",
              "description": "Lease dispute",
              "clientName": "Dana Levi",
              "openDate": "2024-06-03",
              "opponent": "Harbor Properties",
              "status": "new",
              "tasks": [{tasks}],
              "createdAt": "2024-06-03T09:00:00Z",
              "updatedAt": "2024-06-03T09:00:00Z"
            }}]"#
        )
    }

    fn task_json(id: &str, title: &str) -> String {
        format!(
            r#"{{"id": "{id}", "caseId": "c-1", "title": "{title}", "completed": false,
                "createdAt": "2024-06-03T09:00:00Z"}}"#
        )
    }

    #[test]
    fn test_import_recovers_unreadable_snapshot() {
        let pool = docket_db::in_memory();
        pool.put(snapshot::SNAPSHOT_KEY, "{not json").unwrap();

        assert!(CaseStore::load(pool.clone(), create_event_channel()).is_err());

        let mut store = CaseStore::load_for_replace(pool.clone(), create_event_channel()).unwrap();
        assert!(store.cases().is_empty());
        assert!(store.last_error().is_some());

        // A rejected import leaves the stored snapshot as it was.
        assert!(store.import_data("{}").is_err());
        assert_eq!(pool.get(snapshot::SNAPSHOT_KEY).unwrap().as_deref(), Some("{not json"));

        let raw = import_with_tasks(&task_json("t1", "File motion"));
        assert_eq!(store.import_data(&raw).unwrap(), 1);
        assert!(store.last_error().is_none());

        let reloaded = CaseStore::load(pool, create_event_channel()).unwrap();
        assert_eq!(reloaded.cases().len(), 1);
        assert_eq!(reloaded.cases()[0].tasks[0].id, "t1");
    }

    #[test]
    fn test_import_rejects_duplicate_task_ids() {
        let raw = import_with_tasks(&format!(
            "{},{}",
            task_json("t1", "File motion"),
            task_json("t1", "Call client")
        ));

        let mut store = CaseStore::in_memory();
        let err = store.import_data(&raw).unwrap_err();
        assert!(matches!(err, DocketError::ImportFormat(_)));
        assert!(store.cases().is_empty());
        assert!(store.last_error().unwrap().contains("duplicate task id 't1'"));
    }

    #[test]
    fn test_import_rejects_blank_task_title() {
        let raw = import_with_tasks(&task_json("t1", "  "));

        let mut store = CaseStore::in_memory();
        assert!(matches!(store.import_data(&raw), Err(DocketError::ImportFormat(_))));
        assert!(store.cases().is_empty());

        let valid = import_with_tasks(&task_json("t1", "File motion"));
        assert_eq!(store.import_data(&valid).unwrap(), 1);
        assert_eq!(store.cases()[0].tasks[0].title, "File motion");
    }

    #[test]
    fn test_import_accepts_browser_export() {
        let raw = r#"[
          {
            "id": "0b6c8f2e-1111-4a4a-9999-000000000001",
            "caseNumber": "17",
            "courtCaseNumber": "TA-55123-06-24",
            "description": "Lease dispute",
            "clientName": "Dana Levi",
            "openDate": "2024-06-03T00:00:00.000Z",
            "opponent": "Harbor Properties",
            "status": "in_progress",
            "tasks": [
              {
                "id": "t-1",
                "caseId": "0b6c8f2e-1111-4a4a-9999-000000000001",
                "title": "Prepare affidavit",
                "completed": false,
                "createdAt": "2024-06-04T10:00:00.000Z"
              }
            ],
            "createdAt": "2024-06-03T09:00:00.000Z",
            "updatedAt": "2024-06-04T10:00:00.000Z"
          }
        ]"#;

        let mut store = CaseStore::in_memory();
        assert_eq!(store.import_data(raw).unwrap(), 1);
        let case = &store.cases()[0];
        assert_eq!(case.open_date, NaiveDate::from_ymd_opt(2024, 6, 3).unwrap());
        assert_eq!(case.status, CaseStatus::InProgress);
        assert_eq!(case.tasks[0].title, "Prepare affidavit");
    }

    #[test]
    fn test_successful_import_clears_error() {
        let mut store = CaseStore::in_memory();
        assert!(store.import_data("42").is_err());
        assert!(store.last_error().is_some());
        store.import_data("[]").unwrap();
        assert!(store.last_error().is_none());
    }

    #[test]
    fn test_state_survives_reload() {
        let dir = tempfile::tempdir().unwrap();
        let pool = docket_db::init_pool(dir.path()).unwrap();

        let case_id = {
            let mut store = CaseStore::load(pool.clone(), create_event_channel()).unwrap();
            let case = store.add_case(draft("1", CaseStatus::New)).unwrap();
            store.add_task(&case.id, TaskDraft::new("Persist me")).unwrap();
            case.id
        };

        let reloaded = CaseStore::load(pool, create_event_channel()).unwrap();
        let case = reloaded.get_case(&case_id).unwrap();
        assert_eq!(case.tasks.len(), 1);
        assert_eq!(case.tasks[0].title, "Persist me");
    }

    #[test]
    fn test_webhook_url_setting() {
        let store = CaseStore::in_memory();
        assert_eq!(store.webhook_url().unwrap(), None);
        store.set_webhook_url("https://hooks.example.com/catch/1").unwrap();
        assert_eq!(
            store.webhook_url().unwrap().as_deref(),
            Some("https://hooks.example.com/catch/1")
        );
        // The URL lives outside the case snapshot.
        assert!(store.export_data().unwrap().trim() == "[]");
    }

    #[test]
    fn test_export_file_name() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        assert_eq!(export_file_name(date), "case-tracker-export-2024-06-10.json");
    }
}

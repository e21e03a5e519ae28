//! Dashboard and report aggregation over the case collection.

pub mod model;

use chrono::{Datelike, NaiveDate};

use crate::case::model::{Case, CaseStatus};
use model::{CaseSummary, Dashboard, MonthCount, Report, Slice, StatusCount, TaskStats};

/// Length of the dashboard's hearing and recent-case lists.
pub const DASHBOARD_LIST_LIMIT: usize = 5;

/// Months covered by the intake report, ending with the current month.
pub const INTAKE_MONTHS: u32 = 6;

const OUTCOME_STATUSES: [CaseStatus; 4] = [
    CaseStatus::Won,
    CaseStatus::Lost,
    CaseStatus::Settled,
    CaseStatus::Closed,
];

/// Cases per status in declaration order. Statuses with no cases are omitted.
pub fn status_counts(cases: &[Case]) -> Vec<StatusCount> {
    count_statuses(cases, &CaseStatus::ALL)
}

fn count_statuses(cases: &[Case], statuses: &[CaseStatus]) -> Vec<StatusCount> {
    statuses
        .iter()
        .map(|&status| StatusCount {
            status,
            count: cases.iter().filter(|c| c.status == status).count(),
        })
        .filter(|sc| sc.count > 0)
        .collect()
}

/// Task totals across every case.
pub fn task_stats(cases: &[Case]) -> TaskStats {
    cases.iter().fold(TaskStats::default(), |acc, case| TaskStats {
        total: acc.total + case.tasks.len(),
        completed: acc.completed + case.completed_tasks(),
    })
}

/// Build the dashboard as seen on `today`.
pub fn dashboard(cases: &[Case], today: NaiveDate) -> Dashboard {
    let mut upcoming: Vec<&Case> = cases
        .iter()
        .filter(|c| c.next_hearing_date.is_some_and(|d| d > today))
        .collect();
    upcoming.sort_by_key(|c| c.next_hearing_date);

    let mut recent: Vec<&Case> = cases.iter().collect();
    recent.sort_by(|a, b| b.open_date.cmp(&a.open_date));

    Dashboard {
        total_cases: cases.len(),
        active_cases: cases.iter().filter(|c| !c.status.is_concluded()).count(),
        tasks: task_stats(cases),
        status_counts: status_counts(cases),
        upcoming_hearings: upcoming
            .into_iter()
            .take(DASHBOARD_LIST_LIMIT)
            .map(CaseSummary::from)
            .collect(),
        recent_cases: recent
            .into_iter()
            .take(DASHBOARD_LIST_LIMIT)
            .map(CaseSummary::from)
            .collect(),
    }
}

/// Build the reports screen as seen on `today`.
pub fn report(cases: &[Case], today: NaiveDate) -> Report {
    let stats = task_stats(cases);
    let task_completion = [
        Slice {
            label: "Completed",
            count: stats.completed,
        },
        Slice {
            label: "Pending",
            count: stats.pending(),
        },
    ]
    .into_iter()
    .filter(|s| s.count > 0)
    .collect();

    Report {
        status_distribution: status_counts(cases),
        outcomes: count_statuses(cases, &OUTCOME_STATUSES),
        monthly_intake: monthly_intake(cases, today),
        task_completion,
    }
}

/// Cases opened per month for the [`INTAKE_MONTHS`] months ending with `today`'s month.
pub fn monthly_intake(cases: &[Case], today: NaiveDate) -> Vec<MonthCount> {
    let current = month_index(today.year(), today.month());
    let first = current - (INTAKE_MONTHS as i32 - 1);

    (first..=current)
        .map(|index| {
            let (year, month) = from_month_index(index);
            let count = cases
                .iter()
                .filter(|c| month_index(c.open_date.year(), c.open_date.month()) == index)
                .count();
            let label = NaiveDate::from_ymd_opt(year, month, 1)
                .map(|d| d.format("%b %Y").to_string())
                .unwrap_or_default();
            MonthCount { year, month, label, count }
        })
        .collect()
}

fn month_index(year: i32, month: u32) -> i32 {
    year * 12 + (month as i32 - 1)
}

fn from_month_index(index: i32) -> (i32, u32) {
    (index.div_euclid(12), index.rem_euclid(12) as u32 + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::model::Task;
    use chrono::{TimeZone, Utc};

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn case(id: &str, status: CaseStatus, opened: NaiveDate) -> Case {
        let at = Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap();
        Case {
            id: id.to_string(),
            case_number: id.to_string(),
            court_case_number: format!("CC-{id}"),
            description: "Matter".to_string(),
            client_name: format!("Client {id}"),
            open_date: opened,
            opponent: "Opponent".to_string(),
            status,
            next_hearing_date: None,
            tasks: Vec::new(),
            created_at: at,
            updated_at: at,
        }
    }

    fn with_tasks(mut case: Case, done: usize, open: usize) -> Case {
        let at = Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap();
        for i in 0..done + open {
            case.tasks.push(Task {
                id: format!("{}-{i}", case.id),
                case_id: case.id.clone(),
                title: format!("Task {i}"),
                description: None,
                due_date: None,
                completed: i < done,
                created_at: at,
            });
        }
        case
    }

    #[test]
    fn test_status_counts_omit_zero() {
        let cases = vec![
            case("1", CaseStatus::New, ymd(2024, 6, 1)),
            case("2", CaseStatus::Closed, ymd(2024, 6, 1)),
            case("3", CaseStatus::New, ymd(2024, 6, 1)),
        ];
        assert_eq!(
            status_counts(&cases),
            vec![
                StatusCount { status: CaseStatus::New, count: 2 },
                StatusCount { status: CaseStatus::Closed, count: 1 },
            ]
        );
        assert!(status_counts(&[]).is_empty());
    }

    #[test]
    fn test_task_stats() {
        assert_eq!(task_stats(&[]).ratio(), 0.0);
        assert_eq!(task_stats(&[]).completion_percent(), 0);

        let cases = vec![
            with_tasks(case("1", CaseStatus::New, ymd(2024, 6, 1)), 1, 1),
            with_tasks(case("2", CaseStatus::New, ymd(2024, 6, 1)), 1, 0),
        ];
        let stats = task_stats(&cases);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.completed, 2);
        assert_eq!(stats.pending(), 1);
        assert_eq!(stats.completion_percent(), 67);
    }

    #[test]
    fn test_dashboard() {
        let today = ymd(2024, 6, 10);
        let mut soon = case("soon", CaseStatus::AwaitingHearing, ymd(2024, 5, 1));
        soon.next_hearing_date = Some(ymd(2024, 6, 12));
        let mut later = case("later", CaseStatus::Pending, ymd(2024, 4, 1));
        later.next_hearing_date = Some(ymd(2024, 7, 1));
        let mut today_hearing = case("today", CaseStatus::Pending, ymd(2024, 6, 2));
        today_hearing.next_hearing_date = Some(today);
        let won = case("won", CaseStatus::Won, ymd(2024, 6, 5));

        let cases = vec![later, soon, today_hearing, won];
        let dash = dashboard(&cases, today);

        assert_eq!(dash.total_cases, 4);
        assert_eq!(dash.active_cases, 3);
        let hearings: Vec<&str> = dash.upcoming_hearings.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(hearings, vec!["soon", "later"]);
        let recent: Vec<&str> = dash.recent_cases.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(recent, vec!["won", "today", "soon", "later"]);
    }

    #[test]
    fn test_dashboard_limits_lists() {
        let today = ymd(2024, 6, 10);
        let cases: Vec<Case> = (1..=8)
            .map(|d| {
                let mut c = case(&d.to_string(), CaseStatus::New, ymd(2024, 5, d));
                c.next_hearing_date = Some(ymd(2024, 7, d));
                c
            })
            .collect();
        let dash = dashboard(&cases, today);
        assert_eq!(dash.upcoming_hearings.len(), DASHBOARD_LIST_LIMIT);
        assert_eq!(dash.recent_cases.len(), DASHBOARD_LIST_LIMIT);
        assert_eq!(dash.upcoming_hearings[0].id, "1");
        assert_eq!(dash.recent_cases[0].id, "8");
    }

    #[test]
    fn test_monthly_intake_spans_year_boundary() {
        let today = ymd(2024, 2, 15);
        let cases = vec![
            case("a", CaseStatus::New, ymd(2023, 9, 30)),
            case("b", CaseStatus::New, ymd(2023, 10, 1)),
            case("c", CaseStatus::New, ymd(2024, 2, 1)),
            case("d", CaseStatus::New, ymd(2024, 2, 28)),
        ];
        let intake = monthly_intake(&cases, today);
        let labels: Vec<&str> = intake.iter().map(|m| m.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["Sep 2023", "Oct 2023", "Nov 2023", "Dec 2023", "Jan 2024", "Feb 2024"]
        );
        let counts: Vec<usize> = intake.iter().map(|m| m.count).collect();
        assert_eq!(counts, vec![1, 1, 0, 0, 0, 2]);
    }

    #[test]
    fn test_report_outcomes_and_completion() {
        let today = ymd(2024, 6, 10);
        let cases = vec![
            with_tasks(case("1", CaseStatus::Won, ymd(2024, 6, 1)), 2, 0),
            case("2", CaseStatus::Settled, ymd(2024, 6, 1)),
            case("3", CaseStatus::Won, ymd(2024, 6, 1)),
            case("4", CaseStatus::New, ymd(2024, 6, 1)),
        ];
        let r = report(&cases, today);
        assert_eq!(
            r.outcomes,
            vec![
                StatusCount { status: CaseStatus::Won, count: 2 },
                StatusCount { status: CaseStatus::Settled, count: 1 },
            ]
        );
        assert_eq!(
            r.task_completion,
            vec![Slice {
                label: "Completed",
                count: 2
            }]
        );
        assert_eq!(r.monthly_intake.len(), INTAKE_MONTHS as usize);
        assert_eq!(r.monthly_intake.last().unwrap().count, 4);
    }
}

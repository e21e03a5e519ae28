//! Case listing and search.

pub mod model;

use model::{Case, CaseStatus};

/// Search criteria for the case list.
#[derive(Debug, Clone, Default)]
pub struct CaseFilter {
    pub query: Option<String>,
    pub status: Option<CaseStatus>,
}

impl CaseFilter {
    /// Case-insensitive match on case number, court case number, client,
    /// description and opponent, combined with the status filter.
    pub fn matches(&self, case: &Case) -> bool {
        if self.status.is_some_and(|s| s != case.status) {
            return false;
        }
        let Some(query) = self.query.as_deref().map(str::trim).filter(|q| !q.is_empty()) else {
            return true;
        };
        let needle = query.to_lowercase();
        [
            &case.case_number,
            &case.court_case_number,
            &case.client_name,
            &case.description,
            &case.opponent,
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
    }
}

/// Matching cases, most recently opened first.
pub fn list_cases<'a>(cases: &'a [Case], filter: &CaseFilter) -> Vec<&'a Case> {
    let mut matched: Vec<&Case> = cases.iter().filter(|c| filter.matches(c)).collect();
    matched.sort_by(|a, b| b.open_date.cmp(&a.open_date));
    matched
}

/// Resolve a case by full id or by an unambiguous id prefix.
///
/// Command-line users type the short ids shown in listings.
pub fn find_case<'a>(cases: &'a [Case], id_or_prefix: &str) -> Option<&'a Case> {
    if let Some(exact) = cases.iter().find(|c| c.id == id_or_prefix) {
        return Some(exact);
    }
    let mut candidates = cases.iter().filter(|c| c.id.starts_with(id_or_prefix));
    match (candidates.next(), candidates.next()) {
        (Some(only), None) if !id_or_prefix.is_empty() => Some(only),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn case(id: &str, client: &str, opened: u32, status: CaseStatus) -> Case {
        let at = Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap();
        Case {
            id: id.to_string(),
            case_number: format!("N-{id}"),
            court_case_number: format!("CC-{id}"),
            description: "Employment claim".to_string(),
            client_name: client.to_string(),
            open_date: NaiveDate::from_ymd_opt(2024, 5, opened).unwrap(),
            opponent: "Acme Corp".to_string(),
            status,
            next_hearing_date: None,
            tasks: Vec::new(),
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn test_list_sorted_by_open_date_desc() {
        let cases = vec![
            case("a", "Cohen", 3, CaseStatus::New),
            case("b", "Mizrahi", 20, CaseStatus::Won),
            case("c", "Peretz", 11, CaseStatus::New),
        ];
        let ids: Vec<&str> = list_cases(&cases, &CaseFilter::default())
            .iter()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
    }

    #[test]
    fn test_search_and_status() {
        let cases = vec![
            case("a", "Cohen", 3, CaseStatus::New),
            case("b", "Mizrahi", 20, CaseStatus::Won),
        ];

        let by_client = CaseFilter {
            query: Some("MIZ".to_string()),
            status: None,
        };
        assert_eq!(list_cases(&cases, &by_client).len(), 1);

        let by_opponent = CaseFilter {
            query: Some("acme".to_string()),
            status: Some(CaseStatus::New),
        };
        let hits = list_cases(&cases, &by_opponent);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "a");
    }

    #[test]
    fn test_find_case_by_prefix() {
        let cases = vec![
            case("abc123", "Cohen", 3, CaseStatus::New),
            case("abd456", "Levi", 4, CaseStatus::New),
        ];
        assert_eq!(find_case(&cases, "abc123").unwrap().client_name, "Cohen");
        assert_eq!(find_case(&cases, "abd").unwrap().client_name, "Levi");
        assert!(find_case(&cases, "ab").is_none());
        assert!(find_case(&cases, "").is_none());
        assert!(find_case(&cases, "zzz").is_none());
    }
}

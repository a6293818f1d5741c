//! List filtering for record collections.
//!
//! Case-insensitive substring search over the record's search fields combined
//! with an exact status match. Input order is preserved.

use serde::Deserialize;

use crate::models::Record;

/// Status filter value that matches every record.
pub const ALL_STATUSES: &str = "All";

/// Query parameters accepted by the list endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecordFilter {
    /// Search term
    #[serde(default)]
    pub q: Option<String>,
    /// Exact status label, or `All`
    #[serde(default)]
    pub status: Option<String>,
}

impl RecordFilter {
    pub fn is_empty(&self) -> bool {
        self.term().is_none() && self.status().is_none()
    }

    fn term(&self) -> Option<String> {
        self.q
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_lowercase)
    }

    fn status(&self) -> Option<&str> {
        self.status
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty() && *s != ALL_STATUSES)
    }

    /// Whether a single record passes the filter.
    pub fn matches<R: Record>(&self, record: &R) -> bool {
        passes(record, self.term().as_deref(), self.status())
    }

    /// Keep the records that pass the filter.
    pub fn apply<R: Record>(&self, records: Vec<R>) -> Vec<R> {
        if self.is_empty() {
            return records;
        }

        records.into_iter().filter(|r| self.matches(r)).collect()
    }
}

fn passes<R: Record>(record: &R, term: Option<&str>, status: Option<&str>) -> bool {
    let matches_search = match term {
        None => true,
        Some(term) => record
            .search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(term)),
    };

    let matches_status = match status {
        None => true,
        Some(status) => record.status_label() == status,
    };

    matches_search && matches_status
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Personnel, PersonnelStatus, Rank};
    use chrono::Utc;

    fn person(id: &str, name: &str, unit: &str, status: PersonnelStatus) -> Personnel {
        Personnel {
            id: id.to_string(),
            name: name.to_string(),
            rank: Rank::Corporal,
            unit: unit.to_string(),
            status,
            specialization: None,
            contact_info: None,
            notes: None,
            last_updated: Utc::now(),
        }
    }

    fn roster() -> Vec<Personnel> {
        let mut medic = person("P3", "Ana Vega", "Medical Corps", PersonnelStatus::Deployed);
        medic.specialization = Some("Field Surgeon".to_string());
        vec![
            person("P1", "John Doe", "1st Battalion", PersonnelStatus::Active),
            person("P2", "Mary Major", "2nd Battalion", PersonnelStatus::OnLeave),
            medic,
        ]
    }

    fn ids(records: &[Personnel]) -> Vec<&str> {
        records.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_empty_filter_keeps_everything() {
        let filter = RecordFilter::default();
        assert!(filter.is_empty());
        assert_eq!(ids(&filter.apply(roster())), vec!["P1", "P2", "P3"]);

        let all = RecordFilter {
            q: Some("  ".to_string()),
            status: Some("All".to_string()),
        };
        assert!(all.is_empty());
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let filter = RecordFilter {
            q: Some("BATTALION".to_string()),
            status: None,
        };
        assert_eq!(ids(&filter.apply(roster())), vec!["P1", "P2"]);

        let by_specialization = RecordFilter {
            q: Some("surg".to_string()),
            status: None,
        };
        assert_eq!(ids(&by_specialization.apply(roster())), vec!["P3"]);

        let by_rank = RecordFilter {
            q: Some("corporal".to_string()),
            status: None,
        };
        assert_eq!(by_rank.apply(roster()).len(), 3);
    }

    #[test]
    fn test_status_is_exact_match() {
        let filter = RecordFilter {
            q: None,
            status: Some("On Leave".to_string()),
        };
        assert_eq!(ids(&filter.apply(roster())), vec!["P2"]);

        let partial = RecordFilter {
            q: None,
            status: Some("Leave".to_string()),
        };
        assert!(partial.apply(roster()).is_empty());
    }

    #[test]
    fn test_search_and_status_combine() {
        let filter = RecordFilter {
            q: Some("battalion".to_string()),
            status: Some("Active".to_string()),
        };
        assert_eq!(ids(&filter.apply(roster())), vec!["P1"]);
        assert!(filter.matches(&roster()[0]));
        assert!(!filter.matches(&roster()[1]));
    }
}

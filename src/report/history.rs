use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::report::{ReportFormat, ReportKind};

/// One previously generated report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRecord {
    pub id: Uuid,
    pub name: String,
    pub kind: ReportKind,
    pub generated_on: NaiveDate,
    pub size_bytes: usize,
    pub format: ReportFormat,
}

impl ReportRecord {
    /// Human-readable artifact size, e.g. "2.4 KB"
    pub fn size_display(&self) -> String {
        let kb = self.size_bytes as f64 / 1024.0;
        if kb >= 1024.0 {
            format!("{:.1} MB", kb / 1024.0)
        } else {
            format!("{:.1} KB", kb)
        }
    }
}

/// In-memory log of generated reports, newest first
#[derive(Debug, Default)]
pub struct ReportLog {
    entries: Vec<ReportRecord>,
}

impl ReportLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a generated report and return its id
    pub fn record(
        &mut self,
        name: &str,
        kind: ReportKind,
        format: ReportFormat,
        size_bytes: usize,
        generated_on: NaiveDate,
    ) -> Uuid {
        let id = Uuid::new_v4();
        self.entries.insert(
            0,
            ReportRecord {
                id,
                name: name.to_string(),
                kind,
                generated_on,
                size_bytes,
                format,
            },
        );
        id
    }

    /// Remove one record; returns whether it existed
    pub fn remove(&mut self, id: Uuid) -> bool {
        let before = self.entries.len();
        self.entries.retain(|record| record.id != id);
        self.entries.len() != before
    }

    pub fn entries(&self) -> &[ReportRecord] {
        &self.entries
    }

    /// Case-insensitive search over report name and kind
    pub fn search(&self, query: &str) -> Vec<&ReportRecord> {
        let query = query.to_lowercase();
        self.entries
            .iter()
            .filter(|record| {
                record.name.to_lowercase().contains(&query)
                    || record.kind.to_string().to_lowercase().contains(&query)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log_with_two_reports() -> ReportLog {
        let mut log = ReportLog::new();
        log.record(
            "Classification Summary Report",
            ReportKind::Summary,
            ReportFormat::Pdf,
            2457,
            NaiveDate::from_ymd_opt(2024, 2, 10).unwrap(),
        );
        log.record(
            "Detailed Analysis Report",
            ReportKind::Detailed,
            ReportFormat::Excel,
            5 * 1024 * 1024,
            NaiveDate::from_ymd_opt(2024, 2, 11).unwrap(),
        );
        log
    }

    #[test]
    fn newest_record_comes_first() {
        let log = log_with_two_reports();
        assert_eq!(log.entries().len(), 2);
        assert_eq!(log.entries()[0].kind, ReportKind::Detailed);
    }

    #[test]
    fn search_matches_name_and_kind_case_insensitively() {
        let log = log_with_two_reports();

        assert_eq!(log.search("summary").len(), 1);
        assert_eq!(log.search("DETAILED").len(), 1);
        assert_eq!(log.search("report").len(), 2);
        assert_eq!(log.search("trend").len(), 0);
        assert_eq!(log.search("").len(), 2);
    }

    #[test]
    fn remove_deletes_exactly_one_record() {
        let mut log = log_with_two_reports();
        let id = log.entries()[0].id;

        assert!(log.remove(id));
        assert!(!log.remove(id));
        assert_eq!(log.entries().len(), 1);
    }

    #[test]
    fn size_display_picks_sensible_units() {
        let log = log_with_two_reports();
        assert_eq!(log.entries()[1].size_display(), "2.4 KB");
        assert_eq!(log.entries()[0].size_display(), "5.0 MB");
    }
}

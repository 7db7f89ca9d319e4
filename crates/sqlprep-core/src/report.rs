//! Run report schema (stable v1)
//!
//! This schema is STABLE and VERSIONED.
//! Breaking changes require a new version.

use serde::{Deserialize, Serialize};
use crate::outcome::{FileOutcome, OutcomeKind};

/// Report schema version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportVersion {
    /// Major version (breaking changes)
    pub major: u32,

    /// Minor version (backward-compatible additions)
    pub minor: u32,
}

impl ReportVersion {
    /// Current report schema version
    pub const CURRENT: ReportVersion = ReportVersion { major: 1, minor: 0 };
}

impl std::fmt::Display for ReportVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Summary statistics for a run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    /// Total number of outcomes
    pub total: usize,

    /// Files that received a DROP header
    pub processed: usize,

    /// Files split into schema + seed
    pub split: usize,

    /// Files without seed data
    pub no_seed_data: usize,

    /// Missing files
    pub skipped: usize,

    /// DROP statements generated across all files
    pub drop_statements: usize,
}

impl ReportSummary {
    fn record(&mut self, outcome: &FileOutcome) {
        match outcome.kind {
            OutcomeKind::DropsInjected => self.processed += 1,
            OutcomeKind::Split => self.split += 1,
            OutcomeKind::NoSeedData => self.no_seed_data += 1,
            OutcomeKind::Skipped => self.skipped += 1,
        }
        self.drop_statements += outcome.drop_count.unwrap_or(0);
        self.total += 1;
    }
}

/// Run report (report.json v1)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Schema version
    pub version: ReportVersion,

    /// Timestamp (ISO 8601)
    pub timestamp: String,

    /// Summary statistics
    pub summary: ReportSummary,

    /// All outcomes, in processing order
    pub outcomes: Vec<FileOutcome>,

    /// Whether the run wrote nothing
    #[serde(default)]
    pub dry_run: bool,
}

impl Report {
    /// Create a new empty report
    pub fn new() -> Self {
        Self {
            version: ReportVersion::CURRENT,
            timestamp: chrono::Utc::now().to_rfc3339(),
            summary: ReportSummary::default(),
            outcomes: Vec::new(),
            dry_run: false,
        }
    }

    /// Create a report from outcomes
    pub fn from_outcomes(outcomes: Vec<FileOutcome>) -> Self {
        let mut report = Self::new();
        for outcome in outcomes {
            report.add_outcome(outcome);
        }
        report
    }

    /// Add an outcome to the report
    pub fn add_outcome(&mut self, outcome: FileOutcome) {
        self.summary.record(&outcome);
        self.outcomes.push(outcome);
    }

    /// Append every outcome of another report
    pub fn merge(&mut self, other: Report) {
        for outcome in other.outcomes {
            self.add_outcome(outcome);
        }
        self.dry_run |= other.dry_run;
    }

    /// Outcomes of one kind
    pub fn outcomes_of(&self, kind: OutcomeKind) -> impl Iterator<Item = &FileOutcome> {
        self.outcomes.iter().filter(move |o| o.kind == kind)
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Save to file
    pub fn save_to_file(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let json = self.to_json()
            .map_err(std::io::Error::other)?;
        std::fs::write(path, json)
    }
}

impl Default for Report {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::Dialect;

    #[test]
    fn empty_report() {
        let report = Report::new();
        assert_eq!(report.version, ReportVersion::CURRENT);
        assert_eq!(report.summary.total, 0);
        assert!(!report.dry_run);
    }

    #[test]
    fn report_with_outcomes() {
        let outcomes = vec![
            FileOutcome::drops_injected("ddl.sql", Some(Dialect::Postgres), 4),
            FileOutcome::drops_injected("ddl_sqlite.sql", Some(Dialect::Sqlite), 3),
            FileOutcome::skipped("ddl_oracle.sql"),
        ];

        let report = Report::from_outcomes(outcomes);
        assert_eq!(report.summary.total, 3);
        assert_eq!(report.summary.processed, 2);
        assert_eq!(report.summary.skipped, 1);
        assert_eq!(report.summary.drop_statements, 7);
        assert_eq!(report.outcomes_of(OutcomeKind::Skipped).count(), 1);
    }

    #[test]
    fn merge_keeps_order_and_counts() {
        let mut first = Report::from_outcomes(vec![FileOutcome::drops_injected("ddl.sql", None, 0)]);
        let second = Report::from_outcomes(vec![
            FileOutcome::split("ddl.sql", "seed.sql"),
            FileOutcome::no_seed_data("ddl_oracle.sql"),
        ]);

        first.merge(second);
        assert_eq!(first.summary.total, 3);
        assert_eq!(first.summary.split, 1);
        assert_eq!(first.summary.no_seed_data, 1);
        assert_eq!(first.outcomes[1].kind, OutcomeKind::Split);
    }

    #[test]
    fn report_serialization() {
        let report = Report::new();
        let json = report.to_json().unwrap();
        assert!(json.contains("\"version\""));
        assert!(json.contains("\"outcomes\""));
    }

    #[test]
    fn save_to_file_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        let report = Report::from_outcomes(vec![FileOutcome::skipped("ddl.sql")]);

        report.save_to_file(&path).unwrap();
        let loaded: Report = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(loaded, report);
    }

    #[test]
    fn save_to_file_reports_io_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Report::new().save_to_file(dir.path()).is_err());
    }
}

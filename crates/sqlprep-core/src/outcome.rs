//! Per-file outcomes of a preparation pass
//!
//! Outcome codes end up in JSON run reports.
//! NEVER rename or remove codes - add new ones instead.

use serde::{Deserialize, Serialize};
use crate::dialect::Dialect;

/// What a pass did with one configured file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OutcomeKind {
    /// DROP TABLE header generated and comments stripped
    DropsInjected,

    /// File split into schema and seed files
    Split,

    /// Split pass found no seed marker; file left untouched
    NoSeedData,

    /// File does not exist; skipped silently
    Skipped,
}

impl OutcomeKind {
    /// Stable string identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DropsInjected => "DROPS_INJECTED",
            Self::Split => "SPLIT",
            Self::NoSeedData => "NO_SEED_DATA",
            Self::Skipped => "SKIPPED",
        }
    }
}

impl std::fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of running one pass over one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileOutcome {
    /// File name as listed in the config (relative to the base dir)
    pub file: String,

    /// Outcome code
    pub kind: OutcomeKind,

    /// Human-readable message
    pub message: String,

    /// Dialect used for the DROP header
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dialect: Option<Dialect>,

    /// Number of DROP statements written
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drop_count: Option<usize>,

    /// Name of the seed file produced by a split
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed_file: Option<String>,

    /// Set when nothing was written to disk
    #[serde(default)]
    pub dry_run: bool,
}

impl FileOutcome {
    /// Create an outcome with minimal fields
    pub fn new(file: impl Into<String>, kind: OutcomeKind, message: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            kind,
            message: message.into(),
            dialect: None,
            drop_count: None,
            seed_file: None,
            dry_run: false,
        }
    }

    /// Outcome for a file that was not found
    pub fn skipped(file: impl Into<String>) -> Self {
        let file = file.into();
        let message = format!("{} not found, skipped", file);
        Self::new(file, OutcomeKind::Skipped, message)
    }

    /// Outcome for a drop-header injection
    pub fn drops_injected(file: impl Into<String>, dialect: Option<Dialect>, drop_count: usize) -> Self {
        let file = file.into();
        let message = format!("Processed {} with {} drop statements.", file, drop_count);
        Self {
            dialect,
            drop_count: Some(drop_count),
            ..Self::new(file, OutcomeKind::DropsInjected, message)
        }
    }

    /// Outcome for a successful split
    pub fn split(file: impl Into<String>, seed_file: impl Into<String>) -> Self {
        let file = file.into();
        let seed_file = seed_file.into();
        let message = format!("Split {} -> {} and {}", file, file, seed_file);
        Self {
            seed_file: Some(seed_file),
            ..Self::new(file, OutcomeKind::Split, message)
        }
    }

    /// Outcome for a split that found no seed marker
    pub fn no_seed_data(file: impl Into<String>) -> Self {
        let file = file.into();
        let message = format!("No DML found in {}", file);
        Self::new(file, OutcomeKind::NoSeedData, message)
    }

    /// Mark as computed but not written
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

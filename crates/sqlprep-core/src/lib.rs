//! sqlprep Core
//!
//! Shared domain types for the DDL preparation passes.
//! Outcome codes and the report layout are serialized into run reports,
//! so never rename them - add new ones instead.

pub mod dialect;
pub mod outcome;
pub mod report;
pub mod config;

pub use dialect::Dialect;
pub use outcome::{FileOutcome, OutcomeKind};
pub use report::{Report, ReportSummary, ReportVersion};
pub use config::{Config, ConfigError, SplitConfig, DEFAULT_FILES};

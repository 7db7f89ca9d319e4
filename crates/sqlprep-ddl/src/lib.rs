//! sqlprep DDL passes
//!
//! Regex-based rewrites of DDL files: DROP TABLE header injection,
//! boilerplate comment stripping, and the schema/seed split.
//! No SQL is parsed; everything works on raw text.

pub mod tables;
pub mod clean;
pub mod drops;
pub mod split;
pub mod error;
pub mod runner;

pub use tables::extract_table_names;
pub use clean::{normalize_newlines, strip_boilerplate_comments};
pub use drops::{inject_drop_statements, drop_header, DropInjection};
pub use split::{split_seed, SeedSplit};
pub use error::PrepError;
pub use runner::{Preparer, TableListing};

//! Target database dialects and their DROP TABLE syntax

use serde::{Deserialize, Serialize};

/// Database dialect a DDL file is written for
///
/// Selects the syntax of the generated `DROP TABLE` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// PostgreSQL (also used for the unsuffixed `ddl.sql`)
    Postgres,

    /// SQLite
    Sqlite,

    /// Oracle - no `IF EXISTS` support
    Oracle,
}

impl Dialect {
    /// Detect the dialect from a DDL file name
    ///
    /// Checks run in a fixed order, so `ddl_oracle_postgres.sql` is Oracle.
    /// Returns `None` for names that match no known dialect.
    pub fn from_file_name(name: &str) -> Option<Self> {
        if name.contains("oracle") {
            Some(Self::Oracle)
        } else if name.contains("postgres") || name == "ddl.sql" {
            Some(Self::Postgres)
        } else if name.contains("sqlite") {
            Some(Self::Sqlite)
        } else {
            None
        }
    }

    /// Render the DROP statement for a single table
    pub fn drop_statement(&self, table: &str) -> String {
        match self {
            Self::Oracle => format!("DROP TABLE {};", table),
            Self::Postgres => format!("DROP TABLE IF EXISTS {} CASCADE;", table),
            Self::Sqlite => format!("DROP TABLE IF EXISTS {};", table),
        }
    }

    /// Stable lowercase identifier (matches the config spelling)
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Postgres => "postgres",
            Self::Sqlite => "sqlite",
            Self::Oracle => "oracle",
        }
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

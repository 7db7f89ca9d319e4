//! DROP TABLE header injection

use sqlprep_core::Dialect;
use crate::clean::{normalize_newlines, strip_boilerplate_comments};
use crate::tables::drop_order;

/// Result of rewriting one DDL file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropInjection {
    /// Tables in drop order
    pub tables: Vec<String>,

    /// Dialect the header was rendered for
    pub dialect: Option<Dialect>,

    /// Generated DROP statements, one per table
    pub statements: Vec<String>,

    /// Full rewritten file: header, blank line, cleaned DDL
    pub output: String,
}

impl DropInjection {
    /// Number of DROP statements in the header
    pub fn drop_count(&self) -> usize {
        self.statements.len()
    }
}

/// Render one DROP statement per table
///
/// Without a dialect no statements are produced.
pub fn drop_header(tables: &[String], dialect: Option<Dialect>) -> Vec<String> {
    match dialect {
        Some(dialect) => tables.iter().map(|t| dialect.drop_statement(t)).collect(),
        None => Vec::new(),
    }
}

/// Prefix DDL with DROP statements in reverse creation order
///
/// Tables are collected from the original text, before comments are stripped,
/// so a commented-out `CREATE TABLE` still contributes a DROP.
/// The header and the cleaned body are always separated by a blank line,
/// even when the header is empty. Output uses `\n` line endings throughout.
pub fn inject_drop_statements(sql: &str, dialect: Option<Dialect>) -> DropInjection {
    let sql = normalize_newlines(sql);
    let tables = drop_order(&sql);
    let body = strip_boilerplate_comments(&sql);
    let statements = drop_header(&tables, dialect);

    let mut output = statements.join("\n");
    output.push_str("\n\n");
    output.push_str(&body);

    DropInjection {
        tables,
        dialect,
        statements,
        output,
    }
}

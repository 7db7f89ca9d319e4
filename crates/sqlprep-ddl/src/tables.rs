//! Table discovery from `CREATE TABLE` statements

use regex::Regex;
use std::sync::LazyLock;

static CREATE_TABLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"CREATE TABLE ([a-zA-Z0-9_]+)").expect("valid CREATE TABLE pattern"));

/// Table names in the order their `CREATE TABLE` appears
///
/// Matching is case-sensitive and expects exactly one space before the name.
/// Schema-qualified names (`public.ce_rule`) yield only the schema part, and
/// quoted identifiers are not matched at all. Duplicates are kept.
pub fn extract_table_names(sql: &str) -> Vec<String> {
    CREATE_TABLE
        .captures_iter(sql)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// Table names in drop order (reverse of creation)
///
/// Later tables may reference earlier ones, so dropping in reverse keeps
/// foreign keys satisfied.
pub fn drop_order(sql: &str) -> Vec<String> {
    let mut tables = extract_table_names(sql);
    tables.reverse();
    tables
}

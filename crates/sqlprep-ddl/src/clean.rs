//! Boilerplate comment stripping
//!
//! Removes the comments database GUI exports put around each table
//! (`-- public.ce_rule definition`, `-- Drop table`, `-- DROP TABLE ce_rule;`)
//! together with the newlines that follow them, then collapses blank-line runs.

use regex::Regex;
use std::sync::LazyLock;

static DEFINITION_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-- .* definition\n+").expect("valid definition pattern"));

static DROP_TABLE_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-- Drop table\n+").expect("valid heading pattern"));

static DROP_TABLE_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-- DROP TABLE [a-zA-Z0-9_]+;\n+").expect("valid drop comment pattern"));

static BLANK_LINE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("valid blank line pattern"));

/// Convert `\r\n` and lone `\r` line endings to `\n`
///
/// The comment patterns only match `\n`, so files exported on Windows must be
/// normalized before cleaning.
pub fn normalize_newlines(sql: &str) -> String {
    if !sql.contains('\r') {
        return sql.to_string();
    }
    sql.replace("\r\n", "\n").replace('\r', "\n")
}

/// Strip export boilerplate comments and normalize blank lines
///
/// Passes run in a fixed order; the blank-line collapse runs last so gaps left
/// by removed comments are folded too. Leading whitespace of the result is
/// trimmed.
pub fn strip_boilerplate_comments(sql: &str) -> String {
    let passes: [(&str, &Regex, &str); 4] = [
        ("definition comments", &*DEFINITION_COMMENT, ""),
        ("drop table headings", &*DROP_TABLE_HEADING, ""),
        ("commented drop statements", &*DROP_TABLE_COMMENT, ""),
        ("blank line runs", &*BLANK_LINE_RUN, "\n\n"),
    ];

    let mut content = sql.to_string();
    for (name, pattern, replacement) in passes {
        let hits = pattern.find_iter(&content).count();
        if hits > 0 {
            tracing::debug!(pass = name, hits, "stripping");
            content = pattern.replace_all(&content, replacement).into_owned();
        }
    }

    content.trim_start().to_string()
}

use std::path::Path;
use std::process::{Command, Output};

const DDL: &str = "\
-- public.ce_config definition

-- Drop table

-- DROP TABLE ce_config;

CREATE TABLE ce_config (config_id int);

CREATE TABLE ce_rule (config_id int REFERENCES ce_config(config_id));

INSERT INTO ce_config (config_id) VALUES (1);
";

fn sqlprep(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_sqlprep"))
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("should run sqlprep binary")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn run_prints_original_messages_and_rewrites_files() {
    let temp = tempfile::tempdir().unwrap();
    std::fs::write(temp.path().join("ddl_sqlite.sql"), DDL).unwrap();

    let output = sqlprep(temp.path(), &["run", "--base-dir", "."]);
    assert!(output.status.success(), "sqlprep failed: {output:?}");

    let out = stdout(&output);
    assert!(out.contains("Processed ddl_sqlite.sql with 2 drop statements."), "{out}");
    assert!(out.contains("Split ddl_sqlite.sql -> ddl_sqlite.sql and seed_sqlite.sql"), "{out}");
    assert!(!out.contains("ddl_oracle.sql"), "missing files should be silent: {out}");

    let schema = std::fs::read_to_string(temp.path().join("ddl_sqlite.sql")).unwrap();
    assert_eq!(
        schema,
        "DROP TABLE IF EXISTS ce_rule;\n\
         DROP TABLE IF EXISTS ce_config;\n\
         \n\
         CREATE TABLE ce_config (config_id int);\n\
         \n\
         CREATE TABLE ce_rule (config_id int REFERENCES ce_config(config_id));\n"
    );

    let seed = std::fs::read_to_string(temp.path().join("seed_sqlite.sql")).unwrap();
    assert_eq!(seed, "INSERT INTO ce_config (config_id) VALUES (1);\n");
}

#[test]
fn dry_run_with_report_leaves_files_alone() {
    let temp = tempfile::tempdir().unwrap();
    std::fs::write(temp.path().join("ddl_oracle.sql"), DDL).unwrap();

    let output = sqlprep(
        temp.path(),
        &["drops", "--dry-run", "--base-dir", ".", "--report", "report.json"],
    );
    assert!(output.status.success(), "sqlprep failed: {output:?}");
    assert!(stdout(&output).contains("[dry-run]"));

    assert_eq!(std::fs::read_to_string(temp.path().join("ddl_oracle.sql")).unwrap(), DDL);

    let report: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(temp.path().join("report.json")).unwrap())
            .unwrap();
    assert_eq!(report["dry_run"], true);
    assert_eq!(report["summary"]["processed"], 1);
    assert_eq!(report["summary"]["skipped"], 3);
    assert_eq!(report["summary"]["drop_statements"], 2);
}

#[test]
fn split_without_marker_reports_no_dml() {
    let temp = tempfile::tempdir().unwrap();
    std::fs::write(temp.path().join("ddl.sql"), "CREATE TABLE t (x int);\n").unwrap();

    let output = sqlprep(temp.path(), &["split", "--base-dir", "."]);
    assert!(output.status.success(), "sqlprep failed: {output:?}");
    assert!(stdout(&output).contains("No DML found in ddl.sql"));
    assert!(!temp.path().join("seed.sql").exists());
}

#[test]
fn missing_base_dir_is_not_an_error() {
    let temp = tempfile::tempdir().unwrap();

    let output = sqlprep(temp.path(), &["run", "--base-dir", "does-not-exist"]);
    assert!(output.status.success(), "sqlprep failed: {output:?}");
    assert!(stdout(&output).is_empty());
}

#[test]
fn init_then_config_is_picked_up() {
    let temp = tempfile::tempdir().unwrap();

    let output = sqlprep(temp.path(), &["init"]);
    assert!(output.status.success(), "init failed: {output:?}");

    let config = std::fs::read_to_string(temp.path().join("sqlprep.toml")).unwrap();
    assert!(config.contains("INSERT INTO ce_config"));

    let again = sqlprep(temp.path(), &["init"]);
    assert!(!again.status.success(), "second init should refuse to overwrite");

    // base_dir from the generated config resolves next to it
    let sql_dir = temp.path().join("src/main/resources/sql");
    std::fs::create_dir_all(&sql_dir).unwrap();
    std::fs::write(sql_dir.join("ddl_postgres.sql"), DDL).unwrap();

    let output = sqlprep(temp.path(), &["tables", "--json"]);
    assert!(output.status.success(), "tables failed: {output:?}");

    let listings: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(listings[0]["file"], "ddl_postgres.sql");
    assert_eq!(listings[0]["dialect"], "postgres");
    assert_eq!(listings[0]["tables"], serde_json::json!(["ce_rule", "ce_config"]));
}

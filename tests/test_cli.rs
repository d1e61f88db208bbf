use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::tempdir;

fn bin() -> &'static str {
    env!("CARGO_BIN_EXE_table-filter")
}

fn write_file(path: &Path, content: &str) {
    fs::write(path, content).expect("failed to write test file");
}

fn run(args: &[&str]) -> Output {
    Command::new(bin())
        .args(["--color", "never"])
        .args(args)
        .env_remove("TABLE_FILTER_CONFIG")
        .output()
        .expect("command should run")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_check_reports_match() {
    let output = run(&["check", ">=10", "10"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output).trim(), "match");

    let output = run(&["check", ">10", "10"]);
    assert_eq!(stdout(&output).trim(), "no match");
}

#[test]
fn test_check_accepts_negative_values() {
    let output = run(&["check", "<0", "-5"]);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(stdout(&output).trim(), "match");

    let output = run(&["check", "-5", "-5"]);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(stdout(&output).trim(), "match");

    let output = run(&["check", "-5", "5"]);
    assert_eq!(stdout(&output).trim(), "no match");
}

#[test]
fn test_select_accepts_negative_filter() {
    let output = run(&["select", "-5", "--price", "-5"]);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(stdout(&output).trim(), "match");
}

#[test]
fn test_rows_accepts_negative_filter() {
    let dir = tempdir().expect("temp dir");
    let rows = dir.path().join("rows.json");
    write_file(
        &rows,
        r#"[{"sku": "A", "price": -5}, {"sku": "B", "price": 5}]"#,
    );

    let output = run(&[
        "--format",
        "json",
        "rows",
        rows.to_str().expect("utf8 path"),
        "--filter",
        "-5",
    ]);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).expect("valid json");
    assert_eq!(json.as_array().expect("array").len(), 1);
    assert_eq!(json[0]["sku"], "A");
}

#[test]
fn test_select_bare_quantity_prefix_is_not_an_error() {
    let output = run(&["--format", "json", "select", "q"]);
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).expect("valid json");
    assert_eq!(json["matches"], true);
    assert!(json["criterion"].is_null());
    assert!(json.get("error").is_none());
    assert!(json.get("operator").is_none());
}

#[test]
fn test_config_precedence_applies_without_flag() {
    let dir = tempdir().expect("temp dir");
    let config = dir.path().join("filter.toml");
    write_file(&config, "precedence = \"legacy\"\n");

    let output = run(&[
        "--config",
        config.to_str().expect("utf8 path"),
        "check",
        "!=5",
        "4",
    ]);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(stdout(&output).trim(), "no match");

    let output = run(&[
        "--config",
        config.to_str().expect("utf8 path"),
        "--precedence",
        "standard",
        "check",
        "!=5",
        "4",
    ]);
    assert_eq!(stdout(&output).trim(), "match");
}

#[test]
fn test_check_json_describes_criterion() {
    let output = run(&["--format", "json", "check", "!=5", "4"]);
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).expect("valid json");
    assert_eq!(json["matches"], true);
    assert_eq!(json["operator"], "!=");
    assert_eq!(json["threshold"], 5.0);
}

#[test]
fn test_precedence_flag_switches_to_legacy() {
    let output = run(&["--precedence", "legacy", "--format", "json", "check", "!=5", "4"]);
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).expect("valid json");
    assert_eq!(json["matches"], false);
    assert!(json["error"].as_str().unwrap().contains("=5"));
}

#[test]
fn test_select_routes_quantity() {
    let output = run(&[
        "--format", "json", "select", "q:>5", "--price", "3", "--qty", "10",
    ]);
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).expect("valid json");
    assert_eq!(json["matches"], true);
    assert_eq!(json["field"], "quantity");
}

#[test]
fn test_rows_filters_json_file() {
    let dir = tempdir().expect("temp dir");
    let rows = dir.path().join("rows.json");
    write_file(
        &rows,
        r#"[
            {"sku": "A", "price": 12, "qty": 0},
            {"sku": "B", "price": 8, "qty": 3},
            {"sku": "C", "price": 20, "qty": 7}
        ]"#,
    );

    let output = run(&[
        "--format",
        "json",
        "rows",
        rows.to_str().expect("utf8 path"),
        "--filter",
        ">10",
        "--column",
        "qty=>0",
    ]);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).expect("valid json");
    let skus: Vec<&str> = json
        .as_array()
        .expect("array")
        .iter()
        .map(|row| row["sku"].as_str().unwrap())
        .collect();
    assert_eq!(skus, vec!["C"]);
}

#[test]
fn test_rows_text_output_uses_config_fields() {
    let dir = tempdir().expect("temp dir");
    let rows = dir.path().join("rows.json");
    let config = dir.path().join("filter.toml");
    write_file(
        &rows,
        r#"[{"sku": "A", "our_qty": 2}, {"sku": "B", "our_qty": 9}]"#,
    );
    write_file(
        &config,
        "[fields]\nqty_key = \"our_qty\"\ndisplay_columns = [\"sku\", \"our_qty\"]\n",
    );

    let output = run(&[
        "--config",
        config.to_str().expect("utf8 path"),
        "rows",
        rows.to_str().expect("utf8 path"),
        "-f",
        "q>5",
    ]);
    assert!(output.status.success());

    let text = stdout(&output);
    assert!(text.contains("B"));
    assert!(!text.contains("│ A"));
    assert!(text.contains("Showing 1 of 2 rows"));
}

#[test]
fn test_rows_reports_bad_column_spec() {
    let dir = tempdir().expect("temp dir");
    let rows = dir.path().join("rows.json");
    write_file(&rows, "[]");

    let output = run(&["rows", rows.to_str().expect("utf8 path"), "-c", "price"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid column filter"));
}

#[test]
fn test_rows_reports_missing_file() {
    let output = run(&["rows", "/nonexistent/rows.json"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to load rows"));
}

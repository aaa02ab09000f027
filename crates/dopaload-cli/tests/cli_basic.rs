//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary against a throwaway data directory and
//! verify outputs.

use std::path::Path;
use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(data_dir: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_dopaload"))
        .args(args)
        .env("DOPALOAD_DATA_DIR", data_dir)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

/// Run a CLI command and expect success.
fn run_cli_success(data_dir: &Path, args: &[&str]) -> String {
    let (stdout, stderr, code) = run_cli(data_dir, args);
    assert_eq!(code, 0, "CLI command {:?} failed: {}", args, stderr);
    stdout
}

fn parse_json(json: &str) -> serde_json::Value {
    serde_json::from_str(json).expect("Failed to parse JSON output")
}

#[test]
fn test_checkin_log_reports_scores() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_cli_success(
        dir.path(),
        &[
            "checkin",
            "log",
            "--date",
            "2024-03-01",
            "--social-minutes",
            "100",
            "--caffeine-mg",
            "100",
            "--junk-food",
            "yes",
            "--sleep-hours",
            "6",
            "--energy",
            "7",
        ],
    );
    assert!(out.contains("Check-in saved for 2024-03-01"));
    assert!(out.contains("DLS: 45"));
    assert!(out.contains("NEI: 70"));
}

#[test]
fn test_checkin_log_twice_updates_same_day() {
    let dir = tempfile::tempdir().unwrap();
    run_cli_success(dir.path(), &["checkin", "log", "--date", "2024-03-02", "--mood", "4"]);
    run_cli_success(dir.path(), &["checkin", "log", "--date", "2024-03-01", "--mood", "5"]);
    let out = run_cli_success(dir.path(), &["checkin", "log", "--date", "2024-03-02", "--mood", "8"]);
    assert!(out.contains("Check-in updated for 2024-03-02"));

    let list = parse_json(&run_cli_success(dir.path(), &["checkin", "list", "--json"]));
    let records = list.as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["date"], "2024-03-01");
    assert_eq!(records[1]["date"], "2024-03-02");
    assert_eq!(records[1]["mood"], 8.0);
}

#[test]
fn test_checkin_log_coerces_malformed_numbers() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_cli_success(
        dir.path(),
        &["checkin", "log", "--date", "2024-03-01", "--caffeine-mg", "lots", "--json"],
    );
    let report = parse_json(&out);
    assert_eq!(report["record"]["caffeineMg"], 0.0);
    assert_eq!(report["dls"], 0);
}

#[test]
fn test_checkin_log_rejects_unknown_virtue() {
    let dir = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(
        dir.path(),
        &["checkin", "log", "--date", "2024-03-01", "--virtue", "juggling"],
    );
    assert_ne!(code, 0);
    assert!(stderr.contains("error:"));
}

#[test]
fn test_checkin_show_and_remove() {
    let dir = tempfile::tempdir().unwrap();
    run_cli_success(
        dir.path(),
        &["checkin", "log", "--date", "2024-03-01", "--load", "Doomscrolling", "--virtue", "gym"],
    );
    let shown = run_cli_success(dir.path(), &["checkin", "show", "--date", "2024-03-01"]);
    assert!(shown.contains("[x] Doomscrolling"));
    assert!(shown.contains("Virtues: gym"));

    run_cli_success(dir.path(), &["checkin", "remove", "2024-03-01"]);
    let (_, _, code) = run_cli(dir.path(), &["checkin", "show", "--date", "2024-03-01"]);
    assert_ne!(code, 0);
}

#[test]
fn test_score_json_has_breakdown() {
    let dir = tempfile::tempdir().unwrap();
    run_cli_success(dir.path(), &["checkin", "log", "--date", "2024-03-01", "--social-minutes", "50"]);
    let score = parse_json(&run_cli_success(
        dir.path(),
        &["score", "--date", "2024-03-01", "--json"],
    ));
    assert_eq!(score["dls"], 15);
    assert!(score["breakdown"]["terms"].as_array().unwrap().len() == 7);
}

#[test]
fn test_coach_returns_three_tasks() {
    let dir = tempfile::tempdir().unwrap();
    let tasks = parse_json(&run_cli_success(
        dir.path(),
        &["coach", "--date", "2024-03-01", "--json"],
    ));
    let tasks = tasks.as_array().unwrap();
    assert_eq!(tasks.len(), 3);
    assert_eq!(tasks[0]["difficulty"], "Easy");
    assert_eq!(tasks[1]["difficulty"], "Medium");
    assert_eq!(tasks[2]["difficulty"], "Hard");
}

#[test]
fn test_settings_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    run_cli_success(dir.path(), &["settings", "strictness", "hard"]);
    run_cli_success(dir.path(), &["settings", "plan-length", "60"]);
    run_cli_success(dir.path(), &["settings", "macro", "fiber", "off"]);
    let settings = parse_json(&run_cli_success(dir.path(), &["settings", "show"]));
    assert_eq!(settings["strictness"], "Hard");
    assert_eq!(settings["planLength"], 60);
    assert_eq!(settings["macros"]["fiber"], false);

    let (_, _, code) = run_cli(dir.path(), &["settings", "plan-length", "0"]);
    assert_ne!(code, 0);
}

#[test]
fn test_corrupt_state_is_discarded() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("state.json"), "not json at all").unwrap();
    let out = run_cli_success(dir.path(), &["checkin", "list"]);
    assert!(out.contains("no check-ins yet"));
}

#[test]
fn test_state_import_and_reset() {
    let dir = tempfile::tempdir().unwrap();
    let blob = dir.path().join("export.json");
    std::fs::write(
        &blob,
        r#"{"history":[{"date":"2024-02-01","energy":6}],"planLength":45,"strictness":"Light",
            "macros":{"protein":true,"carbs":false,"fat":true,"fiber":true}}"#,
    )
    .unwrap();
    let out = run_cli_success(dir.path(), &["state", "import", blob.to_str().unwrap()]);
    assert!(out.contains("imported 1 check-in"));

    let state = parse_json(&run_cli_success(dir.path(), &["state", "show"]));
    assert_eq!(state["planLength"], 45);
    assert_eq!(state["strictness"], "Light");

    let (_, _, code) = run_cli(dir.path(), &["state", "reset"]);
    assert_ne!(code, 0);
    run_cli_success(dir.path(), &["state", "reset", "--yes"]);
    let state = parse_json(&run_cli_success(dir.path(), &["state", "show"]));
    assert_eq!(state["planLength"], 30);
}

#[test]
fn test_config_get_set() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(
        run_cli_success(dir.path(), &["config", "get", "display.chart_width"]).trim(),
        "30"
    );
    run_cli_success(dir.path(), &["config", "set", "display.chart_width", "12"]);
    assert_eq!(
        run_cli_success(dir.path(), &["config", "get", "display.chart_width"]).trim(),
        "12"
    );
    let (_, _, code) = run_cli(dir.path(), &["config", "get", "display.nope"]);
    assert_ne!(code, 0);
}

#[test]
fn test_trend_renders_chart() {
    let dir = tempfile::tempdir().unwrap();
    run_cli_success(dir.path(), &["checkin", "log", "--date", "2024-03-01", "--energy", "5"]);
    let out = run_cli_success(dir.path(), &["trend"]);
    assert!(out.contains("DLS / NEI trend"));
    assert!(out.contains("03-01"));
}

#[test]
fn test_completions() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_cli_success(dir.path(), &["completions", "bash"]);
    assert!(out.contains("dopaload"));
}

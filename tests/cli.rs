//! Integration tests for top-level CLI behavior.

use std::path::Path;
use std::process::Command;

use serde_json::json;

use miler::cassette::recorder::CassetteRecorder;

const MILER_VARS: [&str; 9] = [
    "MILER_URL",
    "MILER_TOKEN",
    "MILER_NAMESPACE",
    "MILER_PROJECT",
    "MILER_INTERVAL",
    "MILER_ADVANCE",
    "MILER_API",
    "MILER_RECORD",
    "MILER_REPLAY",
];

fn miler(args: &[&str], envs: &[(&str, &Path)]) -> std::process::Output {
    let bin = env!("CARGO_BIN_EXE_miler");
    let mut command = Command::new(bin);
    for var in MILER_VARS {
        command.env_remove(var);
    }
    command.args(args).envs(envs.iter().copied()).output().expect("failed to run miler binary")
}

#[test]
fn plan_prints_daily_buckets() {
    let output = miler(&["plan", "--date", "2024-01-10", "--advance", "2"], &[]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert_eq!(
        stdout.lines().collect::<Vec<_>>(),
        vec![
            "2024-01-10 (2024-01-10 .. 2024-01-10)",
            "2024-01-11 (2024-01-11 .. 2024-01-11)",
            "2024-01-12 (2024-01-12 .. 2024-01-12)",
        ]
    );
}

#[test]
fn plan_prints_monthly_buckets() {
    let output =
        miler(&["plan", "--interval", "monthly", "--date", "2024-01-20", "--advance", "20"], &[]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("January 2024 (2024-01-20 .. 2024-01-31)"));
    assert!(stdout.contains("February 2024 (2024-02-01 .. 2024-02-09)"));
}

#[test]
fn invalid_interval_exits_with_error() {
    let output = miler(&["plan", "--interval", "hourly"], &[]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("invalid interval"));
}

#[test]
fn sync_help_shows_usage() {
    let output = miler(&["sync", "--help"], &[]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("--dry-run"));
    assert!(stdout.contains("--namespace"));
}

#[test]
fn sync_without_credentials_is_a_config_error() {
    let output = miler(&["sync", "--url", "gitlab.example.com"], &[]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("missing --token"));
}

#[test]
fn sync_dry_run_from_replayed_session() {
    let dir = std::env::temp_dir().join("miler_cli_replay");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("weekly.cassette.yaml");
    let mut recorder = CassetteRecorder::new(&path, "cli-replay");
    recorder.record(
        "tracker",
        "list_milestones",
        json!(null),
        json!({"ok": [
            {"id": "12", "title": "2024-W02", "state": "open", "due_date": "2024-01-14"},
            {"id": "13", "title": "2024-W03", "state": "closed", "due_date": "2024-01-21"}
        ]}),
    );
    recorder.save().unwrap();

    let output = miler(
        &["sync", "--interval", "weekly", "--advance", "14", "--date", "2024-01-10", "--dry-run"],
        &[("MILER_REPLAY", path.as_path())],
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(output.status.success(), "stderr: {stderr}");
    assert!(stdout.contains("CREATE 2024-W04 (2024-01-22 .. 2024-01-24)"));
    assert!(stdout.contains("REOPEN 2024-W03 (milestone 13, due 2024-01-21)"));
    assert!(stdout.contains("OPEN 2024-W02"));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn replayed_session_without_date_fails_cleanly() {
    let dir = std::env::temp_dir().join("miler_cli_replay_no_date");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("no-date.cassette.yaml");
    let mut recorder = CassetteRecorder::new(&path, "cli-replay-no-date");
    recorder.record("tracker", "list_milestones", json!(null), json!({"ok": []}));
    recorder.save().unwrap();

    let output = miler(&["sync", "--dry-run"], &[("MILER_REPLAY", path.as_path())]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(output.status.code(), Some(1), "stderr: {stderr}");
    assert!(stderr.contains("Cassette exhausted"));
    assert!(!stderr.contains("panicked"));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn invalid_subcommand_exits_with_error() {
    let output = miler(&["unknown"], &[]);
    assert!(!output.status.success());
}

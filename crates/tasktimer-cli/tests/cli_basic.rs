//! Basic CLI E2E tests.
//!
//! Each test runs the binary against its own temp data directory.

use std::path::Path;
use std::process::Command;

fn run_cli(data_dir: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_tasktimer"))
        .env("TASKTIMER_DATA_DIR", data_dir)
        .args(args)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn add_task(data_dir: &Path, name: &str, value: &str, unit: &str) -> String {
    let (stdout, stderr, code) = run_cli(
        data_dir,
        &["task", "add", name, "--value", value, "--unit", unit],
    );
    assert_eq!(code, 0, "task add failed: {stderr}");
    stdout
        .lines()
        .find_map(|line| line.strip_prefix("Task created: "))
        .expect("add output carries the new id")
        .trim()
        .to_string()
}

#[test]
fn add_then_list_shows_task() {
    let dir = tempfile::tempdir().unwrap();
    add_task(dir.path(), "renew domain", "7", "days");

    let (stdout, _, code) = run_cli(dir.path(), &["task", "list"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("renew domain"));
    assert!(stdout.contains("running"));
}

#[test]
fn list_json_is_parseable() {
    let dir = tempfile::tempdir().unwrap();
    let id = add_task(dir.path(), "check backups", "12", "hours");

    let (stdout, _, code) = run_cli(dir.path(), &["task", "list", "--json"]);
    assert_eq!(code, 0);
    let tasks: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(tasks.as_array().unwrap().len(), 1);
    assert_eq!(tasks[0]["id"], serde_json::Value::String(id));
}

#[test]
fn zero_duration_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(
        dir.path(),
        &["task", "add", "broken", "--value", "0", "--unit", "minutes"],
    );
    assert_ne!(code, 0);
    assert!(stderr.contains("greater than zero"), "stderr: {stderr}");

    // Nothing was persisted.
    let (stdout, _, _) = run_cli(dir.path(), &["task", "list"]);
    assert!(stdout.contains("no tasks"));
}

#[test]
fn pause_reset_delete_flow() {
    let dir = tempfile::tempdir().unwrap();
    let id = add_task(dir.path(), "cycle", "5", "minutes");

    let (_, _, code) = run_cli(dir.path(), &["task", "pause", &id]);
    assert_eq!(code, 0);
    let (stdout, _, _) = run_cli(dir.path(), &["task", "list"]);
    assert!(stdout.contains("paused"));

    let (_, _, code) = run_cli(dir.path(), &["task", "reset", &id]);
    assert_eq!(code, 0);
    let (stdout, _, _) = run_cli(dir.path(), &["task", "list"]);
    assert!(stdout.contains("running"));

    let (_, _, code) = run_cli(dir.path(), &["task", "delete", &id]);
    assert_eq!(code, 0);
    let (stdout, _, _) = run_cli(dir.path(), &["task", "list"]);
    assert!(stdout.contains("no tasks"));
}

#[test]
fn config_set_then_get() {
    let dir = tempfile::tempdir().unwrap();

    let (stdout, _, code) = run_cli(dir.path(), &["config", "get", "theme"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "system");

    let (_, _, code) = run_cli(dir.path(), &["config", "set", "theme", "dark"]);
    assert_eq!(code, 0);
    let (stdout, _, _) = run_cli(dir.path(), &["config", "get", "theme"]);
    assert_eq!(stdout.trim(), "dark");

    let (_, stderr, code) = run_cli(dir.path(), &["config", "set", "theme", "neon"]);
    assert_ne!(code, 0);
    assert!(!stderr.is_empty());
}

#[test]
fn export_import_between_stores() {
    let source = tempfile::tempdir().unwrap();
    let target = tempfile::tempdir().unwrap();
    add_task(source.path(), "carried over", "3", "days");

    let export_path = source.path().join("backup.json");
    let export_arg = export_path.to_str().unwrap();

    let (_, _, code) = run_cli(source.path(), &["export", export_arg]);
    assert_eq!(code, 0);

    let (stdout, _, code) = run_cli(target.path(), &["import", export_arg]);
    assert_eq!(code, 0);
    assert!(stdout.contains("imported 1 task(s)"));

    let (stdout, _, _) = run_cli(target.path(), &["task", "list"]);
    assert!(stdout.contains("carried over"));
}

#[test]
fn import_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(dir.path(), &["import", "/nonexistent/tasks.json"]);
    assert_ne!(code, 0);
    assert!(!stderr.is_empty());
}

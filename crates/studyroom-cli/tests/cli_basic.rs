//! Basic CLI E2E tests.
//!
//! Each test runs the built binary against its own data directory.

use std::path::Path;
use std::process::{Command, Stdio};

use serde_json::Value;
use tempfile::TempDir;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(home: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_studyroom"))
        .args(args)
        .env("STUDYROOM_HOME", home)
        .env_remove("STUDYROOM_ENV")
        .stdin(Stdio::null())
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn run_json(home: &Path, args: &[&str]) -> Value {
    let (stdout, stderr, code) = run_cli(home, args);
    assert_eq!(code, 0, "{args:?} failed: {stderr}");
    serde_json::from_str(&stdout)
        .unwrap_or_else(|e| panic!("{args:?} printed non-JSON ({e}): {stdout}"))
}

#[test]
fn test_task_add_and_list() {
    let home = TempDir::new().unwrap();
    let task = run_json(
        home.path(),
        &["task", "add", "Essay", "--sub-tasks", "outline, draft", "--hours", "2"],
    );
    assert_eq!(task["name"], "Essay");
    assert_eq!(task["completed"], false);

    let tasks = run_json(home.path(), &["task", "list"]);
    assert_eq!(tasks.as_array().unwrap().len(), 1);
    assert_eq!(tasks[0]["subTasks"], "outline, draft");
}

#[test]
fn test_task_add_requires_name() {
    let home = TempDir::new().unwrap();
    let (_, stderr, code) = run_cli(home.path(), &["task", "add", "   "]);
    assert_eq!(code, 1);
    assert!(stderr.contains("'name' is required"), "{stderr}");
}

#[test]
fn test_errors_are_delivered_as_notifications() {
    let home = TempDir::new().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["goal", "add", "No deadline"]);
    assert_eq!(code, 1);
    assert!(stdout.contains("[Missing information]"), "{stdout}");
    assert!(stdout.contains("'deadline' is required"), "{stdout}");

    run_json(home.path(), &["subject", "add", "Chemistry", "--teacher", "Dr. Cruz"]);
    let (stdout, _, code) =
        run_cli(home.path(), &["subject", "add", "Chemistry", "--teacher", "Dr. Cruz"]);
    assert_eq!(code, 1);
    assert!(stdout.contains("[Already exists]"), "{stdout}");
}

#[test]
fn test_task_toggle_and_pending_filter() {
    let home = TempDir::new().unwrap();
    let task = run_json(home.path(), &["task", "add", "Read chapter 3"]);
    let id = task["id"].as_str().unwrap();

    let (_, stderr, code) = run_cli(home.path(), &["task", "toggle", id]);
    assert_eq!(code, 0);
    assert!(stderr.contains("completed"));

    let pending = run_json(home.path(), &["task", "list", "--pending"]);
    assert!(pending.as_array().unwrap().is_empty());
}

#[test]
fn test_delete_without_confirmation_is_cancelled() {
    let home = TempDir::new().unwrap();
    let task = run_json(home.path(), &["task", "add", "Keep me"]);
    let id = task["id"].as_str().unwrap();

    // stdin is closed, so the prompt reads no answer.
    let (_, stderr, code) = run_cli(home.path(), &["task", "delete", id]);
    assert_eq!(code, 0);
    assert!(stderr.contains("cancelled"));
    assert_eq!(run_json(home.path(), &["task", "list"]).as_array().unwrap().len(), 1);

    let (_, _, code) = run_cli(home.path(), &["task", "delete", id, "--yes"]);
    assert_eq!(code, 0);
    assert!(run_json(home.path(), &["task", "list"]).as_array().unwrap().is_empty());
}

#[test]
fn test_duplicate_subject_rejected() {
    let home = TempDir::new().unwrap();
    run_json(home.path(), &["subject", "add", "Math", "--teacher", "Ms. Lee"]);
    let (_, stderr, code) =
        run_cli(home.path(), &["subject", "add", "Math", "--teacher", "Mr. Ito"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("already exists"), "{stderr}");
}

#[test]
fn test_note_links_to_subject() {
    let home = TempDir::new().unwrap();
    let subject =
        run_json(home.path(), &["subject", "add", "History", "--teacher", "Mr. Park"]);
    let note = run_json(home.path(), &["note", "add", "Read about 1848", "--subject", "History"]);
    assert_eq!(note["subjectId"], subject["id"]);

    let notes = run_json(home.path(), &["note", "list", "--subject", "History"]);
    assert_eq!(notes.as_array().unwrap().len(), 1);
}

#[test]
fn test_note_for_unknown_subject_lists_registered_ones() {
    let home = TempDir::new().unwrap();
    run_json(home.path(), &["subject", "add", "Algebra", "--teacher", "Ms. Noether"]);
    run_json(home.path(), &["subject", "add", "Poetry", "--teacher", "Mr. Basho"]);
    let (stdout, stderr, code) =
        run_cli(home.path(), &["note", "add", "Sonnet structure", "--subject", "Literature"]);
    assert_eq!(code, 0, "{stderr}");
    assert!(stderr.contains("registered subjects: Algebra, Poetry"), "{stderr}");
    let note: Value = serde_json::from_str(&stdout).unwrap();
    assert!(note.get("subjectId").is_none());
}

#[test]
fn test_gpa_is_credit_weighted() {
    let home = TempDir::new().unwrap();
    run_json(home.path(), &["grade", "add", "Math", "--credits", "3", "--grade", "8"]);
    run_json(home.path(), &["grade", "add", "Art", "--credits", "2", "--grade", "6"]);
    let gpa = run_json(home.path(), &["grade", "gpa"]);
    assert_eq!(gpa["gpa"], 7.2);
    assert_eq!(gpa["grades"], 2);
}

#[test]
fn test_grade_out_of_range_rejected() {
    let home = TempDir::new().unwrap();
    let (_, _, code) = run_cli(
        home.path(),
        &["grade", "add", "Math", "--credits", "3", "--grade", "11"],
    );
    assert_eq!(code, 1);
    let (_, _, code) = run_cli(home.path(), &["grade", "add", "Math", "--grade", "7"]);
    assert_eq!(code, 1);
}

#[test]
fn test_goal_add_and_toggle() {
    let home = TempDir::new().unwrap();
    let goal = run_json(
        home.path(),
        &["goal", "add", "Run 5k", "--deadline", "2030-06-01", "--category", "personal"],
    );
    assert_eq!(goal["category"], "personal");
    let id = goal["id"].as_str().unwrap();
    run_cli(home.path(), &["goal", "toggle", id]);
    assert!(run_json(home.path(), &["goal", "list", "--active"]).as_array().unwrap().is_empty());
}

#[test]
fn test_goal_requires_deadline() {
    let home = TempDir::new().unwrap();
    let (_, stderr, code) = run_cli(home.path(), &["goal", "add", "Someday"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("deadline"), "{stderr}");
}

#[test]
fn test_dashboard_counts() {
    let home = TempDir::new().unwrap();
    run_json(home.path(), &["task", "add", "One"]);
    run_json(home.path(), &["task", "add", "Two"]);
    run_json(home.path(), &["subject", "add", "Biology", "--teacher", "Dr. Osei"]);
    let dash = run_json(home.path(), &["dashboard"]);
    assert_eq!(dash["pending_tasks"], 2);
    assert_eq!(dash["total_subjects"], 1);
    assert_eq!(dash["active_goals"], 0);
    assert_eq!(dash["recent_tasks"][0]["name"], "Two");
}

#[test]
fn test_remind_fires_once() {
    let home = TempDir::new().unwrap();
    run_json(
        home.path(),
        &["task", "add", "Past due", "--reminder", "2000-01-01T00:00:00Z"],
    );
    let (stdout, _, code) = run_cli(home.path(), &["remind"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("You have a pending task: Past due"), "{stdout}");

    let (stdout, _, _) = run_cli(home.path(), &["remind"]);
    assert!(!stdout.contains("Past due"), "{stdout}");
}

#[test]
fn test_export_import_round_trip() {
    let home = TempDir::new().unwrap();
    run_json(home.path(), &["task", "add", "Exported"]);
    let file = home.path().join("backup.json");
    let (_, _, code) = run_cli(home.path(), &["data", "export", "--out", file.to_str().unwrap()]);
    assert_eq!(code, 0);

    let other = TempDir::new().unwrap();
    run_json(other.path(), &["task", "add", "Overwritten"]);
    let counts = run_json(other.path(), &["data", "import", file.to_str().unwrap(), "--yes"]);
    assert_eq!(counts["tasks"], 1);
    let tasks = run_json(other.path(), &["task", "list"]);
    assert_eq!(tasks[0]["name"], "Exported");
}

#[test]
fn test_import_rejects_non_object() {
    let home = TempDir::new().unwrap();
    run_json(home.path(), &["task", "add", "Survivor"]);
    let file = home.path().join("bad.json");
    std::fs::write(&file, "[1, 2, 3]").unwrap();
    let (stdout, stderr, code) =
        run_cli(home.path(), &["data", "import", file.to_str().unwrap(), "--yes"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Invalid import"), "{stderr}");
    assert!(stdout.contains("[Import failed]"), "{stdout}");
    assert_eq!(run_json(home.path(), &["task", "list"]).as_array().unwrap().len(), 1);
}

#[test]
fn test_timer_status_and_reset() {
    let home = TempDir::new().unwrap();
    let status = run_json(home.path(), &["timer", "status"]);
    assert_eq!(status["type"], "state_snapshot");
    assert_eq!(status["state"], "idle");
    assert_eq!(status["display"], "25:00");

    let (stdout, _, code) = run_cli(home.path(), &["timer", "reset"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("timer_reset"));
}

#[test]
fn test_timer_uses_configured_minutes() {
    let home = TempDir::new().unwrap();
    let (_, _, code) = run_cli(home.path(), &["config", "set", "timer.work_minutes", "50"]);
    assert_eq!(code, 0);
    let status = run_json(home.path(), &["timer", "status"]);
    assert_eq!(status["display"], "50:00");
}

#[test]
fn test_config_get_set() {
    let home = TempDir::new().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["config", "get", "grades.decimals"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "2");

    let (_, _, code) = run_cli(home.path(), &["config", "set", "timer.auto_continue", "false"]);
    assert_eq!(code, 0);
    let (stdout, _, _) = run_cli(home.path(), &["config", "get", "timer.auto_continue"]);
    assert_eq!(stdout.trim(), "false");

    let (_, _, code) = run_cli(home.path(), &["config", "get", "nope.nothing"]);
    assert_eq!(code, 1);
}

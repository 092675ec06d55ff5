//! Basic CLI E2E tests.
//!
//! Each test runs the built binary against its own data directory.

use std::process::Command;

use serde_json::Value;
use tempfile::TempDir;

struct Cli {
    dir: TempDir,
}

impl Cli {
    fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("Failed to create temp dir"),
        }
    }

    /// Run a CLI command and return (stdout, stderr, exit code).
    fn run(&self, args: &[&str]) -> (String, String, i32) {
        let output = Command::new(env!("CARGO_BIN_EXE_tasktimer"))
            .args(args)
            .env("TASKTIMER_DATA_DIR", self.dir.path())
            .env_remove("RUST_LOG")
            .env_remove("TASKTIMER_ENV")
            .output()
            .expect("Failed to execute CLI command");

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        let code = output.status.code().unwrap_or(-1);

        (stdout, stderr, code)
    }

    /// Run with `--json`, assert success, and parse stdout.
    fn json(&self, args: &[&str]) -> Value {
        let mut full = vec!["--json"];
        full.extend_from_slice(args);
        let (stdout, stderr, code) = self.run(&full);
        assert_eq!(code, 0, "{args:?} failed: {stderr}");
        serde_json::from_str(&stdout).unwrap_or_else(|e| panic!("{args:?}: bad JSON ({e}): {stdout}"))
    }
}

#[test]
fn test_task_add_and_list() {
    let cli = Cli::new();
    let (stdout, _, code) = cli.run(&["task", "add", "Write report", "--at", "2026-03-10 09:00"]);
    assert_eq!(code, 0, "Task add failed");
    assert!(stdout.contains("Task created:"));

    let tasks = cli.json(&["task", "list"]);
    let tasks = tasks.as_array().unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["title"], "Write report");
    assert_eq!(tasks[0]["is_completed"], false);
    assert_eq!(tasks[0]["pomodoro_config"]["work_duration_minutes"], 25);
}

#[test]
fn test_task_add_with_subtasks_and_preset() {
    let cli = Cli::new();
    let task = cli.json(&[
        "task", "add", "Study", "--subtask", "read", "--subtask", "notes", "--preset", "long",
    ]);
    assert_eq!(task["subtasks"].as_array().unwrap().len(), 2);
    assert_eq!(task["pomodoro_config"]["work_duration_minutes"], 50);
}

#[test]
fn test_task_toggle_twice() {
    let cli = Cli::new();
    let task = cli.json(&["task", "add", "Toggle me"]);
    let id = task["id"].as_str().unwrap();

    let done = cli.json(&["task", "toggle", id]);
    assert_eq!(done["is_completed"], true);
    assert!(done["completed_at"].is_string());

    let reopened = cli.json(&["task", "toggle", id]);
    assert_eq!(reopened["is_completed"], false);
    assert!(reopened["completed_at"].is_null());
}

#[test]
fn test_task_delete() {
    let cli = Cli::new();
    let task = cli.json(&["task", "add", "Temp"]);
    let id = task["id"].as_str().unwrap();

    let deleted = cli.json(&["task", "delete", id]);
    assert_eq!(deleted["deleted"], true);
    let (_, stderr, code) = cli.run(&["task", "get", id]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"), "{stderr}");
}

#[test]
fn test_subtask_toggle() {
    let cli = Cli::new();
    let task = cli.json(&["task", "add", "Checklist", "--subtask", "one"]);
    let task_id = task["id"].as_str().unwrap();
    let subtask_id = task["subtasks"][0]["id"].as_str().unwrap();

    let task = cli.json(&["subtask", "toggle", task_id, subtask_id]);
    assert_eq!(task["subtasks"][0]["is_completed"], true);

    let task = cli.json(&["subtask", "add", task_id, "two"]);
    assert_eq!(task["subtasks"].as_array().unwrap().len(), 2);

    let task = cli.json(&["subtask", "remove", task_id, subtask_id]);
    let subtasks = task["subtasks"].as_array().unwrap();
    assert_eq!(subtasks.len(), 1);
    assert_eq!(subtasks[0]["title"], "two");
}

#[test]
fn test_session_record_and_next() {
    let cli = Cli::new();
    let task = cli.json(&["task", "add", "Focus", "--preset", "classic"]);
    let id = task["id"].as_str().unwrap();

    let session = cli.json(&["session", "record", id]);
    assert_eq!(session["session_type"], "WORK");
    assert_eq!(session["duration_minutes"], 25);

    let next = cli.json(&["session", "next", id]);
    assert_eq!(next["session_type"], "SHORT_BREAK");
    assert_eq!(next["duration_minutes"], 5);

    let pending = cli.json(&["session", "record", id, "--kind", "short-break", "--pending"]);
    assert_eq!(pending["completed"], false);
    let completed = cli.json(&["session", "complete", pending["id"].as_str().unwrap()]);
    assert_eq!(completed["completed"], true);

    let sessions = cli.json(&["session", "list", id]);
    assert_eq!(sessions.as_array().unwrap().len(), 2);
}

#[test]
fn test_category_delete_detaches_tasks() {
    let cli = Cli::new();
    let category = cli.json(&["category", "add", "Work", "--color", "#2196F3"]);
    assert_eq!(category["color"], "#FF2196F3");
    let category_id = category["id"].as_str().unwrap();
    cli.json(&["task", "add", "Report", "--category", category_id]);

    let deleted = cli.json(&["category", "delete", category_id]);
    assert_eq!(deleted["detached_tasks"], 1);

    let tasks = cli.json(&["task", "list"]);
    assert!(tasks[0]["category_id"].is_null());
    assert_eq!(cli.json(&["category", "list"]).as_array().unwrap().len(), 0);
}

#[test]
fn test_category_add_rotates_palette() {
    let cli = Cli::new();
    let first = cli.json(&["category", "add", "Work"]);
    let second = cli.json(&["category", "add", "Study"]);
    assert_eq!(first["color"], "#FF4285F4");
    assert_eq!(second["color"], "#FF34A853");
}

#[test]
fn test_calendar_huge_offset_keeps_week() {
    let cli = Cli::new();
    let view = cli.json(&[
        "calendar", "week", "--date", "2026-03-11", "--offset", "9223372036854775807",
        "--week-start", "monday",
    ]);
    assert_eq!(view["calendar"]["week_start"], "2026-03-09");
}

#[test]
fn test_stats_focus_after_sample_insert() {
    let cli = Cli::new();
    let summary = cli.json(&["sample", "insert"]);
    assert_eq!(summary["task_ids"].as_array().unwrap().len(), 4);

    let stats = cli.json(&["stats", "focus", "--period", "week"]);
    assert_eq!(stats["total_focus_minutes"], 160);
    assert_eq!(stats["total_break_minutes"], 25);
    assert_eq!(stats["tasks_completed"], 2);
    assert_eq!(stats["subtasks_completed"], 5);
    assert_eq!(stats["focus_by_category"]["Work"], 100);
    assert_eq!(stats["focus_by_category"]["Study"], 60);

    let (stdout, _, code) = cli.run(&["stats", "focus", "--period", "week"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("2h 40m"));
}

#[test]
fn test_stats_focus_empty_store() {
    let cli = Cli::new();
    let stats = cli.json(&["stats", "focus", "--period", "month"]);
    assert_eq!(stats["total_focus_minutes"], 0);
    assert_eq!(stats["focus_by_category"], serde_json::json!({}));
}

#[test]
fn test_stats_rejects_unknown_period() {
    let cli = Cli::new();
    let (_, stderr, code) = cli.run(&["stats", "focus", "--period", "decade"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"));
}

#[test]
fn test_config_get_set() {
    let cli = Cli::new();
    let (stdout, _, code) = cli.run(&["config", "get", "pomodoro.work_duration_minutes"]);
    assert_eq!(code, 0, "Config get failed");
    assert_eq!(stdout.trim(), "25");

    let (_, _, code) = cli.run(&["config", "set", "pomodoro.work_duration_minutes", "40"]);
    assert_eq!(code, 0, "Config set failed");
    let (stdout, _, _) = cli.run(&["config", "get", "pomodoro.work_duration_minutes"]);
    assert_eq!(stdout.trim(), "40");

    let task = cli.json(&["task", "add", "Uses new default"]);
    assert_eq!(task["pomodoro_config"]["work_duration_minutes"], 40);
}

#[test]
fn test_config_unknown_key_fails() {
    let cli = Cli::new();
    let (_, stderr, code) = cli.run(&["config", "get", "ui.dark_mode"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"), "{stderr}");

    let (_, _, code) = cli.run(&["config", "set", "pomodoro.total_pomodoros", "0"]);
    assert_eq!(code, 1, "zero pomodoros must be rejected");
}

#[test]
fn test_search_by_query() {
    let cli = Cli::new();
    cli.json(&["task", "add", "Read Rust book", "--at", "2026-03-10"]);
    cli.json(&["task", "add", "Groceries", "--at", "2026-03-11"]);

    let results = cli.json(&["search", "rust"]);
    let results = results.as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["title"], "Read Rust book");

    let empty = cli.json(&["search"]);
    assert_eq!(empty.as_array().unwrap().len(), 0);
}

#[test]
fn test_calendar_week() {
    let cli = Cli::new();
    let view = cli.json(&["calendar", "week", "--date", "2026-03-11", "--week-start", "monday"]);
    let days = view["calendar"]["days"].as_array().unwrap();
    assert_eq!(days.len(), 7);
    assert_eq!(days[0]["full_date"], "2026-03-09");
    assert_eq!(view["calendar"]["selected"], "2026-03-11");

    let moved = cli.json(&[
        "calendar", "week", "--date", "2026-03-11", "--offset", "-1", "--week-start", "monday",
    ]);
    assert_eq!(moved["calendar"]["week_start"], "2026-03-02");
    assert_eq!(moved["calendar"]["selected"], "2026-03-02");
}

#[test]
fn test_preset_list_and_show() {
    let cli = Cli::new();
    let presets = cli.json(&["preset", "list"]);
    assert_eq!(presets.as_array().unwrap().len(), 4);

    let classic = cli.json(&["preset", "show", "classic"]);
    assert_eq!(classic["plan"].as_array().unwrap().len(), 8);
    assert_eq!(classic["plan"][7]["session_type"], "LONG_BREAK");
    assert_eq!(classic["planned_focus_minutes"], 100);
}

#[test]
fn test_agenda_sections() {
    let cli = Cli::new();
    cli.json(&["task", "add", "Late", "--at", "2000-01-01 09:00"]);
    let agenda = cli.json(&["agenda"]);
    assert_eq!(agenda["overdue"].as_array().unwrap().len(), 1);
    assert_eq!(agenda["today"].as_array().unwrap().len(), 0);
}

#[test]
fn test_completions_generate() {
    let cli = Cli::new();
    let (stdout, _, code) = cli.run(&["completions", "bash"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("tasktimer"));
}

#[test]
fn test_unknown_command_fails() {
    let cli = Cli::new();
    let (_, _, code) = cli.run(&["timer", "start"]);
    assert_ne!(code, 0);
}

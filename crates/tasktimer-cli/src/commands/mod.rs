pub mod agenda;
pub mod calendar;
pub mod category;
pub mod config;
pub mod preset;
pub mod sample;
pub mod search;
pub mod session;
pub mod stats;
pub mod subtask;
pub mod task;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use tasktimer_core::{Task, ValidationError};

/// Output settings shared by every command.
#[derive(Debug, Clone, Copy)]
pub struct Context {
    pub json: bool,
}

impl Context {
    /// Print `value` as pretty JSON with `--json`, otherwise the text rendering.
    pub fn emit<T, F>(&self, value: &T, text: F) -> Result<(), Box<dyn std::error::Error>>
    where
        T: Serialize + ?Sized,
        F: FnOnce(&T) -> String,
    {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            let rendered = text(value);
            if !rendered.is_empty() {
                println!("{rendered}");
            }
        }
        Ok(())
    }
}

/// Accepts RFC 3339, `YYYY-MM-DD HH:MM`, `YYYY-MM-DDTHH:MM`, or a bare date (midnight UTC).
pub fn parse_datetime(input: &str) -> Result<DateTime<Utc>, ValidationError> {
    let s = input.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(naive.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN).and_utc());
    }
    Err(ValidationError::invalid(
        "datetime",
        format!("cannot parse '{input}' (expected YYYY-MM-DD [HH:MM] or RFC 3339)"),
    ))
}

pub fn parse_date(input: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| {
        ValidationError::invalid("date", format!("cannot parse '{input}' (expected YYYY-MM-DD)"))
    })
}

pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// One-line summary: `[x] 2026-03-10 09:00  Title  (Work)  <id>`.
pub fn task_line(task: &Task, category_names: &HashMap<String, String>) -> String {
    let mark = if task.is_completed { "x" } else { " " };
    let category = task
        .category_id
        .as_ref()
        .map(|id| {
            let name = category_names.get(id).map(String::as_str).unwrap_or("?");
            format!("  ({name})")
        })
        .unwrap_or_default();
    format!(
        "[{mark}] {}  {}{category}  {}",
        task.date_time.format("%Y-%m-%d %H:%M"),
        task.title,
        task.id
    )
}

pub fn task_lines(tasks: &[Task], category_names: &HashMap<String, String>) -> String {
    if tasks.is_empty() {
        return "no tasks".to_string();
    }
    tasks
        .iter()
        .map(|t| task_line(t, category_names))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_minutes(minutes: u64) -> String {
    if minutes >= 60 {
        format!("{}h {:02}m", minutes / 60, minutes % 60)
    } else {
        format!("{minutes}m")
    }
}

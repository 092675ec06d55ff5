//! Store contracts shared by the SQLite and in-memory backends.

use chrono::{DateTime, NaiveDate, Utc};
use std::collections::HashMap;

use crate::error::Result;
use crate::model::{Category, Color, NewSession, NewTask, PomodoroSession, Task, TaskUpdate};
use crate::stats::{DateRange, UNNAMED_CATEGORY_LABEL};

/// The three reads focus statistics are computed from.
pub trait StatsSource {
    /// Tasks whose scheduled date falls in `range`.
    fn tasks_in_range(&self, range: DateRange) -> Result<Vec<Task>>;

    /// Completed tasks whose completion date falls in `range`.
    fn completed_tasks_in_range(&self, range: DateRange) -> Result<Vec<Task>>;

    /// Category id to display name.
    fn category_names(&self) -> Result<HashMap<String, String>>;
}

/// Task, subtask, session, and category persistence.
pub trait TaskStore: StatsSource {
    fn add_task(&mut self, new: NewTask) -> Result<Task>;

    /// Store a complete record, sessions included, under its own id.
    fn insert_task(&mut self, task: &Task) -> Result<()>;

    fn get_task(&self, id: &str) -> Result<Option<Task>>;

    /// All tasks, earliest scheduled first.
    fn list_tasks(&self) -> Result<Vec<Task>>;

    fn tasks_on(&self, date: NaiveDate) -> Result<Vec<Task>> {
        self.tasks_in_range(DateRange::single(date))
    }

    fn update_task(&mut self, id: &str, update: TaskUpdate) -> Result<Task>;

    fn toggle_task_completion(&mut self, id: &str, now: DateTime<Utc>) -> Result<Task>;

    /// Delete a task with its subtasks and sessions. `false` if it did not exist.
    fn delete_task(&mut self, id: &str) -> Result<bool>;

    fn set_subtask_completed(&mut self, task_id: &str, subtask_id: &str, completed: bool)
        -> Result<Task>;

    fn record_session(&mut self, task_id: &str, session: NewSession) -> Result<PomodoroSession>;

    fn complete_session(&mut self, session_id: &str, now: DateTime<Utc>)
        -> Result<PomodoroSession>;

    fn add_category(&mut self, name: &str, color: Color, icon: Option<String>)
        -> Result<Category>;

    fn update_category(&mut self, id: &str, name: &str, color: Color) -> Result<Category>;

    /// All categories, oldest first.
    fn list_categories(&self) -> Result<Vec<Category>>;

    /// Delete a category and clear it from every task. Returns the number
    /// of tasks that referenced it.
    fn delete_category(&mut self, id: &str) -> Result<usize>;
}

/// Map categories to display names; an empty name reads as unnamed.
pub(crate) fn names_of(categories: &[Category]) -> HashMap<String, String> {
    categories
        .iter()
        .map(|c| {
            let name = if c.name.trim().is_empty() {
                UNNAMED_CATEGORY_LABEL.to_string()
            } else {
                c.name.clone()
            };
            (c.id.clone(), name)
        })
        .collect()
}

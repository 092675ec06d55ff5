//! Tasks and their subtasks.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::new_id;
use super::pomodoro::{PomodoroConfig, PomodoroSession, SessionType};
use crate::error::ValidationError;

/// A checklist item owned by exactly one task.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Subtask {
    pub id: String,
    #[serde(default)]
    pub task_id: String,
    pub title: String,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub order: u32,
}

/// Subtask as supplied by an edit.
///
/// `id: None` marks a subtask that has never been stored; the store
/// allocates its identifier when the edit is applied.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubtaskDraft {
    #[serde(default)]
    pub id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub is_completed: bool,
}

impl SubtaskDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            is_completed: false,
        }
    }
}

impl From<&Subtask> for SubtaskDraft {
    fn from(subtask: &Subtask) -> Self {
        Self {
            id: Some(subtask.id.clone()),
            title: subtask.title.clone(),
            is_completed: subtask.is_completed,
        }
    }
}

/// A scheduled to-do item.
///
/// `completed_at` is set exactly when `is_completed` is true. Use
/// [`Task::set_completed`] or [`Task::toggle_completion`] to change either.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub date_time: DateTime<Utc>,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub pomodoro_config: Option<PomodoroConfig>,
    #[serde(default)]
    pub sessions: Vec<PomodoroSession>,
    #[serde(default)]
    pub subtasks: Vec<Subtask>,
}

impl Task {
    pub fn new(id: impl Into<String>, title: impl Into<String>, date_time: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            date_time,
            is_completed: false,
            completed_at: None,
            category_id: None,
            pomodoro_config: None,
            sessions: Vec::new(),
            subtasks: Vec::new(),
        }
    }

    /// Build a stored task from creation input, allocating every id.
    pub fn from_new(id: String, new: NewTask) -> Self {
        let subtasks = new
            .subtasks
            .into_iter()
            .enumerate()
            .map(|(order, draft)| Subtask {
                id: new_id(),
                task_id: id.clone(),
                title: draft.title,
                is_completed: draft.is_completed,
                order: order as u32,
            })
            .collect();

        Self {
            description: new.description,
            category_id: new.category_id,
            pomodoro_config: new.pomodoro_config,
            subtasks,
            ..Self::new(id, new.title, new.date_time)
        }
    }

    /// Calendar date (UTC) the task is scheduled on.
    pub fn date(&self) -> NaiveDate {
        self.date_time.date_naive()
    }

    /// Calendar date (UTC) the task was completed on, if it was.
    pub fn completed_date(&self) -> Option<NaiveDate> {
        self.completed_at.map(|dt| dt.date_naive())
    }

    /// Not completed and scheduled on a day strictly before `today`.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.is_completed && self.date() < today
    }

    pub fn set_completed(&mut self, completed: bool, now: DateTime<Utc>) {
        self.is_completed = completed;
        self.completed_at = completed.then_some(now);
    }

    pub fn toggle_completion(&mut self, now: DateTime<Utc>) {
        self.set_completed(!self.is_completed, now);
    }

    /// Replace the editable fields, keeping id, completion, and sessions.
    pub fn apply_update(&mut self, update: TaskUpdate) {
        self.title = update.title;
        self.description = update.description;
        self.date_time = update.date_time;
        self.category_id = update.category_id;
        self.pomodoro_config = update.pomodoro_config;
        self.subtasks = update
            .subtasks
            .into_iter()
            .enumerate()
            .map(|(order, draft)| Subtask {
                id: draft.id.unwrap_or_else(new_id),
                task_id: self.id.clone(),
                title: draft.title,
                is_completed: draft.is_completed,
                order: order as u32,
            })
            .collect();
    }

    fn completed_sessions<'a, F>(&'a self, kind: F) -> impl Iterator<Item = &'a PomodoroSession> + 'a
    where
        F: Fn(SessionType) -> bool + 'a,
    {
        self.sessions
            .iter()
            .filter(move |s| s.completed && kind(s.session_type))
    }

    /// Minutes of completed WORK sessions.
    pub fn focus_minutes(&self) -> u64 {
        self.completed_sessions(SessionType::is_work)
            .map(|s| u64::from(s.duration_minutes))
            .sum()
    }

    /// Minutes of completed short and long breaks.
    pub fn break_minutes(&self) -> u64 {
        self.completed_sessions(SessionType::is_break)
            .map(|s| u64::from(s.duration_minutes))
            .sum()
    }

    /// Number of completed WORK sessions.
    pub fn completed_pomodoros(&self) -> u64 {
        self.completed_sessions(SessionType::is_work).count() as u64
    }

    pub fn completed_subtasks(&self) -> u64 {
        self.subtasks.iter().filter(|s| s.is_completed).count() as u64
    }
}

/// Input for creating a task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTask {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub date_time: DateTime<Utc>,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub subtasks: Vec<SubtaskDraft>,
    #[serde(default)]
    pub pomodoro_config: Option<PomodoroConfig>,
}

impl NewTask {
    pub fn new(title: impl Into<String>, date_time: DateTime<Utc>) -> Self {
        Self {
            title: title.into(),
            description: None,
            date_time,
            category_id: None,
            subtasks: Vec::new(),
            pomodoro_config: None,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_editable(&self.title, self.pomodoro_config.as_ref())
    }
}

/// Full replacement of a task's editable fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskUpdate {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub date_time: DateTime<Utc>,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub subtasks: Vec<SubtaskDraft>,
    #[serde(default)]
    pub pomodoro_config: Option<PomodoroConfig>,
}

impl TaskUpdate {
    /// Start an edit from the task's current values.
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            date_time: task.date_time,
            category_id: task.category_id.clone(),
            subtasks: task.subtasks.iter().map(SubtaskDraft::from).collect(),
            pomodoro_config: task.pomodoro_config.clone(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_editable(&self.title, self.pomodoro_config.as_ref())
    }
}

fn validate_editable(title: &str, config: Option<&PomodoroConfig>) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::invalid("title", "must not be empty"));
    }
    if let Some(config) = config {
        config.validate()?;
    }
    Ok(())
}

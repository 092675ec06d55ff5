//! SQLite-backed task store.
//!
//! Provides persistent storage for:
//! - Tasks with their subtasks and Pomodoro configuration
//! - Recorded Pomodoro sessions
//! - Categories

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::collections::HashMap;
use std::path::Path;

use super::data_dir;
use super::migrations;
use super::repository::{names_of, StatsSource, TaskStore};
use crate::error::{CoreError, DatabaseError, Result};
use crate::model::{
    new_id, Category, Color, NewSession, NewTask, PomodoroConfig, PomodoroSession, SessionType,
    Subtask, Task, TaskUpdate,
};
use crate::stats::DateRange;

const TASK_COLUMNS: &str =
    "id, title, description, date_time, is_completed, completed_at, category_id, pomodoro_config";

const SESSION_COLUMNS: &str =
    "id, task_id, start_time, end_time, duration_minutes, session_type, completed";

// === Helper Functions ===

fn to_epoch(dt: DateTime<Utc>) -> i64 {
    dt.timestamp()
}

/// Unix seconds to UTC, falling back to the epoch for out-of-range values.
fn from_epoch(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(secs, 0).unwrap_or_default()
}

fn to_u32(value: Option<i64>) -> u32 {
    value.and_then(|v| u32::try_from(v).ok()).unwrap_or(0)
}

fn parse_pomodoro_config(task_id: &str, json: Option<String>) -> Option<PomodoroConfig> {
    let json = json?;
    match serde_json::from_str(&json) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!(task_id, error = %e, "ignoring malformed pomodoro_config");
            None
        }
    }
}

/// Build a Task (without subtasks or sessions) from a database row.
fn row_to_task(row: &Row) -> Result<Task, rusqlite::Error> {
    let id: String = row.get(0)?;
    let is_completed = row.get::<_, Option<bool>>(4)?.unwrap_or(false);
    let completed_at = row
        .get::<_, Option<i64>>(5)?
        .map(from_epoch)
        .filter(|_| is_completed);
    let pomodoro_config = parse_pomodoro_config(&id, row.get(7)?);

    Ok(Task {
        title: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
        description: row.get(2)?,
        date_time: from_epoch(row.get::<_, Option<i64>>(3)?.unwrap_or(0)),
        is_completed,
        completed_at,
        category_id: row.get(6)?,
        pomodoro_config,
        sessions: Vec::new(),
        subtasks: Vec::new(),
        id,
    })
}

fn row_to_subtask(row: &Row) -> Result<Subtask, rusqlite::Error> {
    Ok(Subtask {
        id: row.get(0)?,
        task_id: row.get(1)?,
        title: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
        is_completed: row.get::<_, Option<bool>>(3)?.unwrap_or(false),
        order: to_u32(row.get(4)?),
    })
}

/// Build a session from a row. Rows with an unknown type tag yield `None`.
fn row_to_session(row: &Row) -> Result<Option<PomodoroSession>, rusqlite::Error> {
    let id: String = row.get(0)?;
    let tag: Option<String> = row.get(5)?;
    let Some(session_type) = tag.as_deref().and_then(SessionType::from_tag) else {
        tracing::warn!(session_id = %id, tag = ?tag, "skipping session with unknown type");
        return Ok(None);
    };

    Ok(Some(PomodoroSession {
        id,
        task_id: row.get(1)?,
        start_time: from_epoch(row.get::<_, Option<i64>>(2)?.unwrap_or(0)),
        end_time: row.get::<_, Option<i64>>(3)?.map(from_epoch),
        duration_minutes: to_u32(row.get(4)?),
        session_type,
        completed: row.get::<_, Option<bool>>(6)?.unwrap_or(false),
    }))
}

fn row_to_category(row: &Row) -> Result<Category, rusqlite::Error> {
    let color = row
        .get::<_, Option<i64>>(2)?
        .and_then(|v| u32::try_from(v).ok())
        .map(Color)
        .unwrap_or_default();

    Ok(Category {
        id: row.get(0)?,
        name: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
        color,
        icon: row.get(3)?,
        created_at: from_epoch(row.get::<_, Option<i64>>(4)?.unwrap_or(0)),
    })
}

fn upsert_task_row(conn: &Connection, task: &Task) -> Result<()> {
    let config_json = task
        .pomodoro_config
        .as_ref()
        .map(serde_json::to_string)
        .transpose()?;
    conn.execute(
        "INSERT OR REPLACE INTO tasks
            (id, title, description, date_time, is_completed, completed_at, category_id, pomodoro_config)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            task.id,
            task.title,
            task.description,
            to_epoch(task.date_time),
            task.is_completed,
            task.completed_at.map(to_epoch),
            task.category_id,
            config_json,
        ],
    )?;
    Ok(())
}

fn replace_subtasks(conn: &Connection, task: &Task) -> Result<()> {
    conn.execute("DELETE FROM subtasks WHERE task_id = ?1", params![task.id])?;
    let mut stmt = conn.prepare(
        "INSERT INTO subtasks (id, task_id, title, is_completed, sort_order)
         VALUES (?1, ?2, ?3, ?4, ?5)",
    )?;
    for subtask in &task.subtasks {
        stmt.execute(params![
            subtask.id,
            task.id,
            subtask.title,
            subtask.is_completed,
            subtask.order,
        ])?;
    }
    Ok(())
}

/// Sessions are always stored under `task_id`, whatever `session.task_id` holds.
fn insert_session_row(conn: &Connection, task_id: &str, session: &PomodoroSession) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO pomodoro_sessions
            (id, task_id, start_time, end_time, duration_minutes, session_type, completed)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            session.id,
            task_id,
            to_epoch(session.start_time),
            session.end_time.map(to_epoch),
            session.duration_minutes,
            session.session_type.as_str(),
            session.completed,
        ],
    )?;
    Ok(())
}

/// SQLite database for tasks, sessions, and categories.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Get a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Open the database at `<data dir>/tasktimer.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self> {
        let path = data_dir()?.join("tasktimer.db");
        Self::open_at(&path)
    }

    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "opened database");
        Self::with_connection(conn)
    }

    /// Open an in-memory database.
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        migrations::migrate(&conn)
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;
        Ok(Self { conn })
    }

    fn query_tasks<P: rusqlite::Params>(&self, clause: &str, params: P) -> Result<Vec<Task>> {
        let sql = format!("SELECT {TASK_COLUMNS} FROM tasks {clause} ORDER BY date_time, rowid");
        let mut stmt = self.conn.prepare(&sql)?;
        let mut tasks = stmt
            .query_map(params, row_to_task)?
            .collect::<Result<Vec<_>, _>>()?;
        self.load_children(&mut tasks)?;
        tracing::debug!(clause, count = tasks.len(), "loaded tasks");
        Ok(tasks)
    }

    /// Attach subtasks and sessions to freshly read task rows.
    fn load_children(&self, tasks: &mut [Task]) -> Result<()> {
        let mut subtasks = self.conn.prepare(
            "SELECT id, task_id, title, is_completed, sort_order
             FROM subtasks WHERE task_id = ?1 ORDER BY sort_order, rowid",
        )?;
        let mut sessions = self.conn.prepare(&format!(
            "SELECT {SESSION_COLUMNS} FROM pomodoro_sessions
             WHERE task_id = ?1 ORDER BY start_time, rowid"
        ))?;

        for task in tasks.iter_mut() {
            task.subtasks = subtasks
                .query_map(params![task.id], row_to_subtask)?
                .collect::<Result<Vec<_>, _>>()?;
            task.sessions = sessions
                .query_map(params![task.id], row_to_session)?
                .filter_map(|row| row.transpose())
                .collect::<Result<Vec<_>, _>>()?;
        }
        Ok(())
    }

    fn require_task(&self, id: &str) -> Result<Task> {
        self.get_task(id)?
            .ok_or_else(|| CoreError::task_not_found(id))
    }

    fn task_exists(&self, id: &str) -> Result<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM tasks WHERE id = ?1",
            params![id],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    fn get_session(&self, id: &str) -> Result<Option<PomodoroSession>> {
        let session = self
            .conn
            .query_row(
                &format!("SELECT {SESSION_COLUMNS} FROM pomodoro_sessions WHERE id = ?1"),
                params![id],
                row_to_session,
            )
            .optional()?;
        Ok(session.flatten())
    }

    fn get_category(&self, id: &str) -> Result<Option<Category>> {
        Ok(self
            .conn
            .query_row(
                "SELECT id, name, color, icon, created_at FROM categories WHERE id = ?1",
                params![id],
                row_to_category,
            )
            .optional()?)
    }
}

impl StatsSource for Database {
    fn tasks_in_range(&self, range: DateRange) -> Result<Vec<Task>> {
        self.query_tasks(
            "WHERE date_time >= ?1 AND date_time < ?2",
            params![
                to_epoch(range.start_utc()),
                to_epoch(range.end_exclusive_utc())
            ],
        )
    }

    fn completed_tasks_in_range(&self, range: DateRange) -> Result<Vec<Task>> {
        self.query_tasks(
            "WHERE is_completed = 1 AND completed_at >= ?1 AND completed_at < ?2",
            params![
                to_epoch(range.start_utc()),
                to_epoch(range.end_exclusive_utc())
            ],
        )
    }

    fn category_names(&self) -> Result<HashMap<String, String>> {
        Ok(names_of(&self.list_categories()?))
    }
}

impl TaskStore for Database {
    fn add_task(&mut self, new: NewTask) -> Result<Task> {
        new.validate()?;
        let task = Task::from_new(new_id(), new);
        self.insert_task(&task)?;
        tracing::info!(task_id = %task.id, title = %task.title, "added task");
        self.require_task(&task.id)
    }

    fn insert_task(&mut self, task: &Task) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        upsert_task_row(&tx, task)?;
        replace_subtasks(&tx, task)?;
        tx.execute(
            "DELETE FROM pomodoro_sessions WHERE task_id = ?1",
            params![task.id],
        )?;
        for session in &task.sessions {
            insert_session_row(&tx, &task.id, session)?;
        }
        tx.commit()?;
        Ok(())
    }

    fn get_task(&self, id: &str) -> Result<Option<Task>> {
        Ok(self.query_tasks("WHERE id = ?1", params![id])?.pop())
    }

    fn list_tasks(&self) -> Result<Vec<Task>> {
        self.query_tasks("", [])
    }

    fn update_task(&mut self, id: &str, update: TaskUpdate) -> Result<Task> {
        update.validate()?;
        let mut task = self.require_task(id)?;
        task.apply_update(update);

        let tx = self.conn.unchecked_transaction()?;
        upsert_task_row(&tx, &task)?;
        replace_subtasks(&tx, &task)?;
        tx.commit()?;

        tracing::info!(task_id = %id, "updated task");
        self.require_task(id)
    }

    fn toggle_task_completion(&mut self, id: &str, now: DateTime<Utc>) -> Result<Task> {
        let mut task = self.require_task(id)?;
        task.toggle_completion(now);
        self.conn.execute(
            "UPDATE tasks SET is_completed = ?1, completed_at = ?2 WHERE id = ?3",
            params![task.is_completed, task.completed_at.map(to_epoch), id],
        )?;
        tracing::info!(task_id = %id, completed = task.is_completed, "toggled task");
        self.require_task(id)
    }

    fn delete_task(&mut self, id: &str) -> Result<bool> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM subtasks WHERE task_id = ?1", params![id])?;
        tx.execute(
            "DELETE FROM pomodoro_sessions WHERE task_id = ?1",
            params![id],
        )?;
        let removed = tx.execute("DELETE FROM tasks WHERE id = ?1", params![id])?;
        tx.commit()?;

        if removed > 0 {
            tracing::info!(task_id = %id, "deleted task");
        }
        Ok(removed > 0)
    }

    fn set_subtask_completed(
        &mut self,
        task_id: &str,
        subtask_id: &str,
        completed: bool,
    ) -> Result<Task> {
        let changed = self.conn.execute(
            "UPDATE subtasks SET is_completed = ?1 WHERE id = ?2 AND task_id = ?3",
            params![completed, subtask_id, task_id],
        )?;
        if changed == 0 {
            return Err(if self.task_exists(task_id)? {
                CoreError::subtask_not_found(subtask_id)
            } else {
                CoreError::task_not_found(task_id)
            });
        }
        self.require_task(task_id)
    }

    fn record_session(&mut self, task_id: &str, session: NewSession) -> Result<PomodoroSession> {
        if !self.task_exists(task_id)? {
            return Err(CoreError::task_not_found(task_id));
        }
        let session = session.into_session(new_id(), task_id);
        insert_session_row(&self.conn, task_id, &session)?;
        tracing::info!(
            task_id,
            session_id = %session.id,
            kind = %session.session_type,
            minutes = session.duration_minutes,
            "recorded session"
        );
        self.get_session(&session.id)?
            .ok_or_else(|| CoreError::session_not_found(&session.id))
    }

    fn complete_session(&mut self, session_id: &str, now: DateTime<Utc>) -> Result<PomodoroSession> {
        let mut session = self
            .get_session(session_id)?
            .ok_or_else(|| CoreError::session_not_found(session_id))?;
        session.mark_completed(now);
        self.conn.execute(
            "UPDATE pomodoro_sessions SET completed = 1, end_time = ?1 WHERE id = ?2",
            params![session.end_time.map(to_epoch), session_id],
        )?;
        self.get_session(session_id)?
            .ok_or_else(|| CoreError::session_not_found(session_id))
    }

    fn add_category(&mut self, name: &str, color: Color, icon: Option<String>) -> Result<Category> {
        let id = new_id();
        self.conn.execute(
            "INSERT INTO categories (id, name, color, icon, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![id, name, color.argb(), icon, to_epoch(Utc::now())],
        )?;
        tracing::info!(category_id = %id, name, "added category");
        self.get_category(&id)?
            .ok_or_else(|| CoreError::category_not_found(&id))
    }

    fn update_category(&mut self, id: &str, name: &str, color: Color) -> Result<Category> {
        let changed = self.conn.execute(
            "UPDATE categories SET name = ?1, color = ?2 WHERE id = ?3",
            params![name, color.argb(), id],
        )?;
        if changed == 0 {
            return Err(CoreError::category_not_found(id));
        }
        self.get_category(id)?
            .ok_or_else(|| CoreError::category_not_found(id))
    }

    fn list_categories(&self) -> Result<Vec<Category>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, color, icon, created_at FROM categories
             ORDER BY created_at, rowid",
        )?;
        let categories = stmt
            .query_map([], row_to_category)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(categories)
    }

    fn delete_category(&mut self, id: &str) -> Result<usize> {
        let tx = self.conn.unchecked_transaction()?;
        let detached = tx.execute(
            "UPDATE tasks SET category_id = NULL WHERE category_id = ?1",
            params![id],
        )?;
        tx.execute("DELETE FROM categories WHERE id = ?1", params![id])?;
        tx.commit()?;
        tracing::info!(category_id = %id, detached, "deleted category");
        Ok(detached)
    }
}

//! Schema versions of the task database.
//!
//! `Database` runs [`migrate`] on every open; each step is applied once,
//! recorded in the single-row `schema_version` table.

use rusqlite::{Connection, Result as SqliteResult};

/// Version written by the newest step below.
pub const CURRENT_VERSION: i32 = 2;

/// Run every step newer than the stored version.
pub fn migrate(conn: &Connection) -> SqliteResult<()> {
    create_schema_version_table(conn)?;

    let current_version = get_schema_version(conn);
    tracing::debug!(from = current_version, to = CURRENT_VERSION, "checking schema version");

    if current_version < 1 {
        migrate_v1(conn)?;
    }
    if current_version < 2 {
        migrate_v2(conn)?;
    }

    Ok(())
}

fn create_schema_version_table(conn: &Connection) -> SqliteResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY
        );",
    )
}

/// Stored version, 0 for a fresh file.
pub fn get_schema_version(conn: &Connection) -> i32 {
    conn.query_row("SELECT version FROM schema_version", [], |row| {
        row.get::<_, i32>(0)
    })
    .unwrap_or_else(|e| {
        if !matches!(e, rusqlite::Error::QueryReturnedNoRows) {
            tracing::warn!(error = %e, "failed to read schema_version");
        }
        0
    })
}

fn set_schema_version(conn: &Connection, version: i32) -> SqliteResult<()> {
    conn.execute("DELETE FROM schema_version", [])?;
    conn.execute("INSERT INTO schema_version (version) VALUES (?1)", [version])?;
    Ok(())
}

/// Migration v1: categories, tasks, subtasks, and sessions.
///
/// Times are INTEGER unix seconds (UTC). `pomodoro_config` is JSON text.
fn migrate_v1(conn: &Connection) -> SqliteResult<()> {
    let tx = conn.unchecked_transaction()?;

    tx.execute_batch(
        "CREATE TABLE IF NOT EXISTS categories (
            id          TEXT PRIMARY KEY,
            name        TEXT NOT NULL DEFAULT '',
            color       INTEGER NOT NULL DEFAULT 4282549748,
            created_at  INTEGER NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS tasks (
            id              TEXT PRIMARY KEY,
            title           TEXT NOT NULL DEFAULT '',
            description     TEXT,
            date_time       INTEGER NOT NULL DEFAULT 0,
            is_completed    INTEGER NOT NULL DEFAULT 0,
            completed_at    INTEGER,
            category_id     TEXT,
            pomodoro_config TEXT
        );

        CREATE TABLE IF NOT EXISTS subtasks (
            id           TEXT PRIMARY KEY,
            task_id      TEXT NOT NULL,
            title        TEXT NOT NULL DEFAULT '',
            is_completed INTEGER NOT NULL DEFAULT 0,
            sort_order   INTEGER NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS pomodoro_sessions (
            id               TEXT PRIMARY KEY,
            task_id          TEXT NOT NULL,
            start_time       INTEGER NOT NULL DEFAULT 0,
            end_time         INTEGER,
            duration_minutes INTEGER NOT NULL DEFAULT 0,
            session_type     TEXT NOT NULL DEFAULT 'WORK',
            completed        INTEGER NOT NULL DEFAULT 0
        );

        CREATE INDEX IF NOT EXISTS idx_tasks_date_time ON tasks(date_time);
        CREATE INDEX IF NOT EXISTS idx_tasks_completed_at ON tasks(is_completed, completed_at);
        CREATE INDEX IF NOT EXISTS idx_tasks_category ON tasks(category_id);
        CREATE INDEX IF NOT EXISTS idx_subtasks_task ON subtasks(task_id);
        CREATE INDEX IF NOT EXISTS idx_sessions_task ON pomodoro_sessions(task_id);",
    )?;

    set_schema_version(&tx, 1)?;
    tx.commit()?;
    Ok(())
}

/// Migration v2: optional category icon.
fn migrate_v2(conn: &Connection) -> SqliteResult<()> {
    let tx = conn.unchecked_transaction()?;

    let has_icon: bool = tx
        .query_row(
            "SELECT COUNT(*) FROM pragma_table_info('categories') WHERE name = 'icon'",
            [],
            |row| row.get::<_, i32>(0),
        )
        .unwrap_or(0)
        > 0;

    if !has_icon {
        tx.execute_batch("ALTER TABLE categories ADD COLUMN icon TEXT;")?;
    }

    set_schema_version(&tx, 2)?;
    tx.commit()?;
    Ok(())
}

//! Error types for tasktimer-core.
//!
//! Errors are grouped by the layer that raises them. Aggregation code never
//! fails; only storage, configuration, and input validation do.

use chrono::NaiveDate;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("storage: {0}")]
    Database(#[from] DatabaseError),

    #[error("config: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),

    /// A task, subtask, session, or category id that does not exist
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("I/O: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Custom(String),
}

impl CoreError {
    fn not_found(kind: &'static str, id: &str) -> Self {
        CoreError::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    pub fn task_not_found(id: &str) -> Self {
        Self::not_found("Task", id)
    }

    pub fn category_not_found(id: &str) -> Self {
        Self::not_found("Category", id)
    }

    pub fn subtask_not_found(id: &str) -> Self {
        Self::not_found("Subtask", id)
    }

    pub fn session_not_found(id: &str) -> Self {
        Self::not_found("Session", id)
    }
}

/// SQLite failures.
#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("cannot open task database {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("query failed: {0}")]
    QueryFailed(String),

    /// Schema upgrade did not complete; the database is left at its previous version
    #[error("schema upgrade failed: {0}")]
    MigrationFailed(String),

    #[error("task database is locked by another process")]
    Locked,
}

/// Problems reading, writing, or editing `config.toml`.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    #[error("cannot write {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    #[error("bad value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    #[error("unknown config key: {0}")]
    UnknownKey(String),

    #[error("malformed config: {0}")]
    ParseFailed(String),
}

/// Rejected user input.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("date range ends ({end}) before it starts ({start})")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("{field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("color '{0}' is not #RRGGBB or #AARRGGBB")]
    InvalidColor(String),
}

impl ValidationError {
    pub fn invalid(field: &str, message: impl Into<String>) -> Self {
        ValidationError::InvalidValue {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl From<rusqlite::Error> for DatabaseError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(failure, _)
                if failure.code == rusqlite::ErrorCode::DatabaseLocked =>
            {
                DatabaseError::Locked
            }
            _ => DatabaseError::QueryFailed(err.to_string()),
        }
    }
}

impl From<rusqlite::Error> for CoreError {
    fn from(err: rusqlite::Error) -> Self {
        CoreError::Database(err.into())
    }
}

pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_kind_and_id() {
        let err = CoreError::task_not_found("abc");
        assert_eq!(err.to_string(), "Task not found: abc");
    }

    #[test]
    fn rusqlite_no_rows_maps_to_query_failed() {
        let err: CoreError = rusqlite::Error::QueryReturnedNoRows.into();
        assert!(matches!(
            err,
            CoreError::Database(DatabaseError::QueryFailed(_))
        ));
    }

    #[test]
    fn validation_error_wraps_into_core() {
        let err: CoreError = ValidationError::invalid("title", "must not be empty").into();
        assert_eq!(err.to_string(), "invalid input: title: must not be empty");
    }
}

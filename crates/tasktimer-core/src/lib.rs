//! # Tasktimer Core Library
//!
//! This library provides the core business logic for tasktimer, a task
//! manager with per-task Pomodoro sessions. It follows a CLI-first
//! philosophy: every operation is available through the standalone
//! `tasktimer` binary, which is a thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Model**: tasks, subtasks, categories, Pomodoro configuration and sessions
//! - **Stats**: pure aggregation of completed sessions into focus statistics
//! - **Filter / Calendar**: task list views and the week strip
//! - **Storage**: SQLite and in-memory stores behind [`TaskStore`], plus
//!   TOML-based configuration
//!
//! ## Key Components
//!
//! - [`compute_focus_stats`]: focus statistics over a resolved period
//! - [`Database`]: task, session, and category persistence
//! - [`Config`]: application configuration management

pub mod calendar;
pub mod error;
pub mod filter;
pub mod model;
pub mod stats;
pub mod storage;

pub use calendar::{CalendarDay, WeekCalendar, WeekStart};
pub use error::{ConfigError, CoreError, DatabaseError, Result, ValidationError};
pub use filter::{Agenda, SearchFilter, SortOption, TaskFilter};
pub use model::{
    Category, Color, NewSession, NewTask, PomodoroConfig, PomodoroSession, SessionType, Subtask,
    SubtaskDraft, Task, TaskUpdate,
};
pub use stats::{compute_focus_stats, resolve_period, DateRange, FocusStats, StatsPeriod};
pub use storage::{Config, Database, MemoryStore, StatsSource, TaskStore};

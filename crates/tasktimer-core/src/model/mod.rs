//! Entity definitions: tasks, subtasks, categories, pomodoro sessions.

mod category;
mod pomodoro;
mod task;

pub use category::{Category, Color};
pub use pomodoro::{NewSession, PlannedStep, PomodoroConfig, PomodoroSession, SessionType};
pub use task::{NewTask, Subtask, SubtaskDraft, Task, TaskUpdate};

use uuid::Uuid;

/// Allocate a fresh record identifier.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

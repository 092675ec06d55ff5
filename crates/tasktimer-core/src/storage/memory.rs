//! In-process store, used by tests and as a scratch backend.

use chrono::{DateTime, Utc};
use std::collections::HashMap;

use super::repository::{names_of, StatsSource, TaskStore};
use crate::error::{CoreError, Result};
use crate::model::{new_id, Category, Color, NewSession, NewTask, PomodoroSession, Task, TaskUpdate};
use crate::stats::DateRange;

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tasks: Vec<Task>,
    categories: Vec<Category>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn task_mut(&mut self, id: &str) -> Result<&mut Task> {
        self.tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| CoreError::task_not_found(id))
    }

    fn sorted(mut tasks: Vec<Task>) -> Vec<Task> {
        tasks.sort_by_key(|t| t.date_time);
        tasks
    }
}

impl StatsSource for MemoryStore {
    fn tasks_in_range(&self, range: DateRange) -> Result<Vec<Task>> {
        Ok(Self::sorted(
            self.tasks
                .iter()
                .filter(|t| range.contains(t.date()))
                .cloned()
                .collect(),
        ))
    }

    fn completed_tasks_in_range(&self, range: DateRange) -> Result<Vec<Task>> {
        Ok(Self::sorted(
            self.tasks
                .iter()
                .filter(|t| t.is_completed && t.completed_date().is_some_and(|d| range.contains(d)))
                .cloned()
                .collect(),
        ))
    }

    fn category_names(&self) -> Result<HashMap<String, String>> {
        Ok(names_of(&self.categories))
    }
}

impl TaskStore for MemoryStore {
    fn add_task(&mut self, new: NewTask) -> Result<Task> {
        new.validate()?;
        let task = Task::from_new(new_id(), new);
        self.tasks.push(task.clone());
        Ok(task)
    }

    fn insert_task(&mut self, task: &Task) -> Result<()> {
        let mut task = task.clone();
        for session in &mut task.sessions {
            session.task_id = task.id.clone();
        }
        for subtask in &mut task.subtasks {
            subtask.task_id = task.id.clone();
        }
        self.tasks.retain(|t| t.id != task.id);
        self.tasks.push(task);
        Ok(())
    }

    fn get_task(&self, id: &str) -> Result<Option<Task>> {
        Ok(self.tasks.iter().find(|t| t.id == id).cloned())
    }

    fn list_tasks(&self) -> Result<Vec<Task>> {
        Ok(Self::sorted(self.tasks.clone()))
    }

    fn update_task(&mut self, id: &str, update: TaskUpdate) -> Result<Task> {
        update.validate()?;
        let task = self.task_mut(id)?;
        task.apply_update(update);
        Ok(task.clone())
    }

    fn toggle_task_completion(&mut self, id: &str, now: DateTime<Utc>) -> Result<Task> {
        let task = self.task_mut(id)?;
        task.toggle_completion(now);
        Ok(task.clone())
    }

    fn delete_task(&mut self, id: &str) -> Result<bool> {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        Ok(self.tasks.len() != before)
    }

    fn set_subtask_completed(
        &mut self,
        task_id: &str,
        subtask_id: &str,
        completed: bool,
    ) -> Result<Task> {
        let task = self.task_mut(task_id)?;
        let subtask = task
            .subtasks
            .iter_mut()
            .find(|s| s.id == subtask_id)
            .ok_or_else(|| CoreError::subtask_not_found(subtask_id))?;
        subtask.is_completed = completed;
        Ok(task.clone())
    }

    fn record_session(&mut self, task_id: &str, session: NewSession) -> Result<PomodoroSession> {
        let task = self.task_mut(task_id)?;
        let session = session.into_session(new_id(), task_id);
        task.sessions.push(session.clone());
        Ok(session)
    }

    fn complete_session(&mut self, session_id: &str, now: DateTime<Utc>) -> Result<PomodoroSession> {
        let session = self
            .tasks
            .iter_mut()
            .flat_map(|t| t.sessions.iter_mut())
            .find(|s| s.id == session_id)
            .ok_or_else(|| CoreError::session_not_found(session_id))?;
        session.mark_completed(now);
        Ok(session.clone())
    }

    fn add_category(&mut self, name: &str, color: Color, icon: Option<String>) -> Result<Category> {
        let category = Category {
            id: new_id(),
            name: name.to_string(),
            color,
            icon,
            created_at: Utc::now(),
        };
        self.categories.push(category.clone());
        Ok(category)
    }

    fn update_category(&mut self, id: &str, name: &str, color: Color) -> Result<Category> {
        let category = self
            .categories
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| CoreError::category_not_found(id))?;
        category.name = name.to_string();
        category.color = color;
        Ok(category.clone())
    }

    fn list_categories(&self) -> Result<Vec<Category>> {
        let mut categories = self.categories.clone();
        categories.sort_by_key(|c| c.created_at);
        Ok(categories)
    }

    fn delete_category(&mut self, id: &str) -> Result<usize> {
        self.categories.retain(|c| c.id != id);
        let mut detached = 0;
        for task in &mut self.tasks {
            if task.category_id.as_deref() == Some(id) {
                task.category_id = None;
                detached += 1;
            }
        }
        Ok(detached)
    }
}

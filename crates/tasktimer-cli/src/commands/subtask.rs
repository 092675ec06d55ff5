//! Subtask checklist commands.

use clap::Subcommand;
use tasktimer_core::{CoreError, Database, SubtaskDraft, Task, TaskStore, TaskUpdate};

use super::Context;

#[derive(Subcommand)]
pub enum SubtaskAction {
    /// Append a subtask to a task
    Add {
        /// Task ID
        task_id: String,
        /// Subtask title
        title: String,
    },
    /// Toggle a subtask's completion
    Toggle {
        /// Task ID
        task_id: String,
        /// Subtask ID
        subtask_id: String,
    },
    /// Remove a subtask
    Remove {
        /// Task ID
        task_id: String,
        /// Subtask ID
        subtask_id: String,
    },
}

fn checklist(task: &Task) -> String {
    if task.subtasks.is_empty() {
        return format!("{}: no subtasks", task.title);
    }
    let mut out = vec![format!(
        "{} ({}/{})",
        task.title,
        task.completed_subtasks(),
        task.subtasks.len()
    )];
    for subtask in &task.subtasks {
        let mark = if subtask.is_completed { "x" } else { " " };
        out.push(format!("  [{mark}] {}  {}", subtask.title, subtask.id));
    }
    out.join("\n")
}

fn load(db: &Database, task_id: &str) -> Result<Task, CoreError> {
    db.get_task(task_id)?
        .ok_or_else(|| CoreError::task_not_found(task_id))
}

pub fn run(action: SubtaskAction, ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let mut db = Database::open()?;

    match action {
        SubtaskAction::Add { task_id, title } => {
            let task = load(&db, &task_id)?;
            let mut update = TaskUpdate::from_task(&task);
            update.subtasks.push(SubtaskDraft::new(title));
            let task = db.update_task(&task_id, update)?;
            ctx.emit(&task, checklist)?;
        }
        SubtaskAction::Toggle {
            task_id,
            subtask_id,
        } => {
            let task = load(&db, &task_id)?;
            let current = task
                .subtasks
                .iter()
                .find(|s| s.id == subtask_id)
                .ok_or_else(|| CoreError::subtask_not_found(&subtask_id))?;
            let task = db.set_subtask_completed(&task_id, &subtask_id, !current.is_completed)?;
            ctx.emit(&task, checklist)?;
        }
        SubtaskAction::Remove {
            task_id,
            subtask_id,
        } => {
            let task = load(&db, &task_id)?;
            let mut update = TaskUpdate::from_task(&task);
            let before = update.subtasks.len();
            update
                .subtasks
                .retain(|draft| draft.id.as_deref() != Some(subtask_id.as_str()));
            if update.subtasks.len() == before {
                return Err(CoreError::subtask_not_found(&subtask_id).into());
            }
            let task = db.update_task(&task_id, update)?;
            ctx.emit(&task, checklist)?;
        }
    }
    Ok(())
}

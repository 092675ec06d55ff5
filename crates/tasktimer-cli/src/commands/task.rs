//! Task management commands for CLI.

use chrono::Utc;
use clap::Subcommand;
use tasktimer_core::filter::sort_tasks;
use tasktimer_core::{
    Config, CoreError, Database, NewTask, PomodoroConfig, SortOption, StatsSource, SubtaskDraft, Task, TaskFilter,
    TaskStore, TaskUpdate, ValidationError,
};

use super::{parse_datetime, task_lines, today, Context};

#[derive(Subcommand)]
pub enum TaskAction {
    /// Create a new task
    Add {
        /// Task title
        title: String,
        /// Task description
        #[arg(long)]
        description: Option<String>,
        /// Scheduled time (YYYY-MM-DD [HH:MM]); defaults to now
        #[arg(long)]
        at: Option<String>,
        /// Category ID
        #[arg(long)]
        category: Option<String>,
        /// Subtask title (repeatable)
        #[arg(long = "subtask")]
        subtasks: Vec<String>,
        /// Pomodoro preset name (classic, short, long, intense); defaults to [pomodoro] config
        #[arg(long)]
        preset: Option<String>,
    },
    /// List tasks
    List {
        /// all, today, or category:<id>
        #[arg(long, default_value = "all")]
        filter: String,
        /// date-asc, date-desc, title-asc, title-desc, category
        #[arg(long, default_value = "date-asc")]
        sort: String,
    },
    /// Get task details
    Get {
        /// Task ID
        id: String,
    },
    /// Edit a task
    Edit {
        /// Task ID
        id: String,
        /// New title
        #[arg(long)]
        title: Option<String>,
        /// New description
        #[arg(long)]
        description: Option<String>,
        /// New scheduled time
        #[arg(long)]
        at: Option<String>,
        /// New category ID
        #[arg(long, conflicts_with = "no_category")]
        category: Option<String>,
        /// Remove the category
        #[arg(long)]
        no_category: bool,
        /// Replace the Pomodoro config with a preset
        #[arg(long)]
        preset: Option<String>,
    },
    /// Toggle completion
    Toggle {
        /// Task ID
        id: String,
    },
    /// Delete a task with its subtasks and sessions
    Delete {
        /// Task ID
        id: String,
    },
}

pub(crate) fn lookup_preset(name: &str) -> Result<PomodoroConfig, ValidationError> {
    PomodoroConfig::preset(name)
        .ok_or_else(|| ValidationError::invalid("preset", format!("unknown preset '{name}'")))
}

fn task_detail(task: &Task) -> String {
    let mut out = vec![
        format!("{}  {}", task.id, task.title),
        format!("  scheduled: {}", task.date_time.format("%Y-%m-%d %H:%M")),
    ];
    if let Some(description) = &task.description {
        out.push(format!("  description: {description}"));
    }
    if let Some(completed_at) = task.completed_at {
        out.push(format!("  completed: {}", completed_at.format("%Y-%m-%d %H:%M")));
    }
    if let Some(category) = &task.category_id {
        out.push(format!("  category: {category}"));
    }
    for subtask in &task.subtasks {
        let mark = if subtask.is_completed { "x" } else { " " };
        out.push(format!("  [{mark}] {}  {}", subtask.title, subtask.id));
    }
    out.push(format!(
        "  sessions: {} ({} focus minutes)",
        task.sessions.len(),
        task.focus_minutes()
    ));
    out.join("\n")
}

pub fn run(action: TaskAction, ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let mut db = Database::open()?;

    match action {
        TaskAction::Add {
            title,
            description,
            at,
            category,
            subtasks,
            preset,
        } => {
            let date_time = match at {
                Some(at) => parse_datetime(&at)?,
                None => Utc::now(),
            };
            let mut new = NewTask::new(title, date_time);
            new.description = description;
            new.category_id = category;
            new.subtasks = subtasks.into_iter().map(SubtaskDraft::new).collect();
            new.pomodoro_config = Some(match preset {
                Some(name) => lookup_preset(&name)?,
                None => Config::load()?.pomodoro,
            });

            let task = db.add_task(new)?;
            ctx.emit(&task, |t| format!("Task created: {}", t.id))?;
        }
        TaskAction::List { filter, sort } => {
            let filter: TaskFilter = filter.parse()?;
            let sort: SortOption = sort.parse()?;
            let names = db.category_names()?;
            let mut tasks = filter.apply(&db.list_tasks()?, today());
            sort_tasks(&mut tasks, sort, &names);
            ctx.emit(&tasks, |t| task_lines(t, &names))?;
        }
        TaskAction::Get { id } => match db.get_task(&id)? {
            Some(task) => ctx.emit(&task, task_detail)?,
            None => return Err(CoreError::task_not_found(&id).into()),
        },
        TaskAction::Edit {
            id,
            title,
            description,
            at,
            category,
            no_category,
            preset,
        } => {
            let current = db
                .get_task(&id)?
                .ok_or_else(|| CoreError::task_not_found(&id))?;
            let mut update = TaskUpdate::from_task(&current);
            if let Some(title) = title {
                update.title = title;
            }
            if let Some(description) = description {
                update.description = Some(description).filter(|d| !d.is_empty());
            }
            if let Some(at) = at {
                update.date_time = parse_datetime(&at)?;
            }
            if no_category {
                update.category_id = None;
            } else if let Some(category) = category {
                update.category_id = Some(category);
            }
            if let Some(preset) = preset {
                update.pomodoro_config = Some(lookup_preset(&preset)?);
            }

            let task = db.update_task(&id, update)?;
            ctx.emit(&task, |t| format!("Task updated: {}", t.id))?;
        }
        TaskAction::Toggle { id } => {
            let task = db.toggle_task_completion(&id, Utc::now())?;
            ctx.emit(&task, |t| {
                let state = if t.is_completed { "completed" } else { "reopened" };
                format!("Task {state}: {}", t.id)
            })?;
        }
        TaskAction::Delete { id } => {
            let deleted = db.delete_task(&id)?;
            ctx.emit(&serde_json::json!({ "id": id, "deleted": deleted }), |_| {
                if deleted {
                    format!("Task deleted: {id}")
                } else {
                    format!("No task with id {id}")
                }
            })?;
        }
    }
    Ok(())
}

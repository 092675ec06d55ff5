//! Pomodoro session commands.

use chrono::{Duration, Utc};
use clap::Subcommand;
use tasktimer_core::{
    Config, CoreError, Database, NewSession, PomodoroConfig, SessionType, Task, TaskStore,
};

use super::{parse_datetime, Context};

#[derive(Subcommand)]
pub enum SessionAction {
    /// Record a session against a task
    Record {
        /// Task ID
        task_id: String,
        /// work, short-break, or long-break
        #[arg(long, default_value = "work")]
        kind: String,
        /// Duration in minutes; defaults to the task's Pomodoro config
        #[arg(long)]
        minutes: Option<u32>,
        /// Start time (YYYY-MM-DD [HH:MM]); defaults to now
        #[arg(long)]
        start: Option<String>,
        /// Record as still running
        #[arg(long)]
        pending: bool,
    },
    /// Mark a running session as completed
    Complete {
        /// Session ID
        session_id: String,
    },
    /// List a task's sessions
    List {
        /// Task ID
        task_id: String,
    },
    /// Show the next step of a task's Pomodoro cycle
    Next {
        /// Task ID
        task_id: String,
    },
}

fn effective_config(task: &Task) -> Result<PomodoroConfig, CoreError> {
    match &task.pomodoro_config {
        Some(config) => Ok(config.clone()),
        None => Ok(Config::load()?.pomodoro),
    }
}

fn default_minutes(config: &PomodoroConfig, kind: SessionType) -> u32 {
    match kind {
        SessionType::Work => config.work_duration_minutes,
        SessionType::ShortBreak => config.break_duration_minutes,
        SessionType::LongBreak => config.long_break_duration_minutes,
    }
}

pub fn run(action: SessionAction, ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let mut db = Database::open()?;

    match action {
        SessionAction::Record {
            task_id,
            kind,
            minutes,
            start,
            pending,
        } => {
            let kind: SessionType = kind.parse()?;
            let task = db
                .get_task(&task_id)?
                .ok_or_else(|| CoreError::task_not_found(&task_id))?;
            let minutes = match minutes {
                Some(m) => m,
                None => default_minutes(&effective_config(&task)?, kind),
            };
            let start_time = match start {
                Some(start) => parse_datetime(&start)?,
                None => Utc::now(),
            };
            let end_time = (!pending).then(|| start_time + Duration::minutes(i64::from(minutes)));

            let session = db.record_session(
                &task_id,
                NewSession {
                    start_time,
                    end_time,
                    duration_minutes: minutes,
                    session_type: kind,
                    completed: !pending,
                },
            )?;
            ctx.emit(&session, |s| {
                format!("Session recorded: {} ({} {}m)", s.id, s.session_type, s.duration_minutes)
            })?;
        }
        SessionAction::Complete { session_id } => {
            let session = db.complete_session(&session_id, Utc::now())?;
            ctx.emit(&session, |s| format!("Session completed: {}", s.id))?;
        }
        SessionAction::List { task_id } => {
            let task = db
                .get_task(&task_id)?
                .ok_or_else(|| CoreError::task_not_found(&task_id))?;
            ctx.emit(&task.sessions, |sessions| {
                if sessions.is_empty() {
                    return "no sessions".to_string();
                }
                sessions
                    .iter()
                    .map(|s| {
                        let state = if s.completed { "done" } else { "running" };
                        format!(
                            "{}  {:<11} {:>3}m  {:<7}  {}",
                            s.start_time.format("%Y-%m-%d %H:%M"),
                            s.session_type.as_str(),
                            s.duration_minutes,
                            state,
                            s.id
                        )
                    })
                    .collect::<Vec<_>>()
                    .join("\n")
            })?;
        }
        SessionAction::Next { task_id } => {
            let task = db
                .get_task(&task_id)?
                .ok_or_else(|| CoreError::task_not_found(&task_id))?;
            let config = effective_config(&task)?;
            let next = config.next_step(&task.sessions);
            ctx.emit(&next, |step| match step {
                Some(step) => format!("next: {} {}m", step.session_type, step.duration_minutes),
                None => "cycle complete".to_string(),
            })?;
        }
    }
    Ok(())
}

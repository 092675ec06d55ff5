//! Demo categories and tasks with a realistic session history.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::repository::TaskStore;
use crate::error::Result;
use crate::model::SessionType::{self, ShortBreak, Work};
use crate::model::{new_id, Color, PomodoroConfig, PomodoroSession, Subtask, Task};

/// Ids created by [`insert_sample_data`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SampleSummary {
    pub category_ids: Vec<String>,
    pub task_ids: Vec<String>,
}

struct SampleTask {
    title: &'static str,
    description: &'static str,
    scheduled: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
    config: PomodoroConfig,
    subtasks: &'static [(&'static str, bool)],
    /// (start offset from `now` in minutes, duration, kind)
    sessions: &'static [(i64, u32, SessionType)],
}

impl SampleTask {
    fn build(self, category_id: &str, now: DateTime<Utc>) -> Task {
        let id = new_id();
        let subtasks = self
            .subtasks
            .iter()
            .enumerate()
            .map(|(order, (title, done))| Subtask {
                id: new_id(),
                task_id: id.clone(),
                title: (*title).to_string(),
                is_completed: *done,
                order: order as u32,
            })
            .collect();
        let sessions = self
            .sessions
            .iter()
            .map(|(offset, minutes, kind)| {
                let start = now + Duration::minutes(*offset);
                PomodoroSession {
                    id: new_id(),
                    task_id: id.clone(),
                    start_time: start,
                    end_time: Some(start + Duration::minutes(i64::from(*minutes))),
                    duration_minutes: *minutes,
                    session_type: *kind,
                    completed: true,
                }
            })
            .collect();

        Task {
            description: Some(self.description.to_string()),
            is_completed: self.completed_at.is_some(),
            completed_at: self.completed_at,
            category_id: Some(category_id.to_string()),
            pomodoro_config: Some(self.config),
            sessions,
            subtasks,
            ..Task::new(id, self.title, self.scheduled)
        }
    }
}

/// Seed three categories and four tasks around `now`.
pub fn insert_sample_data<S: TaskStore + ?Sized>(
    store: &mut S,
    now: DateTime<Utc>,
) -> Result<SampleSummary> {
    let work = store.add_category("Work", Color(0xFF21_96F3), None)?;
    let study = store.add_category("Study", Color(0xFF4C_AF50), None)?;
    let personal = store.add_category("Personal", Color(0xFFFF_9800), None)?;

    let tasks = [
        (
            &work.id,
            SampleTask {
                title: "Ship the login feature",
                description: "Implement authentication for the app",
                scheduled: now - Duration::hours(4),
                completed_at: Some(now - Duration::hours(1)),
                config: PomodoroConfig::default(),
                subtasks: &[("Review code", true), ("Write tests", true), ("Deploy", true)],
                sessions: &[
                    (-180, 25, Work),
                    (-155, 5, ShortBreak),
                    (-150, 25, Work),
                    (-125, 5, ShortBreak),
                    (-120, 25, Work),
                    (-95, 5, ShortBreak),
                    (-90, 25, Work),
                ],
            },
        ),
        (
            &study.id,
            SampleTask {
                title: "Study declarative UI",
                description: "Learn the basics of declarative interfaces",
                scheduled: now - Duration::hours(7),
                completed_at: Some(now - Duration::hours(4)),
                config: PomodoroConfig::new(30, 10, 20, 3, 3),
                subtasks: &[("Read chapter 1", true), ("Do the exercises", true)],
                sessions: &[(-360, 30, Work), (-330, 10, ShortBreak), (-320, 30, Work)],
            },
        ),
        (
            &personal.id,
            SampleTask {
                title: "Bake a birthday cake",
                description: "Chocolate cake for the party",
                scheduled: now + Duration::hours(2),
                completed_at: None,
                config: PomodoroConfig::new(20, 5, 15, 4, 2),
                subtasks: &[("Buy ingredients", true), ("Mix the batter", false), ("Bake", false)],
                sessions: &[(-45, 20, Work)],
            },
        ),
        (
            &work.id,
            SampleTask {
                title: "Redesign the home screen",
                description: "Improve the main screen layout",
                scheduled: now + Duration::days(1),
                completed_at: None,
                config: PomodoroConfig::new(25, 5, 15, 4, 6),
                subtasks: &[
                    ("Gather requirements", false),
                    ("Sketch mockups", false),
                    ("Build the UI", false),
                ],
                sessions: &[],
            },
        ),
    ];

    let mut summary = SampleSummary {
        category_ids: vec![work.id.clone(), study.id.clone(), personal.id.clone()],
        task_ids: Vec::with_capacity(tasks.len()),
    };
    for (category_id, sample) in tasks {
        let task = sample.build(category_id, now);
        store.insert_task(&task)?;
        summary.task_ids.push(task.id);
    }

    tracing::info!(
        categories = summary.category_ids.len(),
        tasks = summary.task_ids.len(),
        "inserted sample data"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStore, StatsSource};
    use chrono::TimeZone;

    #[test]
    fn seeds_expected_history() {
        let now = Utc.with_ymd_and_hms(2026, 3, 10, 18, 0, 0).unwrap();
        let mut store = MemoryStore::new();
        let summary = insert_sample_data(&mut store, now).unwrap();
        assert_eq!(summary.category_ids.len(), 3);
        assert_eq!(summary.task_ids.len(), 4);

        let tasks = store.list_tasks().unwrap();
        let completed: Vec<&Task> = tasks.iter().filter(|t| t.is_completed).collect();
        assert_eq!(completed.len(), 2);
        let focus: u64 = completed.iter().map(|t| t.focus_minutes()).sum();
        assert_eq!(focus, 160);
        let breaks: u64 = completed.iter().map(|t| t.break_minutes()).sum();
        assert_eq!(breaks, 25);

        let names = store.category_names().unwrap();
        assert_eq!(names.get(&summary.category_ids[1]).map(String::as_str), Some("Study"));
    }
}

//! Per-day, per-week, and per-category completion summaries.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::model::{Category, Task};

/// Completed work on a single day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DashboardStats {
    pub date: NaiveDate,
    pub completed_tasks_count: u64,
    pub total_pomodoro_minutes: u64,
    /// Category id to completed task count.
    pub tasks_by_category: HashMap<String, u64>,
    /// Category id to completed WORK session count.
    pub pomodoros_by_category: HashMap<String, u64>,
}

/// Seven consecutive daily summaries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeeklyStats {
    pub week_start: NaiveDate,
    pub daily_stats: Vec<DashboardStats>,
    pub total_completed_tasks: u64,
    pub total_pomodoro_hours: f32,
}

impl WeeklyStats {
    pub fn average_tasks_per_day(&self) -> f32 {
        self.total_completed_tasks as f32 / 7.0
    }

    pub fn average_pomodoro_hours_per_day(&self) -> f32 {
        self.total_pomodoro_hours / 7.0
    }
}

/// Completed work attributed to one category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryStats {
    pub category_id: String,
    pub category_name: String,
    pub completed_tasks_count: u64,
    pub total_pomodoro_minutes: u64,
    pub tasks: Vec<Task>,
}

/// Summarise tasks completed on `date`.
pub fn daily_stats(tasks: &[Task], date: NaiveDate) -> DashboardStats {
    let mut stats = DashboardStats {
        date,
        completed_tasks_count: 0,
        total_pomodoro_minutes: 0,
        tasks_by_category: HashMap::new(),
        pomodoros_by_category: HashMap::new(),
    };

    for task in tasks
        .iter()
        .filter(|t| t.is_completed && t.completed_date() == Some(date))
    {
        stats.completed_tasks_count += 1;
        stats.total_pomodoro_minutes += task.focus_minutes();
        if let Some(id) = &task.category_id {
            *stats.tasks_by_category.entry(id.clone()).or_default() += 1;
            *stats.pomodoros_by_category.entry(id.clone()).or_default() +=
                task.completed_pomodoros();
        }
    }
    stats
}

/// Summarise the seven days starting at `week_start`.
pub fn weekly_stats(tasks: &[Task], week_start: NaiveDate) -> WeeklyStats {
    let daily: Vec<DashboardStats> = (0..7)
        .filter_map(|offset| week_start.checked_add_days(Days::new(offset)))
        .map(|date| daily_stats(tasks, date))
        .collect();

    let total_completed_tasks = daily.iter().map(|d| d.completed_tasks_count).sum();
    let total_minutes: u64 = daily.iter().map(|d| d.total_pomodoro_minutes).sum();

    WeeklyStats {
        week_start,
        daily_stats: daily,
        total_completed_tasks,
        total_pomodoro_hours: total_minutes as f32 / 60.0,
    }
}

/// Summarise every completed task of `category`.
pub fn category_stats(tasks: &[Task], category: &Category) -> CategoryStats {
    let completed: Vec<Task> = tasks
        .iter()
        .filter(|t| t.is_completed && t.category_id.as_deref() == Some(category.id.as_str()))
        .cloned()
        .collect();

    CategoryStats {
        category_id: category.id.clone(),
        category_name: category.name.clone(),
        completed_tasks_count: completed.len() as u64,
        total_pomodoro_minutes: completed.iter().map(Task::focus_minutes).sum(),
        tasks: completed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Color, PomodoroSession, SessionType};
    use chrono::{DateTime, TimeZone, Utc};

    fn at(d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, d, h, 0, 0).unwrap()
    }

    fn done(id: &str, day: u32, category: Option<&str>, work: &[u32]) -> Task {
        let mut task = Task::new(id, id, at(day, 8));
        task.category_id = category.map(String::from);
        task.sessions = work
            .iter()
            .map(|m| PomodoroSession {
                id: format!("{id}-{m}"),
                task_id: id.into(),
                start_time: at(day, 9),
                end_time: None,
                duration_minutes: *m,
                session_type: SessionType::Work,
                completed: true,
            })
            .collect();
        task.set_completed(true, at(day, 17));
        task
    }

    #[test]
    fn daily_counts_by_category_id() {
        let tasks = vec![
            done("a", 2, Some("c1"), &[25, 25]),
            done("b", 2, None, &[30]),
            done("c", 3, Some("c1"), &[25]),
        ];
        let day = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let stats = daily_stats(&tasks, day);
        assert_eq!(stats.completed_tasks_count, 2);
        assert_eq!(stats.total_pomodoro_minutes, 80);
        assert_eq!(stats.tasks_by_category.get("c1"), Some(&1));
        assert_eq!(stats.pomodoros_by_category.get("c1"), Some(&2));
        assert_eq!(stats.tasks_by_category.len(), 1);
    }

    #[test]
    fn weekly_totals_and_averages() {
        let tasks = vec![
            done("a", 2, None, &[60]),
            done("b", 4, None, &[60, 30]),
            done("outside", 20, None, &[600]),
        ];
        let start = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let week = weekly_stats(&tasks, start);
        assert_eq!(week.daily_stats.len(), 7);
        assert_eq!(week.total_completed_tasks, 2);
        assert!((week.total_pomodoro_hours - 2.5).abs() < f32::EPSILON);
        assert!((week.average_tasks_per_day() - 2.0 / 7.0).abs() < 1e-6);
    }

    #[test]
    fn category_stats_only_completed_tasks() {
        let mut open = Task::new("open", "open", at(2, 8));
        open.category_id = Some("c1".into());
        let tasks = vec![done("a", 2, Some("c1"), &[25]), open, done("b", 2, Some("c2"), &[25])];
        let category = Category {
            id: "c1".into(),
            name: "Work".into(),
            color: Color::DEFAULT,
            icon: None,
            created_at: at(1, 0),
        };
        let stats = category_stats(&tasks, &category);
        assert_eq!(stats.completed_tasks_count, 1);
        assert_eq!(stats.total_pomodoro_minutes, 25);
        assert_eq!(stats.tasks[0].id, "a");
    }
}

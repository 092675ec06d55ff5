//! Focus statistics report.
//!
//! Counters are derived from two task sets fetched for the same range:
//! tasks scheduled in the range, and tasks completed in the range. Only
//! completed sessions of completed-in-range tasks feed the minute sums.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::breakdown::build_category_breakdown;
use super::period::DateRange;
use crate::model::Task;

/// Summary counters for one statistics query.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FocusStats {
    pub today_tasks: u64,
    pub today_focus_minutes: u64,
    pub total_tasks: u64,
    pub total_focus_minutes: u64,
    pub total_break_minutes: u64,
    pub completed_pomodoros: u64,
    pub tasks_completed: u64,
    pub subtasks_completed: u64,
    /// Category label to focus minutes.
    pub focus_by_category: HashMap<String, u64>,
}

/// Compute the report from pre-fetched inputs.
///
/// `tasks_in_range` holds tasks whose `date_time` falls in the range,
/// `completed_in_range` holds completed tasks whose `completed_at` does.
/// `category_names` maps category id to display name.
pub fn compute_focus_stats(
    tasks_in_range: &[Task],
    completed_in_range: &[Task],
    category_names: &HashMap<String, String>,
    today: NaiveDate,
) -> FocusStats {
    let mut stats = FocusStats {
        total_tasks: tasks_in_range.len() as u64,
        tasks_completed: completed_in_range.len() as u64,
        today_tasks: tasks_in_range
            .iter()
            .filter(|t| t.date() == today)
            .count() as u64,
        ..FocusStats::default()
    };

    for task in completed_in_range {
        let focus = task.focus_minutes();
        stats.total_focus_minutes += focus;
        stats.total_break_minutes += task.break_minutes();
        stats.completed_pomodoros += task.completed_pomodoros();
        stats.subtasks_completed += task.completed_subtasks();
        if task.completed_date() == Some(today) {
            stats.today_focus_minutes += focus;
        }
    }

    stats.focus_by_category = build_category_breakdown(completed_in_range, category_names);
    stats
}

/// Partition the full task set by `range`, then compute the report.
pub fn compute_focus_stats_for_range(
    all_tasks: &[Task],
    range: DateRange,
    category_names: &HashMap<String, String>,
    today: NaiveDate,
) -> FocusStats {
    let in_range: Vec<Task> = all_tasks
        .iter()
        .filter(|t| range.contains(t.date()))
        .cloned()
        .collect();
    let completed: Vec<Task> = all_tasks
        .iter()
        .filter(|t| t.is_completed && t.completed_date().is_some_and(|d| range.contains(d)))
        .cloned()
        .collect();
    compute_focus_stats(&in_range, &completed, category_names, today)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PomodoroSession, SessionType, Subtask};
    use crate::stats::period::{resolve_period, StatsPeriod};
    use chrono::{DateTime, TimeZone, Utc};

    fn at(d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, d, h, 0, 0).unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 10).unwrap()
    }

    fn session(kind: SessionType, minutes: u32) -> PomodoroSession {
        PomodoroSession {
            id: format!("{kind}-{minutes}"),
            task_id: "t".into(),
            start_time: at(10, 9),
            end_time: None,
            duration_minutes: minutes,
            session_type: kind,
            completed: true,
        }
    }

    fn completed_task(id: &str, day: u32, category: Option<&str>, sessions: Vec<PomodoroSession>) -> Task {
        let mut task = Task::new(id, id, at(day, 8));
        task.category_id = category.map(String::from);
        task.sessions = sessions;
        task.set_completed(true, at(day, 18));
        task
    }

    #[test]
    fn empty_input_yields_zeroes() {
        let stats = compute_focus_stats(&[], &[], &HashMap::new(), today());
        assert_eq!(stats, FocusStats::default());
        assert!(stats.focus_by_category.is_empty());
    }

    #[test]
    fn work_category_scenario() {
        let task = completed_task(
            "t",
            10,
            Some("c1"),
            vec![
                session(SessionType::Work, 25),
                session(SessionType::Work, 25),
                session(SessionType::ShortBreak, 5),
            ],
        );
        let names = HashMap::from([("c1".to_string(), "Work".to_string())]);
        let tasks = vec![task];

        let stats = compute_focus_stats(&tasks, &tasks, &names, today());
        assert_eq!(stats.total_focus_minutes, 50);
        assert_eq!(stats.total_break_minutes, 5);
        assert_eq!(stats.completed_pomodoros, 2);
        assert_eq!(stats.today_focus_minutes, 50);
        assert_eq!(stats.focus_by_category, HashMap::from([("Work".to_string(), 50)]));
    }

    #[test]
    fn yesterday_counts_toward_total_but_not_today() {
        let task = completed_task("t", 9, None, vec![session(SessionType::Work, 30)]);
        let range = resolve_period(StatsPeriod::Week, today());

        let stats = compute_focus_stats_for_range(&[task], range, &HashMap::new(), today());
        assert_eq!(stats.today_focus_minutes, 0);
        assert_eq!(stats.total_focus_minutes, 30);
        assert_eq!(stats.today_tasks, 0);
        assert_eq!(stats.tasks_completed, 1);
    }

    #[test]
    fn task_without_sessions_still_counts() {
        let mut task = completed_task("t", 10, None, Vec::new());
        task.subtasks = vec![
            Subtask {
                id: "s1".into(),
                task_id: "t".into(),
                title: "one".into(),
                is_completed: true,
                order: 0,
            },
            Subtask {
                id: "s2".into(),
                task_id: "t".into(),
                title: "two".into(),
                is_completed: false,
                order: 1,
            },
        ];
        let tasks = vec![task];
        let stats = compute_focus_stats(&tasks, &tasks, &HashMap::new(), today());
        assert_eq!(stats.tasks_completed, 1);
        assert_eq!(stats.total_tasks, 1);
        assert_eq!(stats.today_tasks, 1);
        assert_eq!(stats.subtasks_completed, 1);
        assert_eq!(stats.total_focus_minutes, 0);
        assert!(stats.focus_by_category.is_empty());
    }

    #[test]
    fn range_partition_uses_completion_date_for_minutes() {
        // scheduled long before the range, completed inside it
        let mut early = Task::new("early", "early", at(1, 8));
        early.sessions = vec![session(SessionType::Work, 25)];
        early.set_completed(true, at(10, 9));
        // scheduled inside the range, still open
        let open = Task::new("open", "open", at(10, 12));

        let range = resolve_period(StatsPeriod::Today, today());
        let stats = compute_focus_stats_for_range(&[early, open], range, &HashMap::new(), today());
        assert_eq!(stats.total_tasks, 1);
        assert_eq!(stats.tasks_completed, 1);
        assert_eq!(stats.total_focus_minutes, 25);
    }
}

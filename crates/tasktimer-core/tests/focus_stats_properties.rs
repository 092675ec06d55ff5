//! Property tests for focus statistics, period resolution, and task helpers.

use chrono::{DateTime, Days, NaiveDate, TimeZone, Utc};
use proptest::prelude::*;
use std::collections::HashMap;
use tasktimer_core::stats::{build_category_breakdown, compute_focus_stats_for_range};
use tasktimer_core::{
    compute_focus_stats, resolve_period, PomodoroConfig, PomodoroSession, SessionType,
    StatsPeriod, Subtask, Task, TaskFilter,
};

fn base_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 15).unwrap()
}

fn noon(day: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&day.and_hms_opt(12, 0, 0).unwrap())
}

fn session_type() -> impl Strategy<Value = SessionType> {
    prop_oneof![
        Just(SessionType::Work),
        Just(SessionType::ShortBreak),
        Just(SessionType::LongBreak),
    ]
}

fn sessions() -> impl Strategy<Value = Vec<(SessionType, u32, bool)>> {
    prop::collection::vec((session_type(), 0u32..120, any::<bool>()), 0..8)
}

prop_compose! {
    fn arb_task(index: usize)(
        category in prop::option::of(0usize..4),
        sessions in sessions(),
        subtasks in prop::collection::vec(any::<bool>(), 0..5),
        scheduled_offset in 0u64..20,
        completed_offset in prop::option::of(0u64..20),
    ) -> Task {
        let id = format!("task-{index}");
        let scheduled = base_day().checked_sub_days(Days::new(scheduled_offset)).unwrap();
        let mut task = Task::new(id.clone(), format!("Task {index}"), noon(scheduled));
        task.category_id = category.map(|c| format!("cat-{c}"));
        task.sessions = sessions
            .into_iter()
            .enumerate()
            .map(|(i, (kind, minutes, completed))| PomodoroSession {
                id: format!("{id}-s{i}"),
                task_id: id.clone(),
                start_time: noon(scheduled),
                end_time: None,
                duration_minutes: minutes,
                session_type: kind,
                completed,
            })
            .collect();
        task.subtasks = subtasks
            .into_iter()
            .enumerate()
            .map(|(i, done)| Subtask {
                id: format!("{id}-st{i}"),
                task_id: id.clone(),
                title: format!("step {i}"),
                is_completed: done,
                order: i as u32,
            })
            .collect();
        if let Some(offset) = completed_offset {
            let day = base_day().checked_sub_days(Days::new(offset)).unwrap();
            task.set_completed(true, noon(day));
        }
        task
    }
}

fn arb_tasks() -> impl Strategy<Value = Vec<Task>> {
    (0usize..10).prop_flat_map(|n| (0..n).map(arb_task).collect::<Vec<_>>())
}

fn names() -> HashMap<String, String> {
    // cat-3 is deliberately missing from the lookup
    HashMap::from([
        ("cat-0".to_string(), "Work".to_string()),
        ("cat-1".to_string(), "Study".to_string()),
        ("cat-2".to_string(), "Work".to_string()),
    ])
}

proptest! {
    #[test]
    fn no_session_is_counted_twice(tasks in arb_tasks(), period in prop_oneof![
        Just(StatsPeriod::Today), Just(StatsPeriod::Week), Just(StatsPeriod::Month)
    ]) {
        let range = resolve_period(period, base_day());
        let stats = compute_focus_stats_for_range(&tasks, range, &names(), base_day());

        let all_minutes: u64 = tasks
            .iter()
            .filter(|t| t.is_completed && t.completed_date().is_some_and(|d| range.contains(d)))
            .flat_map(|t| t.sessions.iter())
            .map(|s| u64::from(s.duration_minutes))
            .sum();
        prop_assert!(stats.total_focus_minutes + stats.total_break_minutes <= all_minutes);
    }

    #[test]
    fn subtasks_completed_bounded_by_total(tasks in arb_tasks()) {
        let completed: Vec<Task> = tasks.iter().filter(|t| t.is_completed).cloned().collect();
        let stats = compute_focus_stats(&tasks, &completed, &names(), base_day());
        let total: u64 = completed.iter().map(|t| t.subtasks.len() as u64).sum();
        prop_assert!(stats.subtasks_completed <= total);
    }

    #[test]
    fn breakdown_sums_to_total_focus(tasks in arb_tasks()) {
        let completed: Vec<Task> = tasks.iter().filter(|t| t.is_completed).cloned().collect();
        let stats = compute_focus_stats(&tasks, &completed, &names(), base_day());
        let breakdown_sum: u64 = build_category_breakdown(&completed, &names()).values().sum();
        prop_assert_eq!(breakdown_sum, stats.total_focus_minutes);
        prop_assert_eq!(stats.focus_by_category.values().sum::<u64>(), stats.total_focus_minutes);
    }

    #[test]
    fn week_and_month_end_today(offset in 0u64..20_000) {
        let today = NaiveDate::from_ymd_opt(1990, 1, 1).unwrap() + Days::new(offset);
        let week = resolve_period(StatsPeriod::Week, today);
        prop_assert_eq!(week.end, today);
        prop_assert_eq!(week.days(), 7);
        let month = resolve_period(StatsPeriod::Month, today);
        prop_assert_eq!(month.end, today);
        prop_assert_eq!(month.days(), 30);
    }

    #[test]
    fn toggling_twice_restores_open_state(offset in 0i64..1_000_000) {
        let now = Utc.timestamp_opt(1_700_000_000 + offset, 0).unwrap();
        let mut task = Task::new("t", "t", now);
        task.toggle_completion(now);
        prop_assert!(task.is_completed && task.completed_at == Some(now));
        task.toggle_completion(now);
        prop_assert!(!task.is_completed);
        prop_assert_eq!(task.completed_at, None);
    }

    #[test]
    fn plan_places_long_breaks_on_cadence(total in 1u32..12, cadence in 1u32..6) {
        let config = PomodoroConfig::new(25, 5, 15, cadence, total);
        let plan = config.plan();
        prop_assert_eq!(plan.len(), 2 * total as usize);
        for (i, pair) in plan.chunks(2).enumerate() {
            prop_assert_eq!(pair[0].session_type, SessionType::Work);
            let expect_long = (i as u32 + 1) % cadence == 0;
            prop_assert_eq!(pair[1].session_type == SessionType::LongBreak, expect_long);
        }
    }

    #[test]
    fn category_filter_returns_only_that_category(tasks in arb_tasks(), c in 0usize..4) {
        let id = format!("cat-{c}");
        let filter = TaskFilter::Category { category_id: id.clone() };
        let matched = filter.apply(&tasks, base_day());
        prop_assert!(matched.iter().all(|t| t.category_id.as_deref() == Some(id.as_str())));
        let expected = tasks.iter().filter(|t| t.category_id.as_deref() == Some(id.as_str())).count();
        prop_assert_eq!(matched.len(), expected);
    }
}

#[test]
fn empty_input_is_all_zero() {
    let stats = compute_focus_stats(&[], &[], &HashMap::new(), base_day());
    assert_eq!(stats.total_focus_minutes, 0);
    assert_eq!(stats.total_break_minutes, 0);
    assert_eq!(stats.completed_pomodoros, 0);
    assert_eq!(stats.tasks_completed, 0);
    assert_eq!(stats.subtasks_completed, 0);
    assert_eq!(stats.today_tasks, 0);
    assert_eq!(stats.today_focus_minutes, 0);
    assert_eq!(stats.total_tasks, 0);
    assert!(stats.focus_by_category.is_empty());
}

#[test]
fn uncategorised_thirty_minutes() {
    let mut task = Task::new("t", "Reading", noon(base_day()));
    task.sessions = vec![PomodoroSession {
        id: "s".into(),
        task_id: "t".into(),
        start_time: noon(base_day()),
        end_time: None,
        duration_minutes: 30,
        session_type: SessionType::Work,
        completed: true,
    }];
    task.set_completed(true, noon(base_day()));

    let breakdown = build_category_breakdown(&[task], &HashMap::new());
    assert_eq!(breakdown, HashMap::from([("no category".to_string(), 30)]));
}

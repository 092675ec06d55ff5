//! Focus statistics commands.

use chrono::Days;
use clap::Subcommand;
use tasktimer_core::calendar::week_start;
use tasktimer_core::stats::{
    category_stats, daily_stats, load_focus_stats_in, sorted_breakdown, weekly_stats,
};
use tasktimer_core::{
    resolve_period, Config, CoreError, Database, DateRange, FocusStats, StatsPeriod, StatsSource,
    TaskStore, WeekStart,
};

use super::{format_minutes, parse_date, today, Context};

#[derive(Subcommand)]
pub enum StatsAction {
    /// Focus report for a period (today, week, month, year)
    Focus {
        /// Period; defaults to stats.default_period
        #[arg(long, conflicts_with_all = ["from", "to"])]
        period: Option<String>,
        /// Reference day (YYYY-MM-DD); defaults to today
        #[arg(long)]
        date: Option<String>,
        /// Explicit range start (YYYY-MM-DD)
        #[arg(long, requires = "to")]
        from: Option<String>,
        /// Explicit range end, inclusive (YYYY-MM-DD)
        #[arg(long, requires = "from")]
        to: Option<String>,
    },
    /// Work completed on one day
    Daily {
        /// Day (YYYY-MM-DD); defaults to today
        #[arg(long)]
        date: Option<String>,
    },
    /// Seven daily summaries for the week containing a day
    Weekly {
        /// Any day in the week (YYYY-MM-DD); defaults to today
        #[arg(long)]
        date: Option<String>,
        /// monday or sunday; defaults to calendar.week_start
        #[arg(long)]
        week_start: Option<String>,
    },
    /// Completed work in one category
    Category {
        /// Category ID
        id: String,
    },
}

fn focus_report(stats: &FocusStats, range: DateRange) -> String {
    let mut out = vec![
        format!("{} .. {}", range.start, range.end),
        format!(
            "  today:      {} tasks, {} focus",
            stats.today_tasks,
            format_minutes(stats.today_focus_minutes)
        ),
        format!("  tasks:      {} scheduled, {} completed", stats.total_tasks, stats.tasks_completed),
        format!("  focus:      {}", format_minutes(stats.total_focus_minutes)),
        format!("  breaks:     {}", format_minutes(stats.total_break_minutes)),
        format!("  pomodoros:  {}", stats.completed_pomodoros),
        format!("  subtasks:   {}", stats.subtasks_completed),
    ];
    let breakdown = sorted_breakdown(&stats.focus_by_category);
    if !breakdown.is_empty() {
        out.push("  by category:".to_string());
        for (label, minutes) in breakdown {
            out.push(format!("    {label:<20} {}", format_minutes(minutes)));
        }
    }
    out.join("\n")
}

pub fn run(action: StatsAction, ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;

    match action {
        StatsAction::Focus {
            period,
            date,
            from,
            to,
        } => {
            let today = match date {
                Some(d) => parse_date(&d)?,
                None => today(),
            };
            let range = match (from, to) {
                (Some(from), Some(to)) => DateRange::new(parse_date(&from)?, parse_date(&to)?)?,
                _ => {
                    let period: StatsPeriod = match period {
                        Some(p) => p.parse()?,
                        None => Config::load()?.stats.default_period,
                    };
                    resolve_period(period, today)
                }
            };
            let stats = load_focus_stats_in(&db, range, today)?;
            ctx.emit(&stats, |s| focus_report(s, range))?;
        }
        StatsAction::Daily { date } => {
            let date = match date {
                Some(d) => parse_date(&d)?,
                None => today(),
            };
            let tasks = db.completed_tasks_in_range(DateRange::single(date))?;
            let stats = daily_stats(&tasks, date);
            ctx.emit(&stats, |s| {
                format!(
                    "{}: {} tasks completed, {} focus",
                    s.date,
                    s.completed_tasks_count,
                    format_minutes(s.total_pomodoro_minutes)
                )
            })?;
        }
        StatsAction::Weekly { date, week_start: first } => {
            let date = match date {
                Some(d) => parse_date(&d)?,
                None => today(),
            };
            let first: WeekStart = match first {
                Some(w) => w.parse()?,
                None => Config::load()?.calendar.week_start,
            };
            let start = week_start(date, first);
            let end = start
                .checked_add_days(Days::new(6))
                .ok_or_else(|| CoreError::Custom(format!("date out of range: {start}")))?;
            let tasks = db.completed_tasks_in_range(DateRange::new(start, end)?)?;
            let stats = weekly_stats(&tasks, start);
            ctx.emit(&stats, |w| {
                let mut out: Vec<String> = w
                    .daily_stats
                    .iter()
                    .map(|d| {
                        format!(
                            "{} {}  {:>2} tasks  {}",
                            d.date.format("%a"),
                            d.date,
                            d.completed_tasks_count,
                            format_minutes(d.total_pomodoro_minutes)
                        )
                    })
                    .collect();
                out.push(format!(
                    "total: {} tasks, {:.1}h focus ({:.1} tasks/day, {:.1}h/day)",
                    w.total_completed_tasks,
                    w.total_pomodoro_hours,
                    w.average_tasks_per_day(),
                    w.average_pomodoro_hours_per_day()
                ));
                out.join("\n")
            })?;
        }
        StatsAction::Category { id } => {
            let category = db
                .list_categories()?
                .into_iter()
                .find(|c| c.id == id)
                .ok_or_else(|| CoreError::category_not_found(&id))?;
            let stats = category_stats(&db.list_tasks()?, &category);
            ctx.emit(&stats, |c| {
                format!(
                    "{}: {} tasks completed, {} focus",
                    c.category_name,
                    c.completed_tasks_count,
                    format_minutes(c.total_pomodoro_minutes)
                )
            })?;
        }
    }
    Ok(())
}

//! Week strip view.

use clap::Subcommand;
use tasktimer_core::{Config, Database, StatsSource, TaskStore, WeekCalendar, WeekStart};

use super::{parse_date, task_lines, today, Context};

#[derive(Subcommand)]
pub enum CalendarAction {
    /// Show the week strip and the selected day's tasks
    Week {
        /// Day to select (YYYY-MM-DD); defaults to today
        #[arg(long)]
        date: Option<String>,
        /// Weeks to move from the selected day's week
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        offset: i64,
        /// Select a day of month within the shown week
        #[arg(long)]
        select: Option<u32>,
        /// monday or sunday; defaults to calendar.week_start
        #[arg(long)]
        week_start: Option<String>,
    },
}

fn strip(calendar: &WeekCalendar) -> String {
    calendar
        .days
        .iter()
        .map(|d| {
            let cell = format!("{} {:>2}", d.day_of_week, d.day_of_month);
            match (d.is_selected, d.is_today) {
                (true, _) => format!("[{cell}]"),
                (false, true) => format!("*{cell}*"),
                (false, false) => format!(" {cell} "),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn run(action: CalendarAction, ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;

    match action {
        CalendarAction::Week {
            date,
            offset,
            select,
            week_start,
        } => {
            let today = today();
            let first: WeekStart = match week_start {
                Some(w) => w.parse()?,
                None => Config::load()?.calendar.week_start,
            };
            let mut calendar = WeekCalendar::new(today, first);
            if let Some(date) = date {
                calendar.select_date(parse_date(&date)?, today);
            }
            if offset != 0 {
                calendar.navigate_week(offset, today);
            }
            if let Some(day) = select {
                calendar.select_day(day, today);
            }

            let header = calendar.header_label(today);
            let tasks = db.tasks_on(calendar.selected)?;
            let names = db.category_names()?;
            let view = serde_json::json!({
                "header": header,
                "calendar": calendar,
                "tasks": tasks,
            });
            ctx.emit(&view, |_| {
                format!(
                    "{header}\n{}\n\n{}:\n{}",
                    strip(&calendar),
                    calendar.selected.format("%a %Y-%m-%d"),
                    task_lines(&tasks, &names)
                )
            })?;
        }
    }
    Ok(())
}

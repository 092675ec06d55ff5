//! Home screen: overdue, today, and completed today.

use clap::Args;
use std::collections::HashMap;
use tasktimer_core::{Agenda, Database, StatsSource, Task, TaskStore};

use super::{parse_date, task_line, today, Context};

#[derive(Args)]
pub struct AgendaArgs {
    /// Day to show (YYYY-MM-DD); defaults to today
    #[arg(long)]
    pub date: Option<String>,
}

fn section(out: &mut Vec<String>, title: &str, tasks: &[Task], names: &HashMap<String, String>) {
    if tasks.is_empty() {
        return;
    }
    out.push(format!("{title} ({})", tasks.len()));
    out.extend(tasks.iter().map(|t| format!("  {}", task_line(t, names))));
}

pub fn run(args: AgendaArgs, ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let day = match args.date {
        Some(d) => parse_date(&d)?,
        None => today(),
    };

    let names = db.category_names()?;
    let agenda = Agenda::build(&db.list_tasks()?, day);
    ctx.emit(&agenda, |a| {
        let mut out = Vec::new();
        section(&mut out, "Overdue", &a.overdue, &names);
        section(&mut out, "Today", &a.today, &names);
        section(&mut out, "Completed today", &a.completed_today, &names);
        if out.is_empty() {
            "nothing scheduled".to_string()
        } else {
            out.join("\n")
        }
    })?;
    Ok(())
}

//! Task search.

use clap::Args;
use tasktimer_core::{Database, DateRange, SearchFilter, SortOption, StatsSource, TaskStore};

use super::{parse_date, task_lines, today, Context};

#[derive(Args)]
pub struct SearchArgs {
    /// Text matched against title and description (case-insensitive)
    #[arg(default_value = "")]
    pub query: String,
    /// Restrict to a category ID (repeatable)
    #[arg(long = "category")]
    pub categories: Vec<String>,
    /// Range start (YYYY-MM-DD)
    #[arg(long, requires = "to")]
    pub from: Option<String>,
    /// Range end, inclusive (YYYY-MM-DD)
    #[arg(long, requires = "from")]
    pub to: Option<String>,
    /// Exclude completed tasks
    #[arg(long)]
    pub hide_completed: bool,
    /// Exclude overdue tasks
    #[arg(long)]
    pub hide_overdue: bool,
    /// date-asc, date-desc, title-asc, title-desc, category
    #[arg(long, default_value = "date-asc")]
    pub sort: String,
}

pub fn run(args: SearchArgs, ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;

    let date_range = match (&args.from, &args.to) {
        (Some(from), Some(to)) => Some(DateRange::new(parse_date(from)?, parse_date(to)?)?),
        _ => None,
    };
    let filter = SearchFilter {
        query: args.query,
        category_ids: args.categories.into_iter().collect(),
        date_range,
        show_completed: !args.hide_completed,
        show_overdue: !args.hide_overdue,
        sort_by: args.sort.parse::<SortOption>()?,
    };

    let names = db.category_names()?;
    let results = filter.apply(&db.list_tasks()?, &names, today());
    ctx.emit(&results, |tasks| {
        if filter.is_empty() {
            "no search criteria given".to_string()
        } else {
            task_lines(tasks, &names)
        }
    })?;
    Ok(())
}

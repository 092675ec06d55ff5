//! Demo data.

use chrono::Utc;
use clap::Subcommand;
use tasktimer_core::storage::insert_sample_data;
use tasktimer_core::Database;

use super::Context;

#[derive(Subcommand)]
pub enum SampleAction {
    /// Insert demo categories, tasks, and sessions
    Insert,
}

pub fn run(action: SampleAction, ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let mut db = Database::open()?;

    match action {
        SampleAction::Insert => {
            let summary = insert_sample_data(&mut db, Utc::now())?;
            ctx.emit(&summary, |s| {
                format!(
                    "Inserted {} categories and {} tasks",
                    s.category_ids.len(),
                    s.task_ids.len()
                )
            })?;
        }
    }
    Ok(())
}

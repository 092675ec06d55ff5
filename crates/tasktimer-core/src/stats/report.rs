//! Loaded-or-failed state of the statistics dashboard.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::focus::{compute_focus_stats, FocusStats};
use super::period::{resolve_period, DateRange, StatsPeriod};
use crate::error::Result;
use crate::storage::StatsSource;

/// Fetch the three aggregation inputs for `period` and compute the report.
pub fn load_focus_stats<S: StatsSource + ?Sized>(
    source: &S,
    period: StatsPeriod,
    today: NaiveDate,
) -> Result<FocusStats> {
    let range = resolve_period(period, today);
    load_focus_stats_in(source, range, today)
}

/// Same as [`load_focus_stats`] over an explicit range.
pub fn load_focus_stats_in<S: StatsSource + ?Sized>(
    source: &S,
    range: DateRange,
    today: NaiveDate,
) -> Result<FocusStats> {
    let tasks = source.tasks_in_range(range)?;
    let completed = source.completed_tasks_in_range(range)?;
    let names = source.category_names()?;
    tracing::debug!(
        start = %range.start,
        end = %range.end,
        tasks = tasks.len(),
        completed = completed.len(),
        "computing focus stats"
    );
    Ok(compute_focus_stats(&tasks, &completed, &names, today))
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FocusStatsState {
    pub selected_period: StatsPeriod,
    pub stats: Option<FocusStats>,
    pub error_message: Option<String>,
}

impl FocusStatsState {
    pub fn new(period: StatsPeriod) -> Self {
        Self {
            selected_period: period,
            ..Self::default()
        }
    }

    /// Reload for the selected period. Fetch failures become `error_message`.
    pub fn load<S: StatsSource + ?Sized>(&mut self, source: &S, today: NaiveDate) {
        match load_focus_stats(source, self.selected_period, today) {
            Ok(stats) => {
                self.stats = Some(stats);
                self.error_message = None;
            }
            Err(e) => {
                tracing::warn!(error = %e, period = %self.selected_period, "focus stats fetch failed");
                self.stats = None;
                self.error_message = Some(format!("could not load data: {e}"));
            }
        }
    }

    pub fn change_period<S: StatsSource + ?Sized>(
        &mut self,
        period: StatsPeriod,
        source: &S,
        today: NaiveDate,
    ) {
        self.selected_period = period;
        self.load(source, today);
    }

    pub fn is_failed(&self) -> bool {
        self.error_message.is_some()
    }
}

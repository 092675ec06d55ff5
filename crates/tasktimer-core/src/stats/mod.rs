//! Statistics module for tasktimer
//!
//! Focus statistics over a resolved period, the per-category breakdown, and
//! the daily/weekly/category dashboard summaries. Everything here is a pure
//! function of already-fetched task lists except [`report`], which pulls its
//! inputs from a [`StatsSource`](crate::storage::StatsSource).

mod breakdown;
mod dashboard;
mod focus;
mod period;
mod report;

pub use breakdown::{
    build_category_breakdown, sorted_breakdown, NO_CATEGORY_LABEL, UNNAMED_CATEGORY_LABEL,
};

pub use dashboard::{category_stats, daily_stats, weekly_stats, CategoryStats, DashboardStats, WeeklyStats};

pub use focus::{compute_focus_stats, compute_focus_stats_for_range, FocusStats};

pub use period::{resolve_period, DateRange, StatsPeriod};

pub use report::{load_focus_stats, load_focus_stats_in, FocusStatsState};

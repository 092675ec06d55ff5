//! Task list filters, search, and the home agenda.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::str::FromStr;

use crate::error::ValidationError;
use crate::model::Task;
use crate::stats::DateRange;

/// Drawer-style filter over the task list.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TaskFilter {
    #[default]
    All,
    Today,
    Category { category_id: String },
}

impl TaskFilter {
    pub fn matches(&self, task: &Task, today: NaiveDate) -> bool {
        match self {
            TaskFilter::All => true,
            TaskFilter::Today => task.date() == today,
            TaskFilter::Category { category_id } => {
                task.category_id.as_deref() == Some(category_id.as_str())
            }
        }
    }

    pub fn apply(&self, tasks: &[Task], today: NaiveDate) -> Vec<Task> {
        let mut matched: Vec<Task> = tasks
            .iter()
            .filter(|t| self.matches(t, today))
            .cloned()
            .collect();
        matched.sort_by_key(|t| t.date_time);
        matched
    }
}

impl FromStr for TaskFilter {
    type Err = ValidationError;

    /// `all`, `today`, or `category:<id>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "all" => Ok(TaskFilter::All),
            "today" => Ok(TaskFilter::Today),
            other => match other.strip_prefix("category:") {
                Some(id) if !id.is_empty() => Ok(TaskFilter::Category {
                    category_id: id.to_string(),
                }),
                _ => Err(ValidationError::invalid(
                    "filter",
                    format!("unknown filter '{s}' (all, today, category:<id>)"),
                )),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SortOption {
    #[default]
    DateAsc,
    DateDesc,
    TitleAsc,
    TitleDesc,
    Category,
}

impl FromStr for SortOption {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "date-asc" => Ok(SortOption::DateAsc),
            "date-desc" => Ok(SortOption::DateDesc),
            "title-asc" => Ok(SortOption::TitleAsc),
            "title-desc" => Ok(SortOption::TitleDesc),
            "category" => Ok(SortOption::Category),
            _ => Err(ValidationError::invalid(
                "sort",
                format!("unknown sort '{s}' (date-asc, date-desc, title-asc, title-desc, category)"),
            )),
        }
    }
}

/// Search criteria over all tasks.
///
/// A filter with no query, no categories and no date range matches nothing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchFilter {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub category_ids: HashSet<String>,
    #[serde(default)]
    pub date_range: Option<DateRange>,
    #[serde(default = "default_true")]
    pub show_completed: bool,
    #[serde(default = "default_true")]
    pub show_overdue: bool,
    #[serde(default)]
    pub sort_by: SortOption,
}

fn default_true() -> bool {
    true
}

impl Default for SearchFilter {
    fn default() -> Self {
        Self {
            query: String::new(),
            category_ids: HashSet::new(),
            date_range: None,
            show_completed: true,
            show_overdue: true,
            sort_by: SortOption::DateAsc,
        }
    }
}

impl SearchFilter {
    pub fn with_query(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.query.trim().is_empty() && self.category_ids.is_empty() && self.date_range.is_none()
    }

    pub fn matches(&self, task: &Task, today: NaiveDate) -> bool {
        let query = self.query.trim().to_lowercase();
        let matches_query = query.is_empty()
            || task.title.to_lowercase().contains(&query)
            || task
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&query));

        let matches_category = self.category_ids.is_empty()
            || task
                .category_id
                .as_ref()
                .is_some_and(|id| self.category_ids.contains(id));

        let matches_range = self.date_range.map_or(true, |r| r.contains(task.date()));

        matches_query
            && matches_category
            && matches_range
            && (self.show_completed || !task.is_completed)
            && (self.show_overdue || !task.is_overdue(today))
    }

    /// Matching tasks in `sort_by` order. `category_names` is only consulted
    /// for [`SortOption::Category`].
    pub fn apply(
        &self,
        tasks: &[Task],
        category_names: &HashMap<String, String>,
        today: NaiveDate,
    ) -> Vec<Task> {
        if self.is_empty() {
            return Vec::new();
        }
        let mut results: Vec<Task> = tasks
            .iter()
            .filter(|t| self.matches(t, today))
            .cloned()
            .collect();
        sort_tasks(&mut results, self.sort_by, category_names);
        results
    }
}

pub fn sort_tasks(tasks: &mut [Task], sort: SortOption, category_names: &HashMap<String, String>) {
    match sort {
        SortOption::DateAsc => tasks.sort_by_key(|t| t.date_time),
        SortOption::DateDesc => tasks.sort_by(|a, b| b.date_time.cmp(&a.date_time)),
        SortOption::TitleAsc => tasks.sort_by_cached_key(|t| t.title.to_lowercase()),
        SortOption::TitleDesc => {
            tasks.sort_by_cached_key(|t| t.title.to_lowercase());
            tasks.reverse();
        }
        SortOption::Category => tasks.sort_by_cached_key(|t| {
            // uncategorised sorts last
            let name = t
                .category_id
                .as_ref()
                .and_then(|id| category_names.get(id))
                .map(|n| n.to_lowercase());
            (name.is_none(), name, t.date_time)
        }),
    }
}

/// Home screen sections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Agenda {
    pub overdue: Vec<Task>,
    pub today: Vec<Task>,
    pub completed_today: Vec<Task>,
}

impl Agenda {
    pub fn build(tasks: &[Task], today: NaiveDate) -> Self {
        let mut agenda = Agenda::default();
        for task in tasks {
            if task.is_overdue(today) {
                agenda.overdue.push(task.clone());
            } else if task.date() == today && !task.is_completed {
                agenda.today.push(task.clone());
            }
            if task.is_completed && task.completed_date() == Some(today) {
                agenda.completed_today.push(task.clone());
            }
        }
        agenda.overdue.sort_by_key(|t| t.date_time);
        agenda.today.sort_by_key(|t| t.date_time);
        agenda.completed_today.sort_by_key(|t| t.completed_at);
        agenda
    }
}

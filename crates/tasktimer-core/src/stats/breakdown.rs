//! Focus minutes grouped by category label.

use std::collections::HashMap;

use crate::model::Task;

/// Label for tasks that carry no category.
pub const NO_CATEGORY_LABEL: &str = "no category";
/// Label for a category id missing from the name lookup.
pub const UNNAMED_CATEGORY_LABEL: &str = "unnamed category";

/// Map category display name to completed WORK minutes.
///
/// Categorised groups are always present, even at zero minutes. The
/// uncategorised bucket only appears when it has minutes. Ids resolving to
/// the same label are summed together.
pub fn build_category_breakdown(
    completed_in_range: &[Task],
    category_names: &HashMap<String, String>,
) -> HashMap<String, u64> {
    let mut by_id: HashMap<&str, u64> = HashMap::new();
    let mut uncategorised = 0u64;

    for task in completed_in_range {
        let minutes = task.focus_minutes();
        match task.category_id.as_deref() {
            Some(id) => *by_id.entry(id).or_default() += minutes,
            None => uncategorised += minutes,
        }
    }

    let mut breakdown: HashMap<String, u64> = HashMap::with_capacity(by_id.len() + 1);
    for (id, minutes) in by_id {
        let label = category_names
            .get(id)
            .map(String::as_str)
            .unwrap_or(UNNAMED_CATEGORY_LABEL);
        *breakdown.entry(label.to_string()).or_default() += minutes;
    }
    if uncategorised > 0 {
        *breakdown.entry(NO_CATEGORY_LABEL.to_string()).or_default() += uncategorised;
    }
    breakdown
}

/// Breakdown entries ordered by minutes (descending), then label.
pub fn sorted_breakdown(breakdown: &HashMap<String, u64>) -> Vec<(&str, u64)> {
    let mut entries: Vec<(&str, u64)> = breakdown.iter().map(|(k, v)| (k.as_str(), *v)).collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    entries
}

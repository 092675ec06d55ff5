//! Seven-day calendar strip with a selected day.

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// First day of the displayed week.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Monday,
    Sunday,
}

impl WeekStart {
    fn weekday(self) -> Weekday {
        match self {
            WeekStart::Monday => Weekday::Mon,
            WeekStart::Sunday => Weekday::Sun,
        }
    }
}

impl fmt::Display for WeekStart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeekStart::Monday => f.write_str("monday"),
            WeekStart::Sunday => f.write_str("sunday"),
        }
    }
}

impl FromStr for WeekStart {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monday" | "mon" => Ok(WeekStart::Monday),
            "sunday" | "sun" => Ok(WeekStart::Sunday),
            _ => Err(ValidationError::invalid(
                "week_start",
                format!("unknown week start '{s}' (monday, sunday)"),
            )),
        }
    }
}

/// First day of the week containing `date`.
pub fn week_start(date: NaiveDate, first_day: WeekStart) -> NaiveDate {
    date.week(first_day.weekday()).first_day()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CalendarDay {
    pub day_of_month: u32,
    /// Three-letter weekday label, e.g. `Mon`.
    pub day_of_week: String,
    pub is_today: bool,
    pub is_selected: bool,
    pub full_date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekCalendar {
    pub first_day: WeekStart,
    pub week_start: NaiveDate,
    pub selected: NaiveDate,
    pub days: Vec<CalendarDay>,
}

impl WeekCalendar {
    /// Strip for the week containing `today`, with today selected.
    pub fn new(today: NaiveDate, first_day: WeekStart) -> Self {
        let mut calendar = Self {
            first_day,
            week_start: week_start(today, first_day),
            selected: today,
            days: Vec::with_capacity(7),
        };
        calendar.load_days(today);
        calendar
    }

    fn load_days(&mut self, today: NaiveDate) {
        self.days = (0..7)
            .filter_map(|offset| self.week_start.checked_add_days(Days::new(offset)))
            .map(|date| CalendarDay {
                day_of_month: date.day(),
                day_of_week: date.format("%a").to_string(),
                is_today: date == today,
                is_selected: date == self.selected,
                full_date: date,
            })
            .collect();
    }

    pub fn week_end(&self) -> NaiveDate {
        self.week_start
            .checked_add_days(Days::new(6))
            .unwrap_or(self.week_start)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.days.iter().any(|d| d.full_date == date)
    }

    /// Select `date`, moving the strip to its week when it lies outside.
    pub fn select_date(&mut self, date: NaiveDate, today: NaiveDate) {
        self.selected = date;
        if self.contains(date) {
            for day in &mut self.days {
                day.is_selected = day.full_date == date;
            }
        } else {
            self.week_start = week_start(date, self.first_day);
            self.load_days(today);
        }
    }

    /// Select the strip day with this day-of-month. No-op if none matches.
    pub fn select_day(&mut self, day_of_month: u32, today: NaiveDate) {
        if let Some(date) = self
            .days
            .iter()
            .find(|d| d.day_of_month == day_of_month)
            .map(|d| d.full_date)
        {
            self.select_date(date, today);
        }
    }

    /// Move by `direction` weeks. Selects the new week's first day when the
    /// previous selection is not in it.
    pub fn navigate_week(&mut self, direction: i64, today: NaiveDate) {
        let Some(shift) = direction.unsigned_abs().checked_mul(7).map(Days::new) else {
            return;
        };
        let moved = if direction >= 0 {
            self.week_start.checked_add_days(shift)
        } else {
            self.week_start.checked_sub_days(shift)
        };
        let Some(moved) = moved else {
            return;
        };

        self.week_start = moved;
        self.load_days(today);
        if !self.contains(self.selected) {
            let first = self.week_start;
            self.select_date(first, today);
        }
    }

    /// Short month of the week start, with `, Today` when the week holds today.
    pub fn header_label(&self, today: NaiveDate) -> String {
        let month = self.week_start.format("%b").to_string();
        if self.week_start <= today && today <= self.week_end() {
            format!("{month}, Today")
        } else {
            month
        }
    }
}

//! Symbolic statistics periods and the inclusive date ranges they cover.

use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Period selectable on the statistics dashboard.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum StatsPeriod {
    Today,
    #[default]
    Week,
    Month,
    Year,
}

impl StatsPeriod {
    pub const ALL: [StatsPeriod; 4] = [
        StatsPeriod::Today,
        StatsPeriod::Week,
        StatsPeriod::Month,
        StatsPeriod::Year,
    ];

    pub fn label(self) -> &'static str {
        match self {
            StatsPeriod::Today => "Today",
            StatsPeriod::Week => "Week",
            StatsPeriod::Month => "Month",
            StatsPeriod::Year => "Year",
        }
    }

    /// Number of days covered, today included.
    pub fn span_days(self) -> u64 {
        match self {
            StatsPeriod::Today => 1,
            StatsPeriod::Week => 7,
            StatsPeriod::Month => 30,
            StatsPeriod::Year => 365,
        }
    }
}

impl fmt::Display for StatsPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for StatsPeriod {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        if wanted.eq_ignore_ascii_case("day") {
            return Ok(StatsPeriod::Today);
        }
        Self::ALL
            .into_iter()
            .find(|p| p.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                let known: Vec<String> =
                    Self::ALL.iter().map(|p| p.label().to_ascii_lowercase()).collect();
                ValidationError::invalid(
                    "period",
                    format!("unknown period '{s}' ({})", known.join(", ")),
                )
            })
    }
}

/// Inclusive range of calendar days (UTC).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "RawDateRange")]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[derive(Deserialize)]
struct RawDateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl TryFrom<RawDateRange> for DateRange {
    type Error = ValidationError;

    fn try_from(raw: RawDateRange) -> Result<Self, Self::Error> {
        DateRange::new(raw.start, raw.end)
    }
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ValidationError> {
        if end < start {
            return Err(ValidationError::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn single(day: NaiveDate) -> Self {
        Self {
            start: day,
            end: day,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Number of days in the range, both ends included.
    pub fn days(&self) -> u64 {
        (self.end - self.start).num_days() as u64 + 1
    }

    /// First instant of `start`.
    pub fn start_utc(&self) -> DateTime<Utc> {
        self.start.and_time(NaiveTime::MIN).and_utc()
    }

    /// First instant of the day after `end`.
    pub fn end_exclusive_utc(&self) -> DateTime<Utc> {
        let next = self.end.checked_add_days(Days::new(1)).unwrap_or(self.end);
        next.and_time(NaiveTime::MIN).and_utc()
    }
}

/// Resolve a period to the inclusive range ending on `today`.
pub fn resolve_period(period: StatsPeriod, today: NaiveDate) -> DateRange {
    let back = Days::new(period.span_days() - 1);
    let start = today.checked_sub_days(back).unwrap_or(NaiveDate::MIN);
    DateRange { start, end: today }
}

//! Pomodoro configuration, presets, and recorded sessions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Kind of a timed interval.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionType {
    Work,
    ShortBreak,
    LongBreak,
}

impl SessionType {
    pub fn is_work(self) -> bool {
        matches!(self, SessionType::Work)
    }

    pub fn is_break(self) -> bool {
        matches!(self, SessionType::ShortBreak | SessionType::LongBreak)
    }

    /// Tag used in storage.
    pub fn as_str(self) -> &'static str {
        match self {
            SessionType::Work => "WORK",
            SessionType::ShortBreak => "SHORT_BREAK",
            SessionType::LongBreak => "LONG_BREAK",
        }
    }

    /// Parse a storage tag. Unknown tags yield `None`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "WORK" => Some(SessionType::Work),
            "SHORT_BREAK" => Some(SessionType::ShortBreak),
            "LONG_BREAK" => Some(SessionType::LongBreak),
            _ => None,
        }
    }
}

impl fmt::Display for SessionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SessionType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "work" | "focus" => Ok(SessionType::Work),
            "short_break" | "break" => Ok(SessionType::ShortBreak),
            "long_break" => Ok(SessionType::LongBreak),
            _ => Err(ValidationError::invalid(
                "session_type",
                format!("unknown session type '{s}' (work, short-break, long-break)"),
            )),
        }
    }
}

/// One timed interval recorded against a task.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PomodoroSession {
    pub id: String,
    #[serde(default)]
    pub task_id: String,
    pub start_time: DateTime<Utc>,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub duration_minutes: u32,
    pub session_type: SessionType,
    #[serde(default)]
    pub completed: bool,
}

impl PomodoroSession {
    /// Mark the session finished. Fills `end_time` when it was never set.
    pub fn mark_completed(&mut self, now: DateTime<Utc>) {
        self.completed = true;
        if self.end_time.is_none() {
            self.end_time = Some(now);
        }
    }
}

/// Input for appending a session to a task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSession {
    pub start_time: DateTime<Utc>,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    pub duration_minutes: u32,
    pub session_type: SessionType,
    #[serde(default)]
    pub completed: bool,
}

impl NewSession {
    pub fn into_session(self, id: String, task_id: &str) -> PomodoroSession {
        PomodoroSession {
            id,
            task_id: task_id.to_string(),
            start_time: self.start_time,
            end_time: self.end_time,
            duration_minutes: self.duration_minutes,
            session_type: self.session_type,
            completed: self.completed,
        }
    }
}

/// Pomodoro cadence attached to a task.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PomodoroConfig {
    #[serde(default = "default_work_duration")]
    pub work_duration_minutes: u32,
    #[serde(default = "default_break_duration")]
    pub break_duration_minutes: u32,
    #[serde(default = "default_long_break_duration")]
    pub long_break_duration_minutes: u32,
    #[serde(default = "default_pomodoros_until_long_break")]
    pub pomodoros_until_long_break: u32,
    #[serde(default = "default_total_pomodoros")]
    pub total_pomodoros: u32,
}

fn default_work_duration() -> u32 {
    25
}
fn default_break_duration() -> u32 {
    5
}
fn default_long_break_duration() -> u32 {
    15
}
fn default_pomodoros_until_long_break() -> u32 {
    4
}
fn default_total_pomodoros() -> u32 {
    4
}

impl Default for PomodoroConfig {
    fn default() -> Self {
        Self {
            work_duration_minutes: default_work_duration(),
            break_duration_minutes: default_break_duration(),
            long_break_duration_minutes: default_long_break_duration(),
            pomodoros_until_long_break: default_pomodoros_until_long_break(),
            total_pomodoros: default_total_pomodoros(),
        }
    }
}

/// One step of a planned pomodoro cycle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlannedStep {
    pub session_type: SessionType,
    pub duration_minutes: u32,
}

impl PomodoroConfig {
    pub const fn new(
        work: u32,
        short_break: u32,
        long_break: u32,
        until_long_break: u32,
        total: u32,
    ) -> Self {
        Self {
            work_duration_minutes: work,
            break_duration_minutes: short_break,
            long_break_duration_minutes: long_break,
            pomodoros_until_long_break: until_long_break,
            total_pomodoros: total,
        }
    }

    /// Built-in presets, in display order.
    pub fn presets() -> Vec<(&'static str, PomodoroConfig)> {
        vec![
            ("Classic", PomodoroConfig::new(25, 5, 15, 4, 4)),
            ("Short", PomodoroConfig::new(15, 3, 10, 4, 6)),
            ("Long", PomodoroConfig::new(50, 10, 30, 2, 4)),
            ("Intense", PomodoroConfig::new(90, 20, 30, 3, 3)),
        ]
    }

    /// Find a preset by case-insensitive name.
    pub fn preset(name: &str) -> Option<PomodoroConfig> {
        Self::presets()
            .into_iter()
            .find(|(preset, _)| preset.eq_ignore_ascii_case(name))
            .map(|(_, config)| config)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let fields = [
            ("work_duration_minutes", self.work_duration_minutes),
            ("break_duration_minutes", self.break_duration_minutes),
            ("long_break_duration_minutes", self.long_break_duration_minutes),
            ("pomodoros_until_long_break", self.pomodoros_until_long_break),
            ("total_pomodoros", self.total_pomodoros),
        ];
        for (field, value) in fields {
            if value == 0 {
                return Err(ValidationError::invalid(field, "must be at least 1"));
            }
        }
        Ok(())
    }

    /// The full cycle: each pomodoro followed by its break.
    pub fn plan(&self) -> Vec<PlannedStep> {
        let cadence = self.pomodoros_until_long_break.max(1);
        let mut steps = Vec::with_capacity(self.total_pomodoros as usize * 2);
        for i in 1..=self.total_pomodoros {
            steps.push(PlannedStep {
                session_type: SessionType::Work,
                duration_minutes: self.work_duration_minutes,
            });
            let long = i % cadence == 0;
            steps.push(PlannedStep {
                session_type: if long {
                    SessionType::LongBreak
                } else {
                    SessionType::ShortBreak
                },
                duration_minutes: if long {
                    self.long_break_duration_minutes
                } else {
                    self.break_duration_minutes
                },
            });
        }
        steps
    }

    /// Next step after the already completed sessions, `None` once the cycle is done.
    pub fn next_step(&self, sessions: &[PomodoroSession]) -> Option<PlannedStep> {
        let done = sessions.iter().filter(|s| s.completed).count();
        self.plan().get(done).copied()
    }

    /// Planned focus minutes for the whole cycle.
    pub fn planned_focus_minutes(&self) -> u64 {
        u64::from(self.work_duration_minutes) * u64::from(self.total_pomodoros)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_places_long_break_after_cadence() {
        let config = PomodoroConfig::new(25, 5, 15, 2, 4);
        let plan = config.plan();
        assert_eq!(plan.len(), 8);
        let breaks: Vec<SessionType> = plan
            .iter()
            .filter(|s| s.session_type.is_break())
            .map(|s| s.session_type)
            .collect();
        assert_eq!(
            breaks,
            vec![
                SessionType::ShortBreak,
                SessionType::LongBreak,
                SessionType::ShortBreak,
                SessionType::LongBreak,
            ]
        );
        assert_eq!(plan[3].duration_minutes, 15);
    }

    #[test]
    fn next_step_follows_completed_sessions() {
        let config = PomodoroConfig::new(25, 5, 15, 4, 1);
        let mut sessions = Vec::new();
        assert_eq!(
            config.next_step(&sessions).map(|s| s.session_type),
            Some(SessionType::Work)
        );

        sessions.push(PomodoroSession {
            id: "s1".into(),
            task_id: "t".into(),
            start_time: Utc::now(),
            end_time: None,
            duration_minutes: 25,
            session_type: SessionType::Work,
            completed: true,
        });
        assert_eq!(
            config.next_step(&sessions).map(|s| s.session_type),
            Some(SessionType::LongBreak)
        );

        sessions.push(PomodoroSession {
            id: "s2".into(),
            session_type: SessionType::LongBreak,
            duration_minutes: 15,
            ..sessions[0].clone()
        });
        assert_eq!(config.next_step(&sessions), None);
    }

    #[test]
    fn preset_lookup_ignores_case() {
        assert_eq!(
            PomodoroConfig::preset("intense"),
            Some(PomodoroConfig::new(90, 20, 30, 3, 3))
        );
        assert!(PomodoroConfig::preset("marathon").is_none());
    }

    #[test]
    fn zero_durations_fail_validation() {
        let config = PomodoroConfig {
            pomodoros_until_long_break: 0,
            ..PomodoroConfig::default()
        };
        assert!(config.validate().is_err());
        assert!(PomodoroConfig::default().validate().is_ok());
    }

    #[test]
    fn session_type_parses_cli_spellings() {
        assert_eq!("work".parse::<SessionType>().unwrap(), SessionType::Work);
        assert_eq!(
            "short-break".parse::<SessionType>().unwrap(),
            SessionType::ShortBreak
        );
        assert_eq!(
            "LONG_BREAK".parse::<SessionType>().unwrap(),
            SessionType::LongBreak
        );
        assert!("nap".parse::<SessionType>().is_err());
    }

    #[test]
    fn session_type_serializes_as_storage_tag() {
        let json = serde_json::to_string(&SessionType::ShortBreak).unwrap();
        assert_eq!(json, "\"SHORT_BREAK\"");
        assert_eq!(SessionType::from_tag("LONG_BREAK"), Some(SessionType::LongBreak));
        assert_eq!(SessionType::from_tag("NAP"), None);
    }
}

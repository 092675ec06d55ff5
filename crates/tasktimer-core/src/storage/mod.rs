mod config;
pub mod database;
mod memory;
pub mod migrations;
mod repository;
mod sample;

pub use config::{CalendarConfig, Config, LoggingConfig, StatsConfig};
pub use database::Database;
pub use memory::MemoryStore;
pub use repository::{StatsSource, TaskStore};
pub use sample::{insert_sample_data, SampleSummary};

use std::path::PathBuf;

use crate::error::Result;

/// Returns the tasktimer data directory, creating it if needed.
///
/// `TASKTIMER_DATA_DIR` overrides the location. Otherwise this is
/// `~/.config/tasktimer/`, or `~/.config/tasktimer-dev/` when
/// `TASKTIMER_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let dir = match std::env::var_os("TASKTIMER_DATA_DIR") {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("TASKTIMER_ENV").unwrap_or_else(|_| "production".to_string());

            if env == "dev" {
                base_dir.join("tasktimer-dev")
            } else {
                base_dir.join("tasktimer")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

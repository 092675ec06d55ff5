use clap::Subcommand;
use tasktimer_core::{Config, ConfigError};

use super::Context;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value
    Get {
        /// Config key (e.g. "pomodoro.work_duration_minutes", "stats.default_period")
        key: String,
    },
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// New value
        value: String,
    },
    /// List all config values
    List,
    /// Reset config to defaults
    Reset,
}

pub fn run(action: ConfigAction, ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Get { key } => {
            let config = Config::load()?;
            let value = config
                .get(&key)
                .ok_or_else(|| ConfigError::UnknownKey(key.clone()))?;
            ctx.emit(&serde_json::json!({ "key": key, "value": value }), |_| value.clone())?;
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load()?;
            config.set(&key, &value)?;
            ctx.emit(&serde_json::json!({ "key": key, "value": value }), |_| "ok".to_string())?;
        }
        ConfigAction::List => {
            let config = Config::load()?;
            ctx.emit(&config, |c| {
                c.entries()
                    .into_iter()
                    .map(|(key, value)| format!("{key} = {value}"))
                    .collect::<Vec<_>>()
                    .join("\n")
            })?;
        }
        ConfigAction::Reset => {
            let config = Config::default();
            config.save()?;
            ctx.emit(&config, |_| "config reset to defaults".to_string())?;
        }
    }
    Ok(())
}

//! Built-in Pomodoro presets.

use clap::Subcommand;
use tasktimer_core::PomodoroConfig;

use super::task::lookup_preset;
use super::{format_minutes, Context};

#[derive(Subcommand)]
pub enum PresetAction {
    /// List presets
    List,
    /// Show a preset's full cycle
    Show {
        /// Preset name
        name: String,
    },
}

fn summary(name: &str, config: &PomodoroConfig) -> String {
    format!(
        "{name:<8} {}/{}/{} min, long break every {}, {} pomodoros",
        config.work_duration_minutes,
        config.break_duration_minutes,
        config.long_break_duration_minutes,
        config.pomodoros_until_long_break,
        config.total_pomodoros
    )
}

pub fn run(action: PresetAction, ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        PresetAction::List => {
            let presets: Vec<serde_json::Value> = PomodoroConfig::presets()
                .into_iter()
                .map(|(name, config)| serde_json::json!({ "name": name, "config": config }))
                .collect();
            ctx.emit(&presets, |_| {
                PomodoroConfig::presets()
                    .iter()
                    .map(|(name, config)| summary(name, config))
                    .collect::<Vec<_>>()
                    .join("\n")
            })?;
        }
        PresetAction::Show { name } => {
            let config = lookup_preset(&name)?;
            let plan = config.plan();
            let view = serde_json::json!({
                "name": name,
                "config": config,
                "plan": plan,
                "planned_focus_minutes": config.planned_focus_minutes(),
            });
            ctx.emit(&view, |_| {
                let mut out = vec![summary(&name, &config)];
                for (i, step) in plan.iter().enumerate() {
                    out.push(format!(
                        "  {:>2}. {} {}m",
                        i + 1,
                        step.session_type,
                        step.duration_minutes
                    ));
                }
                out.push(format!(
                    "  planned focus: {}",
                    format_minutes(config.planned_focus_minutes())
                ));
                out.join("\n")
            })?;
        }
    }
    Ok(())
}

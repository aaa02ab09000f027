use clap::Subcommand;
use dopaload_core::{Macro, Strictness};

use super::open_tracker;

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Show plan length, strictness and tracked macros
    Show,
    /// Set coaching strictness (Light, Standard, Hard)
    Strictness {
        level: String,
    },
    /// Set the plan length in days
    PlanLength {
        days: u32,
    },
    /// Turn tracking of a macro (protein, carbs, fat, fiber) on or off
    Macro {
        name: String,
        /// on/off
        state: String,
    },
}

pub fn run(action: SettingsAction) -> Result<(), Box<dyn std::error::Error>> {
    let (mut tracker, _) = open_tracker()?;

    match action {
        SettingsAction::Show => {
            let state = tracker.state();
            let out = serde_json::json!({
                "planLength": state.plan_length,
                "strictness": state.strictness,
                "macros": state.macros,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        SettingsAction::Strictness { level } => {
            let strictness: Strictness = level.parse()?;
            tracker.set_strictness(strictness)?;
            println!("strictness set to {strictness}");
        }
        SettingsAction::PlanLength { days } => {
            tracker.set_plan_length(days)?;
            println!("plan length set to {days} days");
        }
        SettingsAction::Macro { name, state } => {
            let m: Macro = name.parse()?;
            let on = dopaload_core::checkin::parse_flag("macro", &state)?;
            tracker.set_macro(m, on)?;
            println!("{} tracking {}", m.as_str(), if on { "on" } else { "off" });
        }
    }
    Ok(())
}

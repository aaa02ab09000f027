use clap::Subcommand;
use dopaload_core::PersistedState;
use std::path::PathBuf;

use super::open_tracker;

#[derive(Subcommand)]
pub enum StateAction {
    /// Print the raw state blob
    Show,
    /// Replace all state with a previously exported blob
    Import {
        /// Path to a JSON state file
        file: PathBuf,
    },
    /// Delete all check-ins and settings
    Reset {
        /// Required to confirm the reset
        #[arg(long)]
        yes: bool,
    },
    /// Print the state file location
    Path,
}

pub fn run(action: StateAction) -> Result<(), Box<dyn std::error::Error>> {
    let (mut tracker, _) = open_tracker()?;

    match action {
        StateAction::Show => {
            println!("{}", serde_json::to_string_pretty(tracker.state())?);
        }
        StateAction::Import { file } => {
            let content = std::fs::read_to_string(&file)?;
            let state = PersistedState::parse_strict(&content)?;
            let count = state.history.len();
            tracker.replace_state(state)?;
            println!("imported {count} check-in(s) from {}", file.display());
        }
        StateAction::Reset { yes } => {
            if !yes {
                return Err("refusing to reset without --yes".into());
            }
            tracker.reset()?;
            println!("state reset");
        }
        StateAction::Path => {
            println!("{}", tracker.store().path().display());
        }
    }
    Ok(())
}

mod config;
pub mod state;

pub use config::{Config, DisplayConfig, TrackerConfig, MAX_CHART_WIDTH};
pub use state::{PersistedState, StateStore};

use std::path::PathBuf;

use crate::error::StorageError;

/// Returns `~/.config/dopaload[-dev]/` based on DOPALOAD_ENV.
///
/// Set DOPALOAD_ENV=dev to use the development data directory, or
/// DOPALOAD_DATA_DIR to point somewhere else entirely.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let dir = match std::env::var_os("DOPALOAD_DATA_DIR") {
        Some(custom) if !custom.is_empty() => PathBuf::from(custom),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("DOPALOAD_ENV").unwrap_or_else(|_| "production".to_string());

            if env == "dev" {
                base_dir.join("dopaload-dev")
            } else {
                base_dir.join("dopaload")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| StorageError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}

//! Single-document JSON state store.
//!
//! All tracked state lives in one JSON blob: the ordered history, the plan
//! length, the strictness and the macro toggles. A blob that fails to parse
//! is discarded and replaced by the default state.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::{Result, StorageError};
use crate::history::History;
use crate::settings::{validate_plan_length, MacroToggles, Strictness, DEFAULT_PLAN_LENGTH};

pub const STATE_FILE: &str = "state.json";

fn default_plan_length() -> u32 {
    DEFAULT_PLAN_LENGTH
}

/// The persisted blob.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedState {
    #[serde(default)]
    pub history: History,
    #[serde(default = "default_plan_length")]
    pub plan_length: u32,
    #[serde(default)]
    pub strictness: Strictness,
    #[serde(default)]
    pub macros: MacroToggles,
}

impl Default for PersistedState {
    fn default() -> Self {
        Self {
            history: History::new(),
            plan_length: DEFAULT_PLAN_LENGTH,
            strictness: Strictness::default(),
            macros: MacroToggles::default(),
        }
    }
}

impl PersistedState {
    /// Parse a blob, falling back to defaults when it is not valid state.
    pub fn parse_or_default(content: &str) -> Self {
        match serde_json::from_str::<PersistedState>(content) {
            Ok(mut state) => {
                if state.plan_length == 0 {
                    state.plan_length = DEFAULT_PLAN_LENGTH;
                }
                state
            }
            Err(e) => {
                tracing::warn!(error = %e, "discarding unreadable state");
                Self::default()
            }
        }
    }

    /// Strict parse used for imports, where silently dropping data is wrong.
    pub fn parse_strict(content: &str) -> Result<Self> {
        let state: PersistedState = serde_json::from_str(content)
            .map_err(|e| StorageError::InvalidDocument(e.to_string()))?;
        state.validate()?;
        Ok(state)
    }

    /// Check invariants a hand-edited or imported blob could break.
    pub fn validate(&self) -> Result<()> {
        validate_plan_length(self.plan_length)?;
        Ok(())
    }
}

/// Reads and writes [`PersistedState`] at a fixed path.
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `<data_dir>/state.json`.
    pub fn open_default() -> Result<Self> {
        Ok(Self::open(data_dir()?.join(STATE_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the state. A missing file gives defaults, so does a corrupt one.
    ///
    /// # Errors
    /// Returns an error only if the file exists but cannot be read.
    pub fn load(&self) -> Result<PersistedState> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => Ok(PersistedState::parse_or_default(&content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no state file, starting fresh");
                Ok(PersistedState::default())
            }
            Err(source) => Err(StorageError::ReadFailed {
                path: self.path.clone(),
                source,
            }
            .into()),
        }
    }

    /// Write the state atomically (temp file + rename).
    pub fn save(&self, state: &PersistedState) -> Result<()> {
        let content = serde_json::to_string_pretty(state)?;
        let tmp = self.path.with_extension("json.tmp");
        let write_failed = |source| StorageError::WriteFailed {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(write_failed)?;
            }
        }
        std::fs::write(&tmp, content).map_err(write_failed)?;
        std::fs::rename(&tmp, &self.path).map_err(write_failed)?;
        tracing::debug!(
            path = %self.path.display(),
            records = state.history.len(),
            "state saved"
        );
        Ok(())
    }

    /// Delete the state file. Missing is fine.
    pub fn reset(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::WriteFailed {
                path: self.path.clone(),
                source,
            }
            .into()),
        }
    }
}

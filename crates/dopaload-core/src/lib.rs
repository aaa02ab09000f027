//! # Dopaload Core Library
//!
//! This library provides the core logic for the Dopaload habit tracker. All
//! operations are available through the `dopaload` CLI, which is a thin layer
//! over this crate.
//!
//! ## Architecture
//!
//! - **Check-ins**: one [`DailyCheckin`] per date, edited through a
//!   [`CheckinDraft`] and kept in a date-ordered [`History`]
//! - **Scoring**: pure functions for the Dopamine Load Score and the
//!   Natural Energy Index
//! - **Coach**: a static decision table picking Easy/Medium/Hard tasks
//! - **Storage**: one JSON state blob plus TOML configuration
//!
//! ## Key Components
//!
//! - [`compute_dls`], [`compute_nei`], [`coach_tasks`]
//! - [`Tracker`]: in-memory state with write-through persistence
//! - [`StateStore`]: JSON blob storage
//! - [`Config`]: application configuration management

pub mod checkin;
pub mod coach;
pub mod error;
pub mod history;
pub mod scoring;
pub mod settings;
pub mod storage;
pub mod tracker;
pub mod trend;

pub use checkin::{coerce_number, parse_date, CheckinDraft, DailyCheckin, Virtue, Virtues};
pub use coach::{coach_tasks, CoachInput, CoachTask, Difficulty};
pub use error::{ConfigError, CoreError, StorageError, ValidationError};
pub use history::History;
pub use scoring::{compute_dls, compute_nei, dls_breakdown, DlsBreakdown, ScoreTerm};
pub use settings::{Macro, MacroToggles, Phase, PlanProgress, Strictness};
pub use storage::{Config, PersistedState, StateStore};
pub use tracker::{DayReport, SaveOutcome, Tracker};
pub use trend::{render_ascii_chart, score_series, TrendPoint};

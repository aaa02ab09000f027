//! In-memory tracker state with write-through persistence.
//!
//! Every mutation updates memory first and then writes the whole state
//! blob, so the file on disk always mirrors what the caller last saw.

use chrono::NaiveDate;
use serde::Serialize;

use crate::checkin::{CheckinDraft, DailyCheckin};
use crate::coach::{coach_tasks, CoachInput, CoachTask};
use crate::error::{Result, ValidationError};
use crate::history::History;
use crate::scoring::{compute_nei, dls_breakdown, DlsBreakdown, NEI_WINDOW};
use crate::settings::{validate_plan_length, Macro, MacroToggles, PlanProgress, Strictness};
use crate::storage::{PersistedState, StateStore};

/// Everything derived for one day.
#[derive(Debug, Clone, Serialize)]
pub struct DayReport {
    pub record: DailyCheckin,
    pub day_index: usize,
    pub dls: u8,
    pub breakdown: DlsBreakdown,
    /// NEI over the window ending at this day
    pub nei: u8,
    pub coach: [CoachTask; 3],
    pub progress: PlanProgress,
}

/// Outcome of saving a draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Inserted,
    Replaced,
}

pub struct Tracker {
    state: PersistedState,
    store: StateStore,
    default_load_items: Vec<String>,
}

impl Tracker {
    /// Load state from `store`.
    pub fn open(store: StateStore) -> Result<Self> {
        let state = store.load()?;
        tracing::debug!(records = state.history.len(), "tracker opened");
        Ok(Self {
            state,
            store,
            default_load_items: Vec::new(),
        })
    }

    /// Load items seeded (switched off) into blank drafts.
    pub fn with_default_load_items(mut self, items: Vec<String>) -> Self {
        self.default_load_items = items;
        self
    }

    pub fn state(&self) -> &PersistedState {
        &self.state
    }

    pub fn history(&self) -> &History {
        &self.state.history
    }

    pub fn store(&self) -> &StateStore {
        &self.store
    }

    fn persist(&self) -> Result<()> {
        self.store.save(&self.state)
    }

    /// Start editing `date`: an existing record is copied, otherwise a blank
    /// record carries the load items of the latest check-in (or the
    /// configured defaults when there is none), all switched off.
    pub fn begin_draft(&self, date: NaiveDate) -> CheckinDraft {
        if let Some(existing) = self.state.history.get(date) {
            return CheckinDraft::from_existing(existing.clone());
        }
        match self.state.history.latest() {
            Some(latest) if !latest.load_items.is_empty() => {
                CheckinDraft::blank(date, latest.load_items.keys().cloned())
            }
            _ => CheckinDraft::blank(date, self.default_load_items.iter().cloned()),
        }
    }

    /// Promote a draft into history and persist.
    pub fn save_draft(&mut self, draft: CheckinDraft) -> Result<SaveOutcome> {
        let record = draft.into_record();
        let date = record.date;
        let replaced = self.state.history.upsert(record);
        self.persist()?;
        tracing::info!(%date, replaced, "check-in saved");
        Ok(if replaced {
            SaveOutcome::Replaced
        } else {
            SaveOutcome::Inserted
        })
    }

    /// Delete a day's record and persist.
    pub fn remove(&mut self, date: NaiveDate) -> Result<DailyCheckin> {
        let removed = self
            .state
            .history
            .remove(date)
            .ok_or(ValidationError::MissingRecord(date))?;
        self.persist()?;
        tracing::info!(%date, "check-in removed");
        Ok(removed)
    }

    pub fn set_strictness(&mut self, strictness: Strictness) -> Result<()> {
        self.state.strictness = strictness;
        self.persist()
    }

    pub fn set_plan_length(&mut self, days: u32) -> Result<()> {
        self.state.plan_length = validate_plan_length(days)?;
        self.persist()
    }

    pub fn set_macro(&mut self, m: Macro, on: bool) -> Result<MacroToggles> {
        self.state.macros.set(m, on);
        self.persist()?;
        Ok(self.state.macros)
    }

    /// Replace the whole state, e.g. from an import.
    pub fn replace_state(&mut self, state: PersistedState) -> Result<()> {
        state.validate()?;
        self.state = state;
        self.persist()
    }

    /// Drop all state and delete the file.
    pub fn reset(&mut self) -> Result<()> {
        self.state = PersistedState::default();
        self.store.reset()
    }

    pub fn progress(&self) -> PlanProgress {
        PlanProgress::from_history(&self.state.history, self.state.plan_length)
    }

    /// Scores and coaching for an arbitrary record, saved or not.
    pub fn report_for(&self, record: &DailyCheckin) -> DayReport {
        let history = &self.state.history;
        let day_index = history.day_index(record.date);
        let breakdown = dls_breakdown(record);

        // NEI over the saved window up to this day, with `record` standing
        // in for whatever is saved under its date.
        let mut window: Vec<DailyCheckin> = history
            .window_ending(record.date, NEI_WINDOW)
            .iter()
            .filter(|r| r.date != record.date)
            .cloned()
            .collect();
        window.push(record.clone());
        let nei = compute_nei(&window);

        let coach = coach_tasks(&CoachInput {
            day_index,
            record,
            dls: breakdown.score,
            strictness: self.state.strictness,
        });

        let streak = history
            .iter()
            .rev()
            .skip_while(|r| r.date > record.date)
            .take_while(|r| !r.any_load_active())
            .count();

        DayReport {
            record: record.clone(),
            day_index,
            dls: breakdown.score,
            breakdown,
            nei,
            coach,
            progress: PlanProgress::at_day(day_index, self.state.plan_length, streak),
        }
    }

    /// Report for a saved day.
    pub fn day_report(&self, date: NaiveDate) -> Result<DayReport> {
        let record = self
            .state
            .history
            .get(date)
            .ok_or(ValidationError::MissingRecord(date))?;
        Ok(self.report_for(record))
    }

    /// NEI over the trailing window of the whole history.
    pub fn current_nei(&self) -> u8 {
        compute_nei(self.state.history.as_slice())
    }
}

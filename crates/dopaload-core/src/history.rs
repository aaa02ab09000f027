//! Date-ordered check-in history.
//!
//! History is kept sorted ascending by date with at most one record per
//! date. Saving a record for a date that already exists replaces it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::checkin::DailyCheckin;

/// Ordered collection of check-ins, unique by date.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct History {
    records: Vec<DailyCheckin>,
}

impl<'de> Deserialize<'de> for History {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let records = Vec::<DailyCheckin>::deserialize(deserializer)?;
        Ok(Self::from_records(records))
    }
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from arbitrary records: sorts by date and keeps the last
    /// occurrence of any duplicated date.
    pub fn from_records(records: Vec<DailyCheckin>) -> Self {
        let mut history = Self::new();
        for record in records {
            history.upsert(record);
        }
        history
    }

    /// Insert or replace by date. Returns `true` when an existing record
    /// was replaced.
    pub fn upsert(&mut self, record: DailyCheckin) -> bool {
        match self.records.binary_search_by_key(&record.date, |r| r.date) {
            Ok(pos) => {
                self.records[pos] = record;
                true
            }
            Err(pos) => {
                self.records.insert(pos, record);
                false
            }
        }
    }

    pub fn get(&self, date: NaiveDate) -> Option<&DailyCheckin> {
        self.records
            .binary_search_by_key(&date, |r| r.date)
            .ok()
            .map(|pos| &self.records[pos])
    }

    pub fn remove(&mut self, date: NaiveDate) -> Option<DailyCheckin> {
        self.records
            .binary_search_by_key(&date, |r| r.date)
            .ok()
            .map(|pos| self.records.remove(pos))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DailyCheckin> {
        self.records.iter()
    }

    pub fn as_slice(&self) -> &[DailyCheckin] {
        &self.records
    }

    pub fn latest(&self) -> Option<&DailyCheckin> {
        self.records.last()
    }

    /// The trailing `n` records.
    pub fn last_n(&self, n: usize) -> &[DailyCheckin] {
        let start = self.records.len().saturating_sub(n);
        &self.records[start..]
    }

    /// The trailing `n` records dated on or before `date`.
    pub fn window_ending(&self, date: NaiveDate, n: usize) -> &[DailyCheckin] {
        let end = self.records.partition_point(|r| r.date <= date);
        let start = end.saturating_sub(n);
        &self.records[start..end]
    }

    /// 1-based position `date` holds, or would hold once saved.
    pub fn day_index(&self, date: NaiveDate) -> usize {
        self.records.partition_point(|r| r.date < date) + 1
    }

    /// Consecutive most-recent records with no load item switched on.
    pub fn clean_streak(&self) -> usize {
        self.records
            .iter()
            .rev()
            .take_while(|r| !r.any_load_active())
            .count()
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a DailyCheckin;
    type IntoIter = std::slice::Iter<'a, DailyCheckin>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

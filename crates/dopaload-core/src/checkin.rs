//! Daily check-in record and the draft used to edit it.
//!
//! A check-in is one day of logged behaviour: sleep, caffeine, mood and
//! energy, nutrition macros, user-defined load items and the three fixed
//! virtues. Records are keyed by date and serialized with camelCase keys so
//! the persisted blob stays compatible with the browser prototype.

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::settings::Macro;

/// Coerce free-form numeric input to a finite number.
///
/// Empty, non-numeric, NaN and infinite input all become `0.0`.
pub fn coerce_number(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

/// Parse a boolean flag as typed on a command line.
pub fn parse_flag(field: &str, raw: &str) -> Result<bool, ValidationError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" | "y" => Ok(true),
        "false" | "no" | "off" | "0" | "n" | "" => Ok(false),
        other => Err(ValidationError::InvalidValue {
            field: field.to_string(),
            message: format!("expected a boolean, got '{other}'"),
        }),
    }
}

/// Parse a `YYYY-MM-DD` date key.
pub fn parse_date(raw: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidDate(raw.to_string()))
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_f64().filter(|v| v.is_finite()).unwrap_or(0.0),
        Some(serde_json::Value::String(s)) => coerce_number(&s),
        _ => 0.0,
    })
}

/// `null` reads as the type's default, same as a missing field.
fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One of the three fixed positive habits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Virtue {
    Study,
    Gym,
    Meditate,
}

impl Virtue {
    pub const ALL: [Virtue; 3] = [Virtue::Study, Virtue::Gym, Virtue::Meditate];

    pub fn as_str(&self) -> &'static str {
        match self {
            Virtue::Study => "study",
            Virtue::Gym => "gym",
            Virtue::Meditate => "meditate",
        }
    }
}

impl fmt::Display for Virtue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Virtue {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "study" => Ok(Virtue::Study),
            "gym" => Ok(Virtue::Gym),
            "meditate" => Ok(Virtue::Meditate),
            other => Err(ValidationError::InvalidValue {
                field: "virtue".to_string(),
                message: format!("'{other}' is not one of study, gym, meditate"),
            }),
        }
    }
}

/// Virtue flags for one day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Virtues {
    #[serde(default, deserialize_with = "null_default")]
    pub study: bool,
    #[serde(default, deserialize_with = "null_default")]
    pub gym: bool,
    #[serde(default, deserialize_with = "null_default")]
    pub meditate: bool,
}

impl Virtues {
    pub fn get(&self, virtue: Virtue) -> bool {
        match virtue {
            Virtue::Study => self.study,
            Virtue::Gym => self.gym,
            Virtue::Meditate => self.meditate,
        }
    }

    pub fn set(&mut self, virtue: Virtue, on: bool) {
        match virtue {
            Virtue::Study => self.study = on,
            Virtue::Gym => self.gym = on,
            Virtue::Meditate => self.meditate = on,
        }
    }

    /// Number of virtues switched on (0..=3).
    pub fn active_count(&self) -> usize {
        Virtue::ALL.iter().filter(|v| self.get(**v)).count()
    }

    pub fn any(&self) -> bool {
        self.active_count() > 0
    }
}

/// A single day's check-in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyCheckin {
    pub date: NaiveDate,

    /// User-defined habits to reduce, in the order the user added them.
    #[serde(default, deserialize_with = "null_default")]
    pub load_items: IndexMap<String, bool>,

    #[serde(default, deserialize_with = "null_default")]
    pub virtues: Virtues,

    #[serde(default, deserialize_with = "lenient_f64")]
    pub sleep_hours: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub sleep_quality: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub caffeine_mg: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub social_minutes: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub mood: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub energy: f64,

    #[serde(default, deserialize_with = "lenient_f64")]
    pub protein_g: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub carbs_g: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub fat_g: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub fiber_g: f64,

    #[serde(default, deserialize_with = "null_default")]
    pub workout: bool,
    #[serde(default, deserialize_with = "null_default")]
    pub junk_food: bool,
    #[serde(default, deserialize_with = "null_default")]
    pub notes: String,
}

impl DailyCheckin {
    /// Blank record for `date`: every number zero, every flag off.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            load_items: IndexMap::new(),
            virtues: Virtues::default(),
            sleep_hours: 0.0,
            sleep_quality: 0.0,
            caffeine_mg: 0.0,
            social_minutes: 0.0,
            mood: 0.0,
            energy: 0.0,
            protein_g: 0.0,
            carbs_g: 0.0,
            fat_g: 0.0,
            fiber_g: 0.0,
            workout: false,
            junk_food: false,
            notes: String::new(),
        }
    }

    pub fn active_load_count(&self) -> usize {
        self.load_items.values().filter(|on| **on).count()
    }

    pub fn any_load_active(&self) -> bool {
        self.load_items.values().any(|on| *on)
    }

    /// Grams logged for one nutrition macro.
    pub fn grams(&self, m: Macro) -> f64 {
        match m {
            Macro::Protein => self.protein_g,
            Macro::Carbs => self.carbs_g,
            Macro::Fat => self.fat_g,
            Macro::Fiber => self.fiber_g,
        }
    }

    /// Names of load items switched on, in insertion order.
    pub fn active_load_items(&self) -> impl Iterator<Item = &str> {
        self.load_items
            .iter()
            .filter(|(_, on)| **on)
            .map(|(name, _)| name.as_str())
    }
}

/// An in-progress edit of one day's check-in.
///
/// Nothing in a draft reaches history until it is saved.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckinDraft {
    record: DailyCheckin,
    editing_existing: bool,
}

impl CheckinDraft {
    /// Start a blank draft, seeding the given load item names switched off.
    pub fn blank<I, S>(date: NaiveDate, load_items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut record = DailyCheckin::new(date);
        for name in load_items {
            record.load_items.insert(name.into(), false);
        }
        Self {
            record,
            editing_existing: false,
        }
    }

    /// Start a draft from an already saved record.
    pub fn from_existing(record: DailyCheckin) -> Self {
        Self {
            record,
            editing_existing: true,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.record.date
    }

    pub fn is_editing_existing(&self) -> bool {
        self.editing_existing
    }

    pub fn record(&self) -> &DailyCheckin {
        &self.record
    }

    /// Set a field from raw text.
    ///
    /// Numeric fields never fail: malformed input is coerced to zero.
    pub fn set_field(&mut self, field: &str, raw: &str) -> Result<(), ValidationError> {
        let key = field.trim().replace('-', "_").to_ascii_lowercase();
        let r = &mut self.record;
        match key.as_str() {
            "sleep_hours" => r.sleep_hours = coerce_number(raw),
            "sleep_quality" => r.sleep_quality = coerce_number(raw),
            "caffeine_mg" => r.caffeine_mg = coerce_number(raw),
            "social_minutes" => r.social_minutes = coerce_number(raw),
            "mood" => r.mood = coerce_number(raw),
            "energy" => r.energy = coerce_number(raw),
            "protein_g" => r.protein_g = coerce_number(raw),
            "carbs_g" => r.carbs_g = coerce_number(raw),
            "fat_g" => r.fat_g = coerce_number(raw),
            "fiber_g" => r.fiber_g = coerce_number(raw),
            "workout" => r.workout = parse_flag(&key, raw)?,
            "junk_food" => r.junk_food = parse_flag(&key, raw)?,
            "notes" => r.notes = raw.to_string(),
            "study" | "gym" | "meditate" => {
                let virtue: Virtue = key.parse()?;
                r.virtues.set(virtue, parse_flag(&key, raw)?);
            }
            _ => return Err(ValidationError::UnknownField(field.to_string())),
        }
        Ok(())
    }

    /// Add a load item (switched off) if not already present.
    pub fn add_load_item(&mut self, name: &str) -> Result<(), ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::InvalidValue {
                field: "load_item".to_string(),
                message: "name must not be empty".to_string(),
            });
        }
        self.record.load_items.entry(name.to_string()).or_insert(false);
        Ok(())
    }

    /// Switch a load item on or off, adding it when missing.
    pub fn set_load_item(&mut self, name: &str, on: bool) -> Result<(), ValidationError> {
        self.add_load_item(name)?;
        if let Some(flag) = self.record.load_items.get_mut(name.trim()) {
            *flag = on;
        }
        Ok(())
    }

    /// Flip a load item; returns the new state.
    pub fn toggle_load_item(&mut self, name: &str) -> Result<bool, ValidationError> {
        self.add_load_item(name)?;
        let flag = self
            .record
            .load_items
            .get_mut(name.trim())
            .map(|flag| {
                *flag = !*flag;
                *flag
            })
            .unwrap_or(false);
        Ok(flag)
    }

    /// Remove a load item; returns whether it existed.
    pub fn remove_load_item(&mut self, name: &str) -> bool {
        self.record.load_items.shift_remove(name.trim()).is_some()
    }

    /// Finish editing and hand back the record for saving.
    pub fn into_record(self) -> DailyCheckin {
        self.record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    #[test]
    fn coerce_number_handles_malformed_input() {
        assert_eq!(coerce_number("7.5"), 7.5);
        assert_eq!(coerce_number("  120 "), 120.0);
        assert_eq!(coerce_number(""), 0.0);
        assert_eq!(coerce_number("abc"), 0.0);
        assert_eq!(coerce_number("NaN"), 0.0);
        assert_eq!(coerce_number("inf"), 0.0);
    }

    #[test]
    fn parse_flag_accepts_common_spellings() {
        assert!(parse_flag("workout", "yes").unwrap());
        assert!(parse_flag("workout", "ON").unwrap());
        assert!(!parse_flag("workout", "0").unwrap());
        assert!(parse_flag("workout", "maybe").is_err());
    }

    #[test]
    fn parse_date_rejects_other_formats() {
        assert!(parse_date("2024-03-01").is_ok());
        assert!(parse_date("03/01/2024").is_err());
    }

    #[test]
    fn deserializes_camel_case_and_lenient_numbers() {
        let json = r#"{
            "date": "2024-03-01",
            "loadItems": {"Scrolling": true, "Sugar": false},
            "virtues": {"study": true},
            "sleepHours": "7.5",
            "caffeineMg": null,
            "socialMinutes": "lots",
            "energy": 6,
            "junkFood": true,
            "workout": null,
            "notes": null
        }"#;
        let rec: DailyCheckin = serde_json::from_str(json).unwrap();
        assert_eq!(rec.date, day("2024-03-01"));
        assert_eq!(rec.sleep_hours, 7.5);
        assert_eq!(rec.caffeine_mg, 0.0);
        assert_eq!(rec.social_minutes, 0.0);
        assert_eq!(rec.energy, 6.0);
        assert!(rec.junk_food);
        assert!(!rec.workout);
        assert_eq!(rec.notes, "");
        assert!(rec.virtues.study);
        assert!(!rec.virtues.gym);
        assert_eq!(rec.active_load_count(), 1);
        assert_eq!(rec.active_load_items().collect::<Vec<_>>(), vec!["Scrolling"]);
    }

    #[test]
    fn null_flags_text_and_maps_read_as_defaults() {
        let json = r#"{
            "date": "2024-03-02",
            "loadItems": null,
            "virtues": {"study": null, "gym": true},
            "junkFood": null
        }"#;
        let rec: DailyCheckin = serde_json::from_str(json).unwrap();
        assert!(rec.load_items.is_empty());
        assert!(!rec.virtues.study);
        assert!(rec.virtues.gym);
        assert!(!rec.junk_food);
    }

    #[test]
    fn grams_follow_macro() {
        let mut rec = DailyCheckin::new(day("2024-03-01"));
        rec.fiber_g = 30.0;
        assert_eq!(rec.grams(Macro::Fiber), 30.0);
        assert_eq!(rec.grams(Macro::Protein), 0.0);
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let rec = DailyCheckin::new(day("2024-03-01"));
        let json = serde_json::to_value(&rec).unwrap();
        assert!(json.get("sleepHours").is_some());
        assert!(json.get("loadItems").is_some());
        assert_eq!(json["date"], "2024-03-01");
    }

    #[test]
    fn draft_set_field_coerces_and_validates() {
        let mut draft = CheckinDraft::blank(day("2024-03-01"), ["Scrolling"]);
        draft.set_field("sleep-hours", "8").unwrap();
        draft.set_field("caffeine_mg", "lots").unwrap();
        draft.set_field("gym", "yes").unwrap();
        draft.set_field("notes", "felt good").unwrap();
        assert!(draft.set_field("bogus", "1").is_err());
        assert!(draft.set_field("workout", "perhaps").is_err());

        let rec = draft.record();
        assert_eq!(rec.sleep_hours, 8.0);
        assert_eq!(rec.caffeine_mg, 0.0);
        assert!(rec.virtues.gym);
        assert_eq!(rec.notes, "felt good");
        assert_eq!(rec.load_items.get("Scrolling"), Some(&false));
    }

    #[test]
    fn draft_load_items_keep_insertion_order() {
        let mut draft = CheckinDraft::blank(day("2024-03-01"), Vec::<String>::new());
        draft.add_load_item("Gaming").unwrap();
        draft.set_load_item("Sugar", true).unwrap();
        assert!(draft.toggle_load_item("Gaming").unwrap());
        assert!(!draft.toggle_load_item("Gaming").unwrap());
        assert!(draft.add_load_item("   ").is_err());

        let names: Vec<_> = draft.record().load_items.keys().cloned().collect();
        assert_eq!(names, vec!["Gaming", "Sugar"]);

        assert!(draft.remove_load_item("Gaming"));
        assert!(!draft.remove_load_item("Gaming"));
    }

    #[test]
    fn virtue_counts() {
        let mut v = Virtues::default();
        assert!(!v.any());
        v.set(Virtue::Study, true);
        v.set(Virtue::Meditate, true);
        assert_eq!(v.active_count(), 2);
        assert_eq!("GYM".parse::<Virtue>().unwrap(), Virtue::Gym);
    }
}

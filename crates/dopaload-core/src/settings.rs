//! User settings carried in the persisted state: plan length, coaching
//! strictness and which nutrition macros are tracked.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::history::History;

pub const DEFAULT_PLAN_LENGTH: u32 = 30;

/// How hard the coach pushes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strictness {
    Light,
    #[default]
    Standard,
    Hard,
}

impl Strictness {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strictness::Light => "Light",
            Strictness::Standard => "Standard",
            Strictness::Hard => "Hard",
        }
    }
}

impl fmt::Display for Strictness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strictness {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Strictness::Light),
            "standard" => Ok(Strictness::Standard),
            "hard" => Ok(Strictness::Hard),
            other => Err(ValidationError::InvalidValue {
                field: "strictness".to_string(),
                message: format!("'{other}' is not one of Light, Standard, Hard"),
            }),
        }
    }
}

/// The four tracked nutrition macros.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Macro {
    Protein,
    Carbs,
    Fat,
    Fiber,
}

impl Macro {
    pub const ALL: [Macro; 4] = [Macro::Protein, Macro::Carbs, Macro::Fat, Macro::Fiber];

    pub fn as_str(&self) -> &'static str {
        match self {
            Macro::Protein => "protein",
            Macro::Carbs => "carbs",
            Macro::Fat => "fat",
            Macro::Fiber => "fiber",
        }
    }
}

impl FromStr for Macro {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "protein" => Ok(Macro::Protein),
            "carbs" => Ok(Macro::Carbs),
            "fat" => Ok(Macro::Fat),
            "fiber" => Ok(Macro::Fiber),
            other => Err(ValidationError::InvalidValue {
                field: "macro".to_string(),
                message: format!("'{other}' is not one of protein, carbs, fat, fiber"),
            }),
        }
    }
}

fn default_true() -> bool {
    true
}

/// Which macros are tracked. Serialized as a name → bool map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroToggles {
    #[serde(default = "default_true")]
    pub protein: bool,
    #[serde(default = "default_true")]
    pub carbs: bool,
    #[serde(default = "default_true")]
    pub fat: bool,
    #[serde(default = "default_true")]
    pub fiber: bool,
}

impl Default for MacroToggles {
    fn default() -> Self {
        Self {
            protein: true,
            carbs: true,
            fat: true,
            fiber: true,
        }
    }
}

impl MacroToggles {
    pub fn get(&self, m: Macro) -> bool {
        match m {
            Macro::Protein => self.protein,
            Macro::Carbs => self.carbs,
            Macro::Fat => self.fat,
            Macro::Fiber => self.fiber,
        }
    }

    pub fn set(&mut self, m: Macro, on: bool) {
        match m {
            Macro::Protein => self.protein = on,
            Macro::Carbs => self.carbs = on,
            Macro::Fat => self.fat = on,
            Macro::Fiber => self.fiber = on,
        }
    }

    pub fn enabled(&self) -> impl Iterator<Item = Macro> + '_ {
        Macro::ALL.into_iter().filter(|m| self.get(*m))
    }
}

/// Stage of the plan, keyed on the day index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Early,
    Mid,
    Late,
}

impl Phase {
    /// Day 1..=10 is early, beyond 40 is late.
    pub fn for_day(day_index: usize) -> Self {
        if day_index <= 10 {
            Phase::Early
        } else if day_index > 40 {
            Phase::Late
        } else {
            Phase::Mid
        }
    }
}

/// Where the user stands in their plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanProgress {
    pub day: usize,
    pub plan_length: u32,
    /// Completion in percent, capped at 100
    pub percent: u8,
    pub phase: Phase,
    pub clean_streak: usize,
}

impl PlanProgress {
    /// Progress at the latest record (day 1 on an empty history).
    pub fn from_history(history: &History, plan_length: u32) -> Self {
        let day = history.len().max(1);
        Self::at_day(day, plan_length, history.clean_streak())
    }

    pub fn at_day(day: usize, plan_length: u32, clean_streak: usize) -> Self {
        let plan_length = plan_length.max(1);
        let percent = ((day as f64 / plan_length as f64) * 100.0).round().min(100.0) as u8;
        Self {
            day,
            plan_length,
            percent,
            phase: Phase::for_day(day),
            clean_streak,
        }
    }
}

/// Validate a plan length typed by the user.
pub fn validate_plan_length(days: u32) -> Result<u32, ValidationError> {
    if days == 0 {
        return Err(ValidationError::InvalidValue {
            field: "plan_length".to_string(),
            message: "must be at least 1 day".to_string(),
        });
    }
    Ok(days)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strictness_serializes_as_title_case() {
        assert_eq!(serde_json::to_string(&Strictness::Hard).unwrap(), "\"Hard\"");
        let s: Strictness = serde_json::from_str("\"Light\"").unwrap();
        assert_eq!(s, Strictness::Light);
        assert_eq!("standard".parse::<Strictness>().unwrap(), Strictness::Standard);
        assert!("brutal".parse::<Strictness>().is_err());
    }

    #[test]
    fn macro_toggles_default_on_and_fill_missing() {
        let m: MacroToggles = serde_json::from_str(r#"{"fat": false}"#).unwrap();
        assert!(m.protein);
        assert!(!m.fat);
        assert_eq!(m.enabled().count(), 3);
    }

    #[test]
    fn phase_boundaries() {
        assert_eq!(Phase::for_day(1), Phase::Early);
        assert_eq!(Phase::for_day(10), Phase::Early);
        assert_eq!(Phase::for_day(11), Phase::Mid);
        assert_eq!(Phase::for_day(40), Phase::Mid);
        assert_eq!(Phase::for_day(41), Phase::Late);
    }

    #[test]
    fn plan_progress_percent_is_capped() {
        let p = PlanProgress::at_day(15, 30, 0);
        assert_eq!(p.percent, 50);
        assert_eq!(PlanProgress::at_day(45, 30, 0).percent, 100);
        assert_eq!(PlanProgress::from_history(&History::new(), 30).day, 1);
    }

    #[test]
    fn plan_length_must_be_positive() {
        assert!(validate_plan_length(0).is_err());
        assert_eq!(validate_plan_length(90).unwrap(), 90);
    }
}

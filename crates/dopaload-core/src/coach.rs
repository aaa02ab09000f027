//! Coach task selection.
//!
//! Every day gets exactly three suggestions: one Easy, one Medium and one
//! Hard. Selection is a static decision table over the plan phase, a few
//! threshold signals from the active record and the strictness setting.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::checkin::DailyCheckin;
use crate::settings::{Phase, Strictness};

pub const SHORT_SLEEP_HOURS: f64 = 7.0;
pub const HIGH_CAFFEINE_MG: f64 = 200.0;
pub const HIGH_DLS: u8 = 70;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoachTask {
    pub difficulty: Difficulty,
    pub text: String,
}

impl CoachTask {
    fn new(difficulty: Difficulty, text: impl Into<String>) -> Self {
        Self {
            difficulty,
            text: text.into(),
        }
    }
}

/// Everything the decision table looks at.
#[derive(Debug, Clone, Copy)]
pub struct CoachInput<'a> {
    /// 1-based day index of the active record
    pub day_index: usize,
    pub record: &'a DailyCheckin,
    pub dls: u8,
    pub strictness: Strictness,
}

/// Threshold signals derived from the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Signals {
    phase: Phase,
    even_day: bool,
    short_sleep: bool,
    high_caffeine: bool,
    high_load: bool,
    any_load: bool,
}

impl Signals {
    fn from_input(input: &CoachInput<'_>) -> Self {
        Self {
            phase: Phase::for_day(input.day_index),
            even_day: input.day_index % 2 == 0,
            short_sleep: input.record.sleep_hours < SHORT_SLEEP_HOURS,
            high_caffeine: input.record.caffeine_mg > HIGH_CAFFEINE_MG,
            high_load: input.dls > HIGH_DLS,
            any_load: input.record.any_load_active(),
        }
    }
}

fn easy_task(s: &Signals) -> CoachTask {
    let text = if s.short_sleep {
        "Lights out 30 minutes earlier tonight; no screens in bed"
    } else if s.high_caffeine {
        "Keep caffeine under 200 mg and skip it after noon"
    } else {
        match s.phase {
            Phase::Early => "Write down the one load item you will skip today",
            Phase::Mid => "Take a 10-minute walk without your phone",
            Phase::Late => "Note one trigger you noticed this week and how you handled it",
        }
    };
    CoachTask::new(Difficulty::Easy, text)
}

fn medium_task(s: &Signals, first_load: Option<&str>) -> CoachTask {
    let text = match first_load {
        Some(item) if s.any_load => {
            format!("Replace '{item}' with a 20-minute study, gym or meditation block")
        }
        _ if s.high_load => "Block out 2 hours of low-stimulation time: no feeds, no music".to_string(),
        _ => match (s.phase, s.even_day) {
            (Phase::Early, _) => "Do 25 minutes of focused study before noon".to_string(),
            (Phase::Mid, true) => "Fit in a 30-minute workout today".to_string(),
            (Phase::Mid, false) => "Meditate for 15 minutes before your first screen".to_string(),
            (Phase::Late, _) => "Plan tomorrow's virtue blocks before bed".to_string(),
        },
    };
    CoachTask::new(Difficulty::Medium, text)
}

fn hard_task(s: &Signals, strictness: Strictness, first_load: Option<&str>) -> CoachTask {
    // Hard mode always asks for environment control on a clean, calm day.
    if strictness == Strictness::Hard && !s.any_load && !s.high_load {
        return CoachTask::new(
            Difficulty::Hard,
            "Environment control: delete or log out of one trigger app and clear trigger foods from reach",
        );
    }

    let text = match first_load {
        _ if s.high_load => {
            if strictness == Strictness::Light {
                "Take a half-day dopamine break: no social feeds or junk food until 6 pm".to_string()
            } else {
                "Full dopamine fast until evening: no social feeds, no junk food, no caffeine after 10 am"
                    .to_string()
            }
        }
        Some(item) if s.any_load => {
            if strictness == Strictness::Light {
                format!("Cut '{item}' in half today")
            } else {
                format!("Go 24 hours without '{item}'")
            }
        }
        _ => match (s.phase, strictness) {
            (_, Strictness::Light) => "Complete two of the three virtues today".to_string(),
            (Phase::Early, _) => "Complete all three virtues today".to_string(),
            (Phase::Mid, _) => "Stack two virtues back-to-back with no screens in between".to_string(),
            (Phase::Late, _) => "Extend your clean streak by another full day".to_string(),
        },
    };
    CoachTask::new(Difficulty::Hard, text)
}

/// Pick the Easy, Medium and Hard task for the active day.
pub fn coach_tasks(input: &CoachInput<'_>) -> [CoachTask; 3] {
    let signals = Signals::from_input(input);
    let first_load = input.record.active_load_items().next();
    [
        easy_task(&signals),
        medium_task(&signals, first_load),
        hard_task(&signals, input.strictness, first_load),
    ]
}

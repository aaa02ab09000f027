//! Dopamine Load Score and Natural Energy Index.
//!
//! Both scores are pure functions over check-in records. They are recomputed
//! on read and never persisted.
//!
//! ## DLS
//!
//! | Term | Contribution | Cap |
//! |------|--------------|-----|
//! | social minutes | `minutes / 10 * 3` | 30 |
//! | caffeine | `mg / 50 * 2.5` | 20 |
//! | junk food | `10` | |
//! | load items on | `6 * count` | 30 |
//! | virtues on | `-3 * count` | -12 |
//! | workout | `-10` | |
//! | sleep >= 7.5h | `-10` | |
//!
//! The sum is rounded and clamped to `[0, 100]`.
//!
//! ## NEI
//!
//! Over the trailing 7 records: `avg(energy) * 10`, `+5` for average sleep
//! of at least 7.5h, `-8` when 3 or more days had a load item on, `+6` when
//! 4 or more days had a virtue on. Rounded and clamped to `[0, 100]`; an empty
//! window scores 50.

use serde::{Deserialize, Serialize};

use crate::checkin::DailyCheckin;

/// Records considered by the NEI.
pub const NEI_WINDOW: usize = 7;
/// NEI when there is no history.
pub const NEI_DEFAULT: u8 = 50;
/// Sleep at or above this earns the sleep bonus in both scores.
pub const SLEEP_TARGET_HOURS: f64 = 7.5;

const SOCIAL_CAP: f64 = 30.0;
const CAFFEINE_CAP: f64 = 20.0;
const JUNK_FOOD_PENALTY: f64 = 10.0;
const LOAD_ITEM_WEIGHT: f64 = 6.0;
const LOAD_CAP: f64 = 30.0;
const VIRTUE_WEIGHT: f64 = 3.0;
const VIRTUE_CAP: f64 = 12.0;
const WORKOUT_CREDIT: f64 = 10.0;
const SLEEP_CREDIT: f64 = 10.0;

const NEI_SLEEP_BONUS: f64 = 5.0;
const NEI_LOAD_PENALTY: f64 = 8.0;
const NEI_LOAD_DAYS: usize = 3;
const NEI_VIRTUE_BONUS: f64 = 6.0;
const NEI_VIRTUE_DAYS: usize = 4;

/// Round and clamp a raw score into `0..=100`.
fn clamp_score(raw: f64) -> u8 {
    if !raw.is_finite() {
        return 0;
    }
    raw.round().clamp(0.0, 100.0) as u8
}

/// Negative or non-finite metric input counts as zero.
fn non_negative(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 {
        v
    } else {
        0.0
    }
}

/// One signed contribution to a score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreTerm {
    /// Term name
    pub name: String,
    /// Signed contribution before rounding
    pub contribution: f64,
}

impl ScoreTerm {
    pub fn new(name: impl Into<String>, contribution: f64) -> Self {
        Self {
            name: name.into(),
            contribution,
        }
    }
}

/// DLS with its per-term explanation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DlsBreakdown {
    pub terms: Vec<ScoreTerm>,
    /// Sum of contributions before rounding and clamping
    pub raw: f64,
    pub score: u8,
}

impl DlsBreakdown {
    /// Terms that raised the score, largest first.
    pub fn drivers(&self) -> Vec<&ScoreTerm> {
        let mut up: Vec<_> = self.terms.iter().filter(|t| t.contribution > 0.0).collect();
        up.sort_by(|a, b| b.contribution.total_cmp(&a.contribution));
        up
    }
}

/// Per-term DLS computation.
pub fn dls_breakdown(record: &DailyCheckin) -> DlsBreakdown {
    let social = (non_negative(record.social_minutes) / 10.0 * 3.0).min(SOCIAL_CAP);
    let caffeine = (non_negative(record.caffeine_mg) / 50.0 * 2.5).min(CAFFEINE_CAP);
    let junk = if record.junk_food { JUNK_FOOD_PENALTY } else { 0.0 };
    let load = (LOAD_ITEM_WEIGHT * record.active_load_count() as f64).min(LOAD_CAP);
    let virtue = (VIRTUE_WEIGHT * record.virtues.active_count() as f64).min(VIRTUE_CAP);
    let workout = if record.workout { WORKOUT_CREDIT } else { 0.0 };
    let sleep = if record.sleep_hours >= SLEEP_TARGET_HOURS {
        SLEEP_CREDIT
    } else {
        0.0
    };

    let terms = vec![
        ScoreTerm::new("social", social),
        ScoreTerm::new("caffeine", caffeine),
        ScoreTerm::new("junk_food", junk),
        ScoreTerm::new("load_items", load),
        ScoreTerm::new("virtues", -virtue),
        ScoreTerm::new("workout", -workout),
        ScoreTerm::new("sleep", -sleep),
    ];
    let raw: f64 = terms.iter().map(|t| t.contribution).sum();

    DlsBreakdown {
        terms,
        raw,
        score: clamp_score(raw),
    }
}

/// Dopamine Load Score for one day, `0..=100`.
pub fn compute_dls(record: &DailyCheckin) -> u8 {
    dls_breakdown(record).score
}

/// Natural Energy Index over the last [`NEI_WINDOW`] records of `history`.
///
/// `history` is expected in ascending date order.
pub fn compute_nei(history: &[DailyCheckin]) -> u8 {
    let start = history.len().saturating_sub(NEI_WINDOW);
    let window = &history[start..];
    if window.is_empty() {
        return NEI_DEFAULT;
    }

    let n = window.len() as f64;
    let avg_energy = window.iter().map(|r| non_negative(r.energy)).sum::<f64>() / n;
    let avg_sleep = window.iter().map(|r| non_negative(r.sleep_hours)).sum::<f64>() / n;
    let load_days = window.iter().filter(|r| r.any_load_active()).count();
    let virtue_days = window.iter().filter(|r| r.virtues.any()).count();

    let mut raw = avg_energy * 10.0;
    if avg_sleep >= SLEEP_TARGET_HOURS {
        raw += NEI_SLEEP_BONUS;
    }
    if load_days >= NEI_LOAD_DAYS {
        raw -= NEI_LOAD_PENALTY;
    }
    if virtue_days >= NEI_VIRTUE_DAYS {
        raw += NEI_VIRTUE_BONUS;
    }

    clamp_score(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkin::{parse_date, Virtue};
    use chrono::Duration;

    fn base() -> DailyCheckin {
        DailyCheckin::new(parse_date("2024-03-01").unwrap())
    }

    #[test]
    fn dls_reference_example() {
        let mut r = base();
        r.social_minutes = 100.0;
        r.caffeine_mg = 100.0;
        r.junk_food = true;
        r.sleep_hours = 6.0;
        assert_eq!(compute_dls(&r), 45);
    }

    #[test]
    fn dls_caps_each_term() {
        let mut r = base();
        r.social_minutes = 10_000.0;
        r.caffeine_mg = 10_000.0;
        r.junk_food = true;
        for i in 0..10 {
            r.load_items.insert(format!("item{i}"), true);
        }
        let b = dls_breakdown(&r);
        assert_eq!(b.terms[0].contribution, 30.0);
        assert_eq!(b.terms[1].contribution, 20.0);
        assert_eq!(b.terms[3].contribution, 30.0);
        assert_eq!(b.score, 90);
    }

    #[test]
    fn dls_credits_clamp_at_zero() {
        let mut r = base();
        for v in Virtue::ALL {
            r.virtues.set(v, true);
        }
        r.workout = true;
        r.sleep_hours = 8.0;
        let b = dls_breakdown(&r);
        assert_eq!(b.raw, -29.0);
        assert_eq!(b.score, 0);
    }

    #[test]
    fn dls_rounds_to_nearest() {
        let mut r = base();
        // 15 min social -> 4.5
        r.social_minutes = 15.0;
        assert_eq!(compute_dls(&r), 5);
        // 25 mg caffeine -> 1.25
        r.social_minutes = 0.0;
        r.caffeine_mg = 25.0;
        assert_eq!(compute_dls(&r), 1);
    }

    #[test]
    fn dls_treats_negative_input_as_zero() {
        let mut r = base();
        r.social_minutes = -500.0;
        r.caffeine_mg = -100.0;
        assert_eq!(compute_dls(&r), 0);
    }

    #[test]
    fn drivers_lists_positive_terms_largest_first() {
        let mut r = base();
        r.social_minutes = 50.0;
        r.junk_food = true;
        r.workout = true;
        let b = dls_breakdown(&r);
        let names: Vec<_> = b.drivers().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["social", "junk_food"]);
    }

    #[test]
    fn nei_empty_history_is_default() {
        assert_eq!(compute_nei(&[]), 50);
    }

    fn week(energy: f64, sleep: f64) -> Vec<DailyCheckin> {
        (0..7)
            .map(|i| {
                let mut r = base();
                r.date += Duration::days(i);
                r.energy = energy;
                r.sleep_hours = sleep;
                r
            })
            .collect()
    }

    #[test]
    fn nei_base_and_sleep_bonus() {
        assert_eq!(compute_nei(&week(6.0, 7.0)), 60);
        assert_eq!(compute_nei(&week(6.0, 7.5)), 65);
    }

    #[test]
    fn nei_load_penalty_and_virtue_bonus() {
        let mut days = week(5.0, 6.0);
        for r in days.iter_mut().take(3) {
            r.load_items.insert("Scrolling".into(), true);
        }
        assert_eq!(compute_nei(&days), 42);

        for r in days.iter_mut().take(4) {
            r.virtues.set(Virtue::Meditate, true);
        }
        assert_eq!(compute_nei(&days), 48);
    }

    #[test]
    fn nei_only_uses_trailing_seven() {
        let mut days = week(2.0, 6.0);
        let mut older = base();
        older.date -= Duration::days(1);
        older.energy = 10.0;
        days.insert(0, older);
        assert_eq!(compute_nei(&days), 20);
    }

    #[test]
    fn nei_clamps_to_hundred() {
        let mut days = week(10.0, 9.0);
        for r in &mut days {
            r.virtues.set(Virtue::Study, true);
        }
        assert_eq!(compute_nei(&days), 100);
    }
}

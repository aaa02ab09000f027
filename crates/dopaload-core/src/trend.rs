//! Score history for charts.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::history::History;
use crate::scoring::{compute_dls, compute_nei, NEI_WINDOW};
use crate::storage::MAX_CHART_WIDTH;

/// Both scores for one saved day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub dls: u8,
    /// NEI over the window ending at `date`
    pub nei: u8,
}

/// One point per record, oldest first.
pub fn score_series(history: &History) -> Vec<TrendPoint> {
    history
        .iter()
        .map(|r| TrendPoint {
            date: r.date,
            dls: compute_dls(r),
            nei: compute_nei(history.window_ending(r.date, NEI_WINDOW)),
        })
        .collect()
}

fn bar(value: u8, width: usize) -> String {
    let filled = (value as usize * width + 50) / 100;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Render the last `days` points as paired horizontal bars.
pub fn render_ascii_chart(points: &[TrendPoint], days: usize, width: usize) -> String {
    let width = width.clamp(1, MAX_CHART_WIDTH as usize);
    let start = points.len().saturating_sub(days);
    let shown = &points[start..];

    let mut output = String::from("\nDLS / NEI trend:\n");
    output.push_str(&"─".repeat(width * 2 + 24));
    output.push('\n');

    if shown.is_empty() {
        output.push_str("  no check-ins yet\n");
    }

    for p in shown {
        output.push_str(&format!(
            "{} DLS {} {:>3}  NEI {} {:>3}\n",
            p.date.format("%m-%d"),
            bar(p.dls, width),
            p.dls,
            bar(p.nei, width),
            p.nei
        ));
    }

    output.push_str(&"─".repeat(width * 2 + 24));
    output.push_str("\nDLS: lower is better  NEI: higher is better\n");
    output
}

use clap::Args;
use dopaload_core::{render_ascii_chart, score_series};

use super::{open_tracker, wants_json};

#[derive(Args)]
pub struct TrendArgs {
    /// Number of most recent days to show
    #[arg(long, default_value_t = 14)]
    days: usize,
    /// Print JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: TrendArgs) -> Result<(), Box<dyn std::error::Error>> {
    let (tracker, config) = open_tracker()?;
    let points = score_series(tracker.history());

    if wants_json(args.json, &config) {
        let start = points.len().saturating_sub(args.days);
        println!("{}", serde_json::to_string_pretty(&points[start..])?);
        return Ok(());
    }

    print!(
        "{}",
        render_ascii_chart(&points, args.days, config.display.chart_width as usize)
    );

    let progress = tracker.progress();
    println!(
        "\nPlan: day {}/{} ({}%)  Clean streak: {} day(s)  Current NEI: {}",
        progress.day,
        progress.plan_length,
        progress.percent,
        progress.clean_streak,
        tracker.current_nei()
    );
    Ok(())
}

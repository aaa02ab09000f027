//! Score command: DLS with its breakdown, plus the rolling NEI.

use clap::Args;

use super::{open_tracker, resolve_date, wants_json};

#[derive(Args)]
pub struct ScoreArgs {
    /// Date (YYYY-MM-DD), defaults to today
    #[arg(long)]
    date: Option<String>,
    /// Print JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: ScoreArgs) -> Result<(), Box<dyn std::error::Error>> {
    let (tracker, config) = open_tracker()?;
    let date = resolve_date(args.date.as_deref())?;
    let report = tracker.day_report(date)?;

    if wants_json(args.json, &config) {
        let out = serde_json::json!({
            "date": date,
            "dls": report.dls,
            "nei": report.nei,
            "breakdown": report.breakdown,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("Scores for {date}");
    println!("{}", "=".repeat(30));
    println!("Dopamine Load Score: {}", report.dls);
    for term in &report.breakdown.terms {
        if term.contribution != 0.0 {
            println!("  {:<12} {:+.1}", term.name, term.contribution);
        }
    }
    println!("Natural Energy Index: {}", report.nei);

    if let Some(top) = report.breakdown.drivers().first() {
        println!("\nBiggest load driver: {}", top.name);
    }
    Ok(())
}

use clap::Args;
use dopaload_core::DailyCheckin;

use super::{open_tracker, resolve_date, wants_json};

#[derive(Args)]
pub struct CoachArgs {
    /// Date (YYYY-MM-DD), defaults to today
    #[arg(long)]
    date: Option<String>,
    /// Print JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: CoachArgs) -> Result<(), Box<dyn std::error::Error>> {
    let (tracker, config) = open_tracker()?;
    let date = resolve_date(args.date.as_deref())?;

    // A day without a check-in still gets suggestions, from a blank record.
    let record = tracker
        .history()
        .get(date)
        .cloned()
        .unwrap_or_else(|| DailyCheckin::new(date));
    let report = tracker.report_for(&record);

    if wants_json(args.json, &config) {
        println!("{}", serde_json::to_string_pretty(&report.coach)?);
        return Ok(());
    }

    println!(
        "\nCoach for {date} (day {}, {:?}, {} mode)\n",
        report.day_index,
        report.progress.phase,
        tracker.state().strictness
    );
    for task in &report.coach {
        println!("  [{:<6}] {}", task.difficulty.to_string(), task.text);
    }
    if tracker.history().get(date).is_none() {
        println!("\n  Tip: log today's check-in for sharper suggestions.");
    }
    Ok(())
}

use clap::{Args, Subcommand};
use dopaload_core::{CheckinDraft, DailyCheckin, MacroToggles, SaveOutcome, Virtue};

use super::{open_tracker, resolve_date, wants_json};

#[derive(Subcommand)]
pub enum CheckinAction {
    /// Create or update the check-in for a day
    Log(LogArgs),
    /// Show one day's check-in
    Show {
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,
        /// Print JSON
        #[arg(long)]
        json: bool,
    },
    /// List all check-ins with their scores
    List {
        /// Print JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete a day's check-in
    Remove {
        /// Date (YYYY-MM-DD)
        date: String,
    },
}

/// Numeric values are taken as typed; anything unparsable counts as 0.
#[derive(Args)]
pub struct LogArgs {
    /// Date (YYYY-MM-DD), defaults to today
    #[arg(long)]
    date: Option<String>,
    #[arg(long)]
    sleep_hours: Option<String>,
    /// Sleep quality, 1-10
    #[arg(long)]
    sleep_quality: Option<String>,
    #[arg(long)]
    caffeine_mg: Option<String>,
    #[arg(long)]
    social_minutes: Option<String>,
    /// Mood, 1-10
    #[arg(long)]
    mood: Option<String>,
    /// Energy, 1-10
    #[arg(long)]
    energy: Option<String>,
    #[arg(long)]
    protein_g: Option<String>,
    #[arg(long)]
    carbs_g: Option<String>,
    #[arg(long)]
    fat_g: Option<String>,
    #[arg(long)]
    fiber_g: Option<String>,
    /// yes/no
    #[arg(long)]
    workout: Option<String>,
    /// yes/no
    #[arg(long)]
    junk_food: Option<String>,
    #[arg(long)]
    notes: Option<String>,
    /// Mark a virtue done (study, gym, meditate); repeatable
    #[arg(long = "virtue")]
    virtues: Vec<String>,
    /// Clear a virtue; repeatable
    #[arg(long = "no-virtue")]
    cleared_virtues: Vec<String>,
    /// Switch a load item on, adding it if new; repeatable
    #[arg(long = "load")]
    load_on: Vec<String>,
    /// Switch a load item off; repeatable
    #[arg(long = "no-load")]
    load_off: Vec<String>,
    /// Stop tracking a load item on this day; repeatable
    #[arg(long = "drop-load")]
    load_drop: Vec<String>,
    /// Print the resulting report as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(action: CheckinAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        CheckinAction::Log(args) => log(args),
        CheckinAction::Show { date, json } => show(date, json),
        CheckinAction::List { json } => list(json),
        CheckinAction::Remove { date } => {
            let (mut tracker, _) = open_tracker()?;
            let date = resolve_date(Some(date.as_str()))?;
            tracker.remove(date)?;
            println!("removed {date}");
            Ok(())
        }
    }
}

fn apply(draft: &mut CheckinDraft, args: &LogArgs) -> Result<(), Box<dyn std::error::Error>> {
    let fields: [(&str, &Option<String>); 13] = [
        ("sleep_hours", &args.sleep_hours),
        ("sleep_quality", &args.sleep_quality),
        ("caffeine_mg", &args.caffeine_mg),
        ("social_minutes", &args.social_minutes),
        ("mood", &args.mood),
        ("energy", &args.energy),
        ("protein_g", &args.protein_g),
        ("carbs_g", &args.carbs_g),
        ("fat_g", &args.fat_g),
        ("fiber_g", &args.fiber_g),
        ("workout", &args.workout),
        ("junk_food", &args.junk_food),
        ("notes", &args.notes),
    ];
    for (field, value) in fields {
        if let Some(raw) = value {
            draft.set_field(field, raw)?;
        }
    }

    for name in &args.virtues {
        let virtue: Virtue = name.parse()?;
        draft.set_field(virtue.as_str(), "true")?;
    }
    for name in &args.cleared_virtues {
        let virtue: Virtue = name.parse()?;
        draft.set_field(virtue.as_str(), "false")?;
    }
    for name in &args.load_on {
        draft.set_load_item(name, true)?;
    }
    for name in &args.load_off {
        draft.set_load_item(name, false)?;
    }
    for name in &args.load_drop {
        draft.remove_load_item(name);
    }
    Ok(())
}

fn log(args: LogArgs) -> Result<(), Box<dyn std::error::Error>> {
    let (mut tracker, config) = open_tracker()?;
    let date = resolve_date(args.date.as_deref())?;

    let mut draft = tracker.begin_draft(date);
    apply(&mut draft, &args)?;

    let outcome = tracker.save_draft(draft)?;
    let report = tracker.day_report(date)?;

    if wants_json(args.json, &config) {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let verb = match outcome {
        SaveOutcome::Inserted => "saved",
        SaveOutcome::Replaced => "updated",
    };
    println!("Check-in {verb} for {date}");
    println!("  DLS: {}  NEI: {}", report.dls, report.nei);
    println!(
        "  Day {} of {} ({:?})",
        report.progress.day, report.progress.plan_length, report.progress.phase
    );
    Ok(())
}

fn show(date: Option<String>, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let (tracker, config) = open_tracker()?;
    let date = resolve_date(date.as_deref())?;
    let report = tracker.day_report(date)?;

    if wants_json(json, &config) {
        println!("{}", serde_json::to_string_pretty(&report.record)?);
        return Ok(());
    }

    print!("{}", format_record(&report.record, &tracker.state().macros));
    println!("  DLS: {}  NEI: {}", report.dls, report.nei);
    Ok(())
}

fn list(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let (tracker, config) = open_tracker()?;

    if wants_json(json, &config) {
        println!("{}", serde_json::to_string_pretty(tracker.history())?);
        return Ok(());
    }

    if tracker.history().is_empty() {
        println!("no check-ins yet");
        return Ok(());
    }

    for point in dopaload_core::score_series(tracker.history()) {
        println!("{}  DLS {:>3}  NEI {:>3}", point.date, point.dls, point.nei);
    }
    Ok(())
}

fn yes_no(b: bool) -> &'static str {
    if b {
        "yes"
    } else {
        "no"
    }
}

fn format_record(r: &DailyCheckin, macros: &MacroToggles) -> String {
    let mut out = format!("Check-in {}\n", r.date);
    out.push_str(&format!(
        "  Sleep: {}h (quality {})\n",
        r.sleep_hours, r.sleep_quality
    ));
    out.push_str(&format!("  Caffeine: {} mg\n", r.caffeine_mg));
    out.push_str(&format!("  Social: {} min\n", r.social_minutes));
    out.push_str(&format!("  Mood: {}  Energy: {}\n", r.mood, r.energy));

    let shown: Vec<String> = macros
        .enabled()
        .map(|m| format!("{} {}g", m.as_str(), r.grams(m)))
        .collect();
    if !shown.is_empty() {
        out.push_str(&format!("  Macros: {}\n", shown.join(", ")));
    }

    out.push_str(&format!(
        "  Workout: {}  Junk food: {}\n",
        yes_no(r.workout),
        yes_no(r.junk_food)
    ));

    let virtues: Vec<&str> = Virtue::ALL
        .iter()
        .filter(|v| r.virtues.get(**v))
        .map(|v| v.as_str())
        .collect();
    out.push_str(&format!(
        "  Virtues: {}\n",
        if virtues.is_empty() {
            "none".to_string()
        } else {
            virtues.join(", ")
        }
    ));

    if !r.load_items.is_empty() {
        out.push_str("  Load items:\n");
        for (name, on) in &r.load_items {
            out.push_str(&format!("    [{}] {name}\n", if *on { "x" } else { " " }));
        }
    }
    if !r.notes.is_empty() {
        out.push_str(&format!("  Notes: {}\n", r.notes));
    }
    out
}

pub mod checkin;
pub mod coach;
pub mod config;
pub mod score;
pub mod settings;
pub mod state;
pub mod trend;

use chrono::{Local, NaiveDate};
use dopaload_core::{parse_date, Config, StateStore, Tracker};

/// Open the tracker at the default location with configured load items.
pub fn open_tracker() -> Result<(Tracker, Config), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let tracker = Tracker::open(StateStore::open_default()?)?
        .with_default_load_items(config.tracker.default_load_items.clone());
    Ok((tracker, config))
}

/// `--date` value, or today in local time.
pub fn resolve_date(raw: Option<&str>) -> Result<NaiveDate, Box<dyn std::error::Error>> {
    match raw {
        Some(s) if s.eq_ignore_ascii_case("today") => Ok(Local::now().date_naive()),
        Some(s) => Ok(parse_date(s)?),
        None => Ok(Local::now().date_naive()),
    }
}

/// JSON when asked for on the command line or enabled in config.
pub fn wants_json(flag: bool, config: &Config) -> bool {
    flag || config.display.json_output
}

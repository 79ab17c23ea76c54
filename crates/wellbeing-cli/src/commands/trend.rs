//! Trend command: sleep quality and muscle soreness over recent days.

use chrono::Local;
use clap::Args;
use wellbeing_core::{build_trend, Config, Database, EntryStore, MAX_WINDOW_DAYS};

use super::{print_json, wants_json};

#[derive(Args)]
pub struct TrendArgs {
    /// Window length in days (default: trend.window_days from config)
    #[arg(long)]
    days: Option<u32>,
    /// Print the series as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: TrendArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let window_days = args.days.unwrap_or(config.trend.window_days);
    if !(1..=MAX_WINDOW_DAYS).contains(&window_days) {
        return Err(format!("--days must be between 1 and {MAX_WINDOW_DAYS}").into());
    }

    let db = Database::open()?;
    let entries = db.list_all()?;
    let trend = build_trend(&entries, Local::now().date_naive(), window_days);

    if wants_json(args.json) {
        print_json(&trend)?;
        return Ok(());
    }

    print!("{}", trend.render_text());
    if let Some(avg) = trend.average_readiness() {
        println!("Durchschnittliche Readiness: {avg}");
    }
    Ok(())
}

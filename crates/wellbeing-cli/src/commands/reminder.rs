//! Daily reminder preference.
//!
//! Only the preference is stored. Delivering the notification is up to the
//! host platform.

use clap::Subcommand;
use wellbeing_core::calendar::parse_clock_time;
use wellbeing_core::Config;

#[derive(Subcommand)]
pub enum ReminderAction {
    /// Show the current reminder setting
    Show,
    /// Turn the daily reminder on
    Enable,
    /// Turn the daily reminder off
    Disable,
    /// Set the reminder time of day
    Time {
        /// Local time, HH:MM
        time: String,
    },
}

pub fn run(action: ReminderAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = Config::load()?;

    match action {
        ReminderAction::Show => {}
        ReminderAction::Enable => {
            config.reminder.enabled = true;
            config.save()?;
        }
        ReminderAction::Disable => {
            config.reminder.enabled = false;
            config.save()?;
        }
        ReminderAction::Time { time } => {
            let parsed = parse_clock_time(&time)?;
            config.reminder.time = parsed.format("%H:%M").to_string();
            config.save()?;
        }
    }

    let state = if config.reminder.enabled { "on" } else { "off" };
    println!("Daily reminder: {state} at {}", config.reminder.time);
    Ok(())
}

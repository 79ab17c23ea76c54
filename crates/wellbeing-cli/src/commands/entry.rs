//! Entry commands: add, edit, delete, show, list.

use chrono::Local;
use clap::Subcommand;
use wellbeing_core::calendar::{friendly_format, parse_date_input};
use wellbeing_core::{
    compute_readiness, Config, CoreError, Database, Entry, EntryChanges, EntryDraft,
    EntrySummary, Journal, Metric,
};

use super::{print_json, wants_json};

#[derive(Subcommand)]
pub enum EntryAction {
    /// Record a new check-in
    Add {
        /// Day of the check-in (YYYY-MM-DD or YYYY-MM-DDTHH:MM, default: now)
        #[arg(long)]
        date: Option<String>,
        /// Sleep quality 1-10
        #[arg(long, default_value_t = 7, allow_negative_numbers = true)]
        sleep: i64,
        /// Muscle soreness 1-10 (higher is worse)
        #[arg(long, default_value_t = 2, allow_negative_numbers = true)]
        soreness: i64,
        /// Mood 1-10
        #[arg(long, default_value_t = 7, allow_negative_numbers = true)]
        mood: i64,
        /// Training load 1-10
        #[arg(long, default_value_t = 5, allow_negative_numbers = true)]
        load: i64,
        /// Free-text notes
        #[arg(long)]
        notes: Option<String>,
        /// Print the created entry as JSON
        #[arg(long)]
        json: bool,
    },
    /// Change fields of an existing entry
    Edit {
        /// Entry ID
        id: String,
        /// New day (YYYY-MM-DD or YYYY-MM-DDTHH:MM)
        #[arg(long)]
        date: Option<String>,
        #[arg(long, allow_negative_numbers = true)]
        sleep: Option<i64>,
        #[arg(long, allow_negative_numbers = true)]
        soreness: Option<i64>,
        #[arg(long, allow_negative_numbers = true)]
        mood: Option<i64>,
        #[arg(long, allow_negative_numbers = true)]
        load: Option<i64>,
        #[arg(long)]
        notes: Option<String>,
        /// Print the updated entry as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete an entry
    Delete {
        /// Entry ID
        id: String,
    },
    /// Show one entry with metric descriptions
    Show {
        /// Entry ID
        id: String,
        #[arg(long)]
        json: bool,
    },
    /// List entries, newest first
    List {
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: EntryAction) -> Result<(), Box<dyn std::error::Error>> {
    let journal = Journal::new(Database::open()?);

    match action {
        EntryAction::Add {
            date,
            sleep,
            soreness,
            mood,
            load,
            notes,
            json,
        } => {
            let date = match date {
                Some(d) => parse_date_input(&d)?,
                None => Local::now().naive_local(),
            };
            let entry = journal.create(EntryDraft {
                date,
                sleep_quality: sleep,
                muscle_soreness: soreness,
                mood,
                training_load: load,
                notes: notes.unwrap_or_default(),
            })?;
            if wants_json(json) {
                print_json(&EntrySummary::from(entry))?;
            } else {
                println!("Entry created: {}", entry.id);
                print_entry(&entry);
            }
        }
        EntryAction::Edit {
            id,
            date,
            sleep,
            soreness,
            mood,
            load,
            notes,
            json,
        } => {
            let changes = EntryChanges {
                date: date.as_deref().map(parse_date_input).transpose()?,
                sleep_quality: sleep,
                muscle_soreness: soreness,
                mood,
                training_load: load,
                notes,
            };
            if changes.is_empty() {
                return Err("nothing to change; pass at least one field".into());
            }
            let entry = journal.edit(&id, &changes).map_err(|e| match e {
                CoreError::DuplicateDate { .. } => {
                    format!("{e}; the entry keeps its previous date").into()
                }
                other => Box::<dyn std::error::Error>::from(other),
            })?;
            if wants_json(json) {
                print_json(&EntrySummary::from(entry))?;
            } else {
                println!("Entry updated: {}", entry.id);
                print_entry(&entry);
            }
        }
        EntryAction::Delete { id } => {
            journal.delete(&id)?;
            println!("Entry deleted: {id}");
        }
        EntryAction::Show { id, json } => {
            let entry = journal.get(&id)?;
            if wants_json(json) {
                print_json(&EntrySummary::from(entry))?;
            } else {
                print_entry(&entry);
            }
        }
        EntryAction::List { json } => {
            let summaries = journal.list()?;
            if wants_json(json) {
                print_json(&summaries)?;
            } else if summaries.is_empty() {
                println!("Keine Einträge. Starte dein Tracking mit `wellbeing entry add`.");
            } else {
                let show_notes = Config::load_or_default().display.show_notes;
                let today = Local::now().date_naive();
                for s in &summaries {
                    let mut line = format!(
                        "{:>3}  {:<15} {:<8} {}",
                        s.readiness.score,
                        s.readiness.label,
                        friendly_format(s.entry.date, today),
                        s.entry.id,
                    );
                    if show_notes {
                        if let Some(preview) = s.entry.notes_preview() {
                            line.push_str("  ");
                            line.push_str(preview);
                        }
                    }
                    println!("{line}");
                }
            }
        }
    }
    Ok(())
}

fn print_entry(entry: &Entry) {
    let readiness = compute_readiness(entry);
    println!("  Datum:       {}", entry.date.format("%Y-%m-%d %H:%M"));
    println!(
        "  Readiness:   {} ({}, {})",
        readiness.score, readiness.label, readiness.tier
    );
    for (metric, rating) in [
        (Metric::SleepQuality, entry.sleep_quality),
        (Metric::MuscleSoreness, entry.muscle_soreness),
        (Metric::Mood, entry.mood),
        (Metric::TrainingLoad, entry.training_load),
    ] {
        println!(
            "  {:<12} {:>5}  {}",
            format!("{}:", metric.title()),
            rating.to_string(),
            metric.describe(rating)
        );
    }
    if !entry.notes.is_empty() {
        println!("  Notizen:     {}", entry.notes);
    }
}

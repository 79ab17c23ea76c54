use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "wellbeing", version, about = "Daily wellbeing journal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Journal entries
    Entry {
        #[command(subcommand)]
        action: commands::entry::EntryAction,
    },
    /// Sleep and soreness trend
    Trend(commands::trend::TrendArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Daily check-in reminder preference
    Reminder {
        #[command(subcommand)]
        action: commands::reminder::ReminderAction,
    },
}

/// Logs go to stderr so stdout stays parseable. Level comes from `WELLBEING_LOG`.
fn init_tracing() {
    let filter =
        EnvFilter::try_from_env("WELLBEING_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Entry { action } => commands::entry::run(action),
        Commands::Trend(args) => commands::trend::run(args),
        Commands::Config { action } => commands::config::run(action),
        Commands::Reminder { action } => commands::reminder::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

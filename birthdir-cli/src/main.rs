mod commands;
mod render;

use anyhow::{Context, Result};
use birthdir_core::config::Settings;
use birthdir_core::date::today_local;
use birthdir_core::store::FileStore;
use clap::{Parser, Subcommand};
use log::debug;

#[derive(Parser)]
#[command(name = "birthdir")]
#[command(about = "Keep track of birthdays and see what's coming up")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show upcoming birthdays and holidays
    List {
        /// Show notes and contact details
        #[arg(short, long)]
        verbose: bool,
    },
    /// Add a birthday
    Add {
        #[arg(short, long)]
        name: String,

        /// Birth date: YYYY-MM-DD, or *-MM-DD when the year is unknown
        #[arg(short, long)]
        date: String,

        #[arg(long)]
        age: Option<u32>,

        #[arg(long)]
        note: Option<String>,

        /// Phone number or email
        #[arg(long)]
        contact: Option<String>,

        /// Avatar URL or other reference
        #[arg(long)]
        avatar: Option<String>,
    },
    /// Change fields of a birthday (pass "" to clear note, contact or avatar)
    Edit {
        /// Reminder id (or its first characters)
        id: String,

        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long)]
        date: Option<String>,

        #[arg(long)]
        age: Option<u32>,

        #[arg(long)]
        note: Option<String>,

        #[arg(long)]
        contact: Option<String>,

        #[arg(long)]
        avatar: Option<String>,
    },
    /// Delete a birthday
    Remove {
        /// Reminder id (or its first characters)
        id: String,

        /// Don't ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Show upcoming public holidays
    Holidays {
        /// Country code (defaults to the configured country)
        #[arg(short, long)]
        country: Option<String>,

        /// Year to fetch (defaults to the current year)
        #[arg(long)]
        year: Option<i32>,

        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Show birthdays inside the advance notice window
    Alerts {
        /// Window in days (defaults to the configured advance notice)
        #[arg(long)]
        days: Option<u32>,
    },
    /// Write a commented default config file
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load()?;

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(settings.log_level.as_str()),
    )
    .init();

    let today = today_local();

    match cli.command {
        Commands::List { verbose } => {
            let store = open_store(&settings)?;
            commands::list::run(&store, &settings, today, verbose).await
        }
        Commands::Add {
            name,
            date,
            age,
            note,
            contact,
            avatar,
        } => {
            let mut store = open_store(&settings)?;
            commands::add::run(&mut store, name, date, age, note, contact, avatar, today)
        }
        Commands::Edit {
            id,
            name,
            date,
            age,
            note,
            contact,
            avatar,
        } => {
            let mut store = open_store(&settings)?;
            let patch = commands::edit::Patch {
                name,
                date,
                age,
                note,
                contact,
                avatar,
            };
            commands::edit::run(&mut store, &id, patch, today)
        }
        Commands::Remove { id, yes } => {
            let mut store = open_store(&settings)?;
            commands::remove::run(&mut store, &id, yes)
        }
        Commands::Holidays {
            country,
            year,
            limit,
        } => commands::holidays::run(&settings, country, year, limit, today).await,
        Commands::Alerts { days } => {
            let store = open_store(&settings)?;
            commands::alerts::run(&store, days.unwrap_or(settings.advance_notice_days), today)
        }
        Commands::Config => commands::config::run(),
    }
}

fn open_store(settings: &Settings) -> Result<FileStore> {
    let path = settings.reminders_path()?;
    debug!("Using reminders file {}", path.display());
    FileStore::open(&path).with_context(|| format!("Failed to open {}", path.display()))
}

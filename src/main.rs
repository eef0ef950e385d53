use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;

use podrate_lib::commands::{self, Theme};
use podrate_lib::config::AppConfig;
use podrate_lib::library::LibrarySortKey;
use podrate_lib::{init_logging, AppState};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Directory holding config.yaml and .env
    #[arg(long, env = "PODRATE_HOME", default_value = ".")]
    project_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search the podcast catalog
    Search { term: String },
    /// Show a profile with its rating charts
    Profile { username: String },
    /// List a user's library
    Library {
        username: String,
        /// recent, title, rating or category:<name>
        #[arg(long, default_value = "recent")]
        sort: LibrarySortKey,
    },
    /// Show a podcast with its reviews and average
    Podcast { itunes_id: String },
    /// Search a podcast's recent episodes
    Episodes {
        itunes_id: String,
        #[arg(long)]
        query: Option<String>,
    },
    /// Add a catalog podcast to a user's library
    Add { username: String, itunes_id: String },
    /// Rate a podcast in a user's library
    Rate {
        username: String,
        itunes_id: String,
        rating: f64,
    },
    /// Show or change the theme
    Theme { action: Option<ThemeAction> },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ThemeAction {
    Toggle,
    Dark,
    Light,
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load(&cli.project_dir)?;
    init_logging(&config.log_level);
    match &config.loaded_from {
        Some(path) => log::info!("Loaded config from {}", path.display()),
        None => log::info!("No config.yaml in {}, using defaults", cli.project_dir.display()),
    }
    let app = AppState::new(config)?;
    let db = app.db.as_ref();

    match cli.command {
        Command::Search { term } => {
            print_json(&commands::search_catalog(&app.itunes, &term).await?)?;
        }
        Command::Profile { username } => {
            print_json(&commands::get_profile_page(db, &username)?)?;
        }
        Command::Library { username, sort } => {
            print_json(&commands::get_library_page(db, &username, &sort)?)?;
        }
        Command::Podcast { itunes_id } => {
            print_json(&commands::get_podcast_page(db, &itunes_id)?)?;
        }
        Command::Episodes { itunes_id, query } => {
            let episodes =
                commands::search_episodes(&app.itunes, &itunes_id, query.as_deref()).await?;
            print_json(&episodes)?;
        }
        Command::Add {
            username,
            itunes_id,
        } => {
            let profile = commands::get_or_create_profile(db, &username)?;
            let added =
                commands::add_podcast_by_id(db, &app.itunes, &profile.id, &itunes_id).await?;
            print_json(&added)?;
        }
        Command::Rate {
            username,
            itunes_id,
            rating,
        } => {
            let entry_id = commands::find_entry(db, &username, &itunes_id)?;
            print_json(&commands::rate_podcast(db, &entry_id, Some(rating))?)?;
        }
        Command::Theme { action } => {
            let theme = match action {
                None => commands::get_theme(db)?,
                Some(ThemeAction::Toggle) => commands::toggle_theme(db)?,
                Some(ThemeAction::Dark) => set(db, Theme::Dark)?,
                Some(ThemeAction::Light) => set(db, Theme::Light)?,
            };
            print_json(&theme)?;
        }
    }

    Ok(())
}

fn set(db: &podrate_lib::database::Database, theme: Theme) -> anyhow::Result<Theme> {
    commands::set_theme(db, theme)?;
    Ok(theme)
}

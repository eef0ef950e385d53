pub mod commands;
pub mod config;
pub mod database;
pub mod error;
pub mod itunes;
pub mod library;
pub mod ratings;

use config::AppConfig;
use database::Database;
use error::AppError;
use itunes::ItunesClient;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Everything a command needs: the open database and the catalog client.
pub struct AppState {
    pub config: AppConfig,
    pub db: Arc<Database>,
    pub itunes: ItunesClient,
}

impl AppState {
    /// Open (and migrate) the configured database.
    pub fn new(config: AppConfig) -> Result<Self, AppError> {
        if let Some(parent) = config.database_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let db = Database::new(&config.database_path)?;
        log::info!("Database ready at {}", config.database_path.display());

        let itunes = ItunesClient::new(&config);

        Ok(Self {
            config,
            db: Arc::new(db),
            itunes,
        })
    }
}

/// Install the stderr subscriber. `RUST_LOG` wins over `default_level`.
pub fn init_logging(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("podrate={0},podrate_lib={0}", default_level)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

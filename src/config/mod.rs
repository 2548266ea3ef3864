mod file_config;

pub use file_config::FileConfig;

use anyhow::{bail, Result};
use std::path::PathBuf;

pub const DEFAULT_DATABASE: &str = "sparkifydb.sqlite";
pub const DEFAULT_SONG_DATA: &str = "data/song_data";
pub const DEFAULT_LOG_DATA: &str = "data/log_data";

/// CLI arguments that can be used for config resolution.
/// Every field left unset falls back to the config file, then to the defaults.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub database: Option<String>,
    pub song_data: Option<PathBuf>,
    pub log_data: Option<PathBuf>,
    pub reset_tables: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// SQLite database path or `file:` URI.
    pub database: String,
    pub song_data: PathBuf,
    pub log_data: PathBuf,
    /// Drop and recreate the warehouse tables before loading.
    pub reset_tables: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database: DEFAULT_DATABASE.to_string(),
            song_data: PathBuf::from(DEFAULT_SONG_DATA),
            log_data: PathBuf::from(DEFAULT_LOG_DATA),
            reset_tables: false,
        }
    }
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();
        let defaults = AppConfig::default();

        let database = file
            .database
            .or_else(|| cli.database.clone())
            .unwrap_or(defaults.database);
        if database.trim().is_empty() {
            bail!("database must not be empty");
        }

        let song_data = file
            .song_data
            .map(PathBuf::from)
            .or_else(|| cli.song_data.clone())
            .unwrap_or(defaults.song_data);
        let log_data = file
            .log_data
            .map(PathBuf::from)
            .or_else(|| cli.log_data.clone())
            .unwrap_or(defaults.log_data);

        let reset_tables = file.reset_tables.unwrap_or(cli.reset_tables);

        Ok(Self {
            database,
            song_data,
            log_data,
            reset_tables,
        })
    }
}

use anyhow::{Context, Result};
use clap::Parser;
use songplay_loader::config::{self, AppConfig, CliConfig};
use songplay_loader::pipeline;
use std::path::PathBuf;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(version, about = "Load song metadata and activity logs into the songplay warehouse")]
struct CliArgs {
    /// Path to a TOML config file. Its values override the command line.
    #[clap(long)]
    pub config: Option<PathBuf>,

    /// SQLite database file or `file:` URI. Defaults to sparkifydb.sqlite.
    #[clap(long)]
    pub database: Option<String>,

    /// Root of the song metadata tree. Defaults to data/song_data.
    #[clap(long)]
    pub song_data: Option<PathBuf>,

    /// Root of the activity log tree. Defaults to data/log_data.
    #[clap(long)]
    pub log_data: Option<PathBuf>,

    /// Drop and recreate the warehouse tables before loading.
    #[clap(long)]
    pub reset_tables: bool,
}

impl From<&CliArgs> for CliConfig {
    fn from(args: &CliArgs) -> Self {
        CliConfig {
            database: args.database.clone(),
            song_data: args.song_data.clone(),
            log_data: args.log_data.clone(),
            reset_tables: args.reset_tables,
        }
    }
}

fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .context("Failed to initialize logging")?;

    let file_config = match &cli_args.config {
        Some(path) => {
            info!("Loading configuration from {:?}", path);
            Some(config::FileConfig::load(path)?)
        }
        None => None,
    };

    let cli_config: CliConfig = (&cli_args).into();
    let app_config = AppConfig::resolve(&cli_config, file_config)?;

    info!("Configuration loaded:");
    info!("  database: {}", app_config.database);
    info!("  song_data: {:?}", app_config.song_data);
    info!("  log_data: {:?}", app_config.log_data);

    let summary = pipeline::run(&app_config)?;
    info!(
        "Done: {} song files and {} log files loaded",
        summary.song_data.files, summary.log_data.files
    );
    Ok(())
}

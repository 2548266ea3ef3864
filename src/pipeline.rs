//! The load run: song metadata first, so that plays in the activity logs can
//! be resolved against it, then the activity logs.

use crate::config::AppConfig;
use crate::loader::{process_dataset, process_log_file, process_song_file, DatasetSummary, LoadError};
use crate::warehouse_store::{SqliteWarehouseStore, TableCounts, WarehouseStore};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunSummary {
    pub song_data: DatasetSummary,
    pub log_data: DatasetSummary,
    /// Row counts of every table once both datasets are committed.
    pub table_counts: TableCounts,
}

/// Open the warehouse, load both datasets and close the warehouse again.
///
/// The store is closed whether or not loading succeeded; a failed file has already
/// been rolled back by then.
pub fn run(config: &AppConfig) -> Result<RunSummary, LoadError> {
    info!("Opening warehouse {}", config.database);
    let store = SqliteWarehouseStore::open(&config.database, config.reset_tables)
        .map_err(LoadError::Connection)?;

    let result = load(&store, config);

    match (result, store.close()) {
        (Ok(summary), Ok(())) => Ok(summary),
        (Ok(_), Err(close_err)) => Err(LoadError::Connection(
            close_err.context("Failed to close warehouse after loading"),
        )),
        (Err(err), close_result) => {
            if let Err(close_err) = close_result {
                warn!("Failed to close warehouse after error: {:#}", close_err);
            }
            Err(err)
        }
    }
}

fn load(store: &dyn WarehouseStore, config: &AppConfig) -> Result<RunSummary, LoadError> {
    let song_data = process_dataset(store, &config.song_data, process_song_file)?;
    let log_data = process_dataset(store, &config.log_data, process_log_file)?;

    let table_counts = store.table_counts().map_err(|source| LoadError::Store {
        path: PathBuf::from(&config.database),
        source,
    })?;

    info!(
        "Warehouse now holds {} songs, {} artists, {} time records, {} users, {} songplays",
        table_counts.songs,
        table_counts.artists,
        table_counts.time,
        table_counts.users,
        table_counts.songplays
    );
    if log_data.totals.unmatched_songplays > 0 {
        info!(
            "{} of {} songplays loaded in this run had no matching song",
            log_data.totals.unmatched_songplays, log_data.totals.songplays
        );
    }

    Ok(RunSummary {
        song_data,
        log_data,
        table_counts,
    })
}

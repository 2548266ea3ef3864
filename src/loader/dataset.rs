use super::error::LoadError;
use super::walk::{absolute_root, walk};
use crate::warehouse_store::WarehouseStore;
use std::ops::AddAssign;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// Records written while shaping a single file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FileStats {
    pub songs: usize,
    pub artists: usize,
    pub time_records: usize,
    pub users: usize,
    pub songplays: usize,
    /// Songplays written without a song/artist match.
    pub unmatched_songplays: usize,
}

impl AddAssign for FileStats {
    fn add_assign(&mut self, other: FileStats) {
        self.songs += other.songs;
        self.artists += other.artists;
        self.time_records += other.time_records;
        self.users += other.users;
        self.songplays += other.songplays;
        self.unmatched_songplays += other.unmatched_songplays;
    }
}

/// Totals for one dataset root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DatasetSummary {
    pub root: PathBuf,
    pub files: usize,
    pub totals: FileStats,
}

/// Shape and commit every data file under `root`, one unit of work per file.
///
/// The first failing file is rolled back and its error returned; files committed
/// before it stay committed and the files after it are not touched.
pub fn process_dataset<F>(
    store: &dyn WarehouseStore,
    root: &Path,
    shape: F,
) -> Result<DatasetSummary, LoadError>
where
    F: Fn(&dyn WarehouseStore, &Path) -> Result<FileStats, LoadError>,
{
    let root = absolute_root(root)?;
    let files = walk(&root)?;
    let total = files.len();
    info!("{} files found in {}", total, root.display());

    let mut totals = FileStats::default();
    for (i, file) in files.iter().enumerate() {
        match load_file(store, file, &shape) {
            Ok(stats) => totals += stats,
            Err(err) => {
                if let Err(rollback_err) = store.rollback() {
                    error!(
                        "Rollback after failure in {} also failed: {:#}",
                        file.display(),
                        rollback_err
                    );
                }
                return Err(err);
            }
        }
        info!("{}/{} files processed.", i + 1, total);
    }

    Ok(DatasetSummary {
        root,
        files: total,
        totals,
    })
}

fn load_file<F>(store: &dyn WarehouseStore, file: &Path, shape: &F) -> Result<FileStats, LoadError>
where
    F: Fn(&dyn WarehouseStore, &Path) -> Result<FileStats, LoadError>,
{
    let stats = shape(store, file)?;
    store.commit().map_err(|source| LoadError::Store {
        path: file.to_path_buf(),
        source,
    })?;
    Ok(stats)
}

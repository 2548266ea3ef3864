use super::error::LoadError;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const DATA_FILE_EXTENSION: &str = "json";

/// Resolve `root` against the current directory when it is relative.
pub fn absolute_root(root: &Path) -> Result<PathBuf, LoadError> {
    if root.is_absolute() {
        return Ok(root.to_path_buf());
    }
    let cwd = std::env::current_dir().map_err(|source| LoadError::Filesystem {
        path: root.to_path_buf(),
        source,
    })?;
    Ok(cwd.join(root))
}

/// Recursively list every `.json` file under `root` as an absolute path.
///
/// Entries are visited depth-first with siblings sorted by file name, so the
/// order is stable across runs over the same tree. Symbolic links are followed
/// and reported under their link path.
pub fn walk(root: &Path) -> Result<Vec<PathBuf>, LoadError> {
    let root = absolute_root(root)?;
    let mut files = Vec::new();

    for entry in WalkDir::new(&root).follow_links(true).sort_by_file_name() {
        let entry = entry.map_err(|err| LoadError::Filesystem {
            path: err
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| root.clone()),
            source: err.into(),
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let is_data_file = entry
            .path()
            .extension()
            .is_some_and(|ext| ext == DATA_FILE_EXTENSION);
        if is_data_file {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

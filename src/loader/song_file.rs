use super::dataset::FileStats;
use super::error::{FieldError, LoadError};
use super::fields::{optional_f64, optional_str, required_f64, required_i32, required_str, JsonObject};
use super::ndjson::read_json_lines;
use crate::warehouse_store::{ArtistRecord, SongRecord, WarehouseStore};
use std::path::Path;
use tracing::debug;

/// Split one song-metadata object into its song and artist records.
pub fn song_and_artist(object: &JsonObject) -> Result<(SongRecord, ArtistRecord), FieldError> {
    let artist_id = required_str(object, "artist_id")?;
    let song = SongRecord {
        song_id: required_str(object, "song_id")?,
        title: required_str(object, "title")?,
        artist_id: artist_id.clone(),
        year: required_i32(object, "year")?,
        duration: required_f64(object, "duration")?,
    };
    let artist = ArtistRecord {
        artist_id,
        name: required_str(object, "artist_name")?,
        location: optional_str(object, "artist_location")?,
        longitude: optional_f64(object, "artist_longitude")?,
        latitude: optional_f64(object, "artist_latitude")?,
    };
    Ok((song, artist))
}

/// Load one song-metadata file: a song and an artist row per JSON line.
pub fn process_song_file(store: &dyn WarehouseStore, path: &Path) -> Result<FileStats, LoadError> {
    let mut stats = FileStats::default();

    for json_line in read_json_lines(path)? {
        let (song, artist) =
            song_and_artist(&json_line.object).map_err(|e| LoadError::Parse {
                path: path.to_path_buf(),
                line: json_line.line,
                reason: e.to_string(),
            })?;

        let store_error = |source| LoadError::Store {
            path: path.to_path_buf(),
            source,
        };
        store.insert_song(&song).map_err(store_error)?;
        store.insert_artist(&artist).map_err(store_error)?;
        stats.songs += 1;
        stats.artists += 1;
    }

    debug!("{}: {} songs", path.display(), stats.songs);
    Ok(stats)
}

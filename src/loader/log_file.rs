use super::dataset::FileStats;
use super::error::{FieldError, LoadError};
use super::fields::{optional_str, required_f64, required_i64, required_str, JsonObject};
use super::ndjson::read_json_lines;
use crate::warehouse_store::{SongplayFact, TimeRecord, UserRecord, WarehouseStore};
use std::path::Path;
use tracing::debug;

const NEXT_SONG_PAGE: &str = "NextSong";

/// A song-play event from the activity log.
#[derive(Clone, Debug, PartialEq)]
pub struct PlayEvent {
    /// 0-based position among all events of the file, plays or not.
    pub sequence_index: usize,
    pub ts: i64,
    pub user_id: i64,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<String>,
    pub level: String,
    pub song: String,
    pub artist: String,
    pub length: f64,
    pub session_id: i64,
    pub location: Option<String>,
    pub user_agent: Option<String>,
}

impl PlayEvent {
    pub fn time_record(&self) -> Result<TimeRecord, FieldError> {
        TimeRecord::from_epoch_millis(self.ts).ok_or_else(|| {
            FieldError::new("ts", format!("{} is outside the supported time range", self.ts))
        })
    }

    pub fn user_record(&self) -> UserRecord {
        UserRecord {
            user_id: self.user_id,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            gender: self.gender.clone(),
            level: self.level.clone(),
        }
    }
}

/// Parse a log object. Returns `None` for events that are not song plays; those
/// are only checked for a `page` field, since their other fields are often null.
pub fn play_event(object: &JsonObject, sequence_index: usize) -> Result<Option<PlayEvent>, FieldError> {
    if required_str(object, "page")? != NEXT_SONG_PAGE {
        return Ok(None);
    }

    Ok(Some(PlayEvent {
        sequence_index,
        ts: required_i64(object, "ts")?,
        user_id: required_i64(object, "userId")?,
        first_name: optional_str(object, "firstName")?,
        last_name: optional_str(object, "lastName")?,
        gender: optional_str(object, "gender")?,
        level: required_str(object, "level")?,
        song: required_str(object, "song")?,
        artist: required_str(object, "artist")?,
        length: required_f64(object, "length")?,
        session_id: required_i64(object, "sessionId")?,
        location: optional_str(object, "location")?,
        user_agent: optional_str(object, "userAgent")?,
    }))
}

/// Load one activity-log file.
///
/// Only song plays produce rows: first a time record for each play, then a user
/// record for each play, then the songplay facts, each resolved against the
/// songs already in the store.
pub fn process_log_file(store: &dyn WarehouseStore, path: &Path) -> Result<FileStats, LoadError> {
    let parse_error = |line, e: FieldError| LoadError::Parse {
        path: path.to_path_buf(),
        line,
        reason: e.to_string(),
    };
    let store_error = |source| LoadError::Store {
        path: path.to_path_buf(),
        source,
    };

    let mut plays = Vec::new();
    for (sequence_index, json_line) in read_json_lines(path)?.into_iter().enumerate() {
        if let Some(event) =
            play_event(&json_line.object, sequence_index).map_err(|e| parse_error(json_line.line, e))?
        {
            let time = event.time_record().map_err(|e| parse_error(json_line.line, e))?;
            plays.push((event, time));
        }
    }

    let mut stats = FileStats::default();

    for (_, time) in &plays {
        store.insert_time_record(time).map_err(store_error)?;
        stats.time_records += 1;
    }

    for (event, _) in &plays {
        store.insert_user(&event.user_record()).map_err(store_error)?;
        stats.users += 1;
    }

    let source_file = path.display().to_string();
    for (event, time) in &plays {
        let song_match = store
            .find_song_match(&event.song, &event.artist, event.length)
            .map_err(store_error)?;
        if song_match.is_none() {
            stats.unmatched_songplays += 1;
        }
        let (song_id, artist_id) = match song_match {
            Some(m) => (Some(m.song_id), Some(m.artist_id)),
            None => (None, None),
        };

        let songplay = SongplayFact {
            sequence_index: event.sequence_index,
            source_file: source_file.clone(),
            start_time: time.start_time,
            user_id: event.user_id,
            level: event.level.clone(),
            song_id,
            artist_id,
            session_id: event.session_id,
            location: event.location.clone(),
            user_agent: event.user_agent.clone(),
        };
        store.insert_songplay(&songplay).map_err(store_error)?;
        stats.songplays += 1;
    }

    debug!(
        "{}: {} plays, {} without a matching song",
        path.display(),
        stats.songplays,
        stats.unmatched_songplays
    );
    Ok(stats)
}

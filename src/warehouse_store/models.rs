//! Records written to the warehouse tables.
//!
//! Songs, artists, time and users are dimension records; a songplay is a fact row
//! referencing them by key. All foreign keys of a fact are nullable.

use chrono::{DateTime, Datelike, SecondsFormat, Timelike, Utc};

#[derive(Clone, Debug, PartialEq)]
pub struct SongRecord {
    pub song_id: String,
    pub title: String,
    pub artist_id: String,
    pub year: i32,
    pub duration: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ArtistRecord {
    pub artist_id: String,
    pub name: String,
    pub location: Option<String>,
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
}

/// Calendar breakdown of a play's start instant, in UTC.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimeRecord {
    pub start_time: DateTime<Utc>,
    pub hour: u32,
    pub day: u32,
    /// ISO 8601 week number.
    pub week: u32,
    pub month: u32,
    pub year: i32,
    /// Full English weekday name, e.g. "Thursday".
    pub weekday: String,
}

impl TimeRecord {
    /// Derives the record from milliseconds since the UNIX epoch.
    /// Returns None when the instant is outside chrono's representable range.
    pub fn from_epoch_millis(ts: i64) -> Option<TimeRecord> {
        let start_time = DateTime::<Utc>::from_timestamp_millis(ts)?;
        Some(TimeRecord {
            hour: start_time.hour(),
            day: start_time.day(),
            week: start_time.iso_week().week(),
            month: start_time.month(),
            year: start_time.year(),
            weekday: start_time.format("%A").to_string(),
            start_time,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserRecord {
    pub user_id: i64,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<String>,
    pub level: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SongplayFact {
    /// 0-based position of the event among all events of its source file.
    pub sequence_index: usize,
    pub source_file: String,
    pub start_time: DateTime<Utc>,
    pub user_id: i64,
    pub level: String,
    pub song_id: Option<String>,
    pub artist_id: Option<String>,
    pub session_id: i64,
    pub location: Option<String>,
    pub user_agent: Option<String>,
}

/// Ids of the song/artist pair a play event resolved to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SongMatch {
    pub song_id: String,
    pub artist_id: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TableCounts {
    pub songs: usize,
    pub artists: usize,
    pub time: usize,
    pub users: usize,
    pub songplays: usize,
}

/// Text form used for `start_time` columns: RFC 3339, milliseconds, `Z` suffix.
pub fn format_start_time(start_time: &DateTime<Utc>) -> String {
    start_time.to_rfc3339_opts(SecondsFormat::Millis, true)
}

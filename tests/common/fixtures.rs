//! Test dataset creation
//!
//! Writes a small song_data/log_data tree into a temporary directory, laid out the
//! way the real datasets are: songs nested by track id, logs by year and month.

use super::constants::*;
use anyhow::Result;
use serde_json::json;
use songplay_loader::AppConfig;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct TestDataset {
    // Kept alive for the duration of the test
    pub dir: TempDir,
    pub config: AppConfig,
}

impl TestDataset {
    pub fn song_data(&self) -> &Path {
        &self.config.song_data
    }

    pub fn log_data(&self) -> &Path {
        &self.config.log_data
    }

    pub fn log_file(&self, relative: &str) -> PathBuf {
        self.config.log_data.join(relative)
    }
}

pub fn write_json_lines(path: &Path, lines: &[serde_json::Value]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let body: Vec<String> = lines.iter().map(|l| l.to_string()).collect();
    fs::write(path, body.join("\n") + "\n")?;
    Ok(())
}

fn song(
    song_id: &str,
    title: &str,
    duration: f64,
    artist_id: &str,
    artist_name: &str,
) -> serde_json::Value {
    json!({
        "num_songs": 1,
        "artist_id": artist_id,
        "artist_latitude": null,
        "artist_longitude": null,
        "artist_location": "",
        "artist_name": artist_name,
        "song_id": song_id,
        "title": title,
        "duration": duration,
        "year": 0,
    })
}

pub fn play(ts: i64, user_id: i64, level: &str, song: &str, artist: &str, length: f64) -> serde_json::Value {
    json!({
        "artist": artist,
        "auth": "Logged In",
        "firstName": "Test",
        "gender": "F",
        "itemInSession": 0,
        "lastName": format!("User{}", user_id),
        "length": length,
        "level": level,
        "location": "Atlanta-Sandy Springs-Roswell, GA",
        "method": "PUT",
        "page": "NextSong",
        "registration": 1540940782796.0,
        "sessionId": 139,
        "song": song,
        "status": 200,
        "ts": ts,
        "userAgent": "Mozilla/5.0 (Windows NT 6.1; WOW64)",
        // Activity logs store user ids as strings
        "userId": user_id.to_string(),
    })
}

pub fn home_page_visit(ts: i64) -> serde_json::Value {
    json!({
        "artist": null,
        "auth": "Logged Out",
        "firstName": null,
        "gender": null,
        "itemInSession": 0,
        "lastName": null,
        "length": null,
        "level": "free",
        "location": null,
        "method": "GET",
        "page": "Home",
        "registration": null,
        "sessionId": 52,
        "song": null,
        "status": 200,
        "ts": ts,
        "userAgent": null,
        "userId": "",
    })
}

/// Creates a dataset with 3 songs by 2 artists and 2 log files holding 3 plays.
///
/// Two plays match song 1; the third matches nothing. The upgrading user is
/// "free" in the first log file and "paid" in the second.
pub fn create_test_dataset() -> Result<TestDataset> {
    let dir = TempDir::new()?;
    let song_data = dir.path().join("song_data");
    let log_data = dir.path().join("log_data");

    write_json_lines(
        &song_data.join("A/A/A/TRAAAAW128F429D538.json"),
        &[song(
            SONG_1_ID,
            SONG_1_TITLE,
            SONG_1_DURATION,
            ARTIST_1_ID,
            ARTIST_1_NAME,
        )],
    )?;
    write_json_lines(
        &song_data.join("A/A/B/TRAABJL12903CDCF1A.json"),
        &[
            song(SONG_2_ID, "I Didn't Mean To", 218.93179, ARTIST_2_ID, "Casual"),
            song(SONG_3_ID, "Another Test Song", 150.0, ARTIST_1_ID, ARTIST_1_NAME),
        ],
    )?;

    write_json_lines(
        &log_data.join(FIRST_LOG_FILE),
        &[
            home_page_visit(FIRST_PLAY_TS - 1000),
            play(
                FIRST_PLAY_TS,
                USER_UPGRADING,
                "free",
                SONG_1_TITLE,
                ARTIST_1_NAME,
                SONG_1_DURATION,
            ),
            play(
                FIRST_PLAY_TS + 60_000,
                USER_UNMATCHED,
                "free",
                "Unknown Song",
                "Unknown Artist",
                99.0,
            ),
        ],
    )?;
    write_json_lines(
        &log_data.join(SECOND_LOG_FILE),
        &[play(
            FIRST_PLAY_TS + 86_400_000,
            USER_UPGRADING,
            "paid",
            SONG_1_TITLE,
            ARTIST_1_NAME,
            SONG_1_DURATION,
        )],
    )?;

    let config = AppConfig {
        database: dir.path().join("sparkifydb.sqlite").display().to_string(),
        song_data,
        log_data,
        reset_tables: false,
    };

    Ok(TestDataset { dir, config })
}

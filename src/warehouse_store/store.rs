//! SQLite-backed warehouse store.
//!
//! Owns the single connection of a run. Writes lazily open a transaction that is
//! ended by `commit`/`rollback`; anything still uncommitted when the store is
//! closed or dropped is rolled back by SQLite.

use super::models::*;
use super::schema::WAREHOUSE_VERSIONED_SCHEMAS;
use super::trait_def::WarehouseStore;
use crate::sqlite_persistence::VersionedSchema;
use anyhow::{anyhow, Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info};

pub struct SqliteWarehouseStore {
    conn: Mutex<Connection>,
}

fn latest_schema() -> &'static VersionedSchema {
    &WAREHOUSE_VERSIONED_SCHEMAS[WAREHOUSE_VERSIONED_SCHEMAS.len() - 1]
}

fn prepare_schema(conn: &Connection, reset_tables: bool) -> Result<()> {
    let schema = latest_schema();

    if reset_tables {
        info!("Dropping and recreating warehouse tables");
        schema.drop_all(conn)?;
        return schema.create(conn);
    }

    let table_count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'",
        [],
        |r| r.get(0),
    )?;

    if table_count == 0 {
        info!("Creating warehouse schema at version {}", schema.version);
        schema.create(conn)
    } else {
        schema
            .validate(conn)
            .context("Existing database does not match the warehouse schema")
    }
}

impl SqliteWarehouseStore {
    /// Open (or create) the warehouse database.
    ///
    /// # Arguments
    /// * `database` - Path to the SQLite file, or a `file:` URI
    /// * `reset_tables` - Drop and recreate all warehouse tables before use
    pub fn open(database: &str, reset_tables: bool) -> Result<Self> {
        let conn = Connection::open_with_flags(
            database,
            rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE
                | rusqlite::OpenFlags::SQLITE_OPEN_CREATE
                | rusqlite::OpenFlags::SQLITE_OPEN_URI
                | rusqlite::OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .with_context(|| format!("Failed to open warehouse database {}", database))?;

        prepare_schema(&conn, reset_tables)?;

        Ok(SqliteWarehouseStore {
            conn: Mutex::new(conn),
        })
    }

    /// Open a private in-memory warehouse.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        prepare_schema(&conn, false)?;
        Ok(SqliteWarehouseStore {
            conn: Mutex::new(conn),
        })
    }

    /// Roll back any open unit of work and close the connection.
    pub fn close(self) -> Result<()> {
        let conn = self
            .conn
            .into_inner()
            .map_err(|_| anyhow!("Warehouse connection lock poisoned"))?;
        if !conn.is_autocommit() {
            conn.execute_batch("ROLLBACK")?;
        }
        conn.close()
            .map_err(|(_, e)| e)
            .context("Failed to close warehouse database")
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow!("Warehouse connection lock poisoned"))
    }

    /// Lock the connection and make sure a unit of work is open.
    fn write_conn(&self) -> Result<MutexGuard<'_, Connection>> {
        let conn = self.conn()?;
        if conn.is_autocommit() {
            conn.execute_batch("BEGIN")?;
        }
        Ok(conn)
    }

    fn count_rows(conn: &Connection, table: &str) -> Result<usize> {
        let count: i64 = conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |r| {
            r.get(0)
        })?;
        Ok(count as usize)
    }
}

impl WarehouseStore for SqliteWarehouseStore {
    fn insert_song(&self, song: &SongRecord) -> Result<()> {
        let conn = self.write_conn()?;
        conn.execute(
            "INSERT INTO songs (song_id, title, artist_id, year, duration) VALUES (?1, ?2, ?3, ?4, ?5) \
             ON CONFLICT(song_id) DO NOTHING",
            params![
                song.song_id,
                song.title,
                song.artist_id,
                song.year,
                song.duration
            ],
        )
        .with_context(|| format!("Failed to insert song {}", song.song_id))?;
        Ok(())
    }

    fn insert_artist(&self, artist: &ArtistRecord) -> Result<()> {
        let conn = self.write_conn()?;
        conn.execute(
            "INSERT INTO artists (artist_id, name, location, longitude, latitude) VALUES (?1, ?2, ?3, ?4, ?5) \
             ON CONFLICT(artist_id) DO NOTHING",
            params![
                artist.artist_id,
                artist.name,
                artist.location,
                artist.longitude,
                artist.latitude
            ],
        )
        .with_context(|| format!("Failed to insert artist {}", artist.artist_id))?;
        Ok(())
    }

    fn insert_time_record(&self, time: &TimeRecord) -> Result<()> {
        let start_time = format_start_time(&time.start_time);
        let conn = self.write_conn()?;
        conn.execute(
            "INSERT INTO time (start_time, hour, day, week, month, year, weekday) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7) \
             ON CONFLICT(start_time) DO NOTHING",
            params![
                start_time,
                time.hour,
                time.day,
                time.week,
                time.month,
                time.year,
                time.weekday
            ],
        )
        .with_context(|| format!("Failed to insert time record {}", start_time))?;
        Ok(())
    }

    fn insert_user(&self, user: &UserRecord) -> Result<()> {
        let conn = self.write_conn()?;
        conn.execute(
            "INSERT INTO users (user_id, first_name, last_name, gender, level) VALUES (?1, ?2, ?3, ?4, ?5) \
             ON CONFLICT(user_id) DO UPDATE SET first_name = excluded.first_name, \
             last_name = excluded.last_name, gender = excluded.gender, level = excluded.level",
            params![
                user.user_id,
                user.first_name,
                user.last_name,
                user.gender,
                user.level
            ],
        )
        .with_context(|| format!("Failed to insert user {}", user.user_id))?;
        Ok(())
    }

    fn insert_songplay(&self, songplay: &SongplayFact) -> Result<()> {
        let conn = self.write_conn()?;
        conn.execute(
            "INSERT INTO songplays (source_file, sequence_index, start_time, user_id, level, song_id, artist_id, session_id, location, user_agent) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10) \
             ON CONFLICT(source_file, sequence_index) DO NOTHING",
            params![
                songplay.source_file,
                songplay.sequence_index as i64,
                format_start_time(&songplay.start_time),
                songplay.user_id,
                songplay.level,
                songplay.song_id,
                songplay.artist_id,
                songplay.session_id,
                songplay.location,
                songplay.user_agent
            ],
        )
        .with_context(|| {
            format!(
                "Failed to insert songplay {}#{}",
                songplay.source_file, songplay.sequence_index
            )
        })?;
        Ok(())
    }

    fn find_song_match(
        &self,
        title: &str,
        artist_name: &str,
        duration: f64,
    ) -> Result<Option<SongMatch>> {
        let conn = self.conn()?;
        let found = conn
            .query_row(
                "SELECT songs.song_id, artists.artist_id FROM songs \
                 JOIN artists ON songs.artist_id = artists.artist_id \
                 WHERE songs.title = ?1 AND artists.name = ?2 AND songs.duration = ?3 \
                 LIMIT 1",
                params![title, artist_name, duration],
                |row| {
                    Ok(SongMatch {
                        song_id: row.get(0)?,
                        artist_id: row.get(1)?,
                    })
                },
            )
            .optional()
            .with_context(|| format!("Failed to look up song \"{}\" by {}", title, artist_name))?;
        if found.is_none() {
            debug!("No song match for \"{}\" by {} ({})", title, artist_name, duration);
        }
        Ok(found)
    }

    fn table_counts(&self) -> Result<TableCounts> {
        let conn = self.conn()?;
        Ok(TableCounts {
            songs: Self::count_rows(&conn, "songs")?,
            artists: Self::count_rows(&conn, "artists")?,
            time: Self::count_rows(&conn, "time")?,
            users: Self::count_rows(&conn, "users")?,
            songplays: Self::count_rows(&conn, "songplays")?,
        })
    }

    fn commit(&self) -> Result<()> {
        let conn = self.conn()?;
        if !conn.is_autocommit() {
            conn.execute_batch("COMMIT")
                .context("Failed to commit unit of work")?;
        }
        Ok(())
    }

    fn rollback(&self) -> Result<()> {
        let conn = self.conn()?;
        if !conn.is_autocommit() {
            conn.execute_batch("ROLLBACK")
                .context("Failed to roll back unit of work")?;
        }
        Ok(())
    }
}

//! WarehouseStore trait definition.
//!
//! The loader only talks to this trait, one method per record kind, so it never
//! sees SQL text and can be exercised against any backend.

use super::models::{
    ArtistRecord, SongMatch, SongRecord, SongplayFact, TableCounts, TimeRecord, UserRecord,
};
use anyhow::Result;

/// Trait for warehouse storage backends.
///
/// Writes join the current unit of work, which is opened on the first write after
/// a `commit` or `rollback`. Conflicting keys are resolved by the store (upsert),
/// never reported as errors.
pub trait WarehouseStore: Send + Sync {
    // =========================================================================
    // Dimension writes
    // =========================================================================

    /// Insert a song, keeping the existing row if the song id is already stored.
    fn insert_song(&self, song: &SongRecord) -> Result<()>;

    /// Insert an artist, keeping the existing row if the artist id is already stored.
    fn insert_artist(&self, artist: &ArtistRecord) -> Result<()>;

    /// Insert a time record, keeping the existing row for the same start time.
    fn insert_time_record(&self, time: &TimeRecord) -> Result<()>;

    /// Insert or overwrite a user; the last write for a user id wins.
    fn insert_user(&self, user: &UserRecord) -> Result<()>;

    // =========================================================================
    // Fact writes
    // =========================================================================

    /// Insert a songplay, keeping the existing row for the same
    /// (source file, sequence index) pair.
    fn insert_songplay(&self, songplay: &SongplayFact) -> Result<()>;

    // =========================================================================
    // Lookups
    // =========================================================================

    /// Find the song/artist pair whose song title, artist name and song duration
    /// all match exactly.
    fn find_song_match(
        &self,
        title: &str,
        artist_name: &str,
        duration: f64,
    ) -> Result<Option<SongMatch>>;

    /// Row counts for every warehouse table.
    fn table_counts(&self) -> Result<TableCounts>;

    // =========================================================================
    // Unit of work
    // =========================================================================

    /// Make every write since the last commit/rollback durable.
    fn commit(&self) -> Result<()>;

    /// Discard every write since the last commit/rollback.
    fn rollback(&self) -> Result<()>;
}

//! In-memory `WarehouseStore` that records the calls made against it.

use crate::warehouse_store::{
    ArtistRecord, SongMatch, SongRecord, SongplayFact, TableCounts, TimeRecord, UserRecord,
    WarehouseStore,
};
use anyhow::bail;
use std::sync::Mutex;

/// Resolves only "Test Song" by "Test Artist" lasting 210.5s, to S1/A1.
#[derive(Default)]
pub struct RecordingStore {
    calls: Mutex<Vec<String>>,
    pub songplays: Mutex<Vec<SongplayFact>>,
    pub users: Mutex<Vec<UserRecord>>,
    fail_on: Option<&'static str>,
}

impl RecordingStore {
    /// A store whose `call` fails every time it is made.
    pub fn failing_on(call: &'static str) -> Self {
        Self {
            fail_on: Some(call),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, call: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| *c == call).count()
    }

    fn record(&self, call: &'static str) -> anyhow::Result<()> {
        self.calls.lock().unwrap().push(call.to_string());
        if self.fail_on == Some(call) {
            bail!("{} refused", call);
        }
        Ok(())
    }
}

impl WarehouseStore for RecordingStore {
    fn insert_song(&self, _song: &SongRecord) -> anyhow::Result<()> {
        self.record("song")
    }

    fn insert_artist(&self, _artist: &ArtistRecord) -> anyhow::Result<()> {
        self.record("artist")
    }

    fn insert_time_record(&self, _time: &TimeRecord) -> anyhow::Result<()> {
        self.record("time")
    }

    fn insert_user(&self, user: &UserRecord) -> anyhow::Result<()> {
        self.record("user")?;
        self.users.lock().unwrap().push(user.clone());
        Ok(())
    }

    fn insert_songplay(&self, songplay: &SongplayFact) -> anyhow::Result<()> {
        self.record("songplay")?;
        self.songplays.lock().unwrap().push(songplay.clone());
        Ok(())
    }

    fn find_song_match(
        &self,
        title: &str,
        artist_name: &str,
        duration: f64,
    ) -> anyhow::Result<Option<SongMatch>> {
        self.record("lookup")?;
        if title == "Test Song" && artist_name == "Test Artist" && duration == 210.5 {
            Ok(Some(SongMatch {
                song_id: "S1".to_string(),
                artist_id: "A1".to_string(),
            }))
        } else {
            Ok(None)
        }
    }

    fn table_counts(&self) -> anyhow::Result<TableCounts> {
        Ok(TableCounts::default())
    }

    fn commit(&self) -> anyhow::Result<()> {
        self.record("commit")
    }

    fn rollback(&self) -> anyhow::Result<()> {
        self.record("rollback")
    }
}

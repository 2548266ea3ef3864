//! Shared constants for end-to-end tests
//!
//! Ids and values of the records written by the test dataset.

// ============================================================================
// Song metadata
// ============================================================================

pub const SONG_1_ID: &str = "SOUPIRU12A6D4FA1E1";
pub const SONG_1_TITLE: &str = "Test Song";
pub const SONG_1_DURATION: f64 = 210.5;

pub const SONG_2_ID: &str = "SOMZWCG12A8C13C480";
pub const SONG_3_ID: &str = "SOBLFFE12AF72AA5BA";

pub const ARTIST_1_ID: &str = "ARJIE2Y1187B994AB7";
pub const ARTIST_1_NAME: &str = "Test Artist";

pub const ARTIST_2_ID: &str = "ARD7TVE1187B99BFB1";

// ============================================================================
// Activity logs
// ============================================================================

/// User who plays the matched song, first on the free level, later on paid.
pub const USER_UPGRADING: i64 = 39;

/// User whose only play does not match any song.
pub const USER_UNMATCHED: i64 = 8;

/// Thursday 2018-11-01 20:57:10.796 UTC, ISO week 44.
pub const FIRST_PLAY_TS: i64 = 1541105830796;
pub const FIRST_PLAY_START_TIME: &str = "2018-11-01T20:57:10.796Z";

pub const FIRST_LOG_FILE: &str = "2018/11/2018-11-01-events.json";
pub const SECOND_LOG_FILE: &str = "2018/11/2018-11-02-events.json";

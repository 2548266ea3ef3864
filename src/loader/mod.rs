//! Turns the song and activity-log trees into warehouse records.

mod dataset;
mod error;
mod fields;
mod log_file;
mod ndjson;
mod song_file;
mod walk;

#[cfg(test)]
mod recording_store;

pub use dataset::{process_dataset, DatasetSummary, FileStats};
pub use error::{FieldError, LoadError};
pub use log_file::{play_event, process_log_file, PlayEvent};
pub use song_file::{process_song_file, song_and_artist};
pub use walk::walk;

//! Common test infrastructure
//!
//! Tests should only import from this module, not from internal submodules.

#![allow(dead_code)]

mod constants;
mod fixtures;

pub use constants::*;
pub use fixtures::{create_test_dataset, home_page_visit, play, write_json_lines, TestDataset};

use rusqlite::Connection;

/// Opens the warehouse database of a finished run for inspection.
pub fn open_warehouse(dataset: &TestDataset) -> Connection {
    Connection::open(&dataset.config.database).unwrap()
}

pub fn count(conn: &Connection, table: &str) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |r| r.get(0))
        .unwrap()
}

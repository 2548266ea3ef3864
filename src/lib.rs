//! Songplay Loader Library
//!
//! Loads song metadata and user activity logs into a star-schema SQLite warehouse.

pub mod config;
pub mod loader;
pub mod pipeline;
pub mod sqlite_persistence;
pub mod warehouse_store;

pub use config::AppConfig;
pub use loader::LoadError;
pub use pipeline::{run, RunSummary};
pub use warehouse_store::{SqliteWarehouseStore, WarehouseStore};

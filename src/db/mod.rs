//! Database module: models and schema for persistent storage.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows
//! - `schema.rs`: SQL DDL for initializing the database (SQLite-first)
//! - `sqlite.rs`: pool setup and the `DeskStorage` handle
//! - `clients.rs`, `queues.rs`, `ledger.rs`: queries per table

pub mod clients;
pub mod ledger;
pub mod models;
pub mod queues;
pub mod schema;
pub mod sqlite;

pub use models::{DbAttendee, DbClient, DbQueue, QueueSummary};
pub use schema::SQLITE_INIT;
pub use sqlite::{DeskStorage, SqlitePool, connect};

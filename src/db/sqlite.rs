use crate::db::schema::SQLITE_INIT;
use crate::error::DeskError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite, Transaction};
use std::str::FromStr;
use tracing::debug;

pub type SqlitePool = Pool<Sqlite>;

/// Open (creating if missing) the database behind `database_url` and apply
/// the bundled schema.
pub async fn connect(database_url: &str) -> Result<DeskStorage, DeskError> {
    let connect_opts = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new().connect_with(connect_opts).await?;
    let storage = DeskStorage::new(pool);
    storage.init_schema().await?;
    debug!(database_url, "database ready");
    Ok(storage)
}

/// Shared handle over the pool; every query lives in an `impl DeskStorage`
/// block next to the table it touches.
#[derive(Clone)]
pub struct DeskStorage {
    pool: SqlitePool,
}

impl DeskStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Start a transaction for multi-statement operations.
    pub async fn begin(&self) -> Result<Transaction<'static, Sqlite>, DeskError> {
        Ok(self.pool.begin().await?)
    }

    /// Initialize the schema by executing the bundled DDL.
    pub async fn init_schema(&self) -> Result<(), DeskError> {
        // execute multiple statements safely (SQLite supports multi-commands but sqlx::query doesn't)
        for stmt in SQLITE_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&self.pool).await?;
        }
        Ok(())
    }
}

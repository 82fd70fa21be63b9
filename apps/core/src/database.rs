use crate::brief::store::{SnapshotSlot, BRIEF_SLOT_KEY};
use crate::error::AppError;
use crate::fs_manager::PortablePathManager;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use tracing::info;

/// Opens (creating if needed) the brief database under `data_dir`.
pub async fn init_db(data_dir: &Path) -> Result<SqlitePool, AppError> {
    PortablePathManager::init(data_dir)?;
    let db_path = PortablePathManager::db_path(data_dir);

    info!("Initializing database at: {:?}", db_path);

    let options = SqliteConnectOptions::new()
        .filename(&db_path)
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;

    migrate(&pool).await?;
    Ok(pool)
}

/// Creates the key-value table if it does not exist.
pub async fn migrate(pool: &SqlitePool) -> Result<(), AppError> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS kv_slots (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL,
            updated_at INTEGER NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    info!("Database initialized and migrations applied.");
    Ok(())
}

/// A named entry in the `kv_slots` table.
pub struct SqliteSlot {
    pool: SqlitePool,
    key: String,
}

impl SqliteSlot {
    pub fn new(pool: SqlitePool, key: impl Into<String>) -> Self {
        Self {
            pool,
            key: key.into(),
        }
    }

    /// The slot holding the live content brief.
    pub fn brief(pool: SqlitePool) -> Self {
        Self::new(pool, BRIEF_SLOT_KEY)
    }

    /// Unix timestamp of the last write, if any.
    pub async fn updated_at(&self) -> Result<Option<i64>, AppError> {
        let ts = sqlx::query_scalar::<_, i64>("SELECT updated_at FROM kv_slots WHERE key = ?")
            .bind(&self.key)
            .fetch_optional(&self.pool)
            .await?;
        Ok(ts)
    }
}

#[async_trait]
impl SnapshotSlot for SqliteSlot {
    async fn read(&self) -> Result<Option<String>, AppError> {
        let value = sqlx::query_scalar::<_, String>("SELECT value FROM kv_slots WHERE key = ?")
            .bind(&self.key)
            .fetch_optional(&self.pool)
            .await?;
        Ok(value)
    }

    async fn write(&self, snapshot: &str) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO kv_slots (key, value, updated_at)
            VALUES (?, ?, ?)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
            "#,
        )
        .bind(&self.key)
        .bind(snapshot)
        .bind(Utc::now().timestamp())
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

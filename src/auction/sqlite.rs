//! SQLite Auction Store
//!
//! Durable backend persisting one row per auction with SQLx.

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::FromRow;
use tracing::{error, info};

use crate::auction::{expiry_cutoff, from_epoch_seconds, Auction, AuctionStatus, AuctionStore};
use crate::error::{AuctionError, Result};

const CREATE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS auctions (
        id           TEXT PRIMARY KEY NOT NULL,
        product_name TEXT NOT NULL,
        category     TEXT NOT NULL,
        description  TEXT NOT NULL,
        condition    TEXT NOT NULL,
        status       TEXT NOT NULL,
        timestamp    INTEGER NOT NULL
    )
"#;

const CREATE_EXPIRY_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_auctions_status_timestamp ON auctions (status, timestamp)";

/// Persisted shape of an auction; `timestamp` is epoch seconds.
#[derive(Debug, Clone, FromRow)]
struct AuctionRow {
    id: String,
    product_name: String,
    category: String,
    description: String,
    condition: String,
    status: String,
    timestamp: i64,
}

impl TryFrom<AuctionRow> for Auction {
    type Error = AuctionError;

    fn try_from(row: AuctionRow) -> Result<Self> {
        let timestamp = from_epoch_seconds(row.timestamp).ok_or_else(|| {
            AuctionError::Internal(format!("Invalid timestamp for auction {}", row.id))
        })?;

        Ok(Auction {
            condition: row.condition.parse()?,
            status: row.status.parse()?,
            timestamp,
            id: row.id,
            product_name: row.product_name,
            category: row.category,
            description: row.description,
        })
    }
}

// == SQLite Store ==
/// Auction store backed by a SQLite database.
#[derive(Debug, Clone)]
pub struct SqliteAuctionStore {
    /// Database connection pool
    pool: SqlitePool,
}

impl SqliteAuctionStore {
    /// Opens (creating if missing) the database at `url` and prepares the schema.
    ///
    /// In-memory URLs are pinned to a single long-lived connection, since every
    /// SQLite connection to `:memory:` opens a separate database.
    pub async fn connect(url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(|e| AuctionError::Storage(format!("Invalid database URL: {}", e)))?
            .create_if_missing(true);

        let pool_options = if is_memory_url(url) {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };

        let pool = pool_options.connect_with(options).await.map_err(|e| {
            error!("DB: Failed to connect to {}: {}", url, e);
            AuctionError::Storage(format!("Failed to connect: {}", e))
        })?;

        let store = Self::from_pool(pool);
        store.migrate().await?;
        info!("DB: auction store ready at {}", url);
        Ok(store)
    }

    /// Wraps an existing pool. Call [`Self::migrate`] before use.
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Creates the auctions table and its expiry index if missing.
    pub async fn migrate(&self) -> Result<()> {
        for statement in [CREATE_TABLE, CREATE_EXPIRY_INDEX] {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    error!("DB: Failed to prepare schema: {}", e);
                    AuctionError::Storage(format!("Failed to prepare schema: {}", e))
                })?;
        }
        Ok(())
    }

    /// Closes the underlying pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

fn is_memory_url(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

#[async_trait]
impl AuctionStore for SqliteAuctionStore {
    async fn create(&self, auction: &Auction) -> Result<()> {
        sqlx::query(
            "INSERT INTO auctions (id, product_name, category, description, condition, status, timestamp)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(auction.id.as_str())
        .bind(auction.product_name.as_str())
        .bind(auction.category.as_str())
        .bind(auction.description.as_str())
        .bind(auction.condition.as_str())
        .bind(auction.status.as_str())
        .bind(auction.timestamp.timestamp())
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AuctionError::AlreadyExists(auction.id.clone())
            }
            e => {
                error!("DB: Failed to insert auction {}: {}", auction.id, e);
                AuctionError::Storage("Error trying to insert auction".to_string())
            }
        })?;

        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Auction> {
        let row = sqlx::query_as::<_, AuctionRow>(
            "SELECT id, product_name, category, description, condition, status, timestamp
             FROM auctions WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("DB: Failed to find auction {}: {}", id, e);
            AuctionError::Storage("Error trying to find auction".to_string())
        })?;

        match row {
            Some(row) => row.try_into(),
            None => Err(AuctionError::NotFound(id.to_string())),
        }
    }

    async fn close_expired(&self, now: DateTime<Utc>, duration: Duration) -> Result<u64> {
        let cutoff = expiry_cutoff(now, duration).timestamp();

        let result = sqlx::query("UPDATE auctions SET status = ? WHERE status = ? AND timestamp <= ?")
            .bind(AuctionStatus::Completed.as_str())
            .bind(AuctionStatus::Active.as_str())
            .bind(cutoff)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!("DB: Failed to update expired auctions: {}", e);
                AuctionError::Storage("Error trying to update expired auctions".to_string())
            })?;

        Ok(result.rows_affected())
    }
}

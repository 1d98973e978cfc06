use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{Row, SqlitePool as Pool};
use tracing::{debug, info};

use crate::error::LedgerError;

pub const MIN_ADJUSTMENT: i64 = 1;
pub const MAX_ADJUSTMENT: i64 = 100;

const MAX_CONNECTIONS: u32 = 4;
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// The insanity ledger. Cheap to share behind an `Arc`; every call checks a
/// connection out of the pool and hands it back when the query finishes.
pub struct Database {
    pool: Pool,
}

impl Database {
    pub async fn new(database_url: &str) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(BUSY_TIMEOUT);

        let pool = SqlitePoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect_with(options)
            .await?;

        Self::setup_tables(&pool).await?;
        info!(url = database_url, "insanity ledger ready");

        Ok(Database { pool })
    }

    async fn setup_tables(pool: &Pool) -> Result<(), sqlx::Error> {
        // AUTOINCREMENT keeps surrogate ids from ever being handed out twice
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS user_insanity (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                uid INTEGER NOT NULL UNIQUE,
                username TEXT NOT NULL,
                insanity INTEGER NOT NULL DEFAULT 0
            )
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Adds `delta` to the target's insanity and returns the new score.
    ///
    /// The row is created on first contact with `display_name`; later
    /// adjustments leave the stored name as it was. The read-modify-write is a
    /// single upsert statement, so concurrent adjustments to one target
    /// serialise inside SQLite and none of them is lost.
    pub async fn adjust(
        &self,
        actor_id: u64,
        target_id: u64,
        display_name: &str,
        delta: i64,
    ) -> Result<i64, LedgerError> {
        validate_adjustment(actor_id, target_id, delta)?;

        let row = sqlx::query(
            r#"
            INSERT INTO user_insanity (uid, username, insanity) VALUES (?, ?, ?)
            ON CONFLICT(uid) DO UPDATE SET insanity = insanity + excluded.insanity
            RETURNING insanity
            "#,
        )
        .bind(target_id as i64)
        .bind(display_name)
        .bind(delta)
        .fetch_one(&self.pool)
        .await?;

        let score = row.get::<i64, _>("insanity");
        debug!(actor_id, target_id, delta, score, "adjusted insanity");

        Ok(score)
    }

    pub async fn lookup(&self, user_id: u64) -> Result<Option<i64>, LedgerError> {
        let row = sqlx::query("SELECT insanity FROM user_insanity WHERE uid = ?")
            .bind(user_id as i64)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|row| row.get::<i64, _>("insanity")))
    }

    /// In-memory ledger on a single connection that never idles out. The
    /// database vanishes once its last connection closes, and extra
    /// connections would contend on shared-cache table locks, which fail
    /// immediately instead of honouring the busy timeout.
    #[cfg(test)]
    pub async fn in_memory() -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        Self::setup_tables(&pool).await?;
        Ok(Database { pool })
    }
}

/// Self-targeting is rejected before the range is looked at.
pub fn validate_adjustment(actor_id: u64, target_id: u64, delta: i64) -> Result<(), LedgerError> {
    if actor_id == target_id {
        return Err(LedgerError::SelfTargetRejected);
    }

    if !(MIN_ADJUSTMENT..=MAX_ADJUSTMENT).contains(&delta) {
        return Err(LedgerError::InvalidAdjustment { delta });
    }

    Ok(())
}

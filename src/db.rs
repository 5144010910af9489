use std::str::FromStr;

use anyhow::Context;
use async_trait::async_trait;
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};

use crate::schema::{Submission, SubmissionStatus};

/// Narrow store interface so tests can substitute an in-memory fake.
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    /// Record a freshly broadcast submission.
    async fn save(&self, submission: &Submission) -> anyhow::Result<()>;

    /// Set the submission's status to confirmed with the reported round.
    /// Applying the same confirmation twice leaves the record unchanged.
    async fn mark_confirmed(&self, tx_id: &str, confirmed_round: i64) -> anyhow::Result<()>;

    /// The most recent submissions, newest first, capped at `limit`.
    async fn recent(&self, limit: i64) -> anyhow::Result<Vec<Submission>>;
}

pub struct Database {
    pool: SqlitePool,
}

impl Database {
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .context("Failed to create SQLite connect options")?
            .create_if_missing(true);
        let pool = SqlitePool::connect_with(options).await?;

        let db = Self { pool };
        db.init_schema().await?;
        Ok(db)
    }

    async fn init_schema(&self) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS transactions (
                tx_id TEXT PRIMARY KEY,
                sender TEXT NOT NULL,
                receiver TEXT NOT NULL,
                amount REAL NOT NULL,
                note TEXT,
                status TEXT NOT NULL DEFAULT 'pending',
                created_at DATETIME NOT NULL,
                confirmed_round INTEGER
            );
            "#,
        )
        .execute(&self.pool)
        .await
        .context("Failed to create transactions table")?;

        Ok(())
    }
}

#[async_trait]
impl SubmissionStore for Database {
    async fn save(&self, submission: &Submission) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO transactions (
                tx_id, sender, receiver, amount, note, status, created_at, confirmed_round
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&submission.tx_id)
        .bind(&submission.sender)
        .bind(&submission.receiver)
        .bind(submission.amount)
        .bind(&submission.note)
        .bind(submission.status)
        .bind(submission.created_at)
        .bind(submission.confirmed_round)
        .execute(&self.pool)
        .await
        .context("Failed to save transaction to database")?;

        Ok(())
    }

    async fn mark_confirmed(&self, tx_id: &str, confirmed_round: i64) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE transactions SET status = ?, confirmed_round = ? WHERE tx_id = ?
            "#,
        )
        .bind(SubmissionStatus::Confirmed)
        .bind(confirmed_round)
        .bind(tx_id)
        .execute(&self.pool)
        .await
        .context(format!("Failed to mark transaction {} as confirmed", tx_id))?;

        Ok(())
    }

    async fn recent(&self, limit: i64) -> anyhow::Result<Vec<Submission>> {
        let submissions = sqlx::query_as::<_, Submission>(
            r#"
            SELECT tx_id, sender, receiver, amount, note, status, created_at, confirmed_round
            FROM transactions
            ORDER BY created_at DESC, rowid DESC
            LIMIT ?
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .context("Failed to get recent transactions from database")?;

        Ok(submissions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn memory_db() -> Database {
        let options = SqliteConnectOptions::from_str("sqlite::memory:").unwrap();
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .unwrap();
        let db = Database { pool };
        db.init_schema().await.unwrap();
        db
    }

    fn submission(tx_id: &str) -> Submission {
        Submission::new(
            tx_id.to_string(),
            "SENDERADDRESS".to_string(),
            "RECEIVERADDRESS".to_string(),
            1.5,
            Some("hello".to_string()),
        )
    }

    #[tokio::test]
    async fn saves_and_reads_back_a_submission() {
        let db = memory_db().await;
        db.save(&submission("TX1")).await.unwrap();

        let recent = db.recent(50).await.unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].tx_id, "TX1");
        assert_eq!(recent[0].amount, 1.5);
        assert_eq!(recent[0].status, SubmissionStatus::Pending);
        assert_eq!(recent[0].confirmed_round, None);
    }

    #[tokio::test]
    async fn rejects_duplicate_tx_id() {
        let db = memory_db().await;
        db.save(&submission("TX1")).await.unwrap();
        assert!(db.save(&submission("TX1")).await.is_err());
    }

    #[tokio::test]
    async fn mark_confirmed_is_idempotent() {
        let db = memory_db().await;
        db.save(&submission("TX1")).await.unwrap();

        db.mark_confirmed("TX1", 4242).await.unwrap();
        db.mark_confirmed("TX1", 4242).await.unwrap();

        let recent = db.recent(50).await.unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].status, SubmissionStatus::Confirmed);
        assert_eq!(recent[0].confirmed_round, Some(4242));
    }

    #[tokio::test]
    async fn recent_caps_at_limit_newest_first() {
        let db = memory_db().await;
        let base = chrono::Utc::now().naive_utc();
        for i in 0..55 {
            let mut s = submission(&format!("TX{}", i));
            s.created_at = base + Duration::seconds(i);
            db.save(&s).await.unwrap();
        }

        let recent = db.recent(50).await.unwrap();
        assert_eq!(recent.len(), 50);
        assert_eq!(recent[0].tx_id, "TX54");
        assert_eq!(recent[49].tx_id, "TX5");
    }
}

//! PostgreSQL implementation of the notification journal.

use std::time::Duration;

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

use super::models::JournalEntry;
use crate::config::AppConfig;
use crate::domain::{Dispatch, NotificationKind, SwapRequestId, UserId};
use crate::error::SlotError;

/// Upper bound on the retention window, keeping the cutoff representable.
const MAX_RETENTION_DAYS: i64 = 36_500;

type JournalRow = (i64, Uuid, String, String, Option<Uuid>, DateTime<Utc>);

/// PostgreSQL-backed notification journal using `sqlx::PgPool`.
#[derive(Debug, Clone)]
pub struct PostgresJournal {
    pool: PgPool,
}

impl PostgresJournal {
    /// Creates a journal over an existing connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a connection pool sized from `config`.
    ///
    /// # Errors
    ///
    /// Returns a [`SlotError::PersistenceError`] if the database is
    /// unreachable.
    pub async fn connect(config: &AppConfig) -> Result<Self, SlotError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .min_connections(config.database_min_connections)
            .acquire_timeout(Duration::from_secs(config.database_connect_timeout_secs))
            .connect(&config.database_url)
            .await
            .map_err(|e| SlotError::PersistenceError(e.to_string()))?;
        Ok(Self::new(pool))
    }

    /// Creates the `notifications` table and its index if missing.
    ///
    /// # Errors
    ///
    /// Returns a [`SlotError::PersistenceError`] on database failure.
    pub async fn ensure_schema(&self) -> Result<(), SlotError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS notifications (\
                id BIGSERIAL PRIMARY KEY, \
                recipient UUID NOT NULL, \
                kind TEXT NOT NULL, \
                message TEXT NOT NULL, \
                request_id UUID NULL, \
                created_at TIMESTAMPTZ NOT NULL DEFAULT now())",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| SlotError::PersistenceError(e.to_string()))?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS notifications_recipient_created_idx \
             ON notifications (recipient, created_at DESC)",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| SlotError::PersistenceError(e.to_string()))?;

        Ok(())
    }

    /// Appends a dispatched notification.
    ///
    /// # Errors
    ///
    /// Returns a [`SlotError::PersistenceError`] on database failure.
    pub async fn append(&self, dispatch: &Dispatch) -> Result<i64, SlotError> {
        let row = sqlx::query_scalar::<_, i64>(
            "INSERT INTO notifications (recipient, kind, message, request_id, created_at) \
             VALUES ($1, $2, $3, $4, $5) RETURNING id",
        )
        .bind(Uuid::from(dispatch.recipient))
        .bind(dispatch.notification.kind.as_str())
        .bind(&dispatch.notification.message)
        .bind(dispatch.notification.request_id.map(Uuid::from))
        .bind(dispatch.dispatched_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| SlotError::PersistenceError(e.to_string()))?;

        Ok(row)
    }

    /// Loads the newest `limit` notifications addressed to `recipient`.
    ///
    /// # Errors
    ///
    /// Returns a [`SlotError::PersistenceError`] on database failure.
    pub async fn load_for_recipient(
        &self,
        recipient: UserId,
        limit: i64,
    ) -> Result<Vec<JournalEntry>, SlotError> {
        let rows = sqlx::query_as::<_, JournalRow>(
            "SELECT id, recipient, kind, message, request_id, created_at FROM notifications \
             WHERE recipient = $1 ORDER BY created_at DESC, id DESC LIMIT $2",
        )
        .bind(Uuid::from(recipient))
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| SlotError::PersistenceError(e.to_string()))?;

        Ok(rows
            .into_iter()
            .filter_map(|(id, recipient, kind, message, request_id, created_at)| {
                let Some(kind) = NotificationKind::parse(&kind) else {
                    tracing::warn!(id, kind = %kind, "skipping journal row with unknown kind");
                    return None;
                };
                Some(JournalEntry {
                    id,
                    recipient: UserId::from_uuid(recipient),
                    kind,
                    message,
                    request_id: request_id.map(SwapRequestId::from_uuid),
                    created_at,
                })
            })
            .collect())
    }

    /// Deletes rows older than the given number of days.
    ///
    /// # Errors
    ///
    /// Returns a [`SlotError::PersistenceError`] on database failure.
    pub async fn delete_older_than(&self, days: u64) -> Result<u64, SlotError> {
        let days = i64::try_from(days).unwrap_or(i64::MAX).min(MAX_RETENTION_DAYS);
        let cutoff = Utc::now() - chrono::Duration::days(days);

        let result = sqlx::query("DELETE FROM notifications WHERE created_at < $1")
            .bind(cutoff)
            .execute(&self.pool)
            .await
            .map_err(|e| SlotError::PersistenceError(e.to_string()))?;

        Ok(result.rows_affected())
    }
}

//! Background tasks feeding and pruning the notification journal.

use std::time::Duration;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use super::postgres::PostgresJournal;
use crate::domain::Dispatch;

/// How often the retention task runs.
pub const RETENTION_INTERVAL: Duration = Duration::from_secs(60 * 60);

/// Appends every dispatch received on `rx` to the journal.
///
/// Write failures are logged and skipped; they never reach the code that
/// dispatched the notification. The task ends when the bus closes.
pub fn spawn_journal_writer(
    journal: PostgresJournal,
    mut rx: broadcast::Receiver<Dispatch>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(dispatch) => {
                    if let Err(e) = journal.append(&dispatch).await {
                        tracing::warn!(
                            recipient = %dispatch.recipient,
                            error = %e,
                            "failed to journal notification"
                        );
                    }
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(lagged = n, "journal writer lagged behind notification bus");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
        tracing::debug!("journal writer stopped");
    })
}

/// Periodically deletes journal rows older than `retention_days`.
///
/// Returns `None` when `retention_days` is zero (keep forever).
pub fn spawn_retention_task(
    journal: PostgresJournal,
    retention_days: u64,
    every: Duration,
) -> Option<JoinHandle<()>> {
    if retention_days == 0 {
        return None;
    }
    Some(tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        loop {
            ticker.tick().await;
            match journal.delete_older_than(retention_days).await {
                Ok(deleted) => tracing::debug!(deleted, "journal retention pass"),
                Err(e) => tracing::warn!(error = %e, "journal retention pass failed"),
            }
        }
    }))
}

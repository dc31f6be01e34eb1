//! Idempotent persistence of extracted records into the remote store.

use crate::models::CallRecord;
use crate::store::CallLogStore;

/// Counts from one sync pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub created: usize,
    pub skipped_existing: usize,
    pub failed: usize,
}

/// Write `records` to the store, creating only the unseen ones.
///
/// Records already present (by `call_id`) are left untouched, so re-running
/// the pipeline against an unchanged store creates nothing. A store error
/// on one record is logged and counted; the rest of the batch still runs.
pub async fn sync_records(store: &dyn CallLogStore, records: &[CallRecord]) -> SyncReport {
    let mut report = SyncReport::default();

    for record in records {
        match store.exists(&record.call_id).await {
            Ok(true) => {
                tracing::debug!(call_id = %record.call_id, "Call already synced, skipping");
                report.skipped_existing += 1;
            }
            Ok(false) => match store.create(record).await {
                Ok(()) => {
                    tracing::info!(call_id = %record.call_id, "Created call log");
                    report.created += 1;
                }
                Err(error) => {
                    tracing::warn!(call_id = %record.call_id, error = %error, "Failed to create call log");
                    report.failed += 1;
                }
            },
            Err(error) => {
                tracing::warn!(call_id = %record.call_id, error = %error, "Failed to check for existing call log");
                report.failed += 1;
            }
        }
    }

    report
}

//! Pending-job lookup against the shared store

use crate::jobs::types::{JobKey, JobRecord, JobStatus, PrinterIdentity};
use crate::store::{JobStore, StoreResult};

/// Collect the keys of every PENDING job owned by `printer`, in scan order
///
/// Jobs in any other state stay in the store untouched. A key that vanishes
/// between scan and read is skipped, and so is a record that fails to parse
/// (logged at debug); neither fails the poll.
pub async fn find_pending(
    store: &dyn JobStore,
    printer: &PrinterIdentity,
) -> StoreResult<Vec<JobKey>> {
    let prefix = JobKey::scan_prefix(printer);
    let keys = store.scan_by_prefix(&prefix).await?;

    let mut pending = Vec::new();
    for key in keys {
        let Some(raw) = store.get(&key).await? else {
            continue;
        };
        match serde_json::from_str::<JobRecord>(&raw) {
            Ok(record) if record.status == JobStatus::Pending => {
                pending.push(JobKey::from(key));
            }
            Ok(_) => {}
            Err(err) => {
                tracing::debug!("Ignoring malformed job record at {}: {}", key, err);
            }
        }
    }

    Ok(pending)
}

//! Single batched write of an upload's unique rows.

use super::normalize::IngestionRow;
use crate::club::ClubFields;
use crate::store::{ClubStore, FailedInsert, StoreError};

/// What the batch insert actually achieved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitReport {
    /// Rows handed to the store.
    pub submitted: usize,
    /// Rows the store persisted. Can be lower than `submitted`.
    pub added: usize,
    /// Rows the store refused, indexed into the submitted batch.
    pub failed: Vec<FailedInsert>,
}

/// Insert the unique rows with one unordered batch call.
///
/// An empty batch never reaches the store. Records the store refuses are
/// logged with their upload line number and left out of `added`; only a
/// store-wide failure is returned as an error.
pub async fn commit_unique<S: ClubStore + ?Sized>(
    store: &S,
    rows: Vec<IngestionRow>,
) -> Result<CommitReport, StoreError> {
    if rows.is_empty() {
        tracing::debug!("No unique rows to commit, skipping insert");
        return Ok(CommitReport::default());
    }

    let submitted = rows.len();
    let batch: Vec<ClubFields> = rows.iter().map(|r| r.fields.clone()).collect();
    let outcome = store.insert_many(&batch).await?;

    for failure in &outcome.failed {
        let line = rows.get(failure.index).map(|r| r.line);
        tracing::warn!(
            line = ?line,
            reason = %failure.reason,
            "Store refused club during batch insert"
        );
    }

    Ok(CommitReport {
        submitted,
        added: outcome.inserted.len(),
        failed: outcome.failed,
    })
}

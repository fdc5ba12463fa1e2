//! Bulk club ingestion: CSV bytes in, reconciliation report out.
//!
//! ```text
//! bytes -> decode_rows -> validate_row -> DuplicateResolver -> commit_unique -> IngestionOutcome
//! ```
//!
//! One upload is one linear pass. Rows are validated and resolved one at a
//! time, each store lookup is awaited before the next row starts, and the
//! unique rows are written with a single unordered batch insert at the end.
//! Per-row problems (missing required field, duplicate, refused insert) are
//! skipped and counted; only undecodable input and store-wide failures abort
//! the upload.

pub mod commit;
pub mod normalize;
pub mod report;
pub mod resolve;
pub mod validate;

use std::io::Read;

pub use commit::{commit_unique, CommitReport};
pub use normalize::{decode_rows, IngestionRow, RowStream};
pub use report::{render_rows_csv, IngestionOutcome};
pub use resolve::{DuplicateOf, DuplicateResolver, Resolution};
pub use validate::{validate_row, RejectReason, RowVerdict};

use crate::store::{ClubStore, StoreError};

/// Failures that abort a whole upload.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// The upload could not be read or decoded. Raised before any row is
    /// checked against the store.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// The store failed while rows were being resolved or committed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Decode `input` and run it through the pipeline.
///
/// Decoding is blocking I/O; callers on an async runtime with a file-backed
/// reader should decode on a blocking thread and call [`run_ingestion`].
pub async fn ingest<S, R>(store: &S, input: R) -> Result<IngestionOutcome, IngestError>
where
    S: ClubStore + ?Sized,
    R: Read,
{
    let rows = decode_rows(input)?;
    run_ingestion(store, rows).await
}

/// Validate, resolve and commit already-decoded rows.
pub async fn run_ingestion<S: ClubStore + ?Sized>(
    store: &S,
    rows: RowStream,
) -> Result<IngestionOutcome, IngestError> {
    let total = rows.len();
    let mut resolver = DuplicateResolver::new(store);
    let mut rejected = 0usize;
    let mut duplicates = Vec::new();
    let mut unique = Vec::new();

    for row in rows {
        match validate_row(row) {
            RowVerdict::Rejected { row, reason } => {
                tracing::debug!(line = row.line, %reason, "Row rejected");
                rejected += 1;
            }
            RowVerdict::Valid(row) => match resolver.resolve(row).await? {
                Resolution::Duplicate { row, of } => {
                    tracing::debug!(line = row.line, ?of, "Row is a duplicate");
                    duplicates.push(row.fields);
                }
                Resolution::Unique(row) => unique.push(row),
            },
        }
    }

    let commit = commit_unique(store, unique).await?;
    let outcome = IngestionOutcome::build(rejected, duplicates, commit.added);

    tracing::info!(
        total,
        added = outcome.added,
        skipped = outcome.skipped,
        rejected,
        duplicates = outcome.duplicates.len(),
        refused = commit.failed.len(),
        "Bulk ingestion complete"
    );

    Ok(outcome)
}

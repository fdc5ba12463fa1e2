//! Upload reconciliation report and its CSV re-export.

use serde::Serialize;

use crate::club::{ClubField, ClubFields};
use crate::error::CoreError;

/// Counts and duplicates of one upload. Not persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IngestionOutcome {
    pub added: usize,
    /// Rows rejected for a missing required field plus duplicates.
    pub skipped: usize,
    /// Duplicate rows, verbatim and in upload order.
    pub duplicates: Vec<ClubFields>,
}

impl IngestionOutcome {
    pub fn build(rejected: usize, duplicates: Vec<ClubFields>, added: usize) -> Self {
        Self {
            added,
            skipped: rejected + duplicates.len(),
            duplicates,
        }
    }
}

/// Render rows as a CSV in the upload schema: the canonical header line,
/// then one line per row with all eleven columns.
pub fn render_rows_csv(rows: &[ClubFields]) -> Result<String, CoreError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record(ClubField::ALL.iter().map(|f| f.header()))
        .map_err(csv_error)?;
    for row in rows {
        writer
            .write_record(ClubField::ALL.iter().map(|f| row.get(*f)))
            .map_err(csv_error)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| CoreError::Internal(format!("Failed to flush CSV: {e}")))?;
    String::from_utf8(bytes).map_err(|e| CoreError::Internal(format!("CSV is not UTF-8: {e}")))
}

fn csv_error(err: csv::Error) -> CoreError {
    CoreError::Internal(format!("Failed to write CSV: {err}"))
}

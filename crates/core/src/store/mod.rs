//! The persistence boundary of the ingestion pipeline.
//!
//! The pipeline never talks to a database directly; it receives a
//! [`ClubStore`] from its caller. The server injects the PostgreSQL
//! implementation from `clubdir-db`; tests inject [`memory::MemoryClubStore`].

pub mod memory;

use async_trait::async_trait;

use crate::club::{ClubFields, ClubRecord};

/// Failures that make the store unusable for the rest of a request.
///
/// A single record being refused during [`ClubStore::insert_many`] is not an
/// error; it is reported in [`InsertManyOutcome::failed`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A lookup could not be answered.
    #[error("storage read failed: {0}")]
    Read(String),

    /// The store could not be reached at all.
    #[error("storage connection failed: {0}")]
    Connection(String),
}

/// A record the store refused during an unordered batch insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedInsert {
    /// Position of the record in the submitted batch.
    pub index: usize,
    pub reason: String,
}

/// Result of an unordered batch insert.
#[derive(Debug, Clone, Default)]
pub struct InsertManyOutcome {
    /// Records that were actually persisted, in submission order.
    pub inserted: Vec<ClubRecord>,
    /// Records the store refused. Their siblings were still attempted.
    pub failed: Vec<FailedInsert>,
}

/// Club persistence as seen by the ingestion pipeline.
///
/// Implementations must be thread-safe (Send + Sync) so one store can be
/// shared by concurrent requests.
#[async_trait]
pub trait ClubStore: Send + Sync {
    /// Find a club whose college and club names exactly equal the arguments.
    async fn find_one(
        &self,
        college_name: &str,
        club_name: &str,
    ) -> Result<Option<ClubRecord>, StoreError>;

    /// Insert every record independently: one refused record never blocks
    /// the others.
    async fn insert_many(&self, clubs: &[ClubFields]) -> Result<InsertManyOutcome, StoreError>;
}

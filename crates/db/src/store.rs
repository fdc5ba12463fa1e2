//! PostgreSQL implementation of the ingestion pipeline's [`ClubStore`].

use async_trait::async_trait;
use clubdir_core::club::{ClubFields, ClubRecord};
use clubdir_core::store::{ClubStore, FailedInsert, InsertManyOutcome, StoreError};
use sqlx::{Connection, PgPool};

use crate::repositories::ClubRepo;

/// Club store backed by the `clubs` table.
#[derive(Clone)]
pub struct PgClubStore {
    pool: PgPool,
}

impl PgClubStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClubStore for PgClubStore {
    async fn find_one(
        &self,
        college_name: &str,
        club_name: &str,
    ) -> Result<Option<ClubRecord>, StoreError> {
        let club = ClubRepo::find_by_natural_key(&self.pool, college_name, club_name)
            .await
            .map_err(read_error)?;
        Ok(club.map(ClubRecord::from))
    }

    /// Each record is written under its own savepoint inside one transaction,
    /// so a constraint violation rolls back only that record.
    async fn insert_many(&self, clubs: &[ClubFields]) -> Result<InsertManyOutcome, StoreError> {
        let mut outcome = InsertManyOutcome::default();
        let mut tx = self.pool.begin().await.map_err(connection_error)?;

        for (index, club) in clubs.iter().enumerate() {
            let mut savepoint = tx.begin().await.map_err(connection_error)?;
            match ClubRepo::create_on(&mut savepoint, club).await {
                Ok(row) => {
                    savepoint.commit().await.map_err(connection_error)?;
                    outcome.inserted.push(row.into());
                }
                Err(sqlx::Error::Database(err)) => {
                    savepoint.rollback().await.map_err(connection_error)?;
                    outcome.failed.push(FailedInsert {
                        index,
                        reason: err.message().to_string(),
                    });
                }
                Err(err) => return Err(connection_error(err)),
            }
        }

        tx.commit().await.map_err(connection_error)?;
        Ok(outcome)
    }
}

fn is_connection_failure(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed
    )
}

fn read_error(err: sqlx::Error) -> StoreError {
    if is_connection_failure(&err) {
        connection_error(err)
    } else {
        StoreError::Read(err.to_string())
    }
}

fn connection_error(err: sqlx::Error) -> StoreError {
    StoreError::Connection(err.to_string())
}

//! Duplicate detection against the live store.
//!
//! Each valid row is checked on its own, and the check completes before the
//! next row is looked at. Rows already queued for commit in the same upload
//! are remembered, so a key repeated within one file is reported as a
//! duplicate instead of being submitted twice.
//!
//! Nothing here locks the store: two uploads racing on the same key can both
//! see "not found" and both commit.

use std::collections::HashSet;

use super::normalize::IngestionRow;
use crate::club::NaturalKey;
use crate::store::{ClubStore, StoreError};
use crate::types::DbId;

/// Where the matching club was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicateOf {
    /// A club already in the store.
    Stored(DbId),
    /// An earlier row of the same upload, queued but not yet committed.
    EarlierRow,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Unique(IngestionRow),
    Duplicate { row: IngestionRow, of: DuplicateOf },
}

/// Per-upload duplicate resolver.
pub struct DuplicateResolver<'a, S: ClubStore + ?Sized> {
    store: &'a S,
    queued: HashSet<NaturalKey>,
}

impl<'a, S: ClubStore + ?Sized> DuplicateResolver<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            queued: HashSet::new(),
        }
    }

    /// Classify a valid row. A `Unique` row's key is remembered for the rest
    /// of this upload.
    pub async fn resolve(&mut self, row: IngestionRow) -> Result<Resolution, StoreError> {
        let key = row.fields.natural_key();
        if self.queued.contains(&key) {
            return Ok(Resolution::Duplicate {
                row,
                of: DuplicateOf::EarlierRow,
            });
        }

        let existing = self
            .store
            .find_one(&key.college_name, &key.club_name)
            .await?;

        Ok(match existing {
            Some(club) => Resolution::Duplicate {
                row,
                of: DuplicateOf::Stored(club.id),
            },
            None => {
                self.queued.insert(key);
                Resolution::Unique(row)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::club::ClubFields;
    use crate::store::memory::MemoryClubStore;
    use assert_matches::assert_matches;

    fn row(college: &str, club: &str) -> IngestionRow {
        IngestionRow {
            line: 2,
            fields: ClubFields {
                college_name: college.into(),
                club_name: club.into(),
                ..Default::default()
            },
        }
    }

    #[tokio::test]
    async fn stored_club_is_a_duplicate() {
        let store = MemoryClubStore::new();
        store.seed([row("MIT-WPU", "Coding Club").fields]).await;
        let mut resolver = DuplicateResolver::new(&store);

        assert_matches!(
            resolver.resolve(row("MIT-WPU", "Coding Club")).await,
            Ok(Resolution::Duplicate {
                of: DuplicateOf::Stored(1),
                ..
            })
        );
    }

    #[tokio::test]
    async fn repeat_within_upload_is_a_duplicate_of_the_earlier_row() {
        let store = MemoryClubStore::new();
        let mut resolver = DuplicateResolver::new(&store);

        assert_matches!(
            resolver.resolve(row("MIT-WPU", "Coding Club")).await,
            Ok(Resolution::Unique(_))
        );
        assert_matches!(
            resolver.resolve(row("MIT-WPU", "Coding Club")).await,
            Ok(Resolution::Duplicate {
                of: DuplicateOf::EarlierRow,
                ..
            })
        );
    }

    #[tokio::test]
    async fn key_match_is_case_sensitive() {
        let store = MemoryClubStore::new();
        store.seed([row("MIT-WPU", "Coding Club").fields]).await;
        let mut resolver = DuplicateResolver::new(&store);

        assert_matches!(
            resolver.resolve(row("MIT-WPU", "coding club")).await,
            Ok(Resolution::Unique(_))
        );
    }

    #[tokio::test]
    async fn same_club_name_at_another_college_is_unique() {
        let store = MemoryClubStore::new();
        store.seed([row("MIT-WPU", "Chess Club").fields]).await;
        let mut resolver = DuplicateResolver::new(&store);

        assert_matches!(
            resolver.resolve(row("COEP", "Chess Club")).await,
            Ok(Resolution::Unique(_))
        );
    }

    #[tokio::test]
    async fn store_failure_propagates() {
        let store = MemoryClubStore::new();
        store.set_offline(true).await;
        let mut resolver = DuplicateResolver::new(&store);

        assert_matches!(
            resolver.resolve(row("A", "B")).await,
            Err(StoreError::Connection(_))
        );
    }
}

//! In-memory [`ClubStore`] for tests and local experiments.
//!
//! Mirrors the PostgreSQL store's observable behavior: ids are assigned in
//! insertion order, blank college or club names are refused per record (the
//! `clubs` table has check constraints for them), and lookups are exact.
//! Two knobs simulate storage trouble: refusing specific natural keys at
//! insert time, and taking the whole store offline.

use std::collections::HashSet;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{ClubStore, FailedInsert, InsertManyOutcome, StoreError};
use crate::club::{ClubFields, ClubRecord, NaturalKey};
use crate::types::DbId;

#[derive(Debug, Default)]
struct MemoryState {
    clubs: Vec<ClubRecord>,
    last_id: DbId,
    refused_keys: HashSet<NaturalKey>,
    offline: bool,
}

/// Thread-safe in-memory club store.
#[derive(Debug, Default)]
pub struct MemoryClubStore {
    state: RwLock<MemoryState>,
}

impl MemoryClubStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert clubs directly, bypassing the refusal knobs.
    pub async fn seed(&self, clubs: impl IntoIterator<Item = ClubFields>) {
        let mut state = self.state.write().await;
        for fields in clubs {
            let record = state.next_record(fields);
            state.clubs.push(record);
        }
    }

    /// Refuse any future insert of this natural key, as a storage-level
    /// validation failure would.
    pub async fn refuse_key(&self, key: NaturalKey) {
        self.state.write().await.refused_keys.insert(key);
    }

    /// Make every call fail with [`StoreError::Connection`] while `offline`.
    pub async fn set_offline(&self, offline: bool) {
        self.state.write().await.offline = offline;
    }

    /// Snapshot of all stored clubs in insertion order.
    pub async fn clubs(&self) -> Vec<ClubRecord> {
        self.state.read().await.clubs.clone()
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.clubs.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl MemoryState {
    fn next_record(&mut self, fields: ClubFields) -> ClubRecord {
        self.last_id += 1;
        let now = chrono::Utc::now();
        ClubRecord {
            id: self.last_id,
            fields,
            created_at: now,
            updated_at: now,
        }
    }

    fn check_online(&self) -> Result<(), StoreError> {
        if self.offline {
            return Err(StoreError::Connection("memory store is offline".into()));
        }
        Ok(())
    }

    fn refusal_reason(&self, fields: &ClubFields) -> Option<String> {
        if fields.college_name.trim().is_empty() || fields.club_name.trim().is_empty() {
            return Some("college and club name must not be empty".into());
        }
        let key = fields.natural_key();
        self.refused_keys
            .contains(&key)
            .then(|| format!("insert refused for {key}"))
    }
}

#[async_trait]
impl ClubStore for MemoryClubStore {
    async fn find_one(
        &self,
        college_name: &str,
        club_name: &str,
    ) -> Result<Option<ClubRecord>, StoreError> {
        let state = self.state.read().await;
        state.check_online()?;
        Ok(state
            .clubs
            .iter()
            .find(|c| c.fields.college_name == college_name && c.fields.club_name == club_name)
            .cloned())
    }

    async fn insert_many(&self, clubs: &[ClubFields]) -> Result<InsertManyOutcome, StoreError> {
        let mut state = self.state.write().await;
        state.check_online()?;

        let mut outcome = InsertManyOutcome::default();
        for (index, fields) in clubs.iter().enumerate() {
            if let Some(reason) = state.refusal_reason(fields) {
                outcome.failed.push(FailedInsert { index, reason });
                continue;
            }
            let record = state.next_record(fields.clone());
            state.clubs.push(record.clone());
            outcome.inserted.push(record);
        }
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn club(college: &str, name: &str) -> ClubFields {
        ClubFields {
            college_name: college.into(),
            club_name: name.into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn find_one_is_exact_and_case_sensitive() {
        let store = MemoryClubStore::new();
        store.seed([club("MIT-WPU", "Coding Club")]).await;

        assert!(store.find_one("MIT-WPU", "Coding Club").await.unwrap().is_some());
        assert!(store.find_one("mit-wpu", "Coding Club").await.unwrap().is_none());
        assert!(store.find_one("MIT-WPU", "Coding Club ").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn insert_many_skips_refused_records_but_keeps_siblings() {
        let store = MemoryClubStore::new();
        store.refuse_key(NaturalKey::new("B", "Two")).await;

        let outcome = store
            .insert_many(&[club("A", "One"), club("B", "Two"), club("C", "Three")])
            .await
            .unwrap();

        assert_eq!(outcome.inserted.len(), 2);
        assert_eq!(outcome.failed.len(), 1);
        assert_eq!(outcome.failed[0].index, 1);
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn blank_names_are_refused_like_the_database_constraint() {
        let store = MemoryClubStore::new();
        let outcome = store.insert_many(&[club("", "Chess")]).await.unwrap();
        assert!(outcome.inserted.is_empty());
        assert_eq!(outcome.failed[0].index, 0);
    }

    #[tokio::test]
    async fn ids_increase_in_insertion_order() {
        let store = MemoryClubStore::new();
        let outcome = store
            .insert_many(&[club("A", "One"), club("A", "Two")])
            .await
            .unwrap();
        assert_eq!(outcome.inserted[0].id, 1);
        assert_eq!(outcome.inserted[1].id, 2);
    }

    #[tokio::test]
    async fn offline_store_fails_every_call() {
        let store = MemoryClubStore::new();
        store.set_offline(true).await;

        assert_matches!(
            store.find_one("A", "One").await,
            Err(StoreError::Connection(_))
        );
        assert_matches!(
            store.insert_many(&[club("A", "One")]).await,
            Err(StoreError::Connection(_))
        );
    }
}

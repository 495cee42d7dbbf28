//! In-memory trials table - test and development double for PostgreSQL.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::UserId;
use crate::domain::trial::TrialRecord;
use crate::ports::{RemoteStoreError, RemoteTable};

/// In-memory implementation of `RemoteTable<TrialRecord>`.
///
/// The availability switch stages remote outages: while flipped off, every
/// call fails with a retryable error, and rows written earlier stay put for
/// when the store comes back.
#[derive(Debug, Clone)]
pub struct InMemoryTrialTable {
    rows: Arc<RwLock<HashMap<String, TrialRecord>>>,
    available: Arc<AtomicBool>,
}

impl InMemoryTrialTable {
    pub fn new() -> Self {
        Self {
            rows: Arc::new(RwLock::new(HashMap::new())),
            available: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Flip the outage switch
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Number of stored rows (useful for tests)
    pub async fn row_count(&self) -> usize {
        self.rows.read().await.len()
    }
}

impl Default for InMemoryTrialTable {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RemoteTable<TrialRecord> for InMemoryTrialTable {
    async fn fetch_latest(
        &self,
        user_id: &UserId,
    ) -> Result<Option<TrialRecord>, RemoteStoreError> {
        if !self.available.load(Ordering::SeqCst) {
            return Err(RemoteStoreError::transient_io("trials store offline"));
        }
        Ok(self.rows.read().await.get(user_id.as_str()).cloned())
    }

    async fn upsert(&self, record: &TrialRecord) -> Result<(), RemoteStoreError> {
        if !self.available.load(Ordering::SeqCst) {
            return Err(RemoteStoreError::transient_io("trials store offline"));
        }
        self.rows
            .write()
            .await
            .insert(record.user_id.as_str().to_string(), record.clone());
        Ok(())
    }
}

//! In-memory subscriptions table - test and development double for PostgreSQL.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::UserId;
use crate::domain::subscription::{SubscriptionRecord, SubscriptionStatus};
use crate::ports::{RemoteStoreError, RemoteTable};

/// In-memory implementation of `RemoteTable<SubscriptionRecord>`.
///
/// Rows are keyed by subscription id and the fetch mirrors the PostgreSQL
/// adapter: newest active row for the user, or none. The availability
/// switch stages remote outages.
#[derive(Debug, Clone)]
pub struct InMemorySubscriptionTable {
    rows: Arc<RwLock<HashMap<String, SubscriptionRecord>>>,
    available: Arc<AtomicBool>,
}

impl InMemorySubscriptionTable {
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

impl Default for InMemorySubscriptionTable {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RemoteTable<SubscriptionRecord> for InMemorySubscriptionTable {
    async fn fetch_latest(
        &self,
        user_id: &UserId,
    ) -> Result<Option<SubscriptionRecord>, RemoteStoreError> {
        if !self.available.load(Ordering::SeqCst) {
            return Err(RemoteStoreError::transient_io("subscriptions store offline"));
        }
        let rows = self.rows.read().await;
        Ok(rows
            .values()
            .filter(|r| r.user_id == *user_id && r.status == SubscriptionStatus::Active)
            .max_by_key(|r| *r.created_at.as_datetime())
            .cloned())
    }

    async fn upsert(&self, record: &SubscriptionRecord) -> Result<(), RemoteStoreError> {
        if !self.available.load(Ordering::SeqCst) {
            return Err(RemoteStoreError::transient_io("subscriptions store offline"));
        }
        self.rows
            .write()
            .await
            .insert(record.id.to_string(), record.clone());
        Ok(())
    }
}

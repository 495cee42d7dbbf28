//! TrialLifecycleManager - creates, reads, extends, and terminates trials.

use std::sync::Arc;

use crate::application::cache_keys;
use crate::application::dual_store::DualStore;
use crate::domain::foundation::{Timestamp, TrialId, UserId};
use crate::domain::trial::{TrialError, TrialRecord};
use crate::ports::{CacheStore, RemoteTable};

/// Manages the single per-user trial record over the dual store.
///
/// Reads are remote-first with cache fallback; every record obtained from
/// the remote store is written through to the cache. Derived fields
/// (days remaining, expired) are never read from storage, only recomputed.
pub struct TrialLifecycleManager {
    store: DualStore<TrialRecord>,
    total_days: i32,
}

impl TrialLifecycleManager {
    pub fn new(
        remote: Arc<dyn RemoteTable<TrialRecord>>,
        cache: Arc<dyn CacheStore>,
        total_days: i32,
    ) -> Self {
        Self {
            store: DualStore::new(remote, cache, "trials"),
            total_days,
        }
    }

    /// Look up the user's trial, remote-first with cache fallback.
    ///
    /// A clean remote "no record" still consults the cache: a trial created
    /// during a remote outage lives only there until a later write lands,
    /// and forgetting it would re-grant trials.
    pub async fn get_status(&self, user_id: &UserId) -> Option<TrialRecord> {
        let key = cache_keys::trial_status(user_id);

        match self.store.read_remote(user_id).await {
            Ok(Some(record)) => {
                self.store.write_cache(&key, &record).await;
                Some(record)
            }
            Ok(None) => self.store.read_cache(&key).await,
            Err(e) => {
                tracing::warn!(
                    user_id = %user_id,
                    error = %e,
                    "Trial remote read failed, falling back to cache"
                );
                self.store.read_cache(&key).await
            }
        }
    }

    /// Grant the user's trial if none exists yet. Idempotent.
    ///
    /// An existing record, found anywhere, is returned unchanged. Otherwise
    /// a new window is anchored on the account creation day (or today when
    /// unknown) and persisted best-effort to remote, unconditionally to
    /// cache. Returns `None` without creating anything when the account is
    /// no longer eligible.
    pub async fn initialize(
        &self,
        user_id: &UserId,
        account_created_at: Option<Timestamp>,
    ) -> Option<TrialRecord> {
        // 1. Idempotence: an existing trial always wins
        if let Some(existing) = self.get_status(user_id).await {
            return Some(existing);
        }

        // 2. Eligibility gate
        let now = Timestamp::now();
        if !TrialRecord::account_eligible(account_created_at, now, self.total_days) {
            tracing::debug!(
                user_id = %user_id,
                "Account past the trial eligibility window, not granting"
            );
            return None;
        }

        // 3. Create and persist
        let anchor = account_created_at.unwrap_or(now);
        let record = TrialRecord::create(
            TrialId::new(),
            user_id.clone(),
            anchor,
            self.total_days,
            now,
        );
        tracing::info!(
            user_id = %user_id,
            start_date = ?record.start_date,
            end_date = ?record.end_date,
            "Granting trial"
        );
        self.store.write_remote_best_effort(&record).await;
        self.store
            .write_cache(&cache_keys::trial_status(user_id), &record)
            .await;
        Some(record)
    }

    /// Extend the user's active trial by the given number of days.
    ///
    /// # Errors
    ///
    /// `NotFound` when no record exists anywhere; `InvalidState` when the
    /// record has been deactivated.
    pub async fn extend(&self, user_id: &UserId, days: i32) -> Result<TrialRecord, TrialError> {
        let mut record = self
            .get_status(user_id)
            .await
            .ok_or_else(|| TrialError::not_found(user_id.clone()))?;

        record.extend(days, Timestamp::now())?;

        self.store.write_remote_best_effort(&record).await;
        self.store
            .write_cache(&cache_keys::trial_status(user_id), &record)
            .await;
        Ok(record)
    }

    /// Deactivate the user's trial.
    ///
    /// The record survives deactivated in the remote store; only the cache
    /// entry is dropped.
    ///
    /// # Errors
    ///
    /// `NotFound` when no record exists anywhere.
    pub async fn terminate(&self, user_id: &UserId) -> Result<(), TrialError> {
        let mut record = self
            .get_status(user_id)
            .await
            .ok_or_else(|| TrialError::not_found(user_id.clone()))?;

        record.deactivate(Timestamp::now());

        self.store
            .clear_cache(&cache_keys::trial_status(user_id))
            .await;
        self.store.write_remote_best_effort(&record).await;
        Ok(())
    }

    /// Drop the cached trial entry without touching the record.
    ///
    /// Used when a subscription takes precedence, so the UI never shows a
    /// trial banner to an active subscriber.
    pub async fn clear_cached_status(&self, user_id: &UserId) {
        self.store
            .clear_cache(&cache_keys::trial_status(user_id))
            .await;
    }
}

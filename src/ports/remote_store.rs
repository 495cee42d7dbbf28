//! Remote Store Port - Interface to the authoritative row store.
//!
//! One logical table per record family (trials, subscriptions), queried by
//! user. The engine makes a single attempt per call; failures are classified
//! but never retried here (the next user-triggered resolution retries
//! naturally).

use async_trait::async_trait;

use crate::domain::foundation::UserId;

/// Errors that can occur on a remote store call.
///
/// Both classes are non-fatal to entitlement resolution; callers fall back
/// to the local cache. They stay distinguishable for logs and operators.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RemoteStoreError {
    /// The backing table or schema has not been provisioned yet.
    #[error("Remote table '{table}' is not provisioned")]
    DataUnavailable { table: String },

    /// A single-call network or auth failure.
    #[error("Transient remote store failure: {message}")]
    TransientIo { message: String },
}

impl RemoteStoreError {
    pub fn data_unavailable(table: impl Into<String>) -> Self {
        RemoteStoreError::DataUnavailable {
            table: table.into(),
        }
    }

    pub fn transient_io(message: impl Into<String>) -> Self {
        RemoteStoreError::TransientIo {
            message: message.into(),
        }
    }

    /// Returns true if a later, user-triggered attempt could succeed.
    ///
    /// An unprovisioned table will not heal on its own; a transient failure
    /// may.
    pub fn is_retryable(&self) -> bool {
        matches!(self, RemoteStoreError::TransientIo { .. })
    }
}

/// Port for one record family in the authoritative remote store.
#[async_trait]
pub trait RemoteTable<R>: Send + Sync
where
    R: Send + Sync,
{
    /// Fetch the most recent relevant record for a user.
    ///
    /// Each implementation defines "relevant" for its family: the trial
    /// table returns the user's single trial row, the subscription table
    /// the newest row with active status. `Ok(None)` is an authoritative
    /// "no record", distinct from any error.
    ///
    /// # Errors
    /// Returns `RemoteStoreError` classified per the failure taxonomy.
    async fn fetch_latest(&self, user_id: &UserId) -> Result<Option<R>, RemoteStoreError>;

    /// Insert or update a record.
    ///
    /// # Errors
    /// Returns `RemoteStoreError` classified per the failure taxonomy.
    async fn upsert(&self, record: &R) -> Result<(), RemoteStoreError>;
}

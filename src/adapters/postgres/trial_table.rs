//! PostgreSQL implementation of the trials RemoteTable.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{Timestamp, TrialId, UserId};
use crate::domain::trial::TrialRecord;
use crate::ports::{RemoteStoreError, RemoteTable};

/// Postgres error code for a relation that does not exist.
const UNDEFINED_TABLE: &str = "42P01";

const TABLE: &str = "trials";

/// PostgreSQL implementation of `RemoteTable<TrialRecord>`.
///
/// One row per user. The upsert keeps the original window anchor and
/// creation time; only the mutable lifecycle columns move.
#[derive(Clone)]
pub struct PostgresTrialTable {
    pool: PgPool,
}

impl PostgresTrialTable {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RemoteTable<TrialRecord> for PostgresTrialTable {
    async fn fetch_latest(
        &self,
        user_id: &UserId,
    ) -> Result<Option<TrialRecord>, RemoteStoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, start_date, end_date, is_active, total_days,
                   created_at, updated_at
            FROM trials
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| classify("Failed to fetch trial", e))?;

        row.map(row_to_trial).transpose()
    }

    async fn upsert(&self, record: &TrialRecord) -> Result<(), RemoteStoreError> {
        sqlx::query(
            r#"
            INSERT INTO trials (
                id, user_id, start_date, end_date, is_active, total_days,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (user_id) DO UPDATE SET
                end_date = EXCLUDED.end_date,
                is_active = EXCLUDED.is_active,
                total_days = EXCLUDED.total_days,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(record.id.as_uuid())
        .bind(record.user_id.as_str())
        .bind(record.start_date.as_datetime())
        .bind(record.end_date.as_datetime())
        .bind(record.is_active)
        .bind(record.total_days)
        .bind(record.created_at.as_datetime())
        .bind(record.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| classify("Failed to upsert trial", e))?;

        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn classify(context: &str, error: sqlx::Error) -> RemoteStoreError {
    if let Some(db_error) = error.as_database_error() {
        if db_error.code().as_deref() == Some(UNDEFINED_TABLE) {
            return RemoteStoreError::data_unavailable(TABLE);
        }
    }
    RemoteStoreError::transient_io(format!("{}: {}", context, error))
}

fn row_to_trial(row: sqlx::postgres::PgRow) -> Result<TrialRecord, RemoteStoreError> {
    let id: uuid::Uuid = row
        .try_get("id")
        .map_err(|e| RemoteStoreError::transient_io(format!("Failed to read id: {}", e)))?;

    let user_id: String = row
        .try_get("user_id")
        .map_err(|e| RemoteStoreError::transient_io(format!("Failed to read user_id: {}", e)))?;

    let start_date: chrono::DateTime<chrono::Utc> = row
        .try_get("start_date")
        .map_err(|e| RemoteStoreError::transient_io(format!("Failed to read start_date: {}", e)))?;

    let end_date: chrono::DateTime<chrono::Utc> = row
        .try_get("end_date")
        .map_err(|e| RemoteStoreError::transient_io(format!("Failed to read end_date: {}", e)))?;

    let is_active: bool = row
        .try_get("is_active")
        .map_err(|e| RemoteStoreError::transient_io(format!("Failed to read is_active: {}", e)))?;

    let total_days: i32 = row
        .try_get("total_days")
        .map_err(|e| RemoteStoreError::transient_io(format!("Failed to read total_days: {}", e)))?;

    let created_at: chrono::DateTime<chrono::Utc> = row
        .try_get("created_at")
        .map_err(|e| RemoteStoreError::transient_io(format!("Failed to read created_at: {}", e)))?;

    let updated_at: chrono::DateTime<chrono::Utc> = row
        .try_get("updated_at")
        .map_err(|e| RemoteStoreError::transient_io(format!("Failed to read updated_at: {}", e)))?;

    Ok(TrialRecord {
        id: TrialId::from_uuid(id),
        user_id: UserId::new(user_id)
            .map_err(|e| RemoteStoreError::transient_io(format!("Invalid user_id: {}", e)))?,
        start_date: Timestamp::from_datetime(start_date),
        end_date: Timestamp::from_datetime(end_date),
        is_active,
        total_days,
        created_at: Timestamp::from_datetime(created_at),
        updated_at: Timestamp::from_datetime(updated_at),
    })
}

//! PostgreSQL implementation of the subscriptions RemoteTable.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{SubscriptionId, Timestamp, UserId};
use crate::domain::subscription::{SubscriptionRecord, SubscriptionStatus};
use crate::ports::{RemoteStoreError, RemoteTable};

const UNDEFINED_TABLE: &str = "42P01";

const TABLE: &str = "subscriptions";

/// PostgreSQL implementation of `RemoteTable<SubscriptionRecord>`.
///
/// Users can accumulate several subscription rows over their lifetime, so
/// the fetch narrows to active rows and takes the newest. Rows keep their
/// provider id as primary key; the upsert reconciles lifecycle columns on
/// conflict.
#[derive(Clone)]
pub struct PostgresSubscriptionTable {
    pool: PgPool,
}

impl PostgresSubscriptionTable {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RemoteTable<SubscriptionRecord> for PostgresSubscriptionTable {
    async fn fetch_latest(
        &self,
        user_id: &UserId,
    ) -> Result<Option<SubscriptionRecord>, RemoteStoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, status, cancel_at_period_end, end_date,
                   next_billing_date, plan_name, amount_cents, currency,
                   created_at, updated_at
            FROM subscriptions
            WHERE user_id = $1 AND status = 'active'
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| classify("Failed to fetch subscription", e))?;

        row.map(row_to_subscription).transpose()
    }

    async fn upsert(&self, record: &SubscriptionRecord) -> Result<(), RemoteStoreError> {
        sqlx::query(
            r#"
            INSERT INTO subscriptions (
                id, user_id, status, cancel_at_period_end, end_date,
                next_billing_date, plan_name, amount_cents, currency,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ON CONFLICT (id) DO UPDATE SET
                status = EXCLUDED.status,
                cancel_at_period_end = EXCLUDED.cancel_at_period_end,
                end_date = EXCLUDED.end_date,
                next_billing_date = EXCLUDED.next_billing_date,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(record.id.as_uuid())
        .bind(record.user_id.as_str())
        .bind(record.status.as_str())
        .bind(record.cancel_at_period_end)
        .bind(record.end_date.as_ref().map(Timestamp::as_datetime))
        .bind(record.next_billing_date.as_ref().map(Timestamp::as_datetime))
        .bind(&record.plan_name)
        .bind(record.amount_cents)
        .bind(&record.currency)
        .bind(record.created_at.as_datetime())
        .bind(record.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| classify("Failed to upsert subscription", e))?;

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

fn row_to_subscription(row: sqlx::postgres::PgRow) -> Result<SubscriptionRecord, RemoteStoreError> {
    let id: uuid::Uuid = row
        .try_get("id")
        .map_err(|e| RemoteStoreError::transient_io(format!("Failed to read id: {}", e)))?;

    let user_id: String = row
        .try_get("user_id")
        .map_err(|e| RemoteStoreError::transient_io(format!("Failed to read user_id: {}", e)))?;

    let status_str: String = row
        .try_get("status")
        .map_err(|e| RemoteStoreError::transient_io(format!("Failed to read status: {}", e)))?;
    let status = SubscriptionStatus::parse(&status_str)
        .map_err(|e| RemoteStoreError::transient_io(format!("Invalid status: {}", e)))?;

    let cancel_at_period_end: bool = row.try_get("cancel_at_period_end").map_err(|e| {
        RemoteStoreError::transient_io(format!("Failed to read cancel_at_period_end: {}", e))
    })?;

    let end_date: Option<chrono::DateTime<chrono::Utc>> = row
        .try_get("end_date")
        .map_err(|e| RemoteStoreError::transient_io(format!("Failed to read end_date: {}", e)))?;

    let next_billing_date: Option<chrono::DateTime<chrono::Utc>> =
        row.try_get("next_billing_date").map_err(|e| {
            RemoteStoreError::transient_io(format!("Failed to read next_billing_date: {}", e))
        })?;

    let plan_name: String = row
        .try_get("plan_name")
        .map_err(|e| RemoteStoreError::transient_io(format!("Failed to read plan_name: {}", e)))?;

    let amount_cents: i64 = row.try_get("amount_cents").map_err(|e| {
        RemoteStoreError::transient_io(format!("Failed to read amount_cents: {}", e))
    })?;

    let currency: String = row
        .try_get("currency")
        .map_err(|e| RemoteStoreError::transient_io(format!("Failed to read currency: {}", e)))?;

    let created_at: chrono::DateTime<chrono::Utc> = row
        .try_get("created_at")
        .map_err(|e| RemoteStoreError::transient_io(format!("Failed to read created_at: {}", e)))?;

    let updated_at: chrono::DateTime<chrono::Utc> = row
        .try_get("updated_at")
        .map_err(|e| RemoteStoreError::transient_io(format!("Failed to read updated_at: {}", e)))?;

    Ok(SubscriptionRecord {
        id: SubscriptionId::from_uuid(id),
        user_id: UserId::new(user_id)
            .map_err(|e| RemoteStoreError::transient_io(format!("Invalid user_id: {}", e)))?,
        status,
        cancel_at_period_end,
        end_date: end_date.map(Timestamp::from_datetime),
        next_billing_date: next_billing_date.map(Timestamp::from_datetime),
        plan_name,
        amount_cents,
        currency,
        created_at: Timestamp::from_datetime(created_at),
        updated_at: Timestamp::from_datetime(updated_at),
    })
}

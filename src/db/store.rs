use super::queries;
use super::DbPool;
use crate::error::Result;
use crate::models::{AlertRecord, AlertRow, NaturalKey, RecordKind};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Persistence seam for alert records.
#[async_trait]
pub trait AlertStore: Send + Sync {
    async fn find_by_key(&self, key: &NaturalKey) -> Result<Option<AlertRecord>>;

    /// Inserts `record`. Returns `None` when a record with the same natural
    /// key already exists; the store must enforce that uniqueness itself.
    async fn insert(&self, record: &AlertRecord) -> Result<Option<AlertRecord>>;

    async fn count(&self, kind: RecordKind) -> Result<i64>;

    /// Records with a `valid_to` that has not passed yet. Records without an
    /// expiry are not counted, unlike `AlertRecord::is_active`.
    async fn count_unexpired(&self, now: DateTime<Utc>) -> Result<i64>;
}

/// Postgres-backed store over `space_weather_alerts`.
pub struct PgAlertStore {
    pool: DbPool,
}

impl PgAlertStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AlertStore for PgAlertStore {
    async fn find_by_key(&self, key: &NaturalKey) -> Result<Option<AlertRecord>> {
        let row = sqlx::query_as::<_, AlertRow>(queries::SELECT_ALERT_BY_NATURAL_KEY)
            .bind(key.kind.as_str())
            .bind(&key.message_code)
            .bind(&key.serial_number)
            .bind(key.issue_time)
            .fetch_optional(&self.pool)
            .await?;
        row.map(AlertRecord::try_from).transpose()
    }

    async fn insert(&self, record: &AlertRecord) -> Result<Option<AlertRecord>> {
        let row = AlertRow::from(record);
        let inserted = sqlx::query_as::<_, AlertRow>(queries::INSERT_ALERT)
            .bind(row.id)
            .bind(&row.family)
            .bind(&row.message_code)
            .bind(&row.serial_number)
            .bind(row.issue_time)
            .bind(&row.warning_type)
            .bind(&row.full_message)
            .bind(row.begin_time)
            .bind(row.valid_from)
            .bind(row.valid_to)
            .bind(&row.estimated_velocity)
            .bind(&row.description)
            .bind(&row.warning_condition)
            .bind(&row.noaa_scale)
            .bind(&row.potential_impacts)
            .bind(&row.maximum_flux)
            .bind(&row.forecast_data)
            .bind(row.created_at)
            .bind(row.is_processed)
            .fetch_optional(&self.pool)
            .await?;
        inserted.map(AlertRecord::try_from).transpose()
    }

    async fn count(&self, kind: RecordKind) -> Result<i64> {
        let count: i64 = sqlx::query_scalar(queries::COUNT_ALERTS_BY_FAMILY)
            .bind(kind.as_str())
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn count_unexpired(&self, now: DateTime<Utc>) -> Result<i64> {
        let count: i64 = sqlx::query_scalar(queries::COUNT_UNEXPIRED_ALERTS)
            .bind(now)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

//! Measurement repository for database operations

use anyhow::Result;
use chrono::{DateTime, Utc};
use motivate_shared::{MeasurementDto, MeasurementRecord};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

/// Measurement joined with its metric type
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MeasurementRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub metric_type_id: i32,
    pub metric_name: String,
    pub metric_unit: String,
    pub value: Decimal,
    pub measured_at: DateTime<Utc>,
    pub source: Option<String>,
    pub notes: Option<String>,
}

impl MeasurementRow {
    pub fn to_record(&self) -> MeasurementRecord {
        MeasurementRecord::new(self.metric_type_id, self.value.to_string(), self.measured_at)
    }
}

impl From<MeasurementRow> for MeasurementDto {
    fn from(r: MeasurementRow) -> Self {
        MeasurementDto {
            id: Some(r.id),
            metric_type_id: r.metric_type_id,
            metric_name: Some(r.metric_name),
            metric_unit: Some(r.metric_unit),
            value: r.value.to_string(),
            measured_at: r.measured_at,
            source: r.source,
            notes: r.notes,
        }
    }
}

/// Input for inserting a measurement
#[derive(Debug, Clone)]
pub struct CreateMeasurement {
    pub user_id: Uuid,
    pub metric_type_id: i32,
    pub value: Decimal,
    pub measured_at: DateTime<Utc>,
    pub source: String,
    pub notes: Option<String>,
}

/// Measurement repository
pub struct MeasurementRepository;

impl MeasurementRepository {
    /// Insert a measurement
    ///
    /// Fails with a unique violation when the user already has a value for
    /// this metric at exactly `measured_at`.
    pub async fn create(pool: &PgPool, input: CreateMeasurement) -> Result<Uuid> {
        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO measurements (user_id, metric_type_id, value, measured_at, source, notes)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(input.user_id)
        .bind(input.metric_type_id)
        .bind(input.value)
        .bind(input.measured_at)
        .bind(&input.source)
        .bind(&input.notes)
        .fetch_one(pool)
        .await?;

        Ok(id)
    }

    /// Latest measurement of every metric type for a user
    pub async fn latest_per_metric(pool: &PgPool, user_id: Uuid) -> Result<Vec<MeasurementRow>> {
        let rows = sqlx::query_as::<_, MeasurementRow>(
            r#"
            SELECT DISTINCT ON (m.metric_type_id)
                   m.id, m.user_id, m.metric_type_id,
                   mt.name AS metric_name, mt.unit AS metric_unit,
                   m.value, m.measured_at, m.source, m.notes
            FROM measurements m
            JOIN metric_types mt ON mt.id = m.metric_type_id
            WHERE m.user_id = $1
            ORDER BY m.metric_type_id, m.measured_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }

    /// One measurement per UTC day, the latest of that day, oldest day first
    ///
    /// `start` is inclusive and `end` exclusive; either may be open.
    pub async fn daily_history(
        pool: &PgPool,
        user_id: Uuid,
        metric_type_id: i32,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Result<Vec<MeasurementRow>> {
        let rows = sqlx::query_as::<_, MeasurementRow>(
            r#"
            SELECT id, user_id, metric_type_id, metric_name, metric_unit,
                   value, measured_at, source, notes
            FROM (
                SELECT DISTINCT ON ((m.measured_at AT TIME ZONE 'UTC')::date)
                       m.id, m.user_id, m.metric_type_id,
                       mt.name AS metric_name, mt.unit AS metric_unit,
                       m.value, m.measured_at, m.source, m.notes
                FROM measurements m
                JOIN metric_types mt ON mt.id = m.metric_type_id
                WHERE m.user_id = $1
                  AND m.metric_type_id = $2
                  AND ($3::timestamptz IS NULL OR m.measured_at >= $3)
                  AND ($4::timestamptz IS NULL OR m.measured_at < $4)
                ORDER BY (m.measured_at AT TIME ZONE 'UTC')::date, m.measured_at DESC
            ) per_day
            ORDER BY measured_at ASC
            "#,
        )
        .bind(user_id)
        .bind(metric_type_id)
        .bind(start)
        .bind(end)
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }
}

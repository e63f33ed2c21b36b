//! Metric type catalog repository

use anyhow::Result;
use chrono::{DateTime, Utc};
use motivate_shared::{MetricCatalogEntry, MetricTypeDto};
use sqlx::PgPool;

/// Metric type record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MetricTypeRecord {
    pub id: i32,
    pub name: String,
    pub unit: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<MetricTypeRecord> for MetricTypeDto {
    fn from(r: MetricTypeRecord) -> Self {
        MetricTypeDto {
            id: r.id,
            name: r.name,
            unit: r.unit,
            description: r.description,
            created_at: Some(r.created_at),
        }
    }
}

impl From<MetricTypeRecord> for MetricCatalogEntry {
    fn from(r: MetricTypeRecord) -> Self {
        MetricCatalogEntry {
            id: r.id,
            name: r.name,
            unit: r.unit,
            description: r.description,
        }
    }
}

/// Metric type repository
pub struct MetricTypeRepository;

impl MetricTypeRepository {
    /// All metric types ordered by id
    pub async fn list(pool: &PgPool) -> Result<Vec<MetricTypeRecord>> {
        let records = sqlx::query_as::<_, MetricTypeRecord>(
            r#"
            SELECT id, name, unit, description, created_at
            FROM metric_types
            ORDER BY id
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    pub async fn get_by_id(pool: &PgPool, id: i32) -> Result<Option<MetricTypeRecord>> {
        let record = sqlx::query_as::<_, MetricTypeRecord>(
            r#"
            SELECT id, name, unit, description, created_at
            FROM metric_types
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// Insert a metric type, returning its id
    pub async fn create(pool: &PgPool, name: &str, unit: &str, description: Option<&str>) -> Result<i32> {
        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO metric_types (name, unit, description)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(name)
        .bind(unit)
        .bind(description)
        .fetch_one(pool)
        .await?;

        Ok(id)
    }
}

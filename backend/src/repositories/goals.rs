//! Goals repository for database operations

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use motivate_shared::{GoalDto, GoalRecord, MetricTypeDto};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

/// Goal joined with its metric type
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct GoalRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub metric_type_id: i32,
    pub goal_type: String,
    pub target_value: Decimal,
    pub start_date: NaiveDate,
    pub target_date: Option<NaiveDate>,
    pub active: bool,
    pub achieved: bool,
    pub created_at: DateTime<Utc>,
    pub metric_name: String,
    pub metric_unit: String,
    pub metric_description: Option<String>,
    pub metric_created_at: DateTime<Utc>,
}

impl GoalRow {
    pub fn to_record(&self) -> GoalRecord {
        GoalRecord {
            metric_type_id: self.metric_type_id,
            target_value: self.target_value.to_string(),
            start_date: Some(self.start_date),
            active: self.active,
        }
    }
}

impl From<GoalRow> for GoalDto {
    fn from(r: GoalRow) -> Self {
        GoalDto {
            id: Some(r.id),
            metric_type_id: r.metric_type_id,
            goal_type: Some(r.goal_type),
            target_value: r.target_value.to_string(),
            start_date: Some(r.start_date),
            target_date: r.target_date,
            active: r.active,
            achieved: r.achieved,
            metric_type: Some(MetricTypeDto {
                id: r.metric_type_id,
                name: r.metric_name,
                unit: r.metric_unit,
                description: r.metric_description,
                created_at: Some(r.metric_created_at),
            }),
        }
    }
}

/// Input for creating a goal
#[derive(Debug, Clone)]
pub struct CreateGoal {
    pub user_id: Uuid,
    pub metric_type_id: i32,
    /// `daily` or `long_term`
    pub goal_type: String,
    pub target_value: Decimal,
    pub start_date: NaiveDate,
    pub target_date: Option<NaiveDate>,
}

/// Goal repository
pub struct GoalRepository;

impl GoalRepository {
    pub async fn create(pool: &PgPool, input: CreateGoal) -> Result<Uuid> {
        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO goals (user_id, metric_type_id, type, target_value, start_date, target_date)
            VALUES ($1, $2, $3::goal_type, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(input.user_id)
        .bind(input.metric_type_id)
        .bind(&input.goal_type)
        .bind(input.target_value)
        .bind(input.start_date)
        .bind(input.target_date)
        .fetch_one(pool)
        .await?;

        Ok(id)
    }

    /// Active goals for a user, ordered by metric type then start date
    pub async fn active_for_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<GoalRow>> {
        let rows = sqlx::query_as::<_, GoalRow>(
            r#"
            SELECT g.id, g.user_id, g.metric_type_id, g.type::text AS goal_type,
                   g.target_value, g.start_date, g.target_date, g.active, g.achieved,
                   g.created_at,
                   mt.name AS metric_name, mt.unit AS metric_unit,
                   mt.description AS metric_description,
                   mt.created_at AS metric_created_at
            FROM goals g
            JOIN metric_types mt ON mt.id = g.metric_type_id
            WHERE g.user_id = $1 AND g.active = TRUE
            ORDER BY g.metric_type_id, g.start_date
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }
}

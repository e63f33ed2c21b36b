//! Measurement and goal reads plus measurement ingestion

use crate::error::{is_foreign_key_violation, is_unique_violation, ApiError};
use crate::repositories::{CreateMeasurement, GoalRepository, MeasurementRepository, UserRepository};
use chrono::Days;
use motivate_shared::dates::utc_midnight;
use motivate_shared::{CreateMeasurementRequest, GoalDto, MeasurementDto, MeasurementRangeQuery};
use sqlx::PgPool;
use tracing::{debug, info};
use uuid::Uuid;

pub struct MeasurementService;

impl MeasurementService {
    /// Store one measurement
    pub async fn create(pool: &PgPool, request: CreateMeasurementRequest) -> Result<Uuid, ApiError> {
        let value = request.check()?;

        let user_exists = UserRepository::exists(pool, request.user_id)
            .await
            .map_err(ApiError::Internal)?;
        if !user_exists {
            return Err(ApiError::NotFound(format!("User {} not found", request.user_id)));
        }

        let input = CreateMeasurement {
            user_id: request.user_id,
            metric_type_id: request.metric_type_id,
            value,
            measured_at: request.measured_at,
            source: request.source,
            notes: request.notes,
        };

        let id = MeasurementRepository::create(pool, input).await.map_err(|e| {
            if is_unique_violation(&e) {
                ApiError::Conflict("A measurement already exists for this metric at this time".to_string())
            } else if is_foreign_key_violation(&e) {
                ApiError::NotFound(format!("Metric type {} not found", request.metric_type_id))
            } else {
                ApiError::Internal(e)
            }
        })?;

        info!(
            measurement_id = %id,
            user_id = %request.user_id,
            metric_type_id = request.metric_type_id,
            "Measurement stored"
        );
        Ok(id)
    }

    /// Latest value of every metric for a user
    pub async fn latest(pool: &PgPool, user_id: Uuid) -> Result<Vec<MeasurementDto>, ApiError> {
        let rows = MeasurementRepository::latest_per_metric(pool, user_id)
            .await
            .map_err(ApiError::Internal)?;
        Ok(rows.into_iter().map(MeasurementDto::from).collect())
    }

    /// Daily history of one metric; `end_date` covers that whole UTC day
    pub async fn history(
        pool: &PgPool,
        user_id: Uuid,
        metric_type_id: i32,
        query: MeasurementRangeQuery,
    ) -> Result<Vec<MeasurementDto>, ApiError> {
        if let (Some(start), Some(end)) = (query.start_date, query.end_date) {
            if start > end {
                return Err(ApiError::validation("startDate must not be after endDate"));
            }
        }

        let start = query.start_date.map(utc_midnight);
        let end = query
            .end_date
            .map(|date| {
                date.checked_add_days(Days::new(1))
                    .map(utc_midnight)
                    .ok_or_else(|| ApiError::Validation {
                        message: "endDate is out of range".to_string(),
                        field: Some("endDate".to_string()),
                    })
            })
            .transpose()?;

        let rows = MeasurementRepository::daily_history(pool, user_id, metric_type_id, start, end)
            .await
            .map_err(ApiError::Internal)?;

        debug!(
            user_id = %user_id,
            metric_type_id,
            count = rows.len(),
            "Loaded measurement history"
        );
        Ok(rows.into_iter().map(MeasurementDto::from).collect())
    }

    /// Active goals with their metric type
    pub async fn active_goals(pool: &PgPool, user_id: Uuid) -> Result<Vec<GoalDto>, ApiError> {
        let rows = GoalRepository::active_for_user(pool, user_id)
            .await
            .map_err(ApiError::Internal)?;
        Ok(rows.into_iter().map(GoalDto::from).collect())
    }
}

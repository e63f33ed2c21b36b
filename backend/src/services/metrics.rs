//! Metric type catalog service

use crate::error::{is_unique_violation, ApiError};
use crate::repositories::MetricTypeRepository;
use motivate_shared::{CreateMetricTypeRequest, MetricTypeDto};
use sqlx::PgPool;
use tracing::info;

pub struct MetricTypeService;

impl MetricTypeService {
    pub async fn list(pool: &PgPool) -> Result<Vec<MetricTypeDto>, ApiError> {
        let records = MetricTypeRepository::list(pool)
            .await
            .map_err(ApiError::Internal)?;
        Ok(records.into_iter().map(MetricTypeDto::from).collect())
    }

    pub async fn get(pool: &PgPool, id: i32) -> Result<MetricTypeDto, ApiError> {
        MetricTypeRepository::get_by_id(pool, id)
            .await
            .map_err(ApiError::Internal)?
            .map(MetricTypeDto::from)
            .ok_or_else(|| ApiError::NotFound(format!("Metric type {} not found", id)))
    }

    /// Register a metric type; names are unique
    pub async fn create(pool: &PgPool, request: CreateMetricTypeRequest) -> Result<i32, ApiError> {
        let name = request.check()?;

        let id = MetricTypeRepository::create(pool, &name, request.unit.trim(), request.description.as_deref())
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    ApiError::Conflict(format!("Metric type '{}' already exists", name))
                } else {
                    ApiError::Internal(e)
                }
            })?;

        info!(metric_type_id = id, name = %name, "Metric type created");
        Ok(id)
    }
}

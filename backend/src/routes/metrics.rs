//! Metric type catalog routes

use crate::error::ApiResult;
use crate::routes::extract::{ApiJson, ApiPath};
use crate::services::MetricTypeService;
use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use motivate_shared::{CreateMetricTypeRequest, CreatedResponse, DataEnvelope, MetricTypeDto};

/// Create metric type routes
pub fn metric_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_metric_types).post(create_metric_type))
        .route("/:id", get(get_metric_type))
}

/// GET /api/v1/metrics
async fn list_metric_types(State(state): State<AppState>) -> ApiResult<Json<DataEnvelope<Vec<MetricTypeDto>>>> {
    let metric_types = MetricTypeService::list(state.db()).await?;
    Ok(Json(DataEnvelope::new(metric_types)))
}

/// GET /api/v1/metrics/:id
async fn get_metric_type(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<Json<DataEnvelope<MetricTypeDto>>> {
    let metric_type = MetricTypeService::get(state.db(), id).await?;
    Ok(Json(DataEnvelope::new(metric_type)))
}

/// POST /api/v1/metrics
async fn create_metric_type(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreateMetricTypeRequest>,
) -> ApiResult<(StatusCode, Json<CreatedResponse<i32>>)> {
    let id = MetricTypeService::create(state.db(), req).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse::ok(id))))
}

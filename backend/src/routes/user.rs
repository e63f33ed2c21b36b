//! Per-user measurement, goal and dashboard routes

use crate::error::{ApiError, ApiResult};
use crate::routes::extract::{ApiJson, ApiPath, ApiQuery};
use crate::services::{
    DashboardService, ExportFormat, ExportService, MeasurementService, PgDashboardSource,
};
use crate::state::AppState;
use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use motivate_shared::{
    CreateMeasurementRequest, Dashboard, DataEnvelope, DisplayPreferences, DistanceUnit, GoalDto, MeasurementDto,
    MeasurementRangeQuery, StatusResponse, TimeRange, WeightUnit,
};
use serde::Deserialize;
use tracing::error;
use uuid::Uuid;

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_measurement))
        .route("/:id", get(latest_measurements))
        .route("/:id/goals", get(active_goals))
        .route("/:id/measurements/:metric_type_id", get(measurement_history))
        .route("/:id/dashboard", get(dashboard))
        .route("/:id/export", get(export))
}

/// Display options for the dashboard endpoint
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardQuery {
    pub time_range: Option<String>,
    pub weight_unit: Option<String>,
    pub distance_unit: Option<String>,
}

impl DashboardQuery {
    /// Unknown time ranges fall back to 90 days; unknown units are rejected
    pub fn preferences(&self) -> ApiResult<DisplayPreferences> {
        let mut prefs = DisplayPreferences::default();
        if let Some(range) = self.time_range.as_deref() {
            prefs = prefs.with_time_range(TimeRange::parse_lenient(range));
        }
        if let Some(unit) = self.weight_unit.as_deref() {
            prefs = prefs.with_weight_unit(unit.parse::<WeightUnit>()?);
        }
        if let Some(unit) = self.distance_unit.as_deref() {
            prefs = prefs.with_distance_unit(unit.parse::<DistanceUnit>()?);
        }
        Ok(prefs)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ExportQuery {
    #[serde(default)]
    pub format: ExportFormat,
}

/// POST /api/v1/user - Store a measurement
async fn create_measurement(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreateMeasurementRequest>,
) -> ApiResult<(StatusCode, Json<StatusResponse>)> {
    MeasurementService::create(state.db(), req).await?;
    Ok((StatusCode::CREATED, Json(StatusResponse::ok())))
}

/// GET /api/v1/user/:id - Latest measurement of every metric
async fn latest_measurements(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<Uuid>,
) -> ApiResult<Json<DataEnvelope<Vec<MeasurementDto>>>> {
    let measurements = MeasurementService::latest(state.db(), user_id).await?;
    Ok(Json(DataEnvelope::new(measurements)))
}

/// GET /api/v1/user/:id/goals - Active goals
async fn active_goals(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<Uuid>,
) -> ApiResult<Json<DataEnvelope<Vec<GoalDto>>>> {
    let goals = MeasurementService::active_goals(state.db(), user_id).await?;
    Ok(Json(DataEnvelope::new(goals)))
}

/// GET /api/v1/user/:id/measurements/:metric_type_id - Daily history
async fn measurement_history(
    State(state): State<AppState>,
    ApiPath((user_id, metric_type_id)): ApiPath<(Uuid, i32)>,
    ApiQuery(query): ApiQuery<MeasurementRangeQuery>,
) -> ApiResult<Json<DataEnvelope<Vec<MeasurementDto>>>> {
    let history = MeasurementService::history(state.db(), user_id, metric_type_id, query).await?;
    Ok(Json(DataEnvelope::new(history)))
}

/// GET /api/v1/user/:id/dashboard - Assembled dashboard
async fn dashboard(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<Uuid>,
    ApiQuery(query): ApiQuery<DashboardQuery>,
) -> ApiResult<Json<Dashboard>> {
    let prefs = query.preferences()?;
    let dashboard = load_dashboard(&state, user_id, &prefs).await?;
    Ok(Json(dashboard))
}

/// GET /api/v1/user/:id/export - Dashboard data as a JSON or CSV download
///
/// Series cover the whole 90 day window in stored units.
async fn export(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<Uuid>,
    ApiQuery(query): ApiQuery<ExportQuery>,
) -> ApiResult<impl IntoResponse> {
    let prefs = DisplayPreferences::default().with_time_range(TimeRange::Quarter);
    let dashboard = load_dashboard(&state, user_id, &prefs).await?;
    let file = ExportService::export(&dashboard, query.format, Utc::now())?;

    let disposition = HeaderValue::from_str(&format!("attachment; filename=\"{}\"", file.filename))
        .map_err(|e| ApiError::Internal(anyhow::anyhow!("Invalid export filename: {}", e)))?;

    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(file.content_type));
    headers.insert(header::CONTENT_DISPOSITION, disposition);

    Ok((headers, file.body))
}

async fn load_dashboard(state: &AppState, user_id: Uuid, prefs: &DisplayPreferences) -> ApiResult<Dashboard> {
    let source = PgDashboardSource::new(state.db().clone());
    let today = Utc::now().date_naive();

    DashboardService::build(&source, user_id, prefs, today, &state.config().dashboard)
        .await
        .map_err(|e| {
            error!(user_id = %user_id, error = %e, "Failed to build dashboard");
            ApiError::Internal(e)
        })
}

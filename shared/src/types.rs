//! API request and response types
//!
//! Wire shapes use camelCase JSON. Responses are converted into the typed
//! entities with `TryFrom` as soon as they are decoded; nothing past this
//! module handles loose JSON.

use crate::errors::ValidationError;
use crate::goals::GoalRecord;
use crate::measurements::MeasurementRecord;
use crate::metrics::MetricCatalogEntry;
use crate::validation::{validate_decimal, validate_measurement_value, validate_metric_name, validate_source};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Date range for queries, both ends inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// `{ "data": ... }` envelope used by every data endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

impl<T> DataEnvelope<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// `{ "status": "ok" }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}

/// `{ "status": "ok", "data": <id> }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedResponse<T> {
    pub status: String,
    pub data: T,
}

impl<T> CreatedResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            status: "ok".to_string(),
            data,
        }
    }
}

/// API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

// ============================================================================
// Lenient Field Decoding
// ============================================================================

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Number(serde_json::Number),
}

/// Decimal columns arrive as strings; accept plain JSON numbers too
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::String(s) => s,
        StringOrNumber::Number(n) => n.to_string(),
    })
}

/// Accept `YYYY-MM-DD` or a full timestamp, keeping only the date part
fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => {
            let date_part = s.get(..10).unwrap_or(s);
            NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
                .map(Some)
                .map_err(serde::de::Error::custom)
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_source() -> String {
    "apple_health".to_string()
}

// ============================================================================
// Metric Types
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricTypeDto {
    pub id: i32,
    pub name: String,
    pub unit: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl TryFrom<MetricTypeDto> for MetricCatalogEntry {
    type Error = ValidationError;

    fn try_from(dto: MetricTypeDto) -> Result<Self, Self::Error> {
        if dto.name.trim().is_empty() {
            return Err(ValidationError::InvalidValue {
                field: "name",
                message: "Metric name cannot be empty".to_string(),
            });
        }
        Ok(MetricCatalogEntry {
            id: dto.id,
            name: dto.name,
            unit: dto.unit,
            description: dto.description,
        })
    }
}

/// Request body for `POST /metrics`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateMetricTypeRequest {
    #[validate(length(min = 1, max = 20, message = "Name must be 1-20 characters"))]
    pub name: String,
    #[validate(length(min = 1, max = 20, message = "Unit must be 1-20 characters"))]
    pub unit: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl CreateMetricTypeRequest {
    /// Run every check, returning the trimmed name
    pub fn check(&self) -> Result<String, ValidationError> {
        self.validate()?;
        validate_metric_name(&self.name)?;
        Ok(self.name.trim().to_lowercase())
    }
}

// ============================================================================
// Measurements
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasurementDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub metric_type_id: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metric_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metric_unit: Option<String>,
    #[serde(deserialize_with = "string_or_number")]
    pub value: String,
    pub measured_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl TryFrom<MeasurementDto> for MeasurementRecord {
    type Error = ValidationError;

    fn try_from(dto: MeasurementDto) -> Result<Self, Self::Error> {
        validate_decimal("value", &dto.value)?;
        Ok(MeasurementRecord::new(dto.metric_type_id, dto.value, dto.measured_at))
    }
}

/// Request body for `POST /user`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateMeasurementRequest {
    pub user_id: Uuid,
    #[validate(range(min = 1, message = "Metric type id must be positive"))]
    pub metric_type_id: i32,
    #[serde(deserialize_with = "string_or_number")]
    #[validate(length(min = 1, max = 32))]
    pub value: String,
    pub measured_at: DateTime<Utc>,
    #[serde(default = "default_source")]
    pub source: String,
    #[serde(default)]
    #[validate(length(max = 500, message = "Notes cannot exceed 500 characters"))]
    pub notes: Option<String>,
}

impl CreateMeasurementRequest {
    /// Run every check, returning the value at the stored scale
    pub fn check(&self) -> Result<Decimal, ValidationError> {
        self.validate()?;
        validate_source(&self.source)?;
        validate_measurement_value(&self.value)
    }
}

/// Query string for the measurement history endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasurementRangeQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl From<DateRange> for MeasurementRangeQuery {
    fn from(range: DateRange) -> Self {
        Self {
            start_date: Some(range.start),
            end_date: Some(range.end),
        }
    }
}

// ============================================================================
// Goals
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub metric_type_id: i32,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub goal_type: Option<String>,
    #[serde(deserialize_with = "string_or_number")]
    pub target_value: String,
    #[serde(default, deserialize_with = "lenient_date")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub target_date: Option<NaiveDate>,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default)]
    pub achieved: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metric_type: Option<MetricTypeDto>,
}

impl TryFrom<GoalDto> for GoalRecord {
    type Error = ValidationError;

    fn try_from(dto: GoalDto) -> Result<Self, Self::Error> {
        validate_decimal("targetValue", &dto.target_value)?;
        Ok(GoalRecord {
            metric_type_id: dto.metric_type_id,
            target_value: dto.target_value,
            start_date: dto.start_date,
            active: dto.active,
        })
    }
}

/// Convert a decoded list, failing on the first invalid element
pub fn try_convert_all<D, T>(items: Vec<D>) -> Result<Vec<T>, ValidationError>
where
    T: TryFrom<D, Error = ValidationError>,
{
    items.into_iter().map(T::try_from).collect()
}

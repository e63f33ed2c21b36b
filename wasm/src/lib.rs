//! Motivate WASM Module
//!
//! Browser bindings for the dashboard calculations. Inputs and outputs are
//! JSON strings using the same camelCase shapes as the API. Bad input
//! produces `{"error": "..."}` instead of a panic.

use chrono::NaiveDate;
use motivate_shared::{
    charts::ProgressColor, try_convert_all, MeasurementDto, MeasurementRecord, MetricCatalogEntry, MetricTypeDto,
    WeightTrendInput,
};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

/// Owned form of the weight trend input
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TrendRequest {
    current_weight: Option<String>,
    target_weight: f64,
    #[serde(default)]
    weight_history: Vec<MeasurementDto>,
    #[serde(default)]
    start_date: Option<NaiveDate>,
}

fn error_json(message: impl std::fmt::Display) -> String {
    serde_json::json!({ "error": message.to_string() }).to_string()
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(error_json)
}

fn trend_json(input_json: &str, today_iso: &str) -> Result<String, String> {
    let request: TrendRequest = serde_json::from_str(input_json).map_err(|e| e.to_string())?;
    let today = NaiveDate::parse_from_str(today_iso, "%Y-%m-%d").map_err(|e| format!("Invalid date: {}", e))?;
    let mut history: Vec<MeasurementRecord> = try_convert_all(request.weight_history).map_err(|e| e.to_string())?;
    history.sort_by(|a, b| b.measured_at.cmp(&a.measured_at));

    let trend = motivate_shared::compute_weight_trend(
        &WeightTrendInput {
            current_weight: request.current_weight.as_deref(),
            target_weight: request.target_weight,
            weight_history: &history,
            start_date: request.start_date,
        },
        today,
    );
    Ok(to_json(&trend))
}

/// Weight trend figures for `today_iso` (YYYY-MM-DD)
#[wasm_bindgen]
pub fn compute_weight_trend(input_json: &str, today_iso: &str) -> String {
    trend_json(input_json, today_iso).unwrap_or_else(error_json)
}

/// CSS color variable for a value against its target
#[wasm_bindgen]
pub fn progress_color(value: f64, target: f64) -> String {
    ProgressColor::for_progress(value, target).css_var().to_string()
}

/// Chart points from a JSON array of measurements
#[wasm_bindgen]
pub fn to_series(records_json: &str) -> String {
    let result = serde_json::from_str::<Vec<MeasurementDto>>(records_json)
        .map_err(|e| e.to_string())
        .and_then(|dtos| try_convert_all::<_, MeasurementRecord>(dtos).map_err(|e| e.to_string()));

    match result {
        Ok(records) => to_json(&motivate_shared::to_series(&records)),
        Err(e) => error_json(e),
    }
}

/// Metric id map from a JSON array of metric types
#[wasm_bindgen]
pub fn resolve_metric_ids(catalog_json: &str) -> String {
    let result = serde_json::from_str::<Vec<MetricTypeDto>>(catalog_json)
        .map_err(|e| e.to_string())
        .and_then(|dtos| try_convert_all::<_, MetricCatalogEntry>(dtos).map_err(|e| e.to_string()));

    match result {
        Ok(catalog) => to_json(&motivate_shared::resolve_metric_ids(&catalog)),
        Err(e) => error_json(e),
    }
}

//! Dashboard data export
//!
//! Supports two formats:
//! - JSON: current values, goal targets and every chart series
//! - CSV: one `Metric,Value,Date` row per current value

use crate::error::ApiError;
use chrono::{DateTime, NaiveDate, Utc};
use motivate_shared::{ChartDataPoint, Dashboard, DashboardGoals, DashboardMetrics, DateRange, MetricName};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Export file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Json,
    Csv,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Json => "application/json",
            ExportFormat::Csv => "text/csv",
        }
    }
}

/// JSON export document
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardExport {
    pub export_date: DateTime<Utc>,
    pub date_range: DateRange,
    pub current_metrics: DashboardMetrics,
    pub goals: DashboardGoals,
    pub charts: BTreeMap<MetricName, Vec<ChartDataPoint>>,
}

#[derive(Debug, Serialize)]
struct CurrentMetricRow<'a> {
    #[serde(rename = "Metric")]
    metric: &'static str,
    #[serde(rename = "Value")]
    value: &'a str,
    #[serde(rename = "Date")]
    date: String,
}

/// A rendered export ready to send
#[derive(Debug, Clone)]
pub struct ExportFile {
    pub filename: String,
    pub content_type: &'static str,
    pub body: String,
}

/// Export service
pub struct ExportService;

impl ExportService {
    /// Render `dashboard` in `format`, stamped with `exported_at`
    pub fn export(
        dashboard: &Dashboard,
        format: ExportFormat,
        exported_at: DateTime<Utc>,
    ) -> Result<ExportFile, ApiError> {
        let body = match format {
            ExportFormat::Json => {
                let document = Self::to_document(dashboard, exported_at);
                serde_json::to_string_pretty(&document)
                    .map_err(|e| ApiError::Internal(anyhow::anyhow!("JSON serialization error: {}", e)))?
            }
            ExportFormat::Csv => Self::current_metrics_csv(&dashboard.current_metrics, exported_at.date_naive())?,
        };

        Ok(ExportFile {
            filename: Self::filename(exported_at.date_naive(), format),
            content_type: format.content_type(),
            body,
        })
    }

    pub fn to_document(dashboard: &Dashboard, exported_at: DateTime<Utc>) -> DashboardExport {
        let charts = dashboard
            .linear_charts
            .iter()
            .map(|chart| (chart.metric, chart.data.clone()))
            .collect();

        DashboardExport {
            export_date: exported_at,
            date_range: dashboard.date_range,
            current_metrics: dashboard.current_metrics.clone(),
            goals: dashboard.goal_targets,
            charts,
        }
    }

    /// CSV of the current values; metrics without a value are skipped
    pub fn current_metrics_csv(metrics: &DashboardMetrics, export_date: NaiveDate) -> Result<String, ApiError> {
        let date = export_date.format("%Y-%m-%d").to_string();
        let rows: Vec<CurrentMetricRow<'_>> = metrics
            .present()
            .map(|(name, value)| CurrentMetricRow {
                metric: current_metric_key(name),
                value,
                date: date.clone(),
            })
            .collect();

        if rows.is_empty() {
            return Ok("Metric,Value,Date\n".to_string());
        }
        Self::to_csv(&rows)
    }

    /// `motivate-data-YYYY-MM-DD.<ext>`
    pub fn filename(export_date: NaiveDate, format: ExportFormat) -> String {
        format!("motivate-data-{}.{}", export_date.format("%Y-%m-%d"), format.extension())
    }

    fn to_csv<T: Serialize>(data: &[T]) -> Result<String, ApiError> {
        let mut wtr = csv::Writer::from_writer(vec![]);
        for record in data {
            wtr.serialize(record)
                .map_err(|e| ApiError::Internal(anyhow::anyhow!("CSV serialization error: {}", e)))?;
        }
        let bytes = wtr
            .into_inner()
            .map_err(|e| ApiError::Internal(anyhow::anyhow!("CSV flush error: {}", e)))?;
        String::from_utf8(bytes).map_err(|e| ApiError::Internal(anyhow::anyhow!("CSV encoding error: {}", e)))
    }
}

fn current_metric_key(name: MetricName) -> &'static str {
    match name {
        MetricName::Weight => "currentWeight",
        MetricName::Steps => "currentSteps",
        MetricName::Exercise => "currentExercise",
        MetricName::Standing => "currentStanding",
        MetricName::Distance => "currentDistance",
        MetricName::Water => "currentWater",
        MetricName::Energy => "currentEnergy",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use motivate_shared::dates::date_range;
    use motivate_shared::{build_dashboard, DashboardInputs, DisplayPreferences, MeasurementRecord};

    fn exported_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 30, 14, 30, 0).unwrap()
    }

    fn dashboard() -> Dashboard {
        let today = exported_at().date_naive();
        let steps = vec![
            MeasurementRecord::new(2, "6000", Utc.with_ymd_and_hms(2024, 6, 29, 20, 0, 0).unwrap()),
            MeasurementRecord::new(2, "8000", Utc.with_ymd_and_hms(2024, 6, 30, 20, 0, 0).unwrap()),
        ];
        let inputs = DashboardInputs {
            snapshot: vec![
                MeasurementRecord::new(1, "75.50", Utc.with_ymd_and_hms(2024, 6, 30, 7, 0, 0).unwrap()),
                MeasurementRecord::new(2, "8000", Utc.with_ymd_and_hms(2024, 6, 30, 20, 0, 0).unwrap()),
            ],
            goals: vec![],
            catalog: vec![],
            histories: BTreeMap::from([(MetricName::Steps, steps)]),
            date_range: date_range(91, today),
        };
        build_dashboard(&inputs, &DisplayPreferences::default(), today)
    }

    #[test]
    fn test_filename() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(ExportService::filename(date, ExportFormat::Csv), "motivate-data-2024-03-05.csv");
        assert_eq!(ExportService::filename(date, ExportFormat::Json), "motivate-data-2024-03-05.json");
    }

    #[test]
    fn test_csv_lists_present_metrics() {
        let file = ExportService::export(&dashboard(), ExportFormat::Csv, exported_at()).unwrap();

        assert_eq!(file.content_type, "text/csv");
        let lines: Vec<&str> = file.body.lines().collect();
        assert_eq!(lines[0], "Metric,Value,Date");
        assert!(lines.contains(&"currentWeight,75.50,2024-06-30"));
        assert!(lines.contains(&"currentSteps,8000,2024-06-30"));
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_csv_without_values_has_header_only() {
        let csv = ExportService::current_metrics_csv(&DashboardMetrics::default(), exported_at().date_naive()).unwrap();
        assert_eq!(csv, "Metric,Value,Date\n");
    }

    #[test]
    fn test_json_document_shape() {
        let file = ExportService::export(&dashboard(), ExportFormat::Json, exported_at()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&file.body).unwrap();

        assert_eq!(file.filename, "motivate-data-2024-06-30.json");
        assert_eq!(value["currentMetrics"]["currentSteps"], "8000");
        assert_eq!(value["dateRange"]["end"], "2024-06-30");
        assert!(value["goals"]["steps"].is_object());
        assert_eq!(value["charts"]["steps"].as_array().map(Vec::len), Some(2));
        assert!(value["exportDate"].as_str().unwrap().starts_with("2024-06-30T14:30:00"));
    }

    #[test]
    fn test_format_deserializes_lowercase() {
        let format: ExportFormat = serde_json::from_str("\"csv\"").unwrap();
        assert_eq!(format, ExportFormat::Csv);
        assert_eq!(ExportFormat::default(), ExportFormat::Json);
    }
}

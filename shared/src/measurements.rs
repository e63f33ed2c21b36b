//! Measurement transformation
//!
//! Turns raw time-stamped measurement records into chart series and picks
//! the "current" value of each metric out of the latest-snapshot records.

use crate::metrics::{MetricIdMap, MetricName};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

/// One observation of a metric
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasurementRecord {
    pub metric_type_id: i32,
    /// Decimal value exactly as stored, e.g. "72.40"
    pub value: String,
    pub measured_at: DateTime<Utc>,
}

impl MeasurementRecord {
    pub fn new(metric_type_id: i32, value: impl Into<String>, measured_at: DateTime<Utc>) -> Self {
        Self {
            metric_type_id,
            value: value.into(),
            measured_at,
        }
    }

    /// Decimal value, `None` when the string does not parse
    pub fn decimal(&self) -> Option<Decimal> {
        parse_decimal(&self.value)
    }

    /// Numeric value, `None` when the string does not parse
    pub fn numeric_value(&self) -> Option<f64> {
        self.decimal().and_then(|d| d.to_f64())
    }

    /// "0", "0.00" and friends
    pub fn is_zero(&self) -> bool {
        self.decimal().map(|d| d.is_zero()).unwrap_or(false)
    }
}

/// Parse a decimal string the way the database renders `numeric` values
pub fn parse_decimal(value: &str) -> Option<Decimal> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}

/// Parse an optional decimal string into a float, missing or invalid as 0
pub fn numeric_or_zero(value: Option<&str>) -> f64 {
    value
        .and_then(parse_decimal)
        .and_then(|d| d.to_f64())
        .unwrap_or(0.0)
}

// ============================================================================
// Series
// ============================================================================

/// A single point of a date-keyed chart series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDataPoint {
    /// UTC calendar date, serialised as YYYY-MM-DD
    pub date: NaiveDate,
    pub value: f64,
}

/// Map records to chart points, keeping input order and length
pub fn to_series(records: &[MeasurementRecord]) -> Vec<ChartDataPoint> {
    records
        .iter()
        .map(|record| ChartDataPoint {
            date: record.measured_at.date_naive(),
            value: record.numeric_value().unwrap_or(0.0),
        })
        .collect()
}

// ============================================================================
// Current Values
// ============================================================================

/// Current value of each metric plus the "as of" date of the weight record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    pub current_weight: Option<String>,
    pub current_distance: Option<String>,
    pub current_water: Option<String>,
    pub current_steps: Option<String>,
    pub current_exercise: Option<String>,
    pub current_standing: Option<String>,
    pub current_energy: Option<String>,
    pub date_measured: Option<DateTime<Utc>>,
}

impl DashboardMetrics {
    /// Current value for a metric, if one was measured
    pub fn get(&self, name: MetricName) -> Option<&str> {
        let value = match name {
            MetricName::Weight => &self.current_weight,
            MetricName::Steps => &self.current_steps,
            MetricName::Exercise => &self.current_exercise,
            MetricName::Standing => &self.current_standing,
            MetricName::Distance => &self.current_distance,
            MetricName::Water => &self.current_water,
            MetricName::Energy => &self.current_energy,
        };
        value.as_deref()
    }

    /// `(name, value)` pairs for the metrics that have a value
    pub fn present(&self) -> impl Iterator<Item = (MetricName, &str)> + '_ {
        MetricName::ALL
            .into_iter()
            .filter_map(move |name| self.get(name).map(|value| (name, value)))
    }
}

/// Extract the current value of every metric from a latest-snapshot set
///
/// A current weight of exactly zero is treated as missing data: the newest
/// non-zero weight in `history` replaces it. When none exists the zero is kept.
pub fn extract_current(
    snapshot: &[MeasurementRecord],
    ids: &MetricIdMap,
    history: Option<&[MeasurementRecord]>,
) -> DashboardMetrics {
    let by_type: HashMap<i32, &MeasurementRecord> = snapshot
        .iter()
        .map(|record| (record.metric_type_id, record))
        .collect();

    let value_of = |name: MetricName| by_type.get(&ids.get(name)).map(|r| r.value.clone());

    let weight_record = by_type.get(&ids.weight).copied();
    let date_measured = weight_record
        .filter(|r| !r.value.is_empty())
        .map(|r| r.measured_at);

    let current_weight = match weight_record {
        Some(record) if record.is_zero() => Some(
            history
                .and_then(|h| latest_non_zero(h, ids.weight))
                .map(|r| r.value.clone())
                .unwrap_or_else(|| record.value.clone()),
        ),
        Some(record) => Some(record.value.clone()),
        None => None,
    };

    DashboardMetrics {
        current_weight,
        current_distance: value_of(MetricName::Distance),
        current_water: value_of(MetricName::Water),
        current_steps: value_of(MetricName::Steps),
        current_exercise: value_of(MetricName::Exercise),
        current_standing: value_of(MetricName::Standing),
        current_energy: value_of(MetricName::Energy),
        date_measured,
    }
}

/// Newest record of a metric whose value is a non-zero decimal
fn latest_non_zero(history: &[MeasurementRecord], metric_type_id: i32) -> Option<&MeasurementRecord> {
    history
        .iter()
        .filter(|r| r.metric_type_id == metric_type_id)
        .filter(|r| r.decimal().map(|d| !d.is_zero()).unwrap_or(false))
        .max_by_key(|r| r.measured_at)
}

/// Measurement date of the first snapshot record for a metric id
pub fn metric_date(snapshot: &[MeasurementRecord], metric_type_id: i32) -> Option<DateTime<Utc>> {
    snapshot
        .iter()
        .find(|r| r.metric_type_id == metric_type_id)
        .map(|r| r.measured_at)
}

/// Convert a millilitre reading to litres with two decimals
pub fn convert_water_to_liters(water_ml: Option<&str>) -> Option<String> {
    let ml = parse_decimal(water_ml?)?.to_f64()?;
    Some(format!("{:.2}", ml / 1000.0))
}

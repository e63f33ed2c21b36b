//! Dashboard assembly
//!
//! Runs the whole pure pipeline over one set of fetched inputs:
//! resolve ids, pick current values, resolve goals, compute the weight
//! trend, then build the radial and linear chart configs.

use crate::charts::{build_all_radial_configs, build_linear_charts, LinearChartConfig, RadialCharts};
use crate::goals::{extract_goals, DashboardGoals, GoalRecord, DEFAULT_TARGET};
use crate::measurements::{extract_current, to_series, ChartDataPoint, DashboardMetrics, MeasurementRecord};
use crate::metrics::{resolve_metric_ids, MetricCatalogEntry, MetricIdMap, MetricName};
use crate::preferences::DisplayPreferences;
use crate::trends::{compute_weight_trend, round2, WeightTrend, WeightTrendInput};
use crate::types::DateRange;
use chrono::NaiveDate;
use serde::Serialize;
use std::cmp::Reverse;
use std::collections::BTreeMap;

/// Everything fetched for one dashboard render
#[derive(Debug, Clone)]
pub struct DashboardInputs {
    /// Latest measurement per metric
    pub snapshot: Vec<MeasurementRecord>,
    pub goals: Vec<GoalRecord>,
    pub catalog: Vec<MetricCatalogEntry>,
    /// History per series metric over `date_range`
    pub histories: BTreeMap<MetricName, Vec<MeasurementRecord>>,
    pub date_range: DateRange,
}

impl DashboardInputs {
    pub fn history(&self, metric: MetricName) -> &[MeasurementRecord] {
        self.histories.get(&metric).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Fully assembled dashboard view model
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub date_range: DateRange,
    pub preferences: DisplayPreferences,
    pub metric_ids: MetricIdMap,
    pub current_metrics: DashboardMetrics,
    pub goal_targets: DashboardGoals,
    pub weight_trend: WeightTrend,
    pub radial_charts: RadialCharts,
    pub linear_charts: Vec<LinearChartConfig>,
}

/// Assemble the dashboard with the standard default goal target
pub fn build_dashboard(inputs: &DashboardInputs, prefs: &DisplayPreferences, today: NaiveDate) -> Dashboard {
    build_dashboard_with_target(inputs, prefs, today, DEFAULT_TARGET)
}

/// Assemble the dashboard, using `default_target` for metrics without a goal
pub fn build_dashboard_with_target(
    inputs: &DashboardInputs,
    prefs: &DisplayPreferences,
    today: NaiveDate,
    default_target: f64,
) -> Dashboard {
    let metric_ids = resolve_metric_ids(&inputs.catalog);

    let mut weight_history = inputs.history(MetricName::Weight).to_vec();
    weight_history.sort_by_key(|record| Reverse(record.measured_at));

    let current_metrics = extract_current(&inputs.snapshot, &metric_ids, Some(&weight_history));
    let goal_targets = extract_goals(&inputs.goals, &metric_ids, default_target);

    let weight_trend = compute_weight_trend(
        &WeightTrendInput {
            current_weight: current_metrics.current_weight.as_deref(),
            target_weight: goal_targets.weight.value,
            weight_history: &weight_history,
            start_date: goal_targets.weight.start_date,
        },
        today,
    )
    .in_unit(prefs.weight_unit);

    let radial_charts = build_all_radial_configs(&current_metrics, &goal_targets);

    let series: BTreeMap<MetricName, Vec<ChartDataPoint>> = MetricName::SERIES
        .into_iter()
        .map(|metric| {
            let points = to_series(inputs.history(metric));
            let visible = prefs.time_range.filter_series(&points, today);
            (metric, convert_series(metric, visible, prefs))
        })
        .collect();

    Dashboard {
        date_range: inputs.date_range,
        preferences: *prefs,
        metric_ids,
        current_metrics,
        goal_targets,
        weight_trend,
        radial_charts,
        linear_charts: build_linear_charts(&series),
    }
}

/// Rescale a stored-unit series into the preferred display unit
fn convert_series(metric: MetricName, points: Vec<ChartDataPoint>, prefs: &DisplayPreferences) -> Vec<ChartDataPoint> {
    let convert = |value: f64| match metric {
        MetricName::Weight => round2(prefs.weight_unit.from_kg(value)),
        MetricName::Distance => round2(prefs.distance_unit.from_km(value)),
        _ => value,
    };
    if !matches!(metric, MetricName::Weight | MetricName::Distance) {
        return points;
    }
    points
        .into_iter()
        .map(|point| ChartDataPoint {
            value: convert(point.value),
            ..point
        })
        .collect()
}

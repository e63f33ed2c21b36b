//! Chart configuration
//!
//! Packages current values, goal targets and series into plain display
//! structs. Nothing here renders; the structs are handed to whichever chart
//! layer consumes the JSON.

use crate::dates::format_short_date;
use crate::goals::{DashboardGoals, GoalTarget};
use crate::measurements::{numeric_or_zero, ChartDataPoint, DashboardMetrics};
use crate::metrics::MetricName;
use serde::Serialize;
use std::collections::BTreeMap;

pub const RADIAL_FILL_OPACITY: f64 = 0.7;
pub const LINEAR_CHART_COLOR: &str = "var(--color-chart-3)";

// ============================================================================
// Progress Colour
// ============================================================================

/// Fill colour bucket for a value against its target
///
/// Red tiers sit below the target (Red5 furthest away), green tiers at or
/// above it (Green5 furthest over).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ProgressColor {
    Red5,
    Red4,
    Red3,
    Red2,
    Red1,
    Green1,
    Green2,
    Green3,
    Green4,
    Green5,
}

impl ProgressColor {
    /// Bucket `value` by its percentage of `target`
    pub fn for_progress(value: f64, target: f64) -> Self {
        if target == 0.0 {
            return if value > 0.0 {
                ProgressColor::Green5
            } else {
                ProgressColor::Green1
            };
        }

        let percent = value / target * 100.0;
        if !percent.is_finite() {
            return ProgressColor::Red5;
        }

        if percent < 100.0 {
            return match percent {
                p if p <= 20.0 => ProgressColor::Red5,
                p if p <= 40.0 => ProgressColor::Red4,
                p if p <= 60.0 => ProgressColor::Red3,
                p if p <= 80.0 => ProgressColor::Red2,
                _ => ProgressColor::Red1,
            };
        }

        match percent - 100.0 {
            over if over < 20.0 => ProgressColor::Green1,
            over if over < 40.0 => ProgressColor::Green2,
            over if over < 60.0 => ProgressColor::Green3,
            over if over < 80.0 => ProgressColor::Green4,
            _ => ProgressColor::Green5,
        }
    }

    pub fn is_below_target(&self) -> bool {
        matches!(
            self,
            ProgressColor::Red5
                | ProgressColor::Red4
                | ProgressColor::Red3
                | ProgressColor::Red2
                | ProgressColor::Red1
        )
    }

    /// CSS custom property name
    pub fn css_var(&self) -> &'static str {
        match self {
            ProgressColor::Red5 => "--color-chart-red-5",
            ProgressColor::Red4 => "--color-chart-red-4",
            ProgressColor::Red3 => "--color-chart-red-3",
            ProgressColor::Red2 => "--color-chart-red-2",
            ProgressColor::Red1 => "--color-chart-red-1",
            ProgressColor::Green1 => "--color-chart-1",
            ProgressColor::Green2 => "--color-chart-2",
            ProgressColor::Green3 => "--color-chart-3",
            ProgressColor::Green4 => "--color-chart-4",
            ProgressColor::Green5 => "--color-chart-5",
        }
    }

    /// CSS fill value, e.g. `var(--color-chart-red-2)`
    pub fn fill(&self) -> String {
        format!("var({})", self.css_var())
    }
}

// ============================================================================
// Radial Charts
// ============================================================================

/// Single data point of a radial chart
///
/// Serialised with the data key as the value's field name:
/// `{"steps": 8000, "fill": "var(...)", "fillOpacity": 0.7}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RadialDatum {
    #[serde(flatten)]
    pub values: BTreeMap<String, f64>,
    pub fill: String,
    pub fill_opacity: f64,
}

impl RadialDatum {
    pub fn new(data_key: &str, value: f64, color: ProgressColor) -> Self {
        Self {
            values: BTreeMap::from([(data_key.to_string(), value)]),
            fill: color.fill(),
            fill_opacity: RADIAL_FILL_OPACITY,
        }
    }

    pub fn value(&self, data_key: &str) -> Option<f64> {
        self.values.get(data_key).copied()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartLabel {
    pub label: String,
}

/// Input for a single radial chart
#[derive(Debug, Clone)]
pub struct RadialChartInput<'a> {
    pub data_key: &'a str,
    pub unit: &'a str,
    pub title: &'a str,
    pub description: String,
    pub value: Option<&'a str>,
    pub target: GoalTarget,
    pub label: &'a str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RadialChartConfig {
    pub unit: String,
    pub title: String,
    pub description: String,
    pub chart_data: Vec<RadialDatum>,
    pub target: f64,
    pub chart_config: BTreeMap<String, ChartLabel>,
    pub data_key: String,
}

impl RadialChartConfig {
    /// Colour bucket of the single data point
    pub fn color(&self) -> Option<&str> {
        self.chart_data.first().map(|datum| datum.fill.as_str())
    }
}

/// Package a current/target pair into a radial chart config
pub fn build_radial_config(input: RadialChartInput<'_>) -> RadialChartConfig {
    let value = numeric_or_zero(input.value);
    let color = ProgressColor::for_progress(value, input.target.value);

    RadialChartConfig {
        unit: input.unit.to_string(),
        title: input.title.to_string(),
        description: input.description,
        chart_data: vec![RadialDatum::new(input.data_key, value, color)],
        target: input.target.value,
        chart_config: BTreeMap::from([(
            input.data_key.to_string(),
            ChartLabel {
                label: input.label.to_string(),
            },
        )]),
        data_key: input.data_key.to_string(),
    }
}

/// Radial chart for every metric shown as a ring
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadialCharts {
    pub steps: RadialChartConfig,
    pub exercise: RadialChartConfig,
    pub standing: RadialChartConfig,
    pub water: RadialChartConfig,
    pub distance: RadialChartConfig,
    pub energy: RadialChartConfig,
}

/// Build all radial charts
///
/// Every description uses the weight record's date as the shared "as of"
/// label.
pub fn build_all_radial_configs(metrics: &DashboardMetrics, goals: &DashboardGoals) -> RadialCharts {
    let date = metrics
        .date_measured
        .map(|measured| format_short_date(measured.date_naive()))
        .unwrap_or_else(|| "No date".to_string());

    let energy = metrics
        .current_energy
        .as_deref()
        .map(|energy| format!("{}", numeric_or_zero(Some(energy)).floor()));

    RadialCharts {
        steps: build_radial_config(RadialChartInput {
            data_key: "steps",
            unit: "Steps",
            title: "Steps",
            description: format!("Steps taken on {date}"),
            value: metrics.current_steps.as_deref(),
            target: goals.steps,
            label: "Steps",
        }),
        standing: build_radial_config(RadialChartInput {
            data_key: "standing",
            unit: "Minutes",
            title: "Standing",
            description: format!("Minutes standing on {date}"),
            value: metrics.current_standing.as_deref(),
            target: goals.standing,
            label: "Minutes",
        }),
        exercise: build_radial_config(RadialChartInput {
            data_key: "exercise",
            unit: "Minutes",
            title: "Exercise",
            description: format!("Exercise minutes on {date}"),
            value: metrics.current_exercise.as_deref(),
            target: goals.exercise,
            label: "Minutes",
        }),
        water: build_radial_config(RadialChartInput {
            data_key: "water",
            unit: "ml",
            title: "Water Drunk",
            description: format!("Water drunk on {date}"),
            value: metrics.current_water.as_deref(),
            target: goals.water,
            label: "ml",
        }),
        distance: build_radial_config(RadialChartInput {
            data_key: "distance",
            unit: "Kms",
            title: "Distance Walked",
            description: format!("Distance on {date}"),
            value: metrics.current_distance.as_deref(),
            target: goals.distance,
            label: "Kms",
        }),
        energy: build_radial_config(RadialChartInput {
            data_key: "energy",
            unit: "kcal",
            title: "Active Energy",
            description: format!("Active energy on {date}"),
            value: energy.as_deref(),
            target: goals.energy,
            label: "kcal",
        }),
    }
}

// ============================================================================
// Linear Charts
// ============================================================================

/// Area chart of one metric over time
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinearChartConfig {
    pub metric: MetricName,
    pub title: String,
    pub description: String,
    pub label: String,
    pub color: String,
    pub data: Vec<ChartDataPoint>,
}

fn linear_chart_text(metric: MetricName) -> (&'static str, &'static str, &'static str) {
    match metric {
        MetricName::Weight => ("Daily Weight", "Weight changes over time.", "Weight"),
        MetricName::Steps => ("Daily Steps", "Step count changes over time.", "Steps"),
        MetricName::Energy => (
            "Daily Active Energy",
            "Active energy expenditure over time.",
            "Energy",
        ),
        MetricName::Exercise => (
            "Daily Exercise Minutes",
            "Daily exercise minutes over time.",
            "Exercise",
        ),
        MetricName::Distance => ("Daily Distance", "Daily distance covered over time.", "Distance"),
        MetricName::Water => ("Daily Water Intake", "Daily water intake over time.", "Water"),
        MetricName::Standing => ("Daily Standing", "Daily standing minutes over time.", "Standing"),
    }
}

/// One linear chart per series metric, in display order
///
/// A metric without a series gets an empty chart.
pub fn build_linear_charts(series: &BTreeMap<MetricName, Vec<ChartDataPoint>>) -> Vec<LinearChartConfig> {
    MetricName::SERIES
        .into_iter()
        .map(|metric| {
            let (title, description, label) = linear_chart_text(metric);
            LinearChartConfig {
                metric,
                title: title.to_string(),
                description: description.to_string(),
                label: label.to_string(),
                color: LINEAR_CHART_COLOR.to_string(),
                data: series.get(&metric).cloned().unwrap_or_default(),
            }
        })
        .collect()
}

//! Motivate dashboard core
//!
//! Pure, synchronous transformation of health measurements, goals and the
//! metric catalog into display-ready dashboard data. Shared by the backend,
//! the dashboard client and the WASM module.

pub mod charts;
pub mod dashboard;
pub mod dates;
pub mod errors;
pub mod goals;
pub mod measurements;
pub mod metrics;
pub mod preferences;
pub mod trends;
pub mod types;
pub mod units;
pub mod validation;

// Re-export commonly used items
pub use charts::{
    build_all_radial_configs, build_linear_charts, build_radial_config, LinearChartConfig, ProgressColor,
    RadialChartConfig, RadialChartInput, RadialCharts,
};
pub use dashboard::{build_dashboard, build_dashboard_with_target, Dashboard, DashboardInputs};
pub use dates::{TimeRange, DATA_FETCH_WINDOW_DAYS};
pub use errors::*;
pub use goals::{extract_goals, DashboardGoals, GoalRecord, GoalTarget, DEFAULT_TARGET};
pub use measurements::{extract_current, to_series, ChartDataPoint, DashboardMetrics, MeasurementRecord};
pub use metrics::{resolve_metric_ids, MetricCatalogEntry, MetricIdMap, MetricName};
pub use preferences::DisplayPreferences;
pub use trends::{compute_weight_trend, compute_weight_trend_now, WeightTrend, WeightTrendInput};
pub use types::*;
pub use units::*;

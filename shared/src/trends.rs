//! Weight trend and goal progress
//!
//! Given the current weight, the weight history and the weight goal, derive:
//! - the signed change against the value 7, 30 and 90 days ago
//! - whether each change is trending down (down is improving for weight)
//! - progress toward the goal measured from the weight on the goal's start date
//! - the remaining distance to the target
//!
//! All day arithmetic is done on UTC calendar dates. `today` is passed in so
//! the computation is deterministic; `compute_weight_trend_now` reads the clock.

use crate::dates::utc_date_days_ago;
use crate::measurements::{numeric_or_zero, MeasurementRecord};
use crate::metrics::MetricName;
use crate::units::WeightUnit;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Look-back windows for trend deltas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrendWindow {
    SevenDay,
    ThirtyDay,
    NinetyDay,
}

impl TrendWindow {
    pub const ALL: [TrendWindow; 3] = [
        TrendWindow::SevenDay,
        TrendWindow::ThirtyDay,
        TrendWindow::NinetyDay,
    ];

    pub fn days(&self) -> i64 {
        match self {
            TrendWindow::SevenDay => 7,
            TrendWindow::ThirtyDay => 30,
            TrendWindow::NinetyDay => 90,
        }
    }
}

/// Inputs to the weight trend computation
#[derive(Debug, Clone)]
pub struct WeightTrendInput<'a> {
    pub current_weight: Option<&'a str>,
    pub target_weight: f64,
    pub weight_history: &'a [MeasurementRecord],
    /// Date the weight goal was set
    pub start_date: Option<NaiveDate>,
}

/// Derived weight figures for display
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightTrend {
    /// current - target, two decimals
    pub weight_to_go: f64,
    pub seven_day_trend: Option<f64>,
    pub thirty_day_trend: Option<f64>,
    pub ninety_day_trend: Option<f64>,
    /// Percent of the way from the starting weight to the target, 0..=100
    pub progress: u8,
    pub is_above_target: bool,
    pub seven_day_is_trending_down: bool,
    pub thirty_day_is_trending_down: bool,
    pub ninety_day_is_trending_down: bool,
}

impl WeightTrend {
    /// Trend delta for a window
    pub fn trend(&self, window: TrendWindow) -> Option<f64> {
        match window {
            TrendWindow::SevenDay => self.seven_day_trend,
            TrendWindow::ThirtyDay => self.thirty_day_trend,
            TrendWindow::NinetyDay => self.ninety_day_trend,
        }
    }

    /// Rescale the kilogram deltas into another display unit
    pub fn in_unit(&self, unit: WeightUnit) -> Self {
        let convert = |kg: f64| round2(unit.from_kg(kg));
        Self {
            weight_to_go: convert(self.weight_to_go),
            seven_day_trend: self.seven_day_trend.map(convert),
            thirty_day_trend: self.thirty_day_trend.map(convert),
            ninety_day_trend: self.ninety_day_trend.map(convert),
            ..*self
        }
    }
}

/// Round to two decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Latest entry measured at or before `cutoff`, whatever the input order
pub fn entry_on_or_before(
    history: &[MeasurementRecord],
    cutoff: DateTime<Utc>,
) -> Option<&MeasurementRecord> {
    history
        .iter()
        .filter(|entry| entry.measured_at <= cutoff)
        .max_by_key(|entry| entry.measured_at)
}

/// Entry approximating the value `days` ago: latest at or before UTC midnight
/// of `today - days`
pub fn value_days_ago(
    history: &[MeasurementRecord],
    days: i64,
    today: NaiveDate,
) -> Option<&MeasurementRecord> {
    entry_on_or_before(history, utc_date_days_ago(days, today))
}

/// Whether a signed delta is an improvement for the metric
pub fn is_improving(metric: MetricName, delta: f64) -> bool {
    if metric.improves_when_decreasing() {
        delta < 0.0
    } else {
        delta > 0.0
    }
}

/// Progress from `starting_point` toward `target`, clamped to 0..=100
///
/// A start equal to the target, or any non-finite input, yields 0.
pub fn progress_percent(starting_point: f64, current: f64, target: f64) -> u8 {
    let span = starting_point - target;
    if span == 0.0 || !span.is_finite() || !current.is_finite() {
        return 0;
    }
    let percent = ((starting_point - current) / span * 100.0).round();
    if percent.is_nan() {
        return 0;
    }
    percent.clamp(0.0, 100.0) as u8
}

/// Compute the weight trend as of the UTC date `today`
pub fn compute_weight_trend(input: &WeightTrendInput<'_>, today: NaiveDate) -> WeightTrend {
    let has_current = input
        .current_weight
        .map(|w| !w.trim().is_empty())
        .unwrap_or(false);
    let current = numeric_or_zero(input.current_weight);

    let trend_for = |window: TrendWindow| -> Option<f64> {
        if !has_current {
            return None;
        }
        let past = value_days_ago(input.weight_history, window.days(), today)?;
        let past_value = past.numeric_value().filter(|v| *v != 0.0)?;
        Some(round2(current - past_value))
    };

    let seven_day_trend = trend_for(TrendWindow::SevenDay);
    let thirty_day_trend = trend_for(TrendWindow::ThirtyDay);
    let ninety_day_trend = trend_for(TrendWindow::NinetyDay);

    // Only the weight on the goal's start date counts as a starting point
    let starting_point = input.start_date.and_then(|start| {
        input
            .weight_history
            .iter()
            .find(|entry| entry.measured_at.date_naive() == start)
            .and_then(|entry| entry.numeric_value())
    });

    let progress = starting_point
        .map(|start| progress_percent(start, current, input.target_weight))
        .unwrap_or(0);

    let weight_to_go = round2(current - input.target_weight);

    WeightTrend {
        weight_to_go,
        seven_day_trend,
        thirty_day_trend,
        ninety_day_trend,
        progress,
        is_above_target: weight_to_go >= 0.0,
        seven_day_is_trending_down: is_trending_down(seven_day_trend),
        thirty_day_is_trending_down: is_trending_down(thirty_day_trend),
        ninety_day_is_trending_down: is_trending_down(ninety_day_trend),
    }
}

/// Compute the weight trend as of the current UTC date
pub fn compute_weight_trend_now(input: &WeightTrendInput<'_>) -> WeightTrend {
    compute_weight_trend(input, Utc::now().date_naive())
}

fn is_trending_down(trend: Option<f64>) -> bool {
    trend.map(|t| t < 0.0).unwrap_or(false)
}

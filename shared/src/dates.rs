//! UTC calendar helpers
//!
//! Every "days ago" and "same day" comparison in the dashboard runs on UTC
//! calendar dates. Local time never enters the computation.

use crate::errors::ValidationError;
use crate::measurements::ChartDataPoint;
use crate::types::DateRange;
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DAYS_IN_WEEK: i64 = 7;
pub const DAYS_IN_MONTH: i64 = 30;
pub const DAYS_TO_FETCH: i64 = 90;
/// Trailing window used when fetching measurement history
pub const DATA_FETCH_WINDOW_DAYS: i64 = 91;

/// Midnight UTC at the start of `date`
pub fn utc_midnight(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Midnight UTC `days` calendar days before `today`
pub fn utc_date_days_ago(days: i64, today: NaiveDate) -> DateTime<Utc> {
    utc_midnight(today - Duration::days(days))
}

/// Whether two instants fall on the same UTC calendar day
pub fn is_same_utc_date(a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
    a.date_naive() == b.date_naive()
}

/// Trailing date window ending today
pub fn date_range(days_back: i64, today: NaiveDate) -> DateRange {
    DateRange {
        start: today - Duration::days(days_back),
        end: today,
    }
}

/// Short day-month label, e.g. "15 Jan"
pub fn format_short_date(date: NaiveDate) -> String {
    date.format("%-d %b").to_string()
}

// ============================================================================
// Time Range Selection
// ============================================================================

/// Chart time range selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TimeRange {
    #[default]
    #[serde(rename = "7d")]
    Week,
    #[serde(rename = "30d")]
    Month,
    #[serde(rename = "90d")]
    Quarter,
}

impl TimeRange {
    /// Number of days covered by this range
    pub fn days(&self) -> i64 {
        match self {
            TimeRange::Week => DAYS_IN_WEEK,
            TimeRange::Month => DAYS_IN_MONTH,
            TimeRange::Quarter => DAYS_TO_FETCH,
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            TimeRange::Week => "7 days",
            TimeRange::Month => "30 days",
            TimeRange::Quarter => "90 days",
        }
    }

    /// Keep the points dated on or after `today - days`
    pub fn filter_series(&self, series: &[ChartDataPoint], today: NaiveDate) -> Vec<ChartDataPoint> {
        let cutoff = today - Duration::days(self.days());
        series
            .iter()
            .filter(|point| point.date >= cutoff)
            .cloned()
            .collect()
    }

    /// Lenient parse used for query strings; anything unrecognised is 90 days
    pub fn parse_lenient(value: &str) -> Self {
        value.parse().unwrap_or(TimeRange::Quarter)
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TimeRange::Week => "7d",
            TimeRange::Month => "30d",
            TimeRange::Quarter => "90d",
        };
        f.write_str(s)
    }
}

impl FromStr for TimeRange {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "7d" => Ok(TimeRange::Week),
            "30d" => Ok(TimeRange::Month),
            "90d" => Ok(TimeRange::Quarter),
            other => Err(ValidationError::InvalidTimeRange(other.to_string())),
        }
    }
}

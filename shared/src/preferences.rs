//! Display preferences
//!
//! Preferences travel with the request or session that owns them and are
//! passed into dashboard assembly explicitly.

use crate::dates::TimeRange;
use crate::units::{DistanceUnit, WeightUnit};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DisplayPreferences {
    pub weight_unit: WeightUnit,
    pub distance_unit: DistanceUnit,
    pub time_range: TimeRange,
}

impl DisplayPreferences {
    pub fn with_weight_unit(mut self, unit: WeightUnit) -> Self {
        self.weight_unit = unit;
        self
    }

    pub fn with_distance_unit(mut self, unit: DistanceUnit) -> Self {
        self.distance_unit = unit;
        self
    }

    pub fn with_time_range(mut self, range: TimeRange) -> Self {
        self.time_range = range;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let prefs = DisplayPreferences::default();
        assert_eq!(prefs.weight_unit, WeightUnit::Kg);
        assert_eq!(prefs.distance_unit, DistanceUnit::Km);
        assert_eq!(prefs.time_range, TimeRange::Week);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let prefs: DisplayPreferences = serde_json::from_str(r#"{"weightUnit":"lbs"}"#).unwrap();
        assert_eq!(prefs.weight_unit, WeightUnit::Lbs);
        assert_eq!(prefs.time_range, TimeRange::Week);
    }

    #[test]
    fn test_builder() {
        let prefs = DisplayPreferences::default()
            .with_distance_unit(DistanceUnit::Miles)
            .with_time_range(TimeRange::Month);
        assert_eq!(prefs.distance_unit, DistanceUnit::Miles);
        assert_eq!(prefs.time_range, TimeRange::Month);
    }
}

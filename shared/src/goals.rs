//! Goal target extraction

use crate::measurements::parse_decimal;
use crate::metrics::{MetricIdMap, MetricName};
use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Target used for a metric without an active goal
pub const DEFAULT_TARGET: f64 = 10000.0;

/// A user-set goal for a metric
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalRecord {
    pub metric_type_id: i32,
    /// Decimal target exactly as stored
    pub target_value: String,
    pub start_date: Option<NaiveDate>,
    pub active: bool,
}

/// Target value and the date the goal was set
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalTarget {
    pub value: f64,
    pub start_date: Option<NaiveDate>,
}

impl GoalTarget {
    /// Target without a goal behind it
    pub fn fallback(value: f64) -> Self {
        Self {
            value,
            start_date: None,
        }
    }
}

/// Goal target for every semantic metric
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DashboardGoals {
    pub weight: GoalTarget,
    pub steps: GoalTarget,
    pub exercise: GoalTarget,
    pub standing: GoalTarget,
    pub water: GoalTarget,
    pub distance: GoalTarget,
    pub energy: GoalTarget,
}

impl DashboardGoals {
    pub fn get(&self, name: MetricName) -> &GoalTarget {
        match name {
            MetricName::Weight => &self.weight,
            MetricName::Steps => &self.steps,
            MetricName::Exercise => &self.exercise,
            MetricName::Standing => &self.standing,
            MetricName::Water => &self.water,
            MetricName::Distance => &self.distance,
            MetricName::Energy => &self.energy,
        }
    }
}

/// Resolve each metric's active goal into a target
///
/// Inactive goals and goals whose target is not a decimal are ignored. With
/// several active goals for one metric the last one wins.
pub fn extract_goals(goals: &[GoalRecord], ids: &MetricIdMap, default_target: f64) -> DashboardGoals {
    let by_type: HashMap<i32, GoalTarget> = goals
        .iter()
        .filter(|goal| goal.active)
        .filter_map(|goal| {
            let value = parse_decimal(&goal.target_value)?.to_f64()?;
            Some((
                goal.metric_type_id,
                GoalTarget {
                    value,
                    start_date: goal.start_date,
                },
            ))
        })
        .collect();

    let target = |name: MetricName| {
        by_type
            .get(&ids.get(name))
            .copied()
            .unwrap_or(GoalTarget::fallback(default_target))
    };

    DashboardGoals {
        weight: target(MetricName::Weight),
        steps: target(MetricName::Steps),
        exercise: target(MetricName::Exercise),
        standing: target(MetricName::Standing),
        water: target(MetricName::Water),
        distance: target(MetricName::Distance),
        energy: target(MetricName::Energy),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goal(metric_type_id: i32, target: &str, start: Option<(i32, u32, u32)>) -> GoalRecord {
        GoalRecord {
            metric_type_id,
            target_value: target.to_string(),
            start_date: start.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
            active: true,
        }
    }

    #[test]
    fn test_extract_goal_targets() {
        let goals = vec![goal(2, "12000", None), goal(3, "60", Some((2024, 1, 1)))];
        let result = extract_goals(&goals, &MetricIdMap::default(), DEFAULT_TARGET);
        assert_eq!(result.steps.value, 12000.0);
        assert_eq!(result.exercise.value, 60.0);
        assert_eq!(result.exercise.start_date, NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(result.steps.start_date, None);
    }

    #[test]
    fn test_missing_goals_use_default() {
        let goals = vec![goal(2, "12000", None)];
        let result = extract_goals(&goals, &MetricIdMap::default(), DEFAULT_TARGET);
        assert_eq!(result.standing, GoalTarget::fallback(10000.0));
    }

    #[test]
    fn test_custom_default_target() {
        let result = extract_goals(&[], &MetricIdMap::default(), 5000.0);
        assert_eq!(result.standing.value, 5000.0);
    }

    #[test]
    fn test_empty_goals_default_everywhere() {
        let result = extract_goals(&[], &MetricIdMap::default(), DEFAULT_TARGET);
        for name in MetricName::ALL {
            assert_eq!(result.get(name).value, 10000.0);
            assert_eq!(result.get(name).start_date, None);
        }
    }

    #[test]
    fn test_inactive_goals_are_ignored() {
        let mut inactive = goal(1, "70", Some((2024, 1, 1)));
        inactive.active = false;
        let result = extract_goals(&[inactive], &MetricIdMap::default(), DEFAULT_TARGET);
        assert_eq!(result.weight.value, DEFAULT_TARGET);
    }

    #[test]
    fn test_last_active_goal_wins() {
        let goals = vec![goal(1, "80", None), goal(1, "72.5", Some((2024, 2, 1)))];
        let result = extract_goals(&goals, &MetricIdMap::default(), DEFAULT_TARGET);
        assert_eq!(result.weight.value, 72.5);
    }

    #[test]
    fn test_unparseable_target_counts_as_missing() {
        let result = extract_goals(&[goal(1, "n/a", None)], &MetricIdMap::default(), DEFAULT_TARGET);
        assert_eq!(result.weight.value, DEFAULT_TARGET);
    }

    #[test]
    fn test_goals_follow_resolved_ids() {
        let ids = MetricIdMap {
            weight: 40,
            ..MetricIdMap::default()
        };
        let result = extract_goals(&[goal(40, "70", None)], &ids, DEFAULT_TARGET);
        assert_eq!(result.weight.value, 70.0);
    }
}

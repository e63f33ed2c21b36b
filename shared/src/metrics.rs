//! Metric catalog resolution
//!
//! The server assigns numeric ids to metric kinds. The dashboard works with a
//! fixed, closed set of semantic names and needs an id for each of them even
//! when the catalog is empty or incomplete, so every name carries a default.

use crate::errors::ValidationError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Metric Names
// ============================================================================

/// Semantic metric name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricName {
    Weight,
    Steps,
    Exercise,
    Standing,
    Distance,
    Water,
    Energy,
}

impl MetricName {
    /// Every semantic metric name
    pub const ALL: [MetricName; 7] = [
        MetricName::Weight,
        MetricName::Steps,
        MetricName::Exercise,
        MetricName::Standing,
        MetricName::Distance,
        MetricName::Water,
        MetricName::Energy,
    ];

    /// Metrics with a fetched history and a linear chart
    pub const SERIES: [MetricName; 6] = [
        MetricName::Steps,
        MetricName::Weight,
        MetricName::Energy,
        MetricName::Exercise,
        MetricName::Distance,
        MetricName::Water,
    ];

    /// Catalog name for this metric
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricName::Weight => "weight",
            MetricName::Steps => "steps",
            MetricName::Exercise => "exercise",
            MetricName::Standing => "standing",
            MetricName::Distance => "distance",
            MetricName::Water => "water",
            MetricName::Energy => "energy",
        }
    }

    /// Fallback id used when the catalog has no entry for this name
    pub fn default_id(&self) -> i32 {
        match self {
            MetricName::Weight => 1,
            MetricName::Steps => 2,
            MetricName::Exercise => 3,
            MetricName::Water => 4,
            MetricName::Distance => 5,
            MetricName::Standing => 6,
            MetricName::Energy => 7,
        }
    }

    /// Whether a falling value counts as progress
    pub fn improves_when_decreasing(&self) -> bool {
        matches!(self, MetricName::Weight)
    }
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetricName {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MetricName::ALL
            .into_iter()
            .find(|name| name.as_str() == s.trim().to_lowercase())
            .ok_or_else(|| ValidationError::UnknownMetric(s.to_string()))
    }
}

// ============================================================================
// Catalog
// ============================================================================

/// A metric kind as registered on the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricCatalogEntry {
    pub id: i32,
    pub name: String,
    pub unit: String,
    pub description: Option<String>,
}

/// Resolved ids for every semantic metric name
///
/// Always total: a name missing from the catalog keeps its default id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricIdMap {
    pub weight: i32,
    pub steps: i32,
    pub exercise: i32,
    pub standing: i32,
    pub distance: i32,
    pub water: i32,
    pub energy: i32,
}

impl Default for MetricIdMap {
    fn default() -> Self {
        Self {
            weight: MetricName::Weight.default_id(),
            steps: MetricName::Steps.default_id(),
            exercise: MetricName::Exercise.default_id(),
            standing: MetricName::Standing.default_id(),
            distance: MetricName::Distance.default_id(),
            water: MetricName::Water.default_id(),
            energy: MetricName::Energy.default_id(),
        }
    }
}

impl MetricIdMap {
    /// Id resolved for a metric name
    pub fn get(&self, name: MetricName) -> i32 {
        match name {
            MetricName::Weight => self.weight,
            MetricName::Steps => self.steps,
            MetricName::Exercise => self.exercise,
            MetricName::Standing => self.standing,
            MetricName::Distance => self.distance,
            MetricName::Water => self.water,
            MetricName::Energy => self.energy,
        }
    }

    fn slot(&mut self, name: MetricName) -> &mut i32 {
        match name {
            MetricName::Weight => &mut self.weight,
            MetricName::Steps => &mut self.steps,
            MetricName::Exercise => &mut self.exercise,
            MetricName::Standing => &mut self.standing,
            MetricName::Distance => &mut self.distance,
            MetricName::Water => &mut self.water,
            MetricName::Energy => &mut self.energy,
        }
    }

    /// `(name, id)` pairs in `MetricName::ALL` order
    pub fn iter(&self) -> impl Iterator<Item = (MetricName, i32)> + '_ {
        MetricName::ALL.into_iter().map(move |name| (name, self.get(name)))
    }
}

/// Build a name -> id index from the catalog
///
/// A later entry with the same name overwrites an earlier one.
pub fn metric_name_index(catalog: &[MetricCatalogEntry]) -> HashMap<String, i32> {
    catalog
        .iter()
        .map(|entry| (entry.name.clone(), entry.id))
        .collect()
}

/// Resolve every semantic metric name against the catalog
pub fn resolve_metric_ids(catalog: &[MetricCatalogEntry]) -> MetricIdMap {
    let index = metric_name_index(catalog);
    let mut ids = MetricIdMap::default();
    for name in MetricName::ALL {
        if let Some(id) = index.get(name.as_str()) {
            *ids.slot(name) = *id;
        }
    }
    ids
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    fn entry(id: i32, name: &str) -> MetricCatalogEntry {
        MetricCatalogEntry {
            id,
            name: name.to_string(),
            unit: "unit".to_string(),
            description: None,
        }
    }

    #[test]
    fn test_empty_catalog_uses_defaults() {
        let ids = resolve_metric_ids(&[]);
        assert_eq!(ids, MetricIdMap::default());
        assert_eq!(ids.weight, 1);
        assert_eq!(ids.water, 4);
        assert_eq!(ids.standing, 6);
        assert_eq!(ids.energy, 7);
    }

    #[test]
    fn test_catalog_overrides_defaults() {
        let catalog = vec![entry(11, "weight"), entry(42, "energy")];
        let ids = resolve_metric_ids(&catalog);
        assert_eq!(ids.weight, 11);
        assert_eq!(ids.energy, 42);
        assert_eq!(ids.steps, MetricName::Steps.default_id());
    }

    #[test]
    fn test_unknown_catalog_names_are_ignored() {
        let catalog = vec![entry(99, "sleep"), entry(3, "steps")];
        let ids = resolve_metric_ids(&catalog);
        assert_eq!(ids.steps, 3);
        assert!(ids.iter().all(|(_, id)| id != 99));
    }

    #[test]
    fn test_duplicate_names_last_wins() {
        let index = metric_name_index(&[entry(1, "weight"), entry(8, "weight")]);
        assert_eq!(index.get("weight"), Some(&8));
    }

    #[test]
    fn test_default_ids_are_unique() {
        let mut ids: Vec<i32> = MetricName::ALL.iter().map(|m| m.default_id()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), MetricName::ALL.len());
    }

    #[rstest]
    #[case("weight", MetricName::Weight)]
    #[case("Steps", MetricName::Steps)]
    #[case(" energy ", MetricName::Energy)]
    fn test_parse_metric_name(#[case] input: &str, #[case] expected: MetricName) {
        assert_eq!(input.parse::<MetricName>().unwrap(), expected);
    }

    #[test]
    fn test_parse_unknown_metric_name() {
        assert!(matches!(
            "sleep".parse::<MetricName>(),
            Err(ValidationError::UnknownMetric(_))
        ));
    }

    #[test]
    fn test_only_weight_improves_when_decreasing() {
        let decreasing: Vec<MetricName> = MetricName::ALL
            .into_iter()
            .filter(|m| m.improves_when_decreasing())
            .collect();
        assert_eq!(decreasing, vec![MetricName::Weight]);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_resolution_is_total(
            entries in prop::collection::vec(
                (1i32..1000, prop::sample::select(vec![
                    "weight", "steps", "exercise", "standing",
                    "distance", "water", "energy", "sleep", "heart_rate",
                ])),
                0..20,
            )
        ) {
            let catalog: Vec<MetricCatalogEntry> =
                entries.iter().map(|(id, name)| entry(*id, name)).collect();
            let ids = resolve_metric_ids(&catalog);
            let index = metric_name_index(&catalog);

            for name in MetricName::ALL {
                let expected = index.get(name.as_str()).copied().unwrap_or(name.default_id());
                prop_assert_eq!(ids.get(name), expected);
            }
        }
    }
}

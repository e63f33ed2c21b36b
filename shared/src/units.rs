//! Display unit conversion
//!
//! Measurements are stored in SI-style units (kg, km, ml). Conversion only
//! happens when shaping values for display.

use crate::errors::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;

const KG_PER_LB: f64 = 0.453592;
const KM_PER_MILE: f64 = 1.609344;

// ============================================================================
// Weight Units
// ============================================================================

/// Weight unit preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    #[default]
    Kg,
    Lbs,
}

impl WeightUnit {
    /// Convert from this unit to kilograms
    pub fn to_kg(&self, value: f64) -> f64 {
        match self {
            WeightUnit::Kg => value,
            WeightUnit::Lbs => value * KG_PER_LB,
        }
    }

    /// Convert from kilograms to this unit
    pub fn from_kg(&self, kg: f64) -> f64 {
        match self {
            WeightUnit::Kg => kg,
            WeightUnit::Lbs => kg / KG_PER_LB,
        }
    }

    pub fn abbreviation(&self) -> &'static str {
        match self {
            WeightUnit::Kg => "kg",
            WeightUnit::Lbs => "lbs",
        }
    }
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

impl std::str::FromStr for WeightUnit {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "kg" | "kilogram" | "kilograms" => Ok(WeightUnit::Kg),
            "lbs" | "lb" | "pound" | "pounds" => Ok(WeightUnit::Lbs),
            _ => Err(ValidationError::InvalidUnit(s.to_string())),
        }
    }
}

// ============================================================================
// Distance Units
// ============================================================================

/// Distance unit preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DistanceUnit {
    #[default]
    Km,
    Miles,
}

impl DistanceUnit {
    /// Convert from kilometres to this unit
    pub fn from_km(&self, km: f64) -> f64 {
        match self {
            DistanceUnit::Km => km,
            DistanceUnit::Miles => km / KM_PER_MILE,
        }
    }

    /// Convert from this unit to kilometres
    pub fn to_km(&self, value: f64) -> f64 {
        match self {
            DistanceUnit::Km => value,
            DistanceUnit::Miles => value * KM_PER_MILE,
        }
    }

    pub fn abbreviation(&self) -> &'static str {
        match self {
            DistanceUnit::Km => "km",
            DistanceUnit::Miles => "mi",
        }
    }
}

impl fmt::Display for DistanceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

impl std::str::FromStr for DistanceUnit {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "km" | "kms" | "kilometer" | "kilometers" | "kilometre" | "kilometres" => {
                Ok(DistanceUnit::Km)
            }
            "mi" | "mile" | "miles" => Ok(DistanceUnit::Miles),
            _ => Err(ValidationError::InvalidUnit(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[test]
    fn test_weight_conversion() {
        assert!((WeightUnit::Lbs.from_kg(100.0) - 220.462).abs() < 0.01);
        assert_eq!(WeightUnit::Kg.from_kg(72.4), 72.4);
    }

    #[test]
    fn test_distance_conversion() {
        assert!((DistanceUnit::Miles.from_km(10.0) - 6.2137).abs() < 0.001);
        assert_eq!(DistanceUnit::Km.from_km(5.0), 5.0);
    }

    #[rstest]
    #[case("kg", WeightUnit::Kg)]
    #[case("LBS", WeightUnit::Lbs)]
    #[case("pounds", WeightUnit::Lbs)]
    fn test_parse_weight_unit(#[case] input: &str, #[case] expected: WeightUnit) {
        assert_eq!(input.parse::<WeightUnit>().unwrap(), expected);
    }

    #[test]
    fn test_parse_unknown_unit() {
        assert!("stone".parse::<WeightUnit>().is_err());
        assert!("furlong".parse::<DistanceUnit>().is_err());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_weight_round_trip(kg in 0.0f64..500.0) {
            for unit in [WeightUnit::Kg, WeightUnit::Lbs] {
                prop_assert!((unit.to_kg(unit.from_kg(kg)) - kg).abs() < 1e-9);
            }
        }

        #[test]
        fn prop_distance_round_trip(km in 0.0f64..500.0) {
            for unit in [DistanceUnit::Km, DistanceUnit::Miles] {
                prop_assert!((unit.to_km(unit.from_km(km)) - km).abs() < 1e-9);
            }
        }
    }
}

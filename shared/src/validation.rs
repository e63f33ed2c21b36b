//! Input validation functions
//!
//! Checks applied to measurement and metric input before it reaches the
//! database. Derive-based checks live on the request types in `types`.

use crate::errors::ValidationError;
use crate::measurements::parse_decimal;
use regex_lite::Regex;
use rust_decimal::Decimal;
use std::sync::OnceLock;

/// Largest magnitude that fits `numeric(10,2)`
pub const MAX_MEASUREMENT_VALUE: Decimal = Decimal::from_parts(99_999_999, 0, 0, false, 0);

/// Parse a decimal string, naming the field on failure
pub fn validate_decimal(field: &'static str, value: &str) -> Result<Decimal, ValidationError> {
    parse_decimal(value).ok_or_else(|| ValidationError::InvalidDecimal {
        field,
        value: value.to_string(),
    })
}

/// Validate a measurement value and round it to the stored scale
pub fn validate_measurement_value(value: &str) -> Result<Decimal, ValidationError> {
    let decimal = validate_decimal("value", value)?;
    if decimal.is_sign_negative() && !decimal.is_zero() {
        return Err(ValidationError::InvalidValue {
            field: "value",
            message: "Measurement value cannot be negative".to_string(),
        });
    }
    let rounded = decimal.round_dp(2);
    if rounded.trunc() > MAX_MEASUREMENT_VALUE {
        return Err(ValidationError::InvalidValue {
            field: "value",
            message: "Measurement value has more than 8 integer digits".to_string(),
        });
    }
    Ok(rounded)
}

/// Compiled once; `None` only if the pattern fails to compile
fn source_regex() -> Option<&'static Regex> {
    static SOURCE_REGEX: OnceLock<Option<Regex>> = OnceLock::new();
    SOURCE_REGEX
        .get_or_init(|| Regex::new(r"^[a-z0-9_]{1,50}$").ok())
        .as_ref()
}

/// Validate a measurement source tag such as `apple_health`
pub fn validate_source(source: &str) -> Result<(), ValidationError> {
    let pattern = source_regex().ok_or_else(|| ValidationError::InvalidValue {
        field: "source",
        message: "Source pattern is unavailable".to_string(),
    })?;
    if !pattern.is_match(source) {
        return Err(ValidationError::InvalidValue {
            field: "source",
            message: "Source must be 1-50 lowercase letters, digits or underscores".to_string(),
        });
    }
    Ok(())
}

/// Validate a metric type name for the catalog
pub fn validate_metric_name(name: &str) -> Result<(), ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::InvalidValue {
            field: "name",
            message: "Metric name cannot be empty".to_string(),
        });
    }
    if trimmed.len() > 20 {
        return Err(ValidationError::InvalidValue {
            field: "name",
            message: "Metric name must be at most 20 characters".to_string(),
        });
    }
    Ok(())
}

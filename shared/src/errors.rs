//! Error types for the Motivate dashboard core

use thiserror::Error;

/// Boundary validation failures
///
/// Raised only while converting wire JSON into the typed entities. The pure
/// pipeline itself never fails.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid decimal for {field}: {value:?}")]
    InvalidDecimal { field: &'static str, value: String },

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: &'static str, message: String },

    #[error("Unknown metric name: {0}")]
    UnknownMetric(String),

    #[error("Invalid time range: {0}")]
    InvalidTimeRange(String),

    #[error("Invalid unit: {0}")]
    InvalidUnit(String),

    #[error("Invalid request: {0}")]
    Request(String),
}

impl ValidationError {
    /// Name of the offending field, when there is one
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ValidationError::InvalidDecimal { field, .. }
            | ValidationError::InvalidValue { field, .. } => Some(field),
            _ => None,
        }
    }
}

impl From<validator::ValidationErrors> for ValidationError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ValidationError::Request(errors.to_string())
    }
}

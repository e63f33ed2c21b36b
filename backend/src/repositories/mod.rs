//! Database repositories
//!
//! Provides data access layer for database operations.

pub mod goals;
pub mod measurements;
pub mod metric_types;
pub mod user;

pub use goals::{CreateGoal, GoalRepository, GoalRow};
pub use measurements::{CreateMeasurement, MeasurementRepository, MeasurementRow};
pub use metric_types::{MetricTypeRecord, MetricTypeRepository};
pub use user::UserRepository;

//! Business logic services
//!
//! Services encapsulate business logic and coordinate between
//! repositories and the pure dashboard pipeline.

pub mod dashboard;
pub mod export;
pub mod measurements;
pub mod metrics;

pub use dashboard::{DashboardService, DashboardSource, PgDashboardSource};
pub use export::{DashboardExport, ExportFile, ExportFormat, ExportService};
pub use measurements::MeasurementService;
pub use metrics::MetricTypeService;

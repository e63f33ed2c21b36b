//! Dashboard data loading and assembly
//!
//! The dashboard is built from four kinds of reads: the latest value of
//! every metric, the active goals, the metric catalog and a daily history
//! per charted metric. [`DashboardSource`] abstracts where those come from
//! so the same assembly runs against Postgres inside the server and against
//! the HTTP API from the `motivate-dashboard` client.
//!
//! Any failed read fails the whole load; a partial dashboard is never built.

use crate::config::DashboardConfig;
use crate::repositories::{GoalRepository, MeasurementRepository, MetricTypeRepository};
use anyhow::Result;
use async_trait::async_trait;
use chrono::{Duration, NaiveDate};
use motivate_shared::dates::{date_range, utc_midnight};
use motivate_shared::{
    build_dashboard_with_target, resolve_metric_ids, Dashboard, DashboardInputs, DateRange, DisplayPreferences,
    GoalRecord, MeasurementRecord, MetricCatalogEntry, MetricName,
};
use sqlx::PgPool;
use std::collections::BTreeMap;
use tracing::{debug, info};
use uuid::Uuid;

/// Read side of the dashboard
#[async_trait]
pub trait DashboardSource: Send + Sync {
    /// Latest measurement of every metric
    async fn latest_snapshot(&self, user_id: Uuid) -> Result<Vec<MeasurementRecord>>;

    async fn active_goals(&self, user_id: Uuid) -> Result<Vec<GoalRecord>>;

    async fn metric_catalog(&self) -> Result<Vec<MetricCatalogEntry>>;

    /// One record per UTC day within `range`, both ends inclusive, oldest first
    async fn history(
        &self,
        user_id: Uuid,
        metric_type_id: i32,
        range: DateRange,
    ) -> Result<Vec<MeasurementRecord>>;
}

/// Dashboard reads straight from the database
#[derive(Clone)]
pub struct PgDashboardSource {
    pool: PgPool,
}

impl PgDashboardSource {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DashboardSource for PgDashboardSource {
    async fn latest_snapshot(&self, user_id: Uuid) -> Result<Vec<MeasurementRecord>> {
        let rows = MeasurementRepository::latest_per_metric(&self.pool, user_id).await?;
        Ok(rows.iter().map(|row| row.to_record()).collect())
    }

    async fn active_goals(&self, user_id: Uuid) -> Result<Vec<GoalRecord>> {
        let rows = GoalRepository::active_for_user(&self.pool, user_id).await?;
        Ok(rows.iter().map(|row| row.to_record()).collect())
    }

    async fn metric_catalog(&self) -> Result<Vec<MetricCatalogEntry>> {
        let records = MetricTypeRepository::list(&self.pool).await?;
        Ok(records.into_iter().map(MetricCatalogEntry::from).collect())
    }

    async fn history(
        &self,
        user_id: Uuid,
        metric_type_id: i32,
        range: DateRange,
    ) -> Result<Vec<MeasurementRecord>> {
        let start = utc_midnight(range.start);
        let end = utc_midnight(range.end + Duration::days(1));
        let rows =
            MeasurementRepository::daily_history(&self.pool, user_id, metric_type_id, Some(start), Some(end)).await?;
        Ok(rows.iter().map(|row| row.to_record()).collect())
    }
}

/// Dashboard service
pub struct DashboardService;

impl DashboardService {
    /// Fetch everything one dashboard render needs
    ///
    /// Snapshot, goals and catalog are read concurrently. The catalog fixes
    /// the metric ids, after which the six histories are read concurrently.
    pub async fn load_inputs<S: DashboardSource + ?Sized>(
        source: &S,
        user_id: Uuid,
        range: DateRange,
    ) -> Result<DashboardInputs> {
        let (snapshot, goals, catalog) = tokio::try_join!(
            source.latest_snapshot(user_id),
            source.active_goals(user_id),
            source.metric_catalog(),
        )?;

        let ids = resolve_metric_ids(&catalog);
        let history = |metric: MetricName| source.history(user_id, ids.get(metric), range);

        let (steps, weight, energy, exercise, distance, water) = tokio::try_join!(
            history(MetricName::Steps),
            history(MetricName::Weight),
            history(MetricName::Energy),
            history(MetricName::Exercise),
            history(MetricName::Distance),
            history(MetricName::Water),
        )?;

        let histories = BTreeMap::from([
            (MetricName::Steps, steps),
            (MetricName::Weight, weight),
            (MetricName::Energy, energy),
            (MetricName::Exercise, exercise),
            (MetricName::Distance, distance),
            (MetricName::Water, water),
        ]);

        debug!(
            user_id = %user_id,
            snapshot = snapshot.len(),
            goals = goals.len(),
            catalog = catalog.len(),
            "Loaded dashboard inputs"
        );

        Ok(DashboardInputs {
            snapshot,
            goals,
            catalog,
            histories,
            date_range: range,
        })
    }

    /// Load and assemble the dashboard for `user_id` as of `today`
    pub async fn build<S: DashboardSource + ?Sized>(
        source: &S,
        user_id: Uuid,
        prefs: &DisplayPreferences,
        today: NaiveDate,
        config: &DashboardConfig,
    ) -> Result<Dashboard> {
        let range = date_range(config.fetch_window_days, today);
        let inputs = Self::load_inputs(source, user_id, range).await?;
        let dashboard = build_dashboard_with_target(&inputs, prefs, today, config.default_target);

        info!(
            user_id = %user_id,
            time_range = prefs.time_range.label(),
            charts = dashboard.linear_charts.len(),
            "Dashboard assembled"
        );
        Ok(dashboard)
    }
}

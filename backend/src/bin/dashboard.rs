//! Build a dashboard against a running Motivate API and print it as JSON
//!
//! The user id falls back to `client.user_id` from configuration.

use anyhow::{anyhow, Context, Result};
use chrono::Utc;
use clap::Parser;
use motivate_backend::client::ApiClient;
use motivate_backend::config::AppConfig;
use motivate_backend::services::DashboardService;
use motivate_backend::telemetry;
use motivate_shared::{DisplayPreferences, DistanceUnit, TimeRange, WeightUnit};
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Parser)]
#[command(
    name = "motivate-dashboard",
    about = "Build a dashboard through the Motivate API and print it as JSON"
)]
struct DashboardArgs {
    /// User to build the dashboard for
    user_id: Option<Uuid>,

    /// Chart window: 7d, 30d or 90d (anything else means 90d)
    #[arg(long, value_parser = parse_time_range)]
    time_range: Option<TimeRange>,

    /// kg or lbs
    #[arg(long)]
    weight_unit: Option<WeightUnit>,

    /// km or miles
    #[arg(long)]
    distance_unit: Option<DistanceUnit>,
}

impl DashboardArgs {
    fn preferences(&self) -> DisplayPreferences {
        let defaults = DisplayPreferences::default();
        DisplayPreferences {
            weight_unit: self.weight_unit.unwrap_or(defaults.weight_unit),
            distance_unit: self.distance_unit.unwrap_or(defaults.distance_unit),
            time_range: self.time_range.unwrap_or(defaults.time_range),
        }
    }
}

fn parse_time_range(value: &str) -> Result<TimeRange, String> {
    Ok(TimeRange::parse_lenient(value))
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = DashboardArgs::parse();

    dotenvy::dotenv().ok();
    telemetry::init_tracing();

    let config = AppConfig::load()?;

    let user_id = match args.user_id {
        Some(id) => id,
        None => {
            let configured = config
                .client
                .user_id
                .as_deref()
                .ok_or_else(|| anyhow!("No user id given and client.user_id is not configured"))?;
            Uuid::parse_str(configured).with_context(|| format!("Invalid client.user_id '{}'", configured))?
        }
    };

    let prefs = args.preferences();
    let client = ApiClient::from_config(&config)?;

    info!(base_url = %config.client.base_url, user_id = %user_id, "Building dashboard");
    let dashboard = DashboardService::build(
        &client,
        user_id,
        &prefs,
        Utc::now().date_naive(),
        &config.dashboard,
    )
    .await?;

    println!("{}", serde_json::to_string_pretty(&dashboard)?);
    Ok(())
}

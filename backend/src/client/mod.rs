//! HTTP client for the Motivate API
//!
//! Used by the `motivate-dashboard` binary to build a dashboard against a
//! running server instead of the database. Responses are decoded into the
//! wire DTOs and converted into domain records before they leave this module.

use crate::auth::API_KEY_HEADER;
use crate::config::AppConfig;
use crate::services::DashboardSource;
use async_trait::async_trait;
use motivate_shared::{
    try_convert_all, DataEnvelope, DateRange, GoalDto, GoalRecord, MeasurementDto, MeasurementRangeQuery,
    MeasurementRecord, MetricCatalogEntry, MetricTypeDto, ValidationError,
};
use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

/// Errors from talking to the API
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Invalid client configuration: {0}")]
    Config(String),
}

/// API client bound to one server and key
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str, api_key: &SecretString, timeout: Duration) -> Result<Self, ClientError> {
        let mut key = HeaderValue::from_str(api_key.expose_secret())
            .map_err(|_| ClientError::Config("API key is not a valid header value".to_string()))?;
        key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, key);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, ClientError> {
        let api_key = SecretString::new(config.auth.api_key.clone());
        Self::new(
            &config.client.base_url,
            &api_key,
            Duration::from_secs(config.client.timeout_secs),
        )
    }

    pub async fn latest_measurements(&self, user_id: Uuid) -> Result<Vec<MeasurementRecord>, ClientError> {
        let dtos: Vec<MeasurementDto> = self.get_data(&format!("/user/{}", user_id), None).await?;
        Ok(try_convert_all(dtos)?)
    }

    pub async fn goals(&self, user_id: Uuid) -> Result<Vec<GoalRecord>, ClientError> {
        let dtos: Vec<GoalDto> = self.get_data(&format!("/user/{}/goals", user_id), None).await?;
        Ok(try_convert_all(dtos)?)
    }

    pub async fn metric_types(&self) -> Result<Vec<MetricCatalogEntry>, ClientError> {
        let dtos: Vec<MetricTypeDto> = self.get_data("/metrics", None).await?;
        Ok(try_convert_all(dtos)?)
    }

    pub async fn measurement_history(
        &self,
        user_id: Uuid,
        metric_type_id: i32,
        range: DateRange,
    ) -> Result<Vec<MeasurementRecord>, ClientError> {
        let query = MeasurementRangeQuery::from(range);
        let dtos: Vec<MeasurementDto> = self
            .get_data(&format!("/user/{}/measurements/{}", user_id, metric_type_id), Some(&query))
            .await?;
        Ok(try_convert_all(dtos)?)
    }

    /// GET `path` and unwrap the `{data: ...}` envelope
    async fn get_data<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Option<&MeasurementRangeQuery>,
    ) -> Result<T, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, "GET");

        let mut request = self.http.get(&url);
        if let Some(query) = query {
            request = request.query(query);
        }
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: DataEnvelope<T> = serde_json::from_str(&body)?;
        Ok(envelope.data)
    }
}

#[async_trait]
impl DashboardSource for ApiClient {
    async fn latest_snapshot(&self, user_id: Uuid) -> anyhow::Result<Vec<MeasurementRecord>> {
        Ok(self.latest_measurements(user_id).await?)
    }

    async fn active_goals(&self, user_id: Uuid) -> anyhow::Result<Vec<GoalRecord>> {
        Ok(self.goals(user_id).await?)
    }

    async fn metric_catalog(&self) -> anyhow::Result<Vec<MetricCatalogEntry>> {
        Ok(self.metric_types().await?)
    }

    async fn history(
        &self,
        user_id: Uuid,
        metric_type_id: i32,
        range: DateRange,
    ) -> anyhow::Result<Vec<MeasurementRecord>> {
        Ok(self.measurement_history(user_id, metric_type_id, range).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const KEY: &str = "test-key";

    fn client(server: &MockServer) -> ApiClient {
        ApiClient::new(&server.uri(), &SecretString::new(KEY.to_string()), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_metric_types_sends_api_key() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/metrics"))
            .and(header(API_KEY_HEADER, KEY))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [
                    {"id": 1, "name": "weight", "unit": "kg", "description": null},
                    {"id": 2, "name": "steps", "unit": "count"}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let catalog = client(&server).metric_types().await.unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog[1].name, "steps");
    }

    #[tokio::test]
    async fn test_history_passes_date_range() {
        let server = MockServer::start().await;
        let user_id = Uuid::new_v4();
        Mock::given(method("GET"))
            .and(path(format!("/user/{}/measurements/1", user_id)))
            .and(query_param("startDate", "2024-04-01"))
            .and(query_param("endDate", "2024-06-30"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [
                    {"metricTypeId": 1, "value": "80.50", "measuredAt": "2024-06-29T07:00:00Z"},
                    {"metricTypeId": 1, "value": 80.25, "measuredAt": "2024-06-30T07:00:00Z"}
                ]
            })))
            .mount(&server)
            .await;

        let range = DateRange {
            start: NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
        };
        let history = client(&server).measurement_history(user_id, 1, range).await.unwrap();

        assert_eq!(history.len(), 2);
        assert_eq!(history[0].value, "80.50");
    }

    #[tokio::test]
    async fn test_error_status_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/metrics"))
            .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
            .mount(&server)
            .await;

        let err = client(&server).metric_types().await.unwrap_err();

        match err {
            ClientError::Status { status, body } => {
                assert_eq!(status, 403);
                assert_eq!(body, "forbidden");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_non_decimal_value_is_rejected() {
        let server = MockServer::start().await;
        let user_id = Uuid::new_v4();
        Mock::given(method("GET"))
            .and(path(format!("/user/{}", user_id)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{"metricTypeId": 2, "value": "lots", "measuredAt": "2024-06-30T07:00:00Z"}]
            })))
            .mount(&server)
            .await;

        let err = client(&server).latest_measurements(user_id).await.unwrap_err();

        assert!(matches!(err, ClientError::Validation(_)));
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/metrics"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = client(&server).metric_types().await.unwrap_err();

        assert!(matches!(err, ClientError::Decode(_)));
    }
}

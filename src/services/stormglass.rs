//! Stormglass marine weather API client.
//!
//! Fetches hourly point forecasts and tide extremes.
//! See: https://docs.stormglass.io/

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use reqwest::header::AUTHORIZATION;
use serde_json::Value;

use crate::errors::AppError;
use crate::spots::Spot;

const FORECAST_ENDPOINT: &str = "/v2/weather/point";
const TIDE_ENDPOINT: &str = "/v2/tide/extremes/point";

/// Request timeout. The upstream default would be unbounded; a stalled
/// request must not hang the whole run.
const HTTP_TIMEOUT_SECS: u64 = 30;

/// The meteorological and oceanographic parameters requested per hour.
const FORECAST_PARAMS: &[&str] = &[
    "windSpeed",
    "windDirection",
    "swellHeight",
    "swellPeriod",
    "swellDirection",
    "secondarySwellHeight",
    "secondarySwellPeriod",
    "secondarySwellDirection",
    "waveHeight",
    "wavePeriod",
    "waveDirection",
    "windWaveHeight",
    "windWavePeriod",
    "windWaveDirection",
    "airTemperature",
    "waterTemperature",
    "cloudCover",
    "precipitation",
    "visibility",
];

/// The UTC time range covered by one collection run.
///
/// Computed once at process start and shared by every spot and both
/// endpoints, so all documents of a run describe the same range.
#[derive(Debug, Clone, Copy)]
pub struct ForecastWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl ForecastWindow {
    /// Window starting now and extending `days` days into the future.
    pub fn from_now(days: i64) -> Self {
        let start = Utc::now();
        Self {
            start,
            end: start + Duration::days(days),
        }
    }

    fn start_param(&self) -> String {
        self.start.to_rfc3339_opts(SecondsFormat::Secs, true)
    }

    fn end_param(&self) -> String {
        self.end.to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}

/// Client for the Stormglass API.
#[derive(Debug, Clone)]
pub struct StormglassClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl StormglassClient {
    pub fn new(api_key: &str, base_url: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()
            .expect("Failed to build HTTP client");
        Self {
            client,
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetch the hourly forecast entries for a spot over the given window.
    ///
    /// The parameter list and time bounds are embedded in the URL string,
    /// matching the upstream examples. Entries are returned verbatim; a
    /// response without an `hours` array yields an empty vec.
    pub async fn fetch_point_forecast(
        &self,
        spot: &Spot,
        window: &ForecastWindow,
    ) -> Result<Vec<Value>, AppError> {
        let url = format!(
            "{}{}?lat={}&lng={}&params={}&start={}&end={}",
            self.base_url,
            FORECAST_ENDPOINT,
            spot.lat,
            spot.lng,
            FORECAST_PARAMS.join(","),
            window.start_param(),
            window.end_param(),
        );

        let body = self.get_json(FORECAST_ENDPOINT, self.client.get(&url)).await?;
        Ok(extract_entries(&body, "hours"))
    }

    /// Fetch the tide extremes for a spot over the given window.
    ///
    /// Unlike the forecast call, the parameters are passed as structured
    /// query parameters. A response without a `data` array yields an
    /// empty vec.
    pub async fn fetch_tide_extremes(
        &self,
        spot: &Spot,
        window: &ForecastWindow,
    ) -> Result<Vec<Value>, AppError> {
        let url = format!("{}{}", self.base_url, TIDE_ENDPOINT);
        let request = self.client.get(&url).query(&[
            ("lat", spot.lat.to_string()),
            ("lng", spot.lng.to_string()),
            ("start", window.start_param()),
            ("end", window.end_param()),
        ]);

        let body = self.get_json(TIDE_ENDPOINT, request).await?;
        Ok(extract_entries(&body, "data"))
    }

    /// Issue a GET request and decode the body as JSON.
    ///
    /// Any non-success status is fatal for the whole run; there is no retry
    /// or per-spot isolation.
    async fn get_json(
        &self,
        endpoint: &'static str,
        request: reqwest::RequestBuilder,
    ) -> Result<Value, AppError> {
        let response = request
            .header(AUTHORIZATION, self.api_key.as_str())
            .send()
            .await
            .map_err(|source| AppError::UpstreamTransport { endpoint, source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::UpstreamRequest { endpoint, status });
        }

        response
            .json()
            .await
            .map_err(|source| AppError::MalformedResponse { endpoint, source })
    }
}

/// Pull the entry array out of a response body.
///
/// A missing or non-array field degrades to an empty sequence. This is a
/// documented leniency of the upstream contract, not a fetch failure.
fn extract_entries(body: &Value, field: &str) -> Vec<Value> {
    match body.get(field).and_then(Value::as_array) {
        Some(entries) => entries.to_vec(),
        None => {
            tracing::debug!("response has no '{}' array, treating as empty", field);
            Vec::new()
        }
    }
}

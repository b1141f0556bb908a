//! The fetch-and-persist loop.
//!
//! For each configured spot, in declaration order: fetch the hourly
//! forecast, fetch the tide extremes, assemble one document, write it to
//! `<output-dir>/<spot>.json`. The first failure aborts the remaining
//! spots; a spot either gets a complete document or no file at all, since
//! the write happens only after both calls succeed.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::AppConfig;
use crate::errors::AppError;
use crate::services::stormglass::{ForecastWindow, StormglassClient};
use crate::spots::{Spot, SPOTS};

/// How far into the future the forecast window extends.
const FORECAST_WINDOW_DAYS: i64 = 5;

/// The per-spot output document.
///
/// Serialized field order is the declaration order below; consumers rely on
/// the four top-level fields and nothing else. Forecast and tide entries are
/// upstream records passed through untouched.
#[derive(Debug, Serialize, Deserialize)]
pub struct SpotDocument {
    pub spot: String,
    pub generated_at: DateTime<Utc>,
    pub forecast: Vec<Value>,
    pub tide: Vec<Value>,
}

/// Run one full collection over the configured spot table.
pub async fn run(config: &AppConfig) -> Result<(), AppError> {
    let client = StormglassClient::new(&config.api_key, &config.api_url);
    let window = ForecastWindow::from_now(FORECAST_WINDOW_DAYS);
    collect_spots(&client, &window, SPOTS, &config.output_dir).await
}

/// Fetch and persist every spot in order, stopping at the first failure.
pub async fn collect_spots(
    client: &StormglassClient,
    window: &ForecastWindow,
    spots: &[Spot],
    output_dir: &Path,
) -> Result<(), AppError> {
    fs::create_dir_all(output_dir)?;

    for spot in spots {
        tracing::info!("Fetching forecast for {}", spot.name);

        let forecast = client.fetch_point_forecast(spot, window).await?;
        let tide = client.fetch_tide_extremes(spot, window).await?;

        let document = SpotDocument {
            spot: spot.name.to_string(),
            generated_at: Utc::now(),
            forecast,
            tide,
        };

        let path = write_document(output_dir, &document)?;
        tracing::info!("Wrote {}", path.display());
    }

    Ok(())
}

/// Serialize a document and write it to `<dir>/<spot>.json`, replacing any
/// existing file.
///
/// Pretty-printed with 2-space indentation; non-ASCII text is written
/// as-is, not escaped.
fn write_document(dir: &Path, document: &SpotDocument) -> Result<PathBuf, AppError> {
    let path = dir.join(format!("{}.json", document.spot));
    let json = serde_json::to_string_pretty(document)?;
    fs::write(&path, json)?;
    Ok(path)
}

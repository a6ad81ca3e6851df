//! Live rainfall fetch, one best-effort request per district.

use crate::{
    district::{District, LatLng},
    error::{HazardError, Result},
    measurement::{ForecastResponse, RainfallMeasurement},
};
use log::{debug, warn};
use reqwest::Client;
use std::time::Duration;

/// Open-Meteo daily forecast endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.open-meteo.com/v1/forecast";

/// All daily totals are bucketed in this zone.
pub const DEFAULT_TIMEZONE: &str = "Asia/Kolkata";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Request parameters for the weather endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchConfig {
    pub endpoint: String,
    pub timezone: String,
    pub past_days: u32,
    pub forecast_days: u32,
    /// Deadline per district; a stalled request becomes a fallback
    pub timeout: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timezone: DEFAULT_TIMEZONE.to_string(),
            past_days: 2,
            forecast_days: 1,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl FetchConfig {
    /// Query string pairs for a rolling 48 hour window at `point`.
    pub fn query_params(&self, point: &LatLng) -> Vec<(&'static str, String)> {
        vec![
            ("latitude", point.lat.to_string()),
            ("longitude", point.lng.to_string()),
            ("daily", "precipitation_sum".to_string()),
            ("past_days", self.past_days.to_string()),
            ("forecast_days", self.forecast_days.to_string()),
            ("timezone", self.timezone.clone()),
        ]
    }
}

/// Anything that can answer a daily precipitation query for a district.
#[allow(async_fn_in_trait)]
pub trait PrecipitationSource {
    async fn daily_precipitation(&self, district: &District) -> Result<ForecastResponse>;
}

/// HTTP source backed by the Open-Meteo forecast API.
#[derive(Debug, Clone)]
pub struct OpenMeteoSource {
    client: Client,
    config: FetchConfig,
}

impl OpenMeteoSource {
    pub fn new(client: Client, config: FetchConfig) -> Self {
        Self { client, config }
    }
}

impl PrecipitationSource for OpenMeteoSource {
    async fn daily_precipitation(&self, district: &District) -> Result<ForecastResponse> {
        let params = self.config.query_params(&district.representative);
        debug!("Requesting rainfall for {}", district.name);
        let response = self
            .client
            .get(&self.config.endpoint)
            .query(&params)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(HazardError::BadStatus(response.status().as_u16()));
        }
        let body = response.text().await?;
        ForecastResponse::from_json(&body)
    }
}

/// Turns a district into exactly one measurement, live or fallback.
#[derive(Debug, Clone)]
pub struct RainfallFetcher<S> {
    source: S,
    timeout: Duration,
}

impl RainfallFetcher<OpenMeteoSource> {
    pub fn open_meteo(config: FetchConfig) -> Self {
        let timeout = config.timeout;
        Self::new(OpenMeteoSource::new(Client::new(), config), timeout)
    }
}

impl<S: PrecipitationSource> RainfallFetcher<S> {
    pub fn new(source: S, timeout: Duration) -> Self {
        Self { source, timeout }
    }

    /// Never fails: every error, including the deadline, is logged and
    /// replaced by a 0.0 mm fallback.
    pub async fn fetch_rainfall(&self, district: &District) -> RainfallMeasurement {
        match self.try_fetch(district).await {
            Ok(measurement) => measurement,
            Err(e) => {
                warn!("Could not fetch rainfall for {}: {}", district.name, e);
                RainfallMeasurement::fallback(&district.id, &e)
            }
        }
    }

    async fn try_fetch(&self, district: &District) -> Result<RainfallMeasurement> {
        let response = tokio::time::timeout(self.timeout, self.source.daily_precipitation(district))
            .await
            .map_err(|_| HazardError::Timeout(self.timeout.as_millis()))??;
        let mm = response.millimeters_48hr()?;
        Ok(RainfallMeasurement::live(&district.id, mm, response.observed_through()))
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::measurement::DailySeries;
    use std::collections::HashMap;

    /// Canned behaviour for one district.
    #[derive(Debug, Clone)]
    pub enum Script {
        Series(Vec<Option<f64>>),
        Status(u16),
        Stall,
        Delayed(u64, Vec<Option<f64>>),
    }

    /// In-memory source; districts without a script answer with a 500.
    #[derive(Debug, Default, Clone)]
    pub struct ScriptedSource {
        pub scripts: HashMap<String, Script>,
    }

    impl ScriptedSource {
        pub fn with(mut self, id: &str, script: Script) -> Self {
            self.scripts.insert(id.to_string(), script);
            self
        }
    }

    fn response(series: Vec<Option<f64>>) -> ForecastResponse {
        ForecastResponse {
            daily: DailySeries {
                time: vec![
                    "2026-10-15".to_string(),
                    "2026-10-16".to_string(),
                    "2026-10-17".to_string(),
                ],
                precipitation_sum: series,
            },
        }
    }

    impl PrecipitationSource for ScriptedSource {
        async fn daily_precipitation(&self, district: &District) -> Result<ForecastResponse> {
            match self.scripts.get(&district.id).cloned() {
                Some(Script::Series(series)) => Ok(response(series)),
                Some(Script::Status(code)) => Err(HazardError::BadStatus(code)),
                Some(Script::Stall) => std::future::pending().await,
                Some(Script::Delayed(millis, series)) => {
                    tokio::time::sleep(Duration::from_millis(millis)).await;
                    Ok(response(series))
                }
                None => Err(HazardError::BadStatus(500)),
            }
        }
    }
}

//! Rainfall measurements and the 48 hour accumulation rule.

use crate::{
    district::{District, DistrictId},
    error::{HazardError, Result},
    risk::{classify_rainfall, RiskTier},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Daily totals expected from the endpoint: two prior days plus today.
pub const DAILY_SERIES_LENGTH: usize = 3;

/// Where a measurement came from.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    /// Parsed from a successful endpoint response
    Live,
    /// Substituted 0.0 mm because the fetch failed
    Fallback,
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provenance::Live => f.pad("live"),
            Provenance::Fallback => f.pad("fallback"),
        }
    }
}

/// One district's rainfall for a single load. Immutable once created.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct RainfallMeasurement {
    pub district_id: DistrictId,
    pub millimeters_48hr: f64,
    pub provenance: Provenance,
    /// Last day covered by a live reading
    pub observed_through: Option<NaiveDate>,
    /// Why a fallback was substituted
    pub fallback_reason: Option<String>,
}

impl RainfallMeasurement {
    pub fn live(district_id: &str, millimeters_48hr: f64, observed_through: Option<NaiveDate>) -> Self {
        Self {
            district_id: district_id.to_string(),
            millimeters_48hr,
            provenance: Provenance::Live,
            observed_through,
            fallback_reason: None,
        }
    }

    pub fn fallback(district_id: &str, reason: &HazardError) -> Self {
        Self {
            district_id: district_id.to_string(),
            millimeters_48hr: 0.0,
            provenance: Provenance::Fallback,
            observed_through: None,
            fallback_reason: Some(reason.to_string()),
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.provenance == Provenance::Fallback
    }
}

/// A district joined with its measurement and derived tier.
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct ClassifiedDistrict {
    pub district: District,
    pub measurement: RainfallMeasurement,
    pub risk: RiskTier,
}

impl ClassifiedDistrict {
    pub fn new(district: District, measurement: RainfallMeasurement) -> Self {
        let risk = classify_rainfall(measurement.millimeters_48hr);
        Self {
            district,
            measurement,
            risk,
        }
    }
}

/// Body of a daily forecast response, reduced to the fields used here.
#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    pub daily: DailySeries,
}

#[derive(Debug, Deserialize)]
pub struct DailySeries {
    #[serde(default)]
    pub time: Vec<String>,
    /// Oldest to newest; the endpoint sends `null` for days it cannot fill
    pub precipitation_sum: Vec<Option<f64>>,
}

impl ForecastResponse {
    pub fn from_json(body: &str) -> Result<Self> {
        serde_json::from_str(body).map_err(|e| HazardError::MalformedResponse(e.to_string()))
    }

    pub fn millimeters_48hr(&self) -> Result<f64> {
        forty_eight_hour_total(&self.daily.precipitation_sum)
    }

    /// Date of the newest day in the series, if it parses.
    pub fn observed_through(&self) -> Option<NaiveDate> {
        self.daily
            .time
            .last()
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
    }
}

/// Sum of the two newest days (yesterday plus today) of an oldest-first
/// series, rounded to one decimal place. Older days are never read.
pub fn forty_eight_hour_total(daily: &[Option<f64>]) -> Result<f64> {
    let len = daily.len();
    if len < DAILY_SERIES_LENGTH {
        return Err(HazardError::ShortSeries {
            needed: DAILY_SERIES_LENGTH,
            found: len,
        });
    }
    let yesterday = daily[len - 2].ok_or(HazardError::MissingDailyValue(len - 2))?;
    let today = daily[len - 1].ok_or(HazardError::MissingDailyValue(len - 1))?;
    Ok(round_one_decimal(yesterday + today))
}

pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

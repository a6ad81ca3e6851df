//! Risk tiers and the rainfall risk classifier.

use crate::{error::HazardError, lake::Lake};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// 48 hour rainfall (mm) at or above which a district is HIGH risk.
pub const HIGH_RAINFALL_MM: f64 = 115.0;

/// 48 hour rainfall (mm) at or above which a district is MEDIUM risk.
pub const MEDIUM_RAINFALL_MM: f64 = 65.0;

/// Unit of classification for both lakes and districts.
///
/// Ordered so that `Low < Medium < High`.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl RiskTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTier::Low => "LOW",
            RiskTier::Medium => "MEDIUM",
            RiskTier::High => "HIGH",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for RiskTier {
    type Err = HazardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "LOW" => Ok(RiskTier::Low),
            "MEDIUM" => Ok(RiskTier::Medium),
            "HIGH" => Ok(RiskTier::High),
            other => Err(HazardError::InvalidLabel(other.to_string())),
        }
    }
}

/// Classify a 48 hour rainfall total.
///
/// Total over `f64`: anything that is not at least [`MEDIUM_RAINFALL_MM`]
/// (negative values and NaN included) is `Low`.
pub fn classify_rainfall(mm: f64) -> RiskTier {
    if mm >= HIGH_RAINFALL_MM {
        RiskTier::High
    } else if mm >= MEDIUM_RAINFALL_MM {
        RiskTier::Medium
    } else {
        RiskTier::Low
    }
}

/// Lake tiers are pre-assessed in the catalog; nothing is derived here.
pub fn classify_lake_risk(lake: &Lake) -> RiskTier {
    lake.risk
}

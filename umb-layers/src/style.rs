//! Tier colors and layer styles.

use serde::Serialize;
use umb_hazard::risk::{RiskTier, HIGH_RAINFALL_MM, MEDIUM_RAINFALL_MM};

pub const HIGH_COLOR: &str = "#ef4444";
pub const MEDIUM_COLOR: &str = "#f97316";
pub const LOW_COLOR: &str = "#22c55e";

/// Outline drawn around every lake marker.
pub const MARKER_OUTLINE_COLOR: &str = "#ffffff";

/// Same mapping for lakes and districts.
pub fn tier_color(tier: RiskTier) -> &'static str {
    match tier {
        RiskTier::High => HIGH_COLOR,
        RiskTier::Medium => MEDIUM_COLOR,
        RiskTier::Low => LOW_COLOR,
    }
}

#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct LayerStyle {
    pub color: &'static str,
    pub fill_color: &'static str,
    pub fill_opacity: f64,
    pub weight: u32,
    /// Marker radius in pixels; polygons have none
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius: Option<u32>,
}

impl LayerStyle {
    pub fn lake_marker(tier: RiskTier) -> Self {
        Self {
            color: MARKER_OUTLINE_COLOR,
            fill_color: tier_color(tier),
            fill_opacity: 0.85,
            weight: 2,
            radius: Some(10),
        }
    }

    pub fn district_polygon(tier: RiskTier) -> Self {
        Self {
            color: tier_color(tier),
            fill_color: tier_color(tier),
            fill_opacity: 0.25,
            weight: 2,
            radius: None,
        }
    }
}

#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct LegendEntry {
    pub color: &'static str,
    pub label: String,
}

#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct LegendSection {
    pub title: &'static str,
    pub entries: Vec<LegendEntry>,
}

pub fn legend() -> Vec<LegendSection> {
    let entry = |tier: RiskTier, label: String| LegendEntry {
        color: tier_color(tier),
        label,
    };
    vec![
        LegendSection {
            title: "GLOF — Lake Risk",
            entries: vec![
                entry(RiskTier::High, "High Risk".to_string()),
                entry(RiskTier::Medium, "Medium Risk".to_string()),
                entry(RiskTier::Low, "Low Risk".to_string()),
            ],
        },
        LegendSection {
            title: "Flood — Live Rainfall",
            entries: vec![
                entry(RiskTier::High, format!("≥{}mm HIGH", HIGH_RAINFALL_MM)),
                entry(
                    RiskTier::Medium,
                    format!("{}–{}mm MED", MEDIUM_RAINFALL_MM, HIGH_RAINFALL_MM),
                ),
                entry(RiskTier::Low, format!("<{}mm LOW", MEDIUM_RAINFALL_MM)),
            ],
        },
    ]
}

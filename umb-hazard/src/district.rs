use crate::error::{HazardError, Result};
use serde::{Deserialize, Serialize};

/// Embedded JSON catalog of monitored districts and their boundaries.
pub static DISTRICTS_JSON: &str = include_str!("../../fixtures/districts.json");

/// Minimum number of vertices for a boundary polygon.
pub const MIN_POLYGON_VERTICES: usize = 3;

/// Stable district identity used to key measurements.
pub type DistrictId = String;

/// A geographic point in decimal degrees.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// An administrative district monitored for flood risk.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct District {
    pub id: DistrictId,
    pub name: String,
    /// Point sent to the weather endpoint
    pub representative: LatLng,
    /// Ordered vertices, implicitly closed
    pub boundary: Vec<LatLng>,
    /// Rivers at risk of flooding within the district
    #[serde(default)]
    pub rivers: Vec<String>,
}

impl District {
    /// Districts from the embedded catalog.
    pub fn get_district_vector() -> Result<Vec<District>> {
        District::parse_district_json(DISTRICTS_JSON)
    }

    /// Parse a JSON array of districts, rejecting degenerate boundaries.
    pub fn parse_district_json(json_object: &str) -> Result<Vec<District>> {
        let districts: Vec<District> = serde_json::from_str(json_object)?;
        for district in &districts {
            district.validate()?;
        }
        Ok(districts)
    }

    pub fn validate(&self) -> Result<()> {
        if self.boundary.len() < MIN_POLYGON_VERTICES {
            return Err(HazardError::InvalidPolygon {
                id: self.id.clone(),
                vertices: self.boundary.len(),
            });
        }
        Ok(())
    }

    /// River names joined for display.
    pub fn river_list(&self) -> String {
        self.rivers.join(", ")
    }
}

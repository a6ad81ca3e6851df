//! Layer construction from lakes and classified districts.

use crate::style::LayerStyle;
use serde::Serialize;
use std::fmt;
use umb_hazard::{
    district::LatLng,
    lake::Lake,
    measurement::{ClassifiedDistrict, Provenance},
    risk::{classify_lake_risk, RiskTier, HIGH_RAINFALL_MM, MEDIUM_RAINFALL_MM},
};

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerKind {
    Glof,
    Flood,
}

impl fmt::Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayerKind::Glof => f.write_str("glof"),
            LayerKind::Flood => f.write_str("flood"),
        }
    }
}

#[derive(Debug, PartialEq, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Geometry {
    Marker { position: LatLng },
    /// Open ring; the renderer closes it
    Polygon { ring: Vec<LatLng> },
}

/// One drawable item: geometry, style and popup text.
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct MapFeature {
    pub id: String,
    pub geometry: Geometry,
    pub style: LayerStyle,
    pub label: String,
    pub risk: RiskTier,
    /// Only set on flood polygons
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provenance: Option<Provenance>,
}

#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct HazardLayer {
    pub kind: LayerKind,
    pub features: Vec<MapFeature>,
}

impl HazardLayer {
    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

pub fn glof_label(lake: &Lake) -> String {
    format!(
        "{}\nDistrict: {}\nGLOF Risk: {}\nTravel time to village: {}\nHazard: Glacial Lake Outburst (GLOF)",
        lake.name,
        lake.district,
        classify_lake_risk(lake),
        lake.warning_time
    )
}

pub fn flood_label(classified: &ClassifiedDistrict) -> String {
    let rainfall = match classified.measurement.provenance {
        Provenance::Live => format!(
            "LIVE 48hr Rainfall: {:.1}mm",
            classified.measurement.millimeters_48hr
        ),
        Provenance::Fallback => format!(
            "48hr Rainfall: unavailable, defaulted to {:.1}mm",
            classified.measurement.millimeters_48hr
        ),
    };
    format!(
        "{} District\n{}\nFlood Risk: {}\nAt-risk Rivers: {}\nIMD threshold: ≥{}mm HIGH | {}–{}mm MEDIUM",
        classified.district.name,
        rainfall,
        classified.risk,
        classified.district.river_list(),
        HIGH_RAINFALL_MM,
        MEDIUM_RAINFALL_MM,
        HIGH_RAINFALL_MM
    )
}

/// One marker per lake, colored by its catalog tier.
pub fn build_glof_layer(lakes: &[Lake]) -> HazardLayer {
    let features = lakes
        .iter()
        .map(|lake| {
            let risk = classify_lake_risk(lake);
            MapFeature {
                id: lake.id.clone(),
                geometry: Geometry::Marker {
                    position: lake.position,
                },
                style: LayerStyle::lake_marker(risk),
                label: glof_label(lake),
                risk,
                provenance: None,
            }
        })
        .collect();
    HazardLayer {
        kind: LayerKind::Glof,
        features,
    }
}

/// One polygon per classified district, colored by its rainfall tier.
pub fn build_flood_layer(districts: &[ClassifiedDistrict]) -> HazardLayer {
    let features = districts
        .iter()
        .map(|classified| MapFeature {
            id: classified.district.id.clone(),
            geometry: Geometry::Polygon {
                ring: classified.district.boundary.clone(),
            },
            style: LayerStyle::district_polygon(classified.risk),
            label: flood_label(classified),
            risk: classified.risk,
            provenance: Some(classified.measurement.provenance),
        })
        .collect();
    HazardLayer {
        kind: LayerKind::Flood,
        features,
    }
}

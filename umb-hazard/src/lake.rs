use crate::{district::LatLng, error::Result, risk::RiskTier};
use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};

/// Embedded CSV catalog of monitored glacial lakes.
pub static LAKES_CSV: &str = include_str!("../../fixtures/glacial_lakes.csv");

/// A glacial lake with a pre-assessed outburst (GLOF) risk.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Lake {
    pub id: String,
    pub name: String,
    pub position: LatLng,
    /// Externally assigned tier, never recomputed at runtime
    pub risk: RiskTier,
    /// Name of the district the lake drains into
    pub district: String,
    /// Estimated time for an outburst to reach the nearest village, e.g. "23 mins"
    pub warning_time: String,
}

impl Lake {
    /// Lakes from the embedded catalog.
    pub fn get_lake_vector() -> Result<Vec<Lake>> {
        Lake::parse_lake_csv(LAKES_CSV)
    }

    /// Parse a CSV string of lake data into a vector of Lakes.
    ///
    /// Expected CSV columns: id, name, lat, lng, risk, district, warning_time
    pub fn parse_lake_csv(csv_object: &str) -> Result<Vec<Lake>> {
        let mut lake_list: Vec<Lake> = Vec::new();
        let mut rdr = ReaderBuilder::new()
            .delimiter(b',')
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(csv_object.as_bytes());
        for row in rdr.deserialize() {
            let record: LakeRecord = row?;
            lake_list.push(Lake {
                id: record.id,
                name: record.name,
                position: LatLng::new(record.lat, record.lng),
                risk: record.risk.parse()?,
                district: record.district,
                warning_time: record.warning_time,
            });
        }
        Ok(lake_list)
    }
}

#[derive(Deserialize)]
struct LakeRecord {
    id: String,
    name: String,
    lat: f64,
    lng: f64,
    risk: String,
    district: String,
    warning_time: String,
}

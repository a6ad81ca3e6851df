//! Live rainfall report for every monitored district.

use crate::{CatalogArgs, FetchArgs};
use log::info;
use serde::Serialize;
use umb_hazard::{
    measurement::{ClassifiedDistrict, Provenance},
    pipeline::load_flood_risk,
    risk::RiskTier,
    status::StatusSignal,
};

#[derive(Debug, Serialize)]
pub struct RainfallRow {
    pub district: String,
    pub mm_48hr: f64,
    pub risk: RiskTier,
    pub provenance: Provenance,
}

#[derive(Debug, Serialize)]
pub struct RainfallReport {
    pub status: &'static str,
    pub districts: Vec<RainfallRow>,
}

impl RainfallReport {
    pub fn new(status: &'static str, classified: &[ClassifiedDistrict]) -> Self {
        let districts = classified
            .iter()
            .map(|c| RainfallRow {
                district: c.district.name.clone(),
                mm_48hr: c.measurement.millimeters_48hr,
                risk: c.risk,
                provenance: c.measurement.provenance,
            })
            .collect();
        Self { status, districts }
    }

    pub fn to_table(&self) -> String {
        self.districts
            .iter()
            .map(|row| {
                format!(
                    "  {:<16} {:>6.1}mm  →  {:<6} [{}]",
                    row.district, row.mm_48hr, row.risk, row.provenance
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

pub async fn run_rainfall(fetch: &FetchArgs, catalog: &CatalogArgs, json: bool) -> anyhow::Result<()> {
    let catalog = catalog.load()?;
    let fetcher = fetch.fetcher();
    let status = StatusSignal::new();

    info!("Fetching live rainfall for {} districts", catalog.districts.len());
    let load = load_flood_risk(&fetcher, &catalog, &status).await?;
    let report = RainfallReport::new(status.current().label(), &load.districts);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report.to_table());
    }
    Ok(())
}

//! Village vulnerability report driven by live rainfall.

use crate::{load_villages, CatalogArgs, FetchArgs};
use log::info;
use std::path::PathBuf;
use umb_hazard::{
    pipeline::load_flood_risk,
    risk::RiskTier,
    status::StatusSignal,
    vulnerability::{assess_villages, VillageAssessment},
};

pub fn summary(assessments: &[VillageAssessment]) -> String {
    let count = |tier: RiskTier| assessments.iter().filter(|a| a.risk_level == tier).count();
    format!(
        "Villages assessed: {}\nHigh risk:   {} villages\nMedium risk: {} villages\nLow risk:    {} villages",
        assessments.len(),
        count(RiskTier::High),
        count(RiskTier::Medium),
        count(RiskTier::Low)
    )
}

pub async fn run_villages(
    fetch: &FetchArgs,
    catalog: &CatalogArgs,
    villages_csv: Option<&PathBuf>,
    json: bool,
) -> anyhow::Result<()> {
    let catalog = catalog.load()?;
    let villages = load_villages(villages_csv)?;
    info!("Loaded {} villages", villages.len());

    let status = StatusSignal::new();
    let load = load_flood_risk(&fetch.fetcher(), &catalog, &status).await?;
    let assessments = assess_villages(&villages, &load.districts);

    if json {
        println!("{}", serde_json::to_string_pretty(&assessments)?);
        return Ok(());
    }
    for a in &assessments {
        println!(
            "{:<8} Score: {:<4} {:<20} District: {:<16} Rainfall: {}",
            a.risk_level, a.score, a.village.name, a.village.district, a.rainfall_risk
        );
    }
    println!("\n{}", summary(&assessments));
    Ok(())
}

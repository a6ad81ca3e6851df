//! Village vulnerability scoring driven by live district rainfall.
//!
//! Five weighted factors add up to a score out of 100: population (25),
//! outburst travel time (20), district rainfall tier (20), road exposure
//! (20) and past events (15).

use crate::{
    error::{HazardError, Result},
    measurement::ClassifiedDistrict,
    risk::RiskTier,
};
use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, str::FromStr};

/// Embedded CSV of villages downstream of monitored hazards.
pub static VILLAGES_CSV: &str = include_str!("../../fixtures/villages.csv");

/// Score at or above which a village is HIGH risk.
pub const HIGH_SCORE: u32 = 70;
/// Score at or above which a village is MEDIUM risk.
pub const MEDIUM_SCORE: u32 = 45;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ThreatType {
    Glof,
    Flood,
    Both,
}

impl FromStr for ThreatType {
    type Err = HazardError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "GLOF" => Ok(ThreatType::Glof),
            "FLOOD" => Ok(ThreatType::Flood),
            "BOTH" => Ok(ThreatType::Both),
            other => Err(HazardError::InvalidLabel(other.to_string())),
        }
    }
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Village {
    pub name: String,
    /// District name, matched against the district catalog
    pub district: String,
    pub population: u32,
    /// Minutes for an outburst flood to arrive
    pub travel_time: u32,
    pub road_safe: bool,
    pub historical_event: bool,
    pub threat_type: ThreatType,
}

#[derive(Deserialize)]
struct VillageRecord {
    name: String,
    district: String,
    population: u32,
    travel_time: u32,
    road_safe: u8,
    historical_event: u8,
    threat_type: String,
}

impl Village {
    pub fn get_village_vector() -> Result<Vec<Village>> {
        Village::parse_village_csv(VILLAGES_CSV)
    }

    /// Expected CSV columns: name, district, population, travel_time,
    /// road_safe (0/1), historical_event (0/1), threat_type
    pub fn parse_village_csv(csv_object: &str) -> Result<Vec<Village>> {
        let mut village_list = Vec::new();
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(csv_object.as_bytes());
        for row in rdr.deserialize() {
            let record: VillageRecord = row?;
            village_list.push(Village {
                name: record.name,
                district: record.district,
                population: record.population,
                travel_time: record.travel_time,
                road_safe: record.road_safe != 0,
                historical_event: record.historical_event != 0,
                threat_type: record.threat_type.parse()?,
            });
        }
        Ok(village_list)
    }
}

fn population_points(population: u32) -> u32 {
    match population {
        p if p > 10_000 => 25,
        p if p > 5_000 => 20,
        p if p > 1_000 => 15,
        p if p > 500 => 10,
        _ => 5,
    }
}

fn travel_time_points(minutes: u32) -> u32 {
    match minutes {
        m if m < 20 => 20,
        m if m < 40 => 15,
        m if m < 60 => 10,
        m if m < 90 => 5,
        _ => 0,
    }
}

fn rainfall_points(tier: RiskTier) -> u32 {
    match tier {
        RiskTier::High => 20,
        RiskTier::Medium => 12,
        RiskTier::Low => 4,
    }
}

pub fn score_village(village: &Village, rainfall: RiskTier) -> u32 {
    let mut score = population_points(village.population)
        + travel_time_points(village.travel_time)
        + rainfall_points(rainfall);
    if !village.road_safe {
        score += 20;
    }
    if village.historical_event {
        score += 15;
    }
    score
}

pub fn risk_level(score: u32) -> RiskTier {
    if score >= HIGH_SCORE {
        RiskTier::High
    } else if score >= MEDIUM_SCORE {
        RiskTier::Medium
    } else {
        RiskTier::Low
    }
}

#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct VillageAssessment {
    pub village: Village,
    pub rainfall_risk: RiskTier,
    pub score: u32,
    pub risk_level: RiskTier,
}

/// Score every village against its district's live tier, highest first.
///
/// Villages whose district has no classified record score as LOW rainfall.
pub fn assess_villages(villages: &[Village], districts: &[ClassifiedDistrict]) -> Vec<VillageAssessment> {
    let tiers: HashMap<&str, RiskTier> = districts
        .iter()
        .map(|c| (c.district.name.as_str(), c.risk))
        .collect();
    let mut assessments: Vec<VillageAssessment> = villages
        .iter()
        .map(|village| {
            let rainfall_risk = tiers
                .get(village.district.as_str())
                .copied()
                .unwrap_or(RiskTier::Low);
            let score = score_village(village, rainfall_risk);
            VillageAssessment {
                village: village.clone(),
                rainfall_risk,
                score,
                risk_level: risk_level(score),
            }
        })
        .collect();
    assessments.sort_by(|a, b| b.score.cmp(&a.score));
    assessments
}

//! The static input dataset: glacial lakes plus monitored districts.
//!
//! The embedded fixtures are only the default; callers can inject their own
//! catalog text and get the same validation.

use crate::{
    district::{District, DISTRICTS_JSON},
    error::{HazardError, Result},
    lake::{Lake, LAKES_CSV},
};
use std::collections::HashSet;

#[derive(Debug, Clone)]
pub struct HazardCatalog {
    pub lakes: Vec<Lake>,
    /// Districts in display order
    pub districts: Vec<District>,
}

impl HazardCatalog {
    pub fn embedded() -> Result<Self> {
        Self::from_sources(LAKES_CSV, DISTRICTS_JSON)
    }

    pub fn from_sources(lakes_csv: &str, districts_json: &str) -> Result<Self> {
        let catalog = Self {
            lakes: Lake::parse_lake_csv(lakes_csv)?,
            districts: District::parse_district_json(districts_json)?,
        };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Ids must be unique so each district owns exactly one snapshot entry.
    fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for id in self.districts.iter().map(|d| &d.id) {
            if !seen.insert(id) {
                return Err(HazardError::DuplicateId(id.clone()));
            }
        }
        let mut seen = HashSet::new();
        for id in self.lakes.iter().map(|l| &l.id) {
            if !seen.insert(id) {
                return Err(HazardError::DuplicateId(id.clone()));
            }
        }
        Ok(())
    }

    pub fn district(&self, id: &str) -> Option<&District> {
        self.districts.iter().find(|d| d.id == id)
    }
}

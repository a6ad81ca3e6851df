//! Startup flow: fetch every district, join, flip the status, classify.

use crate::{
    aggregation::{aggregate, AggregationSnapshot},
    catalog::HazardCatalog,
    error::Result,
    fetcher::{PrecipitationSource, RainfallFetcher},
    measurement::ClassifiedDistrict,
    status::StatusSignal,
};

/// Output of one page load.
#[derive(Debug, Clone)]
pub struct FloodRiskLoad {
    pub snapshot: AggregationSnapshot,
    /// Catalog order, one entry per district
    pub districts: Vec<ClassifiedDistrict>,
}

pub async fn load_flood_risk<S: PrecipitationSource>(
    fetcher: &RainfallFetcher<S>,
    catalog: &HazardCatalog,
    status: &StatusSignal,
) -> Result<FloodRiskLoad> {
    let snapshot = aggregate(fetcher, &catalog.districts).await;
    let districts = snapshot.classify(&catalog.districts)?;
    status.mark_complete();
    Ok(FloodRiskLoad {
        snapshot,
        districts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetcher::testing::{Script, ScriptedSource};
    use crate::fetcher::DEFAULT_TIMEOUT;
    use crate::measurement::Provenance;
    use crate::risk::RiskTier;
    use crate::status::LoadStatus;

    #[tokio::test]
    async fn test_mixed_load_completes_once() {
        let catalog = HazardCatalog::embedded().unwrap();
        let source = ScriptedSource::default()
            .with("uttarkashi", Script::Series(vec![Some(0.0), Some(100.0), Some(15.0)]))
            .with("rudraprayag", Script::Series(vec![Some(10.0), Some(40.0), Some(30.0)]))
            .with("tehri-garhwal", Script::Series(vec![Some(0.0), Some(0.0), Some(0.0)]));
        let fetcher = RainfallFetcher::new(source, DEFAULT_TIMEOUT);
        let status = StatusSignal::new();
        let mut rx = status.subscribe();

        let load = load_flood_risk(&fetcher, &catalog, &status).await.unwrap();

        assert_eq!(load.districts.len(), 5);
        assert_eq!(status.current(), LoadStatus::Complete);
        assert!(rx.has_changed().unwrap());
        let _ = rx.borrow_and_update();
        assert!(!status.mark_complete());
        assert!(!rx.has_changed().unwrap());

        let tier = |id: &str| {
            load.districts
                .iter()
                .find(|c| c.district.id == id)
                .map(|c| (c.risk, c.measurement.provenance))
                .unwrap()
        };
        assert_eq!(tier("uttarkashi"), (RiskTier::High, Provenance::Live));
        assert_eq!(tier("rudraprayag"), (RiskTier::Medium, Provenance::Live));
        assert_eq!(tier("tehri-garhwal"), (RiskTier::Low, Provenance::Live));
        assert_eq!(tier("chamoli"), (RiskTier::Low, Provenance::Fallback));
        assert_eq!(tier("pithoragarh"), (RiskTier::Low, Provenance::Fallback));
    }

    #[tokio::test]
    async fn test_empty_district_catalog_still_goes_live() {
        let catalog =
            HazardCatalog::from_sources(crate::lake::LAKES_CSV, "[]").unwrap();
        let fetcher = RainfallFetcher::new(ScriptedSource::default(), DEFAULT_TIMEOUT);
        let status = StatusSignal::new();
        let load = load_flood_risk(&fetcher, &catalog, &status).await.unwrap();
        assert!(load.snapshot.is_complete());
        assert!(load.districts.is_empty());
        assert_eq!(status.current(), LoadStatus::Complete);
    }
}
